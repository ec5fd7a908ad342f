//! Rental pricing and payment arithmetic.
//!
//! All amounts are whole, non-negative currency units.

use chrono::NaiveDate;

use crate::{
    error::{AppError, AppResult},
    models::enums::PaymentStatus,
    models::rental::AdditionalCharges,
};

/// Rental duration in days, counting both endpoints.
/// An end date before the start date is rejected.
pub fn rental_days(start_date: NaiveDate, end_date: NaiveDate) -> AppResult<i64> {
    if end_date < start_date {
        return Err(AppError::Computation(format!(
            "end date {} precedes start date {}",
            end_date, start_date
        )));
    }
    Ok((end_date - start_date).num_days() + 1)
}

/// Total rent: days x daily rate + itemized surcharges
pub fn compute_total_rent(
    start_date: NaiveDate,
    end_date: NaiveDate,
    daily_rate: i64,
    charges: &AdditionalCharges,
) -> AppResult<i64> {
    let days = rental_days(start_date, end_date)?;
    Ok(days * daily_rate + charges.total())
}

/// Payment status from amount paid vs. total.
/// Overpayment still resolves to `Paid`; the due amount is conceptually
/// clamped at zero.
pub fn derive_payment_status(total_amount: i64, amount_paid: i64) -> PaymentStatus {
    if total_amount - amount_paid <= 0 {
        PaymentStatus::Paid
    } else if amount_paid > 0 {
        PaymentStatus::Partial
    } else {
        PaymentStatus::Pending
    }
}
