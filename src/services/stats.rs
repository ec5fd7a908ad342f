//! Dashboard statistics.
//!
//! Pure folds over collection snapshots, recomputed in full on every
//! change. No memoization; the dataset is assumed to fit in memory.

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::{
    error::AppResult,
    models::{
        enums::{PaymentStatus, RentalStatus, VehicleStatus},
        Bill, Customer, Rental, Vehicle,
    },
    store::{decode_records, Collection, SharedStore},
};

/// Headline numbers for the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_vehicles: usize,
    pub available_vehicles: usize,
    pub active_rentals: usize,
    pub total_customers: usize,
    pub pending_payments: usize,
    /// Sum of paid bill totals created on the local calendar day
    pub revenue_today: i64,
}

/// Fold raw collections into dashboard statistics as of `today`
pub fn dashboard_stats(
    vehicles: &[Vehicle],
    rentals: &[Rental],
    customers: &[Customer],
    bills: &[Bill],
    today: NaiveDate,
) -> DashboardStats {
    DashboardStats {
        total_vehicles: vehicles.len(),
        available_vehicles: vehicles
            .iter()
            .filter(|v| v.status == VehicleStatus::Available)
            .count(),
        active_rentals: rentals
            .iter()
            .filter(|r| r.status == RentalStatus::Active)
            .count(),
        total_customers: customers.len(),
        pending_payments: pending_payment_count(bills),
        revenue_today: revenue_for_day(bills, today),
    }
}

pub fn pending_payment_count(bills: &[Bill]) -> usize {
    bills
        .iter()
        .filter(|b| b.status == PaymentStatus::Pending)
        .count()
}

/// Revenue for a local calendar day: paid bills created on that day
pub fn revenue_for_day(bills: &[Bill], day: NaiveDate) -> i64 {
    bills
        .iter()
        .filter(|b| {
            b.status == PaymentStatus::Paid
                && b.created_at.with_timezone(&Local).date_naive() == day
        })
        .map(|b| b.total_amount)
        .sum()
}

/// Most recent rentals by creation time, newest first, capped at five
pub fn recent_rentals(rentals: &[Rental]) -> Vec<Rental> {
    let mut recent: Vec<Rental> = rentals.to_vec();
    recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    recent.truncate(5);
    recent
}

#[derive(Clone)]
pub struct StatsService {
    store: SharedStore,
}

impl StatsService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Dashboard statistics from the current store snapshots
    pub async fn dashboard(&self) -> AppResult<DashboardStats> {
        let vehicles: Vec<Vehicle> =
            decode_records(self.store.snapshot(Collection::Vehicles).await?)?;
        let rentals: Vec<Rental> = decode_records(self.store.snapshot(Collection::Rentals).await?)?;
        let customers: Vec<Customer> =
            decode_records(self.store.snapshot(Collection::Customers).await?)?;
        let bills: Vec<Bill> = decode_records(self.store.snapshot(Collection::Billing).await?)?;

        Ok(dashboard_stats(
            &vehicles,
            &rentals,
            &customers,
            &bills,
            Local::now().date_naive(),
        ))
    }

    /// Five most recently created rentals
    pub async fn recent_activity(&self) -> AppResult<Vec<Rental>> {
        let rentals: Vec<Rental> = decode_records(self.store.snapshot(Collection::Rentals).await?)?;
        Ok(recent_rentals(&rentals))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::PaymentMode;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn bill(status: PaymentStatus, total: i64, created_at: DateTime<Utc>) -> Bill {
        Bill {
            id: "BILL-20250307-0905".to_string(),
            bill_number: "BILL-20250307-0905".to_string(),
            rental_id: "RENTAL_X".to_string(),
            vehicle_name: "JCB 3DX".to_string(),
            customer_name: "Ramesh".to_string(),
            total_amount: total,
            amount_paid: if status == PaymentStatus::Paid { total } else { 0 },
            due_amount: if status == PaymentStatus::Paid { 0 } else { total },
            status,
            payment_mode: PaymentMode::Cash,
            notes: None,
            created_at,
            updated_at: None,
        }
    }

    fn rental(id: &str, created_at: DateTime<Utc>) -> Rental {
        Rental {
            id: id.to_string(),
            vehicle_id: "JCB_3DX".to_string(),
            customer_id: "CUST_919876543210".to_string(),
            vehicle_name: "JCB 3DX".to_string(),
            customer_name: "Ramesh".to_string(),
            rent_rate: 5000,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 1, 3).unwrap(),
            additional_charges: Default::default(),
            total_rent: 15_000,
            status: RentalStatus::Active,
            notes: None,
            created_at,
            completed_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn revenue_counts_only_paid_bills_on_that_day() {
        let day = Local.with_ymd_and_hms(2025, 3, 7, 10, 0, 0).unwrap();
        let other_day = Local.with_ymd_and_hms(2025, 3, 6, 10, 0, 0).unwrap();
        let bills = vec![
            bill(PaymentStatus::Paid, 15_300, day.with_timezone(&Utc)),
            bill(PaymentStatus::Pending, 9_000, day.with_timezone(&Utc)),
            bill(PaymentStatus::Paid, 4_000, other_day.with_timezone(&Utc)),
        ];
        assert_eq!(revenue_for_day(&bills, day.date_naive()), 15_300);
    }

    #[test]
    fn pending_count_matches_status() {
        let now = Utc::now();
        let bills = vec![
            bill(PaymentStatus::Pending, 100, now),
            bill(PaymentStatus::Pending, 200, now),
            bill(PaymentStatus::Partial, 300, now),
            bill(PaymentStatus::Paid, 400, now),
        ];
        assert_eq!(pending_payment_count(&bills), 2);
    }

    #[test]
    fn recent_rentals_sorts_newest_first_and_caps_at_five() {
        let base = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();
        let rentals: Vec<Rental> = (0..7)
            .map(|i| rental(&format!("R{}", i), base + Duration::hours(i)))
            .collect();
        let recent = recent_rentals(&rentals);
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].id, "R6");
        assert_eq!(recent[4].id, "R2");
    }
}
