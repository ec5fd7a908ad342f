//! Record identifier generation.
//!
//! Keys are business-derived rather than store-generated, so they must be
//! reproduced exactly against an existing data tree. All functions are pure:
//! the same inputs at the same instant yield the same key. Bill numbers are
//! minute-granular, so two bills generated within the same calendar minute
//! collide (known limitation; the write is last-write-wins).

use chrono::{DateTime, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static NON_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\D").unwrap());

/// Vehicle key: uppercased human code with whitespace runs collapsed to `_`
pub fn vehicle_key(code: &str) -> String {
    WHITESPACE
        .replace_all(code.to_uppercase().as_str(), "_")
        .into_owned()
}

/// Customer key: `CUST_` + digits of the phone number
pub fn customer_key(phone: &str) -> String {
    format!("CUST_{}", NON_DIGIT.replace_all(phone, ""))
}

/// Rental key: `RENTAL_<vehicleKey>_<customerKey>_<startDate without dashes>`
pub fn rental_key(vehicle_id: &str, customer_id: &str, start_date: NaiveDate) -> String {
    format!(
        "RENTAL_{}_{}_{}",
        vehicle_id,
        customer_id,
        start_date.format("%Y%m%d")
    )
}

/// Bill number: `BILL-<YYYYMMDD>-<HHMM>` of the generation instant
pub fn bill_number(at: DateTime<Local>) -> String {
    format!("BILL-{}", at.format("%Y%m%d-%H%M"))
}
