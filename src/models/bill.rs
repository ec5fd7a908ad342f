//! Bill model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::enums::{PaymentMode, PaymentStatus};

/// Bill record as persisted in the `billing` collection.
///
/// Keyed by `bill_number`, which is minute-granular; two bills generated
/// within the same calendar minute collide and the later write wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: String,
    /// `BILL-<YYYYMMDD>-<HHMM>` of the generation instant
    pub bill_number: String,
    pub rental_id: String,
    pub vehicle_name: String,
    pub customer_name: String,
    /// Snapshot of the rental's `totalRent`, whole currency units
    pub total_amount: i64,
    pub amount_paid: i64,
    /// Derived but persisted: `totalAmount - amountPaid`
    pub due_amount: i64,
    pub status: PaymentStatus,
    pub payment_mode: PaymentMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create bill request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBill {
    #[validate(length(min = 1))]
    pub rental_id: String,
    #[serde(default)]
    pub payment_mode: PaymentMode,
    /// Amount collected up front; status is derived, not taken from the caller
    #[validate(range(min = 0))]
    #[serde(default)]
    pub amount_paid: i64,
    #[serde(default)]
    pub notes: Option<String>,
}
