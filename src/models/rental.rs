//! Rental model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::enums::RentalStatus;

/// Itemized surcharges on top of the base rent, in whole currency units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalCharges {
    #[validate(range(min = 0))]
    #[serde(default)]
    pub diesel: i64,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub transport: i64,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub driver_fee: i64,
}

impl AdditionalCharges {
    pub fn total(&self) -> i64 {
        self.diesel + self.transport + self.driver_fee
    }
}

/// Rental record as persisted in the `rentals` collection.
///
/// `vehicle_name`, `customer_name` and `rent_rate` are snapshots taken at
/// creation time; the store has no join capability, so later edits to the
/// referenced vehicle or customer do not flow back here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rental {
    /// Store key: `RENTAL_<vehicleId>_<customerId>_<startDate>`
    pub id: String,
    pub vehicle_id: String,
    pub customer_id: String,
    pub vehicle_name: String,
    pub customer_name: String,
    /// Daily rate snapshot, whole currency units
    pub rent_rate: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub additional_charges: AdditionalCharges,
    /// Derived but persisted: days x rate + surcharges
    pub total_rent: i64,
    pub status: RentalStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create rental request. `vehicle_id` and `customer_id` are store keys.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRental {
    #[validate(length(min = 1))]
    pub vehicle_id: String,
    #[validate(length(min = 1))]
    pub customer_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[validate(nested)]
    #[serde(default)]
    pub additional_charges: AdditionalCharges,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Partial rental update. Any change to dates or charges recomputes
/// `totalRent` against the rate snapshot.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRental {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[validate(nested)]
    pub additional_charges: Option<AdditionalCharges>,
    pub notes: Option<String>,
}
