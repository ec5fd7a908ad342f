//! Vehicle model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::enums::VehicleStatus;

/// Vehicle record as persisted in the `vehicles` collection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    /// Store key, derived from the human vehicle code
    pub id: String,
    /// Human-entered vehicle code (e.g. "JCB 3DX")
    pub vehicle_id: String,
    pub model: String,
    #[serde(rename = "type")]
    pub vehicle_type: String,
    pub condition: String,
    pub status: VehicleStatus,
    /// Daily rate in whole currency units
    pub rent_rate: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create vehicle request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicle {
    #[validate(length(min = 1))]
    pub vehicle_id: String,
    #[validate(length(min = 1))]
    pub model: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1))]
    pub vehicle_type: String,
    #[serde(default = "default_condition")]
    pub condition: String,
    #[serde(default)]
    pub status: VehicleStatus,
    #[validate(range(min = 0))]
    pub rent_rate: i64,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_condition() -> String {
    "Good".to_string()
}

/// Partial vehicle update; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicle {
    pub model: Option<String>,
    #[serde(rename = "type")]
    pub vehicle_type: Option<String>,
    pub condition: Option<String>,
    pub status: Option<VehicleStatus>,
    #[validate(range(min = 0))]
    pub rent_rate: Option<i64>,
    pub description: Option<String>,
}
