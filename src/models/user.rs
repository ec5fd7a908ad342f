//! User profile model (role record in the `users` collection)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::Role;

/// Role record keyed by the identity provider's user id.
/// Written on first sign-in with the configured default role.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub display_name: String,
    #[serde(default)]
    pub role: Role,
    pub created_at: DateTime<Utc>,
}
