//! User session service.
//!
//! The identity provider itself is an external collaborator; this service
//! owns the `users` role records and the session boundary. Sign-in returns
//! an explicit [`SessionContext`] that callers pass around instead of
//! consulting global auth state; sign-out is its teardown.

use chrono::Utc;
use serde_json::json;

use crate::{
    error::{AppError, AppResult},
    models::{enums::Role, user::UserProfile},
    store::{decode_record, decode_records, Collection, SharedStore, StoreError},
};

/// Established session, valid from sign-in until sign-out
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub uid: String,
    pub email: String,
    pub display_name: String,
    pub role: Role,
}

#[derive(Clone)]
pub struct UsersService {
    store: SharedStore,
    default_role: Role,
}

impl UsersService {
    pub fn new(store: SharedStore, default_role: Role) -> Self {
        Self {
            store,
            default_role,
        }
    }

    /// Establish a session after the identity provider has authenticated
    /// the user. First sign-in writes the role record with the configured
    /// default role; later sign-ins read the stored role.
    pub async fn sign_in(
        &self,
        uid: &str,
        email: &str,
        display_name: &str,
    ) -> AppResult<SessionContext> {
        let profile = match self.store.get(Collection::Users, uid).await? {
            Some(raw) => decode_record::<UserProfile>(raw)?,
            None => {
                let profile = UserProfile {
                    id: uid.to_string(),
                    email: email.to_string(),
                    display_name: display_name.to_string(),
                    role: self.default_role,
                    created_at: Utc::now(),
                };
                let record = serde_json::to_value(&profile).map_err(StoreError::from)?;
                self.store.write(Collection::Users, uid, record).await?;
                tracing::info!(user = %uid, role = %profile.role, "first sign-in, role record created");
                profile
            }
        };

        Ok(SessionContext {
            uid: profile.id,
            email: profile.email,
            display_name: profile.display_name,
            role: profile.role,
        })
    }

    /// Tear down a session. The store holds nothing session-scoped; this
    /// is the explicit end-of-session boundary for consumers.
    pub fn sign_out(&self, session: SessionContext) {
        tracing::info!(user = %session.uid, "session ended");
    }

    pub async fn get(&self, uid: &str) -> AppResult<UserProfile> {
        let raw = self
            .store
            .get(Collection::Users, uid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", uid)))?;
        Ok(decode_record(raw)?)
    }

    pub async fn list(&self) -> AppResult<Vec<UserProfile>> {
        Ok(decode_records(self.store.snapshot(Collection::Users).await?)?)
    }

    /// Change a user's role; takes effect on their next sign-in
    pub async fn update_role(&self, uid: &str, role: Role) -> AppResult<UserProfile> {
        self.get(uid).await?;
        self.store
            .update(Collection::Users, uid, json!({ "role": role }))
            .await?;
        tracing::info!(user = %uid, %role, "role updated");
        self.get(uid).await
    }
}
