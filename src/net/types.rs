//! Wire DTOs for the auth service and the `profiles` / `user_roles` tables.
//!
//! DESIGN
//! ======
//! Rows are decoded leniently: `null` columns become empty strings and unknown
//! columns are ignored, so the form always sees exactly the record shape.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Deserializer, Serialize};

/// Table holding one profile row per user, keyed by `id`.
pub const PROFILES_TABLE: &str = "profiles";
/// Table mapping `user_id` to an authorization role.
pub const USER_ROLES_TABLE: &str = "user_roles";
/// Role string that grants access to the admin view.
pub const ADMIN_ROLE: &str = "admin";

/// Seconds before `expires_at` at which a session is treated as expired.
pub const EXPIRY_MARGIN_SECS: i64 = 30;

/// An authenticated user as returned by the auth service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier (UUID string).
    pub id: String,
    /// Sign-in email, if the auth service reports one.
    #[serde(default)]
    pub email: Option<String>,
}

impl User {
    /// Human-readable label for headers and the admin view.
    pub fn display_name(&self) -> &str {
        self.email.as_deref().unwrap_or(&self.id)
    }
}

/// A signed-in session from the password or refresh-token grant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Lifetime in seconds at issue time.
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// Absolute expiry in seconds since the Unix epoch.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_owned()
}

impl Session {
    /// Fill `expires_at` from `expires_in` when the service omitted it.
    #[must_use]
    pub fn with_expiry_from(mut self, now_secs: i64) -> Self {
        if self.expires_at.is_none() {
            self.expires_at = self.expires_in.map(|secs| now_secs + secs);
        }
        self
    }

    /// Whether the access token is expired (or about to be) at `now_secs`.
    ///
    /// Sessions without any expiry information are treated as live.
    pub fn is_expired(&self, now_secs: i64) -> bool {
        self.expires_at
            .is_some_and(|expires_at| expires_at - EXPIRY_MARGIN_SECS <= now_secs)
    }
}

/// Auth-state transitions delivered to `on_auth_state_change` subscribers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn,
    SignedOut,
    TokenRefreshed,
}

impl AuthEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SignedIn => "SIGNED_IN",
            Self::SignedOut => "SIGNED_OUT",
            Self::TokenRefreshed => "TOKEN_REFRESHED",
        }
    }
}

/// A `user_roles` row projected to its `role` column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
}

impl RoleRecord {
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

/// Social profile links nested under `profiles.social_links`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default, deserialize_with = "null_as_default")]
    pub linkedin: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub twitter: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub github: String,
}

/// Editable columns of a `profiles` row.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub profession: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub social_links: SocialLinks,
}

/// Full upsert payload: the owner id plus every profile column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProfileRow {
    pub id: String,
    #[serde(flatten)]
    pub profile: ProfileRecord,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
