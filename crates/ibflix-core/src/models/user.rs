//! Enterprise user domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::role::Role;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    /// Owning organization. Trusted as given, not checked against the
    /// organization table.
    pub org_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw, unvalidated input for creating a user.
///
/// Turned into a [`CreateUser`] by
/// [`validate_user`](crate::validation::validate_user).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCandidate {
    pub org_id: Uuid,
    pub name: String,
    pub email: String,
    /// Role tag; the default role applies when absent.
    pub role: Option<String>,
    /// Defaults to `true` when absent.
    pub is_active: Option<bool>,
}

/// A validated request to create a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub org_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
}
