//! Permission update command.
//!
//! Not an entity: a permission update only drives a mutation of a
//! [`User`](super::user::User)'s role and active flag.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::role::Role;

/// Raw, unvalidated permission update as received from a caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionUpdateCandidate {
    pub user_id: Uuid,
    pub role: String,
    pub is_active: Option<bool>,
}

/// A validated permission update.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PermissionUpdate {
    pub user_id: Uuid,
    pub role: Role,
    /// `None` leaves the active flag untouched.
    pub is_active: Option<bool>,
}
