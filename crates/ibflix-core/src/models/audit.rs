//! Audit log domain model.
//!
//! Entries are append-only: once written they are never updated or
//! deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Action tag recorded when a user is added.
pub const ACTION_ADD_USER: &str = "add_user";
/// Action tag recorded when a user's role or active flag changes.
pub const ACTION_UPDATE_PERMISSION: &str = "update_permission";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: Uuid,
    /// `None` when the recording action could not attribute the change to
    /// an organization.
    pub org_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub action: String,
    /// Always a JSON object.
    pub metadata: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAuditLogEntry {
    pub org_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub action: String,
    pub metadata: serde_json::Value,
}
