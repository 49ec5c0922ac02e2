//! Audit recorder.
//!
//! Appends one immutable entry per committed mutation. Recording is
//! best-effort from the caller's point of view: a failed write is reported
//! as an [`AuditStatus::Failed`], never by undoing the mutation that
//! triggered it.

use ibflix_core::error::IbflixResult;
use ibflix_core::models::audit::{AuditLogEntry, CreateAuditLogEntry};
use ibflix_core::repository::AuditLogRepository;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use uuid::Uuid;

/// Outcome of the audit write that follows a mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AuditStatus {
    Recorded { entry_id: Uuid },
    Failed { reason: String },
}

impl AuditStatus {
    pub fn is_recorded(&self) -> bool {
        matches!(self, AuditStatus::Recorded { .. })
    }
}

pub struct AuditRecorder<A: AuditLogRepository> {
    audit_repo: A,
}

impl<A: AuditLogRepository> AuditRecorder<A> {
    pub fn new(audit_repo: A) -> Self {
        Self { audit_repo }
    }

    /// Persist one audit entry. The store assigns the timestamp.
    ///
    /// Metadata that is not a JSON object is stored as `{"value": ...}`.
    pub async fn record(
        &self,
        org_id: Option<Uuid>,
        user_id: Option<Uuid>,
        action: &str,
        metadata: serde_json::Value,
    ) -> IbflixResult<AuditLogEntry> {
        let metadata = match metadata {
            serde_json::Value::Object(_) => metadata,
            serde_json::Value::Null => serde_json::Value::Object(Default::default()),
            other => serde_json::json!({ "value": other }),
        };

        let entry = self
            .audit_repo
            .append(CreateAuditLogEntry {
                org_id,
                user_id,
                action: action.to_string(),
                metadata,
            })
            .await?;

        debug!(entry_id = %entry.id, action, "Audit entry recorded");
        Ok(entry)
    }

    /// Record an entry after a committed mutation, converting a failure
    /// into a reportable status instead of an error.
    pub(crate) async fn record_after_commit(
        &self,
        org_id: Option<Uuid>,
        user_id: Option<Uuid>,
        action: &str,
        metadata: serde_json::Value,
    ) -> AuditStatus {
        match self.record(org_id, user_id, action, metadata).await {
            Ok(entry) => AuditStatus::Recorded { entry_id: entry.id },
            Err(e) => {
                error!(
                    action,
                    org_id = ?org_id,
                    user_id = ?user_id,
                    error = %e,
                    "Audit write failed after committed mutation"
                );
                AuditStatus::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}
