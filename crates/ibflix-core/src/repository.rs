//! Repository trait definitions for data access abstraction.
//!
//! These traits are the only view the domain has of the document store.
//! All operations are async; implementations live in `ibflix-db`.

use uuid::Uuid;

use crate::error::IbflixResult;
use crate::models::{
    audit::{AuditLogEntry, CreateAuditLogEntry},
    organization::{CreateOrganization, Organization},
    role::Role,
    user::{CreateUser, User},
};

// ---------------------------------------------------------------------------
// Organizations
// ---------------------------------------------------------------------------

pub trait OrganizationRepository: Send + Sync {
    fn create(
        &self,
        input: CreateOrganization,
    ) -> impl Future<Output = IbflixResult<Organization>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = IbflixResult<Organization>> + Send;
}

// ---------------------------------------------------------------------------
// Enterprise users (organization-scoped)
// ---------------------------------------------------------------------------

pub trait UserRepository: Send + Sync {
    fn create(&self, input: CreateUser) -> impl Future<Output = IbflixResult<User>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = IbflixResult<User>> + Send;
    /// All users of an organization in insertion order.
    fn list_by_org(&self, org_id: Uuid) -> impl Future<Output = IbflixResult<Vec<User>>> + Send;
    /// Set `role`, and `is_active` when given, on a single user.
    ///
    /// Returns the number of matched records: `0` when no user has this id.
    fn update_permission(
        &self,
        id: Uuid,
        role: Role,
        is_active: Option<bool>,
    ) -> impl Future<Output = IbflixResult<u64>> + Send;
}

// ---------------------------------------------------------------------------
// Audit (append-only)
// ---------------------------------------------------------------------------

/// Query filters for audit log entries.
#[derive(Debug, Clone, Default)]
pub struct AuditLogFilter {
    pub org_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub action: Option<String>,
}

impl AuditLogFilter {
    pub fn for_org(org_id: Uuid) -> Self {
        Self {
            org_id: Some(org_id),
            ..Default::default()
        }
    }
}

pub trait AuditLogRepository: Send + Sync {
    /// Append a new audit log entry. No update or delete operations exist.
    fn append(
        &self,
        input: CreateAuditLogEntry,
    ) -> impl Future<Output = IbflixResult<AuditLogEntry>> + Send;
    /// Entries matching `filter`, newest first, at most `limit` of them.
    fn list(
        &self,
        filter: AuditLogFilter,
        limit: u64,
    ) -> impl Future<Output = IbflixResult<Vec<AuditLogEntry>>> + Send;
}
