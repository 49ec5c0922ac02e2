//! Read-side queries over users and the audit log, scoped by organization.

use ibflix_core::error::IbflixResult;
use ibflix_core::models::audit::AuditLogEntry;
use ibflix_core::models::user::User;
use ibflix_core::repository::{AuditLogFilter, AuditLogRepository, UserRepository};
use uuid::Uuid;

use crate::config::AccessConfig;

pub struct QueryFacade<U: UserRepository, A: AuditLogRepository> {
    user_repo: U,
    audit_repo: A,
    config: AccessConfig,
}

impl<U: UserRepository, A: AuditLogRepository> QueryFacade<U, A> {
    pub fn new(user_repo: U, audit_repo: A, config: AccessConfig) -> Self {
        Self {
            user_repo,
            audit_repo,
            config,
        }
    }

    pub async fn list_users(&self, org_id: Uuid) -> IbflixResult<Vec<User>> {
        self.user_repo.list_by_org(org_id).await
    }

    /// Audit entries of an organization, newest first.
    ///
    /// `limit` defaults to the configured page size and is clamped to the
    /// configured maximum.
    pub async fn list_audit_log(
        &self,
        org_id: Uuid,
        limit: Option<u64>,
    ) -> IbflixResult<Vec<AuditLogEntry>> {
        let limit = self.config.audit_limit(limit);
        if limit == 0 {
            return Ok(Vec::new());
        }
        self.audit_repo
            .list(AuditLogFilter::for_org(org_id), limit)
            .await
    }
}
