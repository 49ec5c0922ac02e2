//! Access control manager — user creation and permission updates.

use ibflix_core::error::{IbflixError, IbflixResult};
use ibflix_core::models::audit::{ACTION_ADD_USER, ACTION_UPDATE_PERMISSION};
use ibflix_core::models::permission::PermissionUpdateCandidate;
use ibflix_core::models::role::Role;
use ibflix_core::models::user::{User, UserCandidate};
use ibflix_core::repository::{AuditLogRepository, UserRepository};
use ibflix_core::validation::{validate_permission_update, validate_user};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::audit::{AuditRecorder, AuditStatus};
use crate::config::AccessConfig;

/// Result of a successful AddUser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddUserOutput {
    pub user_id: Uuid,
    pub audit: AuditStatus,
}

/// Result of a successful UpdatePermission: the fields that were applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePermissionOutput {
    pub user_id: Uuid,
    pub role: Role,
    /// `None` when the active flag was left untouched.
    pub is_active: Option<bool>,
    pub audit: AuditStatus,
}

/// Access control manager.
///
/// Every mutation is validated first, committed to the user repository,
/// and only then audited. Audit failures never undo the mutation.
pub struct AccessControlManager<U: UserRepository, A: AuditLogRepository> {
    user_repo: U,
    recorder: AuditRecorder<A>,
    config: AccessConfig,
}

impl<U: UserRepository, A: AuditLogRepository> AccessControlManager<U, A> {
    pub fn new(user_repo: U, audit_repo: A, config: AccessConfig) -> Self {
        Self {
            user_repo,
            recorder: AuditRecorder::new(audit_repo),
            config,
        }
    }

    /// Create an enterprise user.
    ///
    /// No duplicate-email check is performed.
    pub async fn add_user(&self, candidate: UserCandidate) -> IbflixResult<AddUserOutput> {
        let input = validate_user(candidate, self.config.default_role)?;

        let org_id = input.org_id;
        let email = input.email.clone();
        let user = self.user_repo.create(input).await?;

        info!(user_id = %user.id, org_id = %org_id, role = %user.role, "User added");

        let audit = self
            .recorder
            .record_after_commit(Some(org_id), None, ACTION_ADD_USER, json!({ "email": email }))
            .await;

        Ok(AddUserOutput {
            user_id: user.id,
            audit,
        })
    }

    /// Set a user's role, and active flag when given.
    ///
    /// The audit entry carries no organization: the update path does not
    /// look the user up.
    pub async fn update_permission(
        &self,
        candidate: PermissionUpdateCandidate,
    ) -> IbflixResult<UpdatePermissionOutput> {
        let update = validate_permission_update(candidate)?;

        let matched = self
            .user_repo
            .update_permission(update.user_id, update.role, update.is_active)
            .await?;
        if matched == 0 {
            return Err(IbflixError::not_found("enterprise_user", update.user_id));
        }

        info!(
            user_id = %update.user_id,
            role = %update.role,
            is_active = ?update.is_active,
            "Permission updated"
        );

        let mut applied = serde_json::Map::new();
        applied.insert("role".into(), json!(update.role));
        if let Some(is_active) = update.is_active {
            applied.insert("is_active".into(), json!(is_active));
        }

        let audit = self
            .recorder
            .record_after_commit(
                None,
                Some(update.user_id),
                ACTION_UPDATE_PERMISSION,
                serde_json::Value::Object(applied),
            )
            .await;

        Ok(UpdatePermissionOutput {
            user_id: update.user_id,
            role: update.role,
            is_active: update.is_active,
            audit,
        })
    }

    pub async fn get_user(&self, user_id: Uuid) -> IbflixResult<User> {
        self.user_repo.get_by_id(user_id).await
    }

    /// All users of an organization, in insertion order.
    pub async fn list_users(&self, org_id: Uuid) -> IbflixResult<Vec<User>> {
        self.user_repo.list_by_org(org_id).await
    }
}
