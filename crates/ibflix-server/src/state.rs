//! Service wiring.
//!
//! The process owns one database client; every repository and service
//! receives a handle to it at construction time.

use ibflix_access::{AccessConfig, AccessControlManager, QueryFacade};
use ibflix_db::repository::{
    SurrealAuditLogRepository, SurrealOrganizationRepository, SurrealUserRepository,
};
use surrealdb::{Connection, Surreal};

type UserRepo<C> = SurrealUserRepository<C>;
type AuditRepo<C> = SurrealAuditLogRepository<C>;

/// Services handed to the routing layer.
pub struct AppState<C: Connection> {
    pub organizations: SurrealOrganizationRepository<C>,
    pub access: AccessControlManager<UserRepo<C>, AuditRepo<C>>,
    pub queries: QueryFacade<UserRepo<C>, AuditRepo<C>>,
}

impl<C: Connection> AppState<C> {
    pub fn new(db: &Surreal<C>, config: AccessConfig) -> Self {
        let user_repo = SurrealUserRepository::new(db.clone());
        let audit_repo = SurrealAuditLogRepository::new(db.clone());

        Self {
            organizations: SurrealOrganizationRepository::new(db.clone()),
            access: AccessControlManager::new(
                user_repo.clone(),
                audit_repo.clone(),
                config.clone(),
            ),
            queries: QueryFacade::new(user_repo, audit_repo, config),
        }
    }
}
