//! SurrealDB repository implementations.

mod audit;
mod organization;
mod user;

pub use audit::SurrealAuditLogRepository;
pub use organization::SurrealOrganizationRepository;
pub use user::SurrealUserRepository;

use uuid::Uuid;

use crate::error::DbError;

/// Parse a UUID stored as a string column.
fn parse_uuid(entity: &'static str, field: &str, raw: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(raw).map_err(|e| DbError::Decode {
        entity,
        reason: format!("invalid {field} UUID {raw:?}: {e}"),
    })
}
