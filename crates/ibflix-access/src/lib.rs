//! IB FLIX Access — enterprise user management, permission updates,
//! audit recording and read-side queries.
//!
//! Every service is generic over the `ibflix-core` repository traits so
//! that this crate has no dependency on the database crate.

pub mod audit;
pub mod config;
pub mod manager;
pub mod query;

pub use audit::{AuditRecorder, AuditStatus};
pub use config::AccessConfig;
pub use manager::{AccessControlManager, AddUserOutput, UpdatePermissionOutput};
pub use query::QueryFacade;
