//! Domain models for IB FLIX.
//!
//! Each persisted entity comes with the command type used to create or
//! mutate it. Persistence details live in `ibflix-db`.

pub mod academy;
pub mod audit;
pub mod organization;
pub mod permission;
pub mod role;
pub mod user;
