//! IB FLIX Core — domain models, error taxonomy, repository ports and
//! input validation shared by every other crate.

pub mod error;
pub mod models;
pub mod repository;
pub mod validation;
