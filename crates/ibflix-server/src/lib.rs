//! IB FLIX Server — configuration and service wiring for the backend
//! process.

pub mod config;
pub mod shutdown;
pub mod state;

pub use config::{Cli, LogFormat};
pub use state::AppState;
