//! Academy progress model.
//!
//! Only the validated shape is defined here; academy persistence is handled
//! outside this workspace.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStatus {
    Started,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressCandidate {
    pub user_id: String,
    pub class_id: String,
    pub status: String,
    pub progress_pct: f64,
}

/// Progress of a user through one academy class.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassProgress {
    pub user_id: String,
    pub class_id: String,
    pub status: ProgressStatus,
    /// Percentage in `[0, 100]`.
    pub progress_pct: f64,
}
