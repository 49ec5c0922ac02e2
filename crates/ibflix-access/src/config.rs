//! Access control configuration.

use ibflix_core::models::role::Role;

/// Configuration shared by the access services.
#[derive(Debug, Clone)]
pub struct AccessConfig {
    /// Role assigned by AddUser when the caller supplies none
    /// (default: `colaborador`).
    pub default_role: Role,
    /// Number of audit entries returned when the caller gives no limit
    /// (default: 100).
    pub audit_default_limit: u64,
    /// Upper bound applied to any requested audit limit (default: 1000).
    pub audit_max_limit: u64,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            default_role: Role::Collaborator,
            audit_default_limit: 100,
            audit_max_limit: 1000,
        }
    }
}

impl AccessConfig {
    /// Resolve the effective audit page size for a request.
    pub fn audit_limit(&self, requested: Option<u64>) -> u64 {
        requested
            .unwrap_or(self.audit_default_limit)
            .min(self.audit_max_limit)
    }
}
