//! Organization domain model.
//!
//! Organizations are the tenants of the platform. Every enterprise user and
//! every audit entry is scoped to one of them by reference.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Commercial plan an organization is subscribed to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    #[default]
    Starter,
    Pro,
    Corporate,
}

impl Plan {
    pub fn as_str(self) -> &'static str {
        match self {
            Plan::Starter => "starter",
            Plan::Pro => "pro",
            Plan::Corporate => "corporate",
        }
    }
}

/// A customer organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: Uuid,
    /// Human-readable name.
    pub name: String,
    pub plan: Plan,
    /// Email domain owned by the organization (e.g., `acme.com`).
    pub domain: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a new organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrganization {
    pub name: String,
    #[serde(default)]
    pub plan: Plan,
    pub domain: Option<String>,
}
