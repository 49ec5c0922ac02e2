//! Enterprise role domain model.
//!
//! Roles form a closed set. The stored tags are the ones the product has
//! always used (`analista`, `colaborador`, ...); the English names are
//! accepted as aliases when parsing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Role {
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "analista", alias = "analyst")]
    Analyst,
    #[default]
    #[serde(rename = "colaborador", alias = "collaborator")]
    Collaborator,
    #[serde(rename = "financeiro", alias = "finance")]
    Finance,
    #[serde(rename = "treinamento", alias = "training")]
    Training,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Admin,
        Role::Analyst,
        Role::Collaborator,
        Role::Finance,
        Role::Training,
    ];

    /// The tag persisted in the store and exposed to API consumers.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Analyst => "analista",
            Role::Collaborator => "colaborador",
            Role::Finance => "financeiro",
            Role::Training => "treinamento",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0:?}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "analista" | "analyst" => Ok(Role::Analyst),
            "colaborador" | "collaborator" => Ok(Role::Collaborator),
            "financeiro" | "finance" => Ok(Role::Finance),
            "treinamento" | "training" => Ok(Role::Training),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}
