//! Command-line and environment configuration.
//!
//! Every flag falls back to an environment variable, and CLI arguments
//! override the environment.

use clap::{Parser, ValueEnum};
use ibflix_access::AccessConfig;
use ibflix_core::models::role::Role;
use ibflix_db::DbConfig;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum LogFormat {
    /// JSON lines, for log aggregation.
    #[default]
    Json,
    /// Human-readable text.
    Text,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "ibflix", about = "IB FLIX backend", version)]
pub struct Cli {
    /// SurrealDB WebSocket address.
    #[arg(long, env = "DATABASE_URL", default_value = "127.0.0.1:8000")]
    pub database_url: String,

    /// SurrealDB namespace.
    #[arg(long, env = "DATABASE_NAMESPACE", default_value = "ibflix")]
    pub database_namespace: String,

    /// SurrealDB database name.
    #[arg(long, env = "DATABASE_NAME", default_value = "main")]
    pub database_name: String,

    /// Root username for SurrealDB.
    #[arg(long, env = "DATABASE_USER", default_value = "root")]
    pub database_user: String,

    /// Root password for SurrealDB.
    #[arg(long, env = "DATABASE_PASSWORD", default_value = "root", hide_env_values = true)]
    pub database_password: String,

    /// Role given to new users when the request names none.
    #[arg(
        long,
        env = "IBFLIX_DEFAULT_ROLE",
        default_value = "colaborador",
        value_parser = parse_role
    )]
    pub default_role: Role,

    /// Audit entries returned when the request gives no limit.
    #[arg(long, env = "IBFLIX_AUDIT_DEFAULT_LIMIT", default_value_t = 100)]
    pub audit_default_limit: u64,

    /// Upper bound for any requested audit limit.
    #[arg(long, env = "IBFLIX_AUDIT_MAX_LIMIT", default_value_t = 1000)]
    pub audit_max_limit: u64,

    /// Log output format.
    #[arg(long, env = "IBFLIX_LOG_FORMAT", value_enum, default_value_t = LogFormat::Json)]
    pub log_format: LogFormat,
}

fn parse_role(raw: &str) -> Result<Role, String> {
    raw.parse::<Role>().map_err(|e| e.to_string())
}

impl Cli {
    pub fn db_config(&self) -> DbConfig {
        DbConfig {
            url: self.database_url.clone(),
            namespace: self.database_namespace.clone(),
            database: self.database_name.clone(),
            username: self.database_user.clone(),
            password: self.database_password.clone(),
        }
    }

    pub fn access_config(&self) -> AccessConfig {
        AccessConfig {
            default_role: self.default_role,
            audit_default_limit: self.audit_default_limit,
            audit_max_limit: self.audit_max_limit,
        }
    }
}
