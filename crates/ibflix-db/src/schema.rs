//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! UUIDs are stored as strings. Enums are stored as strings with
//! ASSERT constraints for validation.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1: organizations, enterprise users, audit log
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Organizations
-- =======================================================================
DEFINE TABLE organization SCHEMAFULL;
DEFINE FIELD name ON TABLE organization TYPE string;
DEFINE FIELD plan ON TABLE organization TYPE string \
    ASSERT $value IN ['starter', 'pro', 'corporate'];
DEFINE FIELD domain ON TABLE organization TYPE option<string>;
DEFINE FIELD created_at ON TABLE organization TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE organization TYPE datetime \
    DEFAULT time::now();

-- =======================================================================
-- Enterprise users (organization scope)
-- =======================================================================
-- org_id is a plain reference: no foreign-key check, and email is
-- deliberately not unique.
DEFINE TABLE enterprise_user SCHEMAFULL;
DEFINE FIELD org_id ON TABLE enterprise_user TYPE string;
DEFINE FIELD name ON TABLE enterprise_user TYPE string;
DEFINE FIELD email ON TABLE enterprise_user TYPE string;
DEFINE FIELD role ON TABLE enterprise_user TYPE string \
    ASSERT $value IN ['admin', 'analista', 'colaborador', \
    'financeiro', 'treinamento'];
DEFINE FIELD is_active ON TABLE enterprise_user TYPE bool DEFAULT true;
DEFINE FIELD created_at ON TABLE enterprise_user TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE enterprise_user TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_enterprise_user_org ON TABLE enterprise_user \
    COLUMNS org_id;

-- =======================================================================
-- Audit Log (append-only)
-- =======================================================================
DEFINE TABLE audit_log SCHEMAFULL
    PERMISSIONS
        FOR create FULL
        FOR select FULL
        FOR update NONE
        FOR delete NONE;
-- Table permissions only bind record-level users. Root and embedded
-- sessions are held to append-only by READONLY fields and the event below.
DEFINE FIELD org_id ON TABLE audit_log TYPE option<string> READONLY;
DEFINE FIELD user_id ON TABLE audit_log TYPE option<string> READONLY;
DEFINE FIELD action ON TABLE audit_log TYPE string READONLY;
DEFINE FIELD metadata ON TABLE audit_log TYPE object FLEXIBLE \
    DEFAULT {} READONLY;
DEFINE FIELD timestamp ON TABLE audit_log TYPE datetime \
    DEFAULT time::now() READONLY;
DEFINE EVENT audit_log_append_only ON TABLE audit_log \
    WHEN $event = 'DELETE' THEN { THROW 'audit_log is append-only' };
DEFINE INDEX idx_audit_org_time ON TABLE audit_log \
    COLUMNS org_id, timestamp;
DEFINE INDEX idx_audit_user ON TABLE audit_log \
    COLUMNS user_id;
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Run all pending migrations against the given SurrealDB client.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    let mut result = db
        .query("SELECT version FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version <= current_version {
            continue;
        }

        info!(
            version = migration.version,
            name = migration.name,
            "Applying migration"
        );
        db.query(migration.sql).await?.check().map_err(|e| {
            DbError::Migration(format!(
                "Migration v{} '{}' failed: {}",
                migration.version, migration.name, e,
            ))
        })?;

        db.query(
            "CREATE _migration SET version = $version, \
             name = $name",
        )
        .bind(("version", migration.version))
        .bind(("name", migration.name))
        .await?
        .check()
        .map_err(|e| {
            DbError::Migration(format!(
                "Failed to record migration v{}: {}",
                migration.version, e,
            ))
        })?;

        info!(
            version = migration.version,
            "Migration applied successfully"
        );
    }

    Ok(())
}

/// Returns the raw schema DDL for version 1.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_v1_defines_every_table() {
        for table in ["organization", "enterprise_user", "audit_log"] {
            assert!(
                SCHEMA_V1.contains(&format!("DEFINE TABLE {table} SCHEMAFULL")),
                "missing table {table}"
            );
        }
    }

    #[test]
    fn role_assertion_lists_every_role() {
        for role in ibflix_core::models::role::Role::ALL {
            assert!(
                SCHEMA_V1.contains(&format!("'{}'", role.as_str())),
                "role {role} missing from schema assertion"
            );
        }
    }

    #[test]
    fn audit_log_fields_are_readonly() {
        for field in ["org_id", "user_id", "action", "metadata", "timestamp"] {
            let prefix = format!("DEFINE FIELD {field} ON TABLE audit_log");
            let definition = SCHEMA_V1
                .lines()
                .find(|l| l.starts_with(&prefix))
                .unwrap_or_else(|| panic!("missing audit_log.{field}"));
            assert!(definition.contains("READONLY"), "audit_log.{field} is writable");
        }
    }

    #[test]
    fn migrations_are_ordered() {
        for window in MIGRATIONS.windows(2) {
            assert!(
                window[0].version < window[1].version,
                "Migrations must be in ascending version order"
            );
        }
    }
}
