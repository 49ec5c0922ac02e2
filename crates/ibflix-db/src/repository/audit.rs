//! SurrealDB implementation of [`AuditLogRepository`].
//!
//! The `audit_log` table denies UPDATE and DELETE at the schema level, so
//! this repository can only append and read.

use chrono::{DateTime, Utc};
use ibflix_core::error::IbflixResult;
use ibflix_core::models::audit::{AuditLogEntry, CreateAuditLogEntry};
use ibflix_core::repository::{AuditLogFilter, AuditLogRepository};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use super::parse_uuid;
use crate::error::DbError;

const ENTITY: &str = "audit_log";

#[derive(Debug, SurrealValue)]
struct AuditRow {
    org_id: Option<String>,
    user_id: Option<String>,
    action: String,
    metadata: serde_json::Value,
    timestamp: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct AuditRowWithId {
    record_id: String,
    org_id: Option<String>,
    user_id: Option<String>,
    action: String,
    metadata: serde_json::Value,
    timestamp: DateTime<Utc>,
}

fn parse_optional_uuid(field: &str, raw: Option<&str>) -> Result<Option<Uuid>, DbError> {
    raw.map(|s| parse_uuid(ENTITY, field, s)).transpose()
}

impl AuditRow {
    fn into_entry(self, id: Uuid) -> Result<AuditLogEntry, DbError> {
        Ok(AuditLogEntry {
            id,
            org_id: parse_optional_uuid("org_id", self.org_id.as_deref())?,
            user_id: parse_optional_uuid("user_id", self.user_id.as_deref())?,
            action: self.action,
            metadata: self.metadata,
            timestamp: self.timestamp,
        })
    }
}

impl AuditRowWithId {
    fn try_into_entry(self) -> Result<AuditLogEntry, DbError> {
        let id = parse_uuid(ENTITY, "record", &self.record_id)?;
        AuditRow {
            org_id: self.org_id,
            user_id: self.user_id,
            action: self.action,
            metadata: self.metadata,
            timestamp: self.timestamp,
        }
        .into_entry(id)
    }
}

/// SurrealDB implementation of the append-only audit log.
pub struct SurrealAuditLogRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> Clone for SurrealAuditLogRepository<C> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
        }
    }
}

impl<C: Connection> SurrealAuditLogRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> AuditLogRepository for SurrealAuditLogRepository<C> {
    async fn append(&self, input: CreateAuditLogEntry) -> IbflixResult<AuditLogEntry> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('audit_log', $id) SET \
                 org_id = $org_id, user_id = $user_id, \
                 action = $action, metadata = $metadata",
            )
            .bind(("id", id_str.clone()))
            .bind(("org_id", input.org_id.map(|u| u.to_string())))
            .bind(("user_id", input.user_id.map(|u| u.to_string())))
            .bind(("action", input.action))
            .bind(("metadata", input.metadata))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<AuditRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: ENTITY.into(),
            id: id_str,
        })?;

        Ok(row.into_entry(id)?)
    }

    async fn list(&self, filter: AuditLogFilter, limit: u64) -> IbflixResult<Vec<AuditLogEntry>> {
        let mut conditions = Vec::new();
        if filter.org_id.is_some() {
            conditions.push("org_id = $org_id");
        }
        if filter.user_id.is_some() {
            conditions.push("user_id = $user_id");
        }
        if filter.action.is_some() {
            conditions.push("action = $action");
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {} ", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT meta::id(id) AS record_id, * FROM audit_log \
             {where_clause}ORDER BY timestamp DESC LIMIT $limit"
        );

        let mut builder = self.db.query(&query).bind(("limit", limit));

        if let Some(org_id) = filter.org_id {
            builder = builder.bind(("org_id", org_id.to_string()));
        }
        if let Some(user_id) = filter.user_id {
            builder = builder.bind(("user_id", user_id.to_string()));
        }
        if let Some(action) = filter.action {
            builder = builder.bind(("action", action));
        }

        let mut result = builder.await.map_err(DbError::from)?;
        let rows: Vec<AuditRowWithId> = result.take(0).map_err(DbError::from)?;

        let entries = rows
            .into_iter()
            .map(|row| row.try_into_entry())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(entries)
    }
}
