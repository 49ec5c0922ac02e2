//! SurrealDB implementation of [`UserRepository`].
//!
//! Users live in the `enterprise_user` table. No uniqueness is enforced on
//! email, and `org_id` is stored as given.

use chrono::{DateTime, Utc};
use ibflix_core::error::IbflixResult;
use ibflix_core::models::role::Role;
use ibflix_core::models::user::{CreateUser, User};
use ibflix_core::repository::UserRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::debug;
use uuid::Uuid;

use super::parse_uuid;
use crate::error::DbError;

const ENTITY: &str = "enterprise_user";

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct UserRow {
    org_id: String,
    name: String,
    email: String,
    role: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct UserRowWithId {
    record_id: String,
    org_id: String,
    name: String,
    email: String,
    role: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_role(s: &str) -> Result<Role, DbError> {
    s.parse::<Role>().map_err(|e| DbError::Decode {
        entity: ENTITY,
        reason: e.to_string(),
    })
}

impl UserRow {
    fn into_user(self, id: Uuid) -> Result<User, DbError> {
        Ok(User {
            id,
            org_id: parse_uuid(ENTITY, "org_id", &self.org_id)?,
            name: self.name,
            email: self.email,
            role: parse_role(&self.role)?,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl UserRowWithId {
    fn try_into_user(self) -> Result<User, DbError> {
        let id = parse_uuid(ENTITY, "record", &self.record_id)?;
        UserRow {
            org_id: self.org_id,
            name: self.name,
            email: self.email,
            role: self.role,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
        .into_user(id)
    }
}

/// SurrealDB implementation of the enterprise user repository.
pub struct SurrealUserRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> Clone for SurrealUserRepository<C> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
        }
    }
}

impl<C: Connection> SurrealUserRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> UserRepository for SurrealUserRepository<C> {
    async fn create(&self, input: CreateUser) -> IbflixResult<User> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('enterprise_user', $id) SET \
                 org_id = $org_id, name = $name, email = $email, \
                 role = $role, is_active = $is_active",
            )
            .bind(("id", id_str.clone()))
            .bind(("org_id", input.org_id.to_string()))
            .bind(("name", input.name))
            .bind(("email", input.email))
            .bind(("role", input.role.as_str().to_string()))
            .bind(("is_active", input.is_active))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: ENTITY.into(),
            id: id_str,
        })?;

        Ok(row.into_user(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> IbflixResult<User> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('enterprise_user', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: ENTITY.into(),
            id: id_str,
        })?;

        Ok(row.into_user(id)?)
    }

    async fn list_by_org(&self, org_id: Uuid) -> IbflixResult<Vec<User>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM enterprise_user \
                 WHERE org_id = $org_id \
                 ORDER BY created_at ASC",
            )
            .bind(("org_id", org_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRowWithId> = result.take(0).map_err(DbError::from)?;

        let users = rows
            .into_iter()
            .map(|row| row.try_into_user())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(users)
    }

    async fn update_permission(
        &self,
        id: Uuid,
        role: Role,
        is_active: Option<bool>,
    ) -> IbflixResult<u64> {
        let mut sets = vec!["role = $role"];
        if is_active.is_some() {
            sets.push("is_active = $is_active");
        }
        sets.push("updated_at = time::now()");

        // UPDATE on a record id only touches an existing record, so the
        // number of returned rows is the matched count.
        let query = format!(
            "UPDATE type::record('enterprise_user', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self
            .db
            .query(&query)
            .bind(("id", id.to_string()))
            .bind(("role", role.as_str().to_string()));

        if let Some(is_active) = is_active {
            builder = builder.bind(("is_active", is_active));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let matched = rows.len() as u64;

        debug!(user_id = %id, matched, "Permission update applied");

        Ok(matched)
    }
}
