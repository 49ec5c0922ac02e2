//! SurrealDB implementation of [`OrganizationRepository`].

use chrono::{DateTime, Utc};
use ibflix_core::error::IbflixResult;
use ibflix_core::models::organization::{CreateOrganization, Organization, Plan};
use ibflix_core::repository::OrganizationRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

const ENTITY: &str = "organization";

#[derive(Debug, SurrealValue)]
struct OrganizationRow {
    name: String,
    plan: String,
    domain: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_plan(s: &str) -> Result<Plan, DbError> {
    match s {
        "starter" => Ok(Plan::Starter),
        "pro" => Ok(Plan::Pro),
        "corporate" => Ok(Plan::Corporate),
        other => Err(DbError::Decode {
            entity: ENTITY,
            reason: format!("unknown plan: {other}"),
        }),
    }
}

impl OrganizationRow {
    fn into_organization(self, id: Uuid) -> Result<Organization, DbError> {
        Ok(Organization {
            id,
            name: self.name,
            plan: parse_plan(&self.plan)?,
            domain: self.domain,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// SurrealDB implementation of the Organization repository.
pub struct SurrealOrganizationRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> Clone for SurrealOrganizationRepository<C> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
        }
    }
}

impl<C: Connection> SurrealOrganizationRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> OrganizationRepository for SurrealOrganizationRepository<C> {
    async fn create(&self, input: CreateOrganization) -> IbflixResult<Organization> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('organization', $id) SET \
                 name = $name, plan = $plan, domain = $domain",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("plan", input.plan.as_str().to_string()))
            .bind(("domain", input.domain))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<OrganizationRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: ENTITY.into(),
            id: id_str,
        })?;

        Ok(row.into_organization(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> IbflixResult<Organization> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('organization', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<OrganizationRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: ENTITY.into(),
            id: id_str,
        })?;

        Ok(row.into_organization(id)?)
    }
}
