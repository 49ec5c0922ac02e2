//! Integration tests for the access control manager and query facade.

use ibflix_access::{AccessConfig, AccessControlManager, AuditStatus, QueryFacade};
use ibflix_core::error::IbflixError;
use ibflix_core::models::audit::{ACTION_ADD_USER, ACTION_UPDATE_PERMISSION};
use ibflix_core::models::permission::PermissionUpdateCandidate;
use ibflix_core::models::role::Role;
use ibflix_core::models::user::UserCandidate;
use ibflix_core::repository::{AuditLogFilter, AuditLogRepository};
use ibflix_db::repository::{SurrealAuditLogRepository, SurrealUserRepository};
use serde_json::json;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

type Manager = AccessControlManager<SurrealUserRepository<Db>, SurrealAuditLogRepository<Db>>;
type Facade = QueryFacade<SurrealUserRepository<Db>, SurrealAuditLogRepository<Db>>;

/// Spin up in-memory DB, run migrations, wire manager + facade.
async fn setup() -> (Manager, Facade, SurrealAuditLogRepository<Db>) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    ibflix_db::run_migrations(&db).await.unwrap();

    let user_repo = SurrealUserRepository::new(db.clone());
    let audit_repo = SurrealAuditLogRepository::new(db.clone());
    let config = AccessConfig::default();

    let manager = AccessControlManager::new(user_repo.clone(), audit_repo.clone(), config.clone());
    let facade = QueryFacade::new(user_repo, audit_repo.clone(), config);

    (manager, facade, audit_repo)
}

fn candidate(org_id: Uuid, name: &str, email: &str, role: Option<&str>) -> UserCandidate {
    UserCandidate {
        org_id,
        name: name.into(),
        email: email.into(),
        role: role.map(Into::into),
        is_active: None,
    }
}

async fn all_audit_entries(
    repo: &SurrealAuditLogRepository<Db>,
) -> Vec<ibflix_core::models::audit::AuditLogEntry> {
    repo.list(AuditLogFilter::default(), 1000).await.unwrap()
}

#[tokio::test]
async fn add_user_scenario() {
    let (manager, facade, _) = setup().await;
    let org_id = Uuid::new_v4();

    let out = manager
        .add_user(candidate(org_id, "Ana", "ana@x.com", Some("analista")))
        .await
        .unwrap();
    assert!(out.audit.is_recorded());

    let user = manager.get_user(out.user_id).await.unwrap();
    assert_eq!(user.org_id, org_id);
    assert_eq!(user.name, "Ana");
    assert_eq!(user.email, "ana@x.com");
    assert_eq!(user.role, Role::Analyst);
    assert!(user.is_active);

    let entries = facade.list_audit_log(org_id, None).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].org_id, Some(org_id));
    assert_eq!(entries[0].user_id, None);
    assert_eq!(entries[0].action, ACTION_ADD_USER);
    assert_eq!(entries[0].metadata, json!({ "email": "ana@x.com" }));
}

#[tokio::test]
async fn add_user_round_trips_every_role() {
    let (manager, _, _) = setup().await;
    let org_id = Uuid::new_v4();

    for role in Role::ALL {
        let out = manager
            .add_user(candidate(org_id, "Bia", "bia@x.com", Some(role.as_str())))
            .await
            .unwrap();
        let user = manager.get_user(out.user_id).await.unwrap();
        assert_eq!(user.role, role);
    }
}

#[tokio::test]
async fn add_user_applies_configured_default_role() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    ibflix_db::run_migrations(&db).await.unwrap();

    let manager = AccessControlManager::new(
        SurrealUserRepository::new(db.clone()),
        SurrealAuditLogRepository::new(db),
        AccessConfig {
            default_role: Role::Training,
            ..Default::default()
        },
    );

    let out = manager
        .add_user(candidate(Uuid::new_v4(), "Caio", "caio@x.com", None))
        .await
        .unwrap();
    let user = manager.get_user(out.user_id).await.unwrap();
    assert_eq!(user.role, Role::Training);
}

#[tokio::test]
async fn add_user_with_invalid_role_persists_nothing() {
    let (manager, facade, audit_repo) = setup().await;
    let org_id = Uuid::new_v4();

    let err = manager
        .add_user(candidate(org_id, "Eve", "eve@x.com", Some("superuser")))
        .await
        .unwrap_err();
    assert!(matches!(err, IbflixError::Validation { ref field, .. } if field == "role"));

    assert!(facade.list_users(org_id).await.unwrap().is_empty());
    assert!(all_audit_entries(&audit_repo).await.is_empty());
}

#[tokio::test]
async fn add_user_with_invalid_email_persists_nothing() {
    let (manager, facade, audit_repo) = setup().await;
    let org_id = Uuid::new_v4();

    let err = manager
        .add_user(candidate(org_id, "Eve", "eve.x.com", Some("admin")))
        .await
        .unwrap_err();
    assert!(matches!(err, IbflixError::Validation { ref field, .. } if field == "email"));

    assert!(facade.list_users(org_id).await.unwrap().is_empty());
    assert!(all_audit_entries(&audit_repo).await.is_empty());
}

#[tokio::test]
async fn update_permission_on_missing_user_is_not_found_and_unaudited() {
    let (manager, _, audit_repo) = setup().await;

    let err = manager
        .update_permission(PermissionUpdateCandidate {
            user_id: Uuid::new_v4(),
            role: "admin".into(),
            is_active: Some(false),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, IbflixError::NotFound { .. }));

    assert!(all_audit_entries(&audit_repo).await.is_empty());
}

#[tokio::test]
async fn update_permission_with_invalid_role_is_rejected() {
    let (manager, _, audit_repo) = setup().await;
    let org_id = Uuid::new_v4();
    let out = manager
        .add_user(candidate(org_id, "Gil", "gil@x.com", None))
        .await
        .unwrap();

    let err = manager
        .update_permission(PermissionUpdateCandidate {
            user_id: out.user_id,
            role: "owner".into(),
            is_active: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, IbflixError::Validation { .. }));

    let user = manager.get_user(out.user_id).await.unwrap();
    assert_eq!(user.role, Role::Collaborator);
    // Only the add_user entry exists.
    assert_eq!(all_audit_entries(&audit_repo).await.len(), 1);
}

#[tokio::test]
async fn update_permission_applies_fields_and_records_one_entry() {
    let (manager, _, audit_repo) = setup().await;
    let org_id = Uuid::new_v4();
    let out = manager
        .add_user(candidate(org_id, "Hugo", "hugo@x.com", Some("colaborador")))
        .await
        .unwrap();

    let updated = manager
        .update_permission(PermissionUpdateCandidate {
            user_id: out.user_id,
            role: "admin".into(),
            is_active: Some(false),
        })
        .await
        .unwrap();
    assert_eq!(updated.role, Role::Admin);
    assert_eq!(updated.is_active, Some(false));
    assert!(updated.audit.is_recorded());

    let user = manager.get_user(out.user_id).await.unwrap();
    assert_eq!(user.role, Role::Admin);
    assert!(!user.is_active);
    assert_eq!(user.email, "hugo@x.com");

    let entries = audit_repo
        .list(
            AuditLogFilter {
                action: Some(ACTION_UPDATE_PERMISSION.into()),
                ..Default::default()
            },
            100,
        )
        .await
        .unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].user_id, Some(out.user_id));
    assert_eq!(entries[0].org_id, None);
    assert_eq!(
        entries[0].metadata,
        json!({ "role": "admin", "is_active": false })
    );
}

#[tokio::test]
async fn update_permission_without_flag_records_role_only() {
    let (manager, _, audit_repo) = setup().await;
    let out = manager
        .add_user(candidate(Uuid::new_v4(), "Iara", "iara@x.com", None))
        .await
        .unwrap();

    manager
        .update_permission(PermissionUpdateCandidate {
            user_id: out.user_id,
            role: "finance".into(),
            is_active: None,
        })
        .await
        .unwrap();

    let user = manager.get_user(out.user_id).await.unwrap();
    assert_eq!(user.role, Role::Finance);
    assert!(user.is_active);

    let entries = audit_repo
        .list(
            AuditLogFilter {
                user_id: Some(out.user_id),
                ..Default::default()
            },
            100,
        )
        .await
        .unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].metadata, json!({ "role": "financeiro" }));
}

#[tokio::test]
async fn update_permission_is_idempotent_but_audited_each_time() {
    let (manager, _, audit_repo) = setup().await;
    let out = manager
        .add_user(candidate(Uuid::new_v4(), "Joao", "joao@x.com", None))
        .await
        .unwrap();

    let update = PermissionUpdateCandidate {
        user_id: out.user_id,
        role: "treinamento".into(),
        is_active: Some(false),
    };
    manager.update_permission(update.clone()).await.unwrap();
    let first = manager.get_user(out.user_id).await.unwrap();
    manager.update_permission(update).await.unwrap();
    let second = manager.get_user(out.user_id).await.unwrap();

    assert_eq!(first.role, second.role);
    assert_eq!(first.is_active, second.is_active);

    let entries = audit_repo
        .list(
            AuditLogFilter {
                user_id: Some(out.user_id),
                action: Some(ACTION_UPDATE_PERMISSION.into()),
                ..Default::default()
            },
            100,
        )
        .await
        .unwrap();
    assert_eq!(entries.len(), 2);
}

#[tokio::test]
async fn get_missing_user_is_not_found() {
    let (manager, _, _) = setup().await;
    let err = manager.get_user(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, IbflixError::NotFound { .. }));
}

#[tokio::test]
async fn list_users_never_crosses_organizations() {
    let (manager, facade, _) = setup().await;
    let org_a = Uuid::new_v4();
    let org_b = Uuid::new_v4();

    for i in 0..3 {
        manager
            .add_user(candidate(org_a, "A", &format!("a{i}@x.com"), None))
            .await
            .unwrap();
    }
    manager
        .add_user(candidate(org_b, "B", "b@x.com", None))
        .await
        .unwrap();

    let users_a = facade.list_users(org_a).await.unwrap();
    assert_eq!(users_a.len(), 3);
    assert!(users_a.iter().all(|u| u.org_id == org_a));

    let users_b = manager.list_users(org_b).await.unwrap();
    assert_eq!(users_b.len(), 1);
    assert_eq!(users_b[0].org_id, org_b);
}

#[tokio::test]
async fn duplicate_emails_are_accepted() {
    let (manager, facade, _) = setup().await;
    let org_id = Uuid::new_v4();

    let first = manager
        .add_user(candidate(org_id, "Ana", "ana@x.com", None))
        .await
        .unwrap();
    let second = manager
        .add_user(candidate(org_id, "Ana", "ana@x.com", None))
        .await
        .unwrap();

    assert_ne!(first.user_id, second.user_id);
    assert_eq!(facade.list_users(org_id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn audit_log_limit_is_honoured() {
    let (manager, facade, _) = setup().await;
    let org_id = Uuid::new_v4();

    for i in 0..4 {
        manager
            .add_user(candidate(org_id, "K", &format!("k{i}@x.com"), None))
            .await
            .unwrap();
    }

    assert_eq!(facade.list_audit_log(org_id, None).await.unwrap().len(), 4);
    assert_eq!(facade.list_audit_log(org_id, Some(2)).await.unwrap().len(), 2);
    assert!(facade.list_audit_log(org_id, Some(0)).await.unwrap().is_empty());
    assert!(
        facade
            .list_audit_log(Uuid::new_v4(), None)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn audit_log_limit_is_clamped_to_maximum() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    ibflix_db::run_migrations(&db).await.unwrap();

    let config = AccessConfig {
        audit_max_limit: 2,
        ..Default::default()
    };
    let manager = AccessControlManager::new(
        SurrealUserRepository::new(db.clone()),
        SurrealAuditLogRepository::new(db.clone()),
        config.clone(),
    );
    let facade = QueryFacade::new(
        SurrealUserRepository::new(db.clone()),
        SurrealAuditLogRepository::new(db),
        config,
    );

    let org_id = Uuid::new_v4();
    for i in 0..3 {
        manager
            .add_user(candidate(org_id, "L", &format!("l{i}@x.com"), None))
            .await
            .unwrap();
    }

    let entries = facade.list_audit_log(org_id, Some(500)).await.unwrap();
    assert_eq!(entries.len(), 2);
}

#[tokio::test]
async fn audit_status_serializes_with_tag() {
    let status = AuditStatus::Failed {
        reason: "store down".into(),
    };
    let value = serde_json::to_value(&status).unwrap();
    assert_eq!(value, json!({ "status": "failed", "reason": "store down" }));
}
