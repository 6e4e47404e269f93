//! End-to-end auth flow tests against an in-memory SurrealDB.

use chrono::{Duration, Utc};
use medira_auth::{AuthConfig, AuthService};
use medira_core::error::{MediraError, MediraResult};
use medira_core::models::hospital::RegisterHospital;
use medira_core::models::session::CreateSession;
use medira_core::models::user::{CreateUser, User};
use medira_core::repository::{HospitalRepository, SessionRepository, UserRepository};
use medira_db::repository::{
    SurrealHospitalRepository, SurrealSessionRepository, SurrealUserRepository,
};
use medira_db::run_migrations;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

type TestAuthService = AuthService<SurrealUserRepository<Db>, SurrealSessionRepository<Db>>;

async fn test_db() -> Surreal<Db> {
    let db = Surreal::new::<Mem>(()).await.expect("failed to start mem db");
    db.use_ns("test").use_db("test").await.expect("failed to select ns/db");
    run_migrations(&db).await.expect("migrations failed");
    db
}

fn auth_service(db: &Surreal<Db>) -> TestAuthService {
    AuthService::new(
        SurrealUserRepository::new(db.clone()),
        SurrealSessionRepository::new(db.clone()),
        AuthConfig::default(),
    )
}

/// Register a hospital whose admin logs in with `email` / "hunter2!".
async fn seed_hospital(db: &Surreal<Db>, license: &str, email: &str) -> Uuid {
    let repo = SurrealHospitalRepository::new(db.clone());
    let (hospital, _) = repo
        .register(
            RegisterHospital {
                name: format!("Hospital {license}"),
                address: "1 Main St".into(),
                contact_phone: "+1-555-0100".into(),
                license_number: license.into(),
                admin_email: email.into(),
            },
            CreateUser {
                tenant_id: Uuid::nil(),
                first_name: "Hospital".into(),
                last_name: "Admin".into(),
                email: email.into(),
                password: "hunter2!".into(),
            },
        )
        .await
        .expect("registration failed");
    hospital.id
}

#[tokio::test]
async fn login_returns_token_and_identity() {
    let db = test_db().await;
    let tenant = seed_hospital(&db, "LIC-AU1", "admin@au1.example").await;
    let auth = auth_service(&db);

    let output = auth
        .authenticate("admin@au1.example", "hunter2!")
        .await
        .expect("login failed");

    assert_eq!(output.identity.tenant_id, tenant);
    assert_eq!(output.identity.display_name, "Hospital Admin");
    assert_eq!(output.session_token.len(), 43);
    assert!(output.expires_at > Utc::now());
}

#[tokio::test]
async fn unknown_email_and_wrong_password_are_indistinguishable() {
    let db = test_db().await;
    seed_hospital(&db, "LIC-AU2", "admin@au2.example").await;
    let auth = auth_service(&db);

    let unknown = auth
        .authenticate("nobody@au2.example", "hunter2!")
        .await
        .expect_err("unknown email must fail");
    let wrong = auth
        .authenticate("admin@au2.example", "wrong-password")
        .await
        .expect_err("wrong password must fail");

    assert!(matches!(unknown, MediraError::InvalidCredentials));
    assert!(matches!(wrong, MediraError::InvalidCredentials));
    // Same variant, same message: nothing for an attacker to compare.
    assert_eq!(unknown.to_string(), wrong.to_string());
}

#[tokio::test]
async fn require_session_round_trips_the_identity() {
    let db = test_db().await;
    seed_hospital(&db, "LIC-AU3", "admin@au3.example").await;
    let auth = auth_service(&db);

    let login = auth
        .authenticate("admin@au3.example", "hunter2!")
        .await
        .expect("login failed");

    let identity = auth
        .require_session(&login.session_token)
        .await
        .expect("session lookup failed");
    assert_eq!(identity, login.identity);
}

#[tokio::test]
async fn unknown_token_is_unauthenticated() {
    let db = test_db().await;
    let auth = auth_service(&db);

    let err = auth
        .require_session("not-a-real-token")
        .await
        .expect_err("unknown token must fail");
    assert!(matches!(err, MediraError::Unauthenticated));
}

#[tokio::test]
async fn expired_session_is_rejected_and_purged() {
    let db = test_db().await;
    let tenant = seed_hospital(&db, "LIC-AU4", "admin@au4.example").await;
    let auth = auth_service(&db);

    // Insert a session whose expiry is already in the past. The token
    // hash is stored directly, bypassing login.
    let sessions = SurrealSessionRepository::new(db.clone());
    let stale = sessions
        .create(CreateSession {
            tenant_id: tenant,
            user_id: Uuid::new_v4(),
            token_hash: medira_auth::token::hash_session_token("stale-token"),
            display_name: "Hospital Admin".into(),
            expires_at: Utc::now() - Duration::hours(1),
        })
        .await
        .expect("session insert failed");

    let err = auth
        .require_session("stale-token")
        .await
        .expect_err("expired token must fail");
    assert!(matches!(err, MediraError::Unauthenticated));

    // The stale row is gone after the failed check.
    let lookup = sessions.get_by_token_hash(&stale.token_hash).await;
    assert!(matches!(lookup, Err(MediraError::NotFound { .. })));
}

#[tokio::test]
async fn logout_invalidates_the_token() {
    let db = test_db().await;
    seed_hospital(&db, "LIC-AU5", "admin@au5.example").await;
    let auth = auth_service(&db);

    let login = auth
        .authenticate("admin@au5.example", "hunter2!")
        .await
        .expect("login failed");

    auth.logout(&login.session_token).await.expect("logout failed");

    let err = auth
        .require_session(&login.session_token)
        .await
        .expect_err("token must be dead after logout");
    assert!(matches!(err, MediraError::Unauthenticated));

    // Logging out twice is a no-op, not an error.
    auth.logout(&login.session_token)
        .await
        .expect("repeat logout failed");
}

/// A user store whose lookups fail like a lost database connection.
struct UnreachableUserRepo;

impl UserRepository for UnreachableUserRepo {
    async fn create(&self, _input: CreateUser) -> MediraResult<User> {
        Err(MediraError::Database("connection reset".into()))
    }

    async fn get_by_email(&self, _email: &str) -> MediraResult<User> {
        Err(MediraError::Database("connection reset".into()))
    }

    async fn get_by_id(&self, _tenant_id: Uuid, _id: Uuid) -> MediraResult<User> {
        Err(MediraError::Database("connection reset".into()))
    }
}

#[tokio::test]
async fn storage_failure_during_login_is_not_invalid_credentials() {
    let db = test_db().await;
    let auth = AuthService::new(
        UnreachableUserRepo,
        SurrealSessionRepository::new(db),
        AuthConfig::default(),
    );

    // An outage must surface as a storage error, not as a wrong
    // password, or callers would tell users to retype it forever.
    let err = auth
        .authenticate("admin@out.example", "hunter2!")
        .await
        .expect_err("lookup failure must fail");
    assert!(matches!(err, MediraError::Database(_)), "got {err:?}");
}

#[tokio::test]
async fn delete_expired_sweeps_only_stale_sessions() {
    let db = test_db().await;
    let tenant = seed_hospital(&db, "LIC-AU6", "admin@au6.example").await;
    let auth = auth_service(&db);

    let live = auth
        .authenticate("admin@au6.example", "hunter2!")
        .await
        .expect("login failed");

    let sessions = SurrealSessionRepository::new(db.clone());
    sessions
        .create(CreateSession {
            tenant_id: tenant,
            user_id: Uuid::new_v4(),
            token_hash: medira_auth::token::hash_session_token("old-token"),
            display_name: "Hospital Admin".into(),
            expires_at: Utc::now() - Duration::days(1),
        })
        .await
        .expect("session insert failed");

    let swept = sessions.delete_expired().await.expect("sweep failed");
    assert_eq!(swept, 1);

    // The live session survives the sweep.
    auth.require_session(&live.session_token)
        .await
        .expect("live session must survive");
}
