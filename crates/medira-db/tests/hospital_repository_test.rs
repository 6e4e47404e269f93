//! Hospital registration tests: atomicity, duplicate detection, and
//! the status lifecycle.

use medira_core::error::MediraError;
use medira_core::models::hospital::{HospitalStatus, RegisterHospital};
use medira_core::models::user::CreateUser;
use medira_core::repository::HospitalRepository;
use medira_db::repository::SurrealHospitalRepository;
use medira_db::run_migrations;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

async fn test_db() -> Surreal<Db> {
    let db = Surreal::new::<Mem>(()).await.expect("failed to start mem db");
    db.use_ns("test").use_db("test").await.expect("failed to select ns/db");
    run_migrations(&db).await.expect("migrations failed");
    db
}

async fn count(db: &Surreal<Db>, table: &str) -> u64 {
    let mut result = db
        .query(format!("SELECT count() AS total FROM {table} GROUP ALL"))
        .await
        .expect("count query failed");
    let rows: Vec<CountRow> = result.take(0).expect("count rows");
    rows.first().map(|r| r.total).unwrap_or(0)
}

fn register_input(license: &str, email: &str) -> RegisterHospital {
    RegisterHospital {
        name: "General Hospital".into(),
        address: "1 Main St".into(),
        contact_phone: "+1-555-0100".into(),
        license_number: license.into(),
        admin_email: email.into(),
    }
}

fn admin_input(email: &str) -> CreateUser {
    CreateUser {
        tenant_id: Uuid::nil(),
        first_name: "Hospital".into(),
        last_name: "Admin".into(),
        email: email.into(),
        password: "TemporaryPass1!".into(),
    }
}

#[tokio::test]
async fn register_creates_hospital_and_admin() {
    let db = test_db().await;
    let repo = SurrealHospitalRepository::new(db.clone());

    let (hospital, admin) = repo
        .register(
            register_input("LIC-100", "admin@general.example"),
            admin_input("admin@general.example"),
        )
        .await
        .expect("registration failed");

    assert_eq!(hospital.status, HospitalStatus::Pending);
    assert_eq!(hospital.license_number, "LIC-100");
    assert_eq!(admin.tenant_id, hospital.id);
    assert_eq!(admin.email, "admin@general.example");
    assert!(admin.password_hash.starts_with("$argon2id$"));

    assert_eq!(count(&db, "hospital").await, 1);
    assert_eq!(count(&db, "user").await, 1);
}

#[tokio::test]
async fn duplicate_license_is_rejected_and_nothing_persists() {
    let db = test_db().await;
    let repo = SurrealHospitalRepository::new(db.clone());

    repo.register(
        register_input("LIC-100", "first@one.example"),
        admin_input("first@one.example"),
    )
    .await
    .expect("first registration failed");

    let err = repo
        .register(
            register_input("LIC-100", "second@two.example"),
            admin_input("second@two.example"),
        )
        .await
        .expect_err("duplicate license must fail");

    assert!(
        matches!(err, MediraError::DuplicateLicense { ref license_number } if license_number == "LIC-100"),
        "unexpected error: {err:?}"
    );

    // The failed transaction must leave no partial rows.
    assert_eq!(count(&db, "hospital").await, 1);
    assert_eq!(count(&db, "user").await, 1);
}

#[tokio::test]
async fn duplicate_admin_email_rolls_back_hospital_row() {
    let db = test_db().await;
    let repo = SurrealHospitalRepository::new(db.clone());

    repo.register(
        register_input("LIC-200", "shared@one.example"),
        admin_input("shared@one.example"),
    )
    .await
    .expect("first registration failed");

    // Same admin email, fresh license: the user insert fails inside the
    // transaction, so the hospital insert must roll back with it.
    let err = repo
        .register(
            register_input("LIC-201", "shared@one.example"),
            admin_input("shared@one.example"),
        )
        .await
        .expect_err("duplicate email must fail");

    assert!(
        matches!(err, MediraError::Validation { ref field, .. } if field == "admin_email"),
        "unexpected error: {err:?}"
    );
    assert_eq!(count(&db, "hospital").await, 1);
    assert_eq!(count(&db, "user").await, 1);
}

#[tokio::test]
async fn invalid_input_fails_before_touching_storage() {
    let db = test_db().await;
    let repo = SurrealHospitalRepository::new(db.clone());

    let mut input = register_input("LIC-300", "bad-email");
    input.admin_email = "not-an-email".into();

    let err = repo
        .register(input, admin_input("admin@x.example"))
        .await
        .expect_err("invalid email must fail");
    assert!(matches!(err, MediraError::Validation { ref field, .. } if field == "admin_email"));
    assert_eq!(count(&db, "hospital").await, 0);
}

#[tokio::test]
async fn status_moves_forward_only() {
    let db = test_db().await;
    let repo = SurrealHospitalRepository::new(db.clone());

    let (hospital, _) = repo
        .register(
            register_input("LIC-400", "admin@fwd.example"),
            admin_input("admin@fwd.example"),
        )
        .await
        .expect("registration failed");

    let verified = repo
        .update_status(hospital.id, HospitalStatus::Verified)
        .await
        .expect("pending -> verified failed");
    assert_eq!(verified.status, HospitalStatus::Verified);

    let active = repo
        .update_status(hospital.id, HospitalStatus::Active)
        .await
        .expect("verified -> active failed");
    assert_eq!(active.status, HospitalStatus::Active);

    let err = repo
        .update_status(hospital.id, HospitalStatus::Pending)
        .await
        .expect_err("backward transition must fail");
    assert!(matches!(err, MediraError::Validation { ref field, .. } if field == "status"));

    // The stored status is unchanged after the rejected transition.
    let current = repo.get_by_id(hospital.id).await.expect("get failed");
    assert_eq!(current.status, HospitalStatus::Active);
}

#[tokio::test]
async fn get_unknown_hospital_is_not_found() {
    let db = test_db().await;
    let repo = SurrealHospitalRepository::new(db);

    let err = repo
        .get_by_id(Uuid::new_v4())
        .await
        .expect_err("unknown id must fail");
    assert!(matches!(err, MediraError::NotFound { ref entity, .. } if entity == "hospital"));
}
