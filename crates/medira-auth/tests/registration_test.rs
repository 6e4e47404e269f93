//! Hospital self-registration flow tests.

use medira_auth::registration::TEMPORARY_PASSWORD;
use medira_auth::{AuthConfig, AuthService, RegistrationService};
use medira_core::error::MediraError;
use medira_core::models::hospital::RegisterHospital;
use medira_db::repository::{
    SurrealHospitalRepository, SurrealSessionRepository, SurrealUserRepository,
};
use medira_db::run_migrations;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};

async fn test_db() -> Surreal<Db> {
    let db = Surreal::new::<Mem>(()).await.expect("failed to start mem db");
    db.use_ns("test").use_db("test").await.expect("failed to select ns/db");
    run_migrations(&db).await.expect("migrations failed");
    db
}

fn registration_service(db: &Surreal<Db>) -> RegistrationService<SurrealHospitalRepository<Db>> {
    RegistrationService::new(SurrealHospitalRepository::new(db.clone()))
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

#[tokio::test]
async fn registration_reports_the_admin_credentials() {
    let db = test_db().await;
    let service = registration_service(&db);

    let output = service
        .register(register_input("LIC-R1", "admin@r1.example"))
        .await
        .expect("registration failed");

    assert_eq!(output.admin_handle, "admin@generalhospital.medira");
    assert_eq!(output.admin_email, "admin@r1.example");
    assert_eq!(output.temporary_password, TEMPORARY_PASSWORD);
}

#[tokio::test]
async fn generated_admin_can_log_in_with_temporary_password() {
    let db = test_db().await;
    let service = registration_service(&db);

    let output = service
        .register(register_input("LIC-R2", "admin@r2.example"))
        .await
        .expect("registration failed");

    let auth = AuthService::new(
        SurrealUserRepository::new(db.clone()),
        SurrealSessionRepository::new(db.clone()),
        AuthConfig::default(),
    );

    // The confirmation screen hands out the email + temporary
    // password pair; that pair must actually work.
    let login = auth
        .authenticate("admin@r2.example", TEMPORARY_PASSWORD)
        .await
        .expect("login with temporary password failed");
    assert_eq!(login.identity.tenant_id, output.hospital_id);
    assert_eq!(login.identity.display_name, "Hospital Admin");
}

#[tokio::test]
async fn second_registration_with_same_license_fails() {
    let db = test_db().await;
    let service = registration_service(&db);

    service
        .register(register_input("LIC-R3", "first@r3.example"))
        .await
        .expect("first registration failed");

    let err = service
        .register(register_input("LIC-R3", "second@r3.example"))
        .await
        .expect_err("duplicate license must fail");
    assert!(
        matches!(err, MediraError::DuplicateLicense { ref license_number } if license_number == "LIC-R3")
    );
}

#[tokio::test]
async fn invalid_form_input_is_rejected_per_field() {
    let db = test_db().await;
    let service = registration_service(&db);

    let mut input = register_input("LIC-R4", "admin@r4.example");
    input.contact_phone = "   ".into();

    let err = service
        .register(input)
        .await
        .expect_err("blank phone must fail");
    assert!(matches!(err, MediraError::Validation { ref field, .. } if field == "contact_phone"));
}
