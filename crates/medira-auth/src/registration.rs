//! Hospital self-registration flow.
//!
//! Registration creates the hospital and its first admin account in
//! one atomic storage call and reports back the credentials the new
//! admin signs in with.

use medira_core::error::MediraResult;
use medira_core::models::hospital::RegisterHospital;
use medira_core::models::user::CreateUser;
use medira_core::repository::HospitalRepository;
use tracing::info;
use uuid::Uuid;

/// Fixed first password for every generated admin account. The admin
/// signs in with it once and is expected to change it.
///
/// TODO: replace with a per-registration random password delivered
/// out of band before this runs anywhere real.
pub const TEMPORARY_PASSWORD: &str = "TemporaryPass1!";

/// What the registration form reports back on success.
#[derive(Debug)]
pub struct RegistrationOutput {
    pub hospital_id: Uuid,
    /// Display-only handle shown on the confirmation screen. Login is
    /// by the admin email, not this handle, and it is never stored.
    pub admin_handle: String,
    pub admin_email: String,
    pub temporary_password: &'static str,
}

/// Hospital registration service.
pub struct RegistrationService<H: HospitalRepository> {
    hospital_repo: H,
}

impl<H: HospitalRepository> RegistrationService<H> {
    pub fn new(hospital_repo: H) -> Self {
        Self { hospital_repo }
    }

    /// Register a hospital and its admin user atomically.
    pub async fn register(&self, input: RegisterHospital) -> MediraResult<RegistrationOutput> {
        let admin_handle = derive_admin_handle(&input.name);
        let admin_email = input.admin_email.clone();

        let admin = CreateUser {
            // Replaced with the real hospital id inside the atomic
            // registration transaction.
            tenant_id: Uuid::nil(),
            first_name: "Hospital".into(),
            last_name: "Admin".into(),
            email: admin_email.clone(),
            password: TEMPORARY_PASSWORD.into(),
        };

        let (hospital, _admin_user) = self.hospital_repo.register(input, admin).await?;

        info!(hospital_id = %hospital.id, name = %hospital.name, "hospital registered");

        Ok(RegistrationOutput {
            hospital_id: hospital.id,
            admin_handle,
            admin_email,
            temporary_password: TEMPORARY_PASSWORD,
        })
    }
}

/// Derive the display handle from the hospital name: lowercase, spaces
/// removed, under the fixed `.medira` namespace.
fn derive_admin_handle(hospital_name: &str) -> String {
    let slug: String = hospital_name
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();
    format!("admin@{slug}.medira")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_strips_spaces_and_lowercases() {
        assert_eq!(
            derive_admin_handle("General Hospital"),
            "admin@generalhospital.medira"
        );
        assert_eq!(derive_admin_handle("St.Mary"), "admin@st.mary.medira");
    }
}
