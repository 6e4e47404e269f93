//! Hospital (tenant) domain model.
//!
//! A hospital is the unit of data isolation. Every clinical entity
//! carries the id of the hospital that owns it, and every query is
//! scoped to that id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{MediraError, MediraResult};
use crate::validate;

/// Lifecycle status of a hospital.
///
/// Transitions are strictly forward:
/// `Pending → Verified → Active → Suspended → Inactive`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum HospitalStatus {
    Pending,
    Verified,
    Active,
    Suspended,
    Inactive,
}

impl HospitalStatus {
    fn rank(self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Verified => 1,
            Self::Active => 2,
            Self::Suspended => 3,
            Self::Inactive => 4,
        }
    }

    /// Whether moving from `self` to `next` is a legal lifecycle step.
    pub fn can_transition(self, next: HospitalStatus) -> bool {
        next.rank() > self.rank()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Verified => "Verified",
            Self::Active => "Active",
            Self::Suspended => "Suspended",
            Self::Inactive => "Inactive",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(Self::Pending),
            "Verified" => Some(Self::Verified),
            "Active" => Some(Self::Active),
            "Suspended" => Some(Self::Suspended),
            "Inactive" => Some(Self::Inactive),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hospital {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub contact_phone: String,
    /// Globally unique across all hospitals.
    pub license_number: String,
    /// Globally unique; becomes the email of the generated admin user.
    pub admin_email: String,
    pub status: HospitalStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields submitted by the self-registration form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterHospital {
    pub name: String,
    pub address: String,
    pub contact_phone: String,
    pub license_number: String,
    pub admin_email: String,
}

impl RegisterHospital {
    /// Validate all fields at the boundary, with per-field failures.
    pub fn validate(&self) -> MediraResult<()> {
        validate::require("name", &self.name)?;
        validate::require("address", &self.address)?;
        validate::require("contact_phone", &self.contact_phone)?;
        validate::require("license_number", &self.license_number)?;
        validate::require_email("admin_email", &self.admin_email)?;
        Ok(())
    }
}

impl Hospital {
    /// Check a proposed status change, surfacing illegal steps as a
    /// validation failure on the `status` field.
    pub fn check_transition(&self, next: HospitalStatus) -> MediraResult<()> {
        if self.status.can_transition(next) {
            Ok(())
        } else {
            Err(MediraError::validation(
                "status",
                format!(
                    "illegal transition {} -> {}",
                    self.status.as_str(),
                    next.as_str()
                ),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_transitions_are_legal() {
        use HospitalStatus::*;
        assert!(Pending.can_transition(Verified));
        assert!(Pending.can_transition(Active));
        assert!(Verified.can_transition(Active));
        assert!(Active.can_transition(Suspended));
        assert!(Suspended.can_transition(Inactive));
    }

    #[test]
    fn backward_and_self_transitions_are_illegal() {
        use HospitalStatus::*;
        assert!(!Active.can_transition(Pending));
        assert!(!Active.can_transition(Verified));
        assert!(!Inactive.can_transition(Active));
        assert!(!Pending.can_transition(Pending));
    }

    #[test]
    fn status_string_roundtrip() {
        for status in [
            HospitalStatus::Pending,
            HospitalStatus::Verified,
            HospitalStatus::Active,
            HospitalStatus::Suspended,
            HospitalStatus::Inactive,
        ] {
            assert_eq!(HospitalStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(HospitalStatus::parse("Unknown"), None);
    }

    #[test]
    fn register_input_requires_all_fields() {
        let input = RegisterHospital {
            name: "General Hospital".into(),
            address: "1 Main St".into(),
            contact_phone: "+1-555-0100".into(),
            license_number: "LIC-100".into(),
            admin_email: "admin@general.example".into(),
        };
        assert!(input.validate().is_ok());

        let mut missing = input.clone();
        missing.license_number = "  ".into();
        match missing.validate() {
            Err(MediraError::Validation { field, .. }) => {
                assert_eq!(field, "license_number");
            }
            other => panic!("expected validation error, got {other:?}"),
        }

        let mut bad_email = input;
        bad_email.admin_email = "not-an-email".into();
        assert!(matches!(
            bad_email.validate(),
            Err(MediraError::Validation { field, .. }) if field == "admin_email"
        ));
    }
}
