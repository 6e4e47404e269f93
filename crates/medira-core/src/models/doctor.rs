//! Doctor domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::MediraResult;
use crate::validate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DoctorStatus {
    Active,
    Inactive,
}

impl DoctorStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Active" => Some(Self::Active),
            "Inactive" => Some(Self::Inactive),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: Uuid,
    pub tenant_id: Uuid,
    /// Optional home department; must belong to the same tenant.
    pub department_id: Option<Uuid>,
    pub first_name: String,
    pub last_name: String,
    pub specialization: String,
    pub email: String,
    pub phone: String,
    pub license_number: Option<String>,
    pub experience_years: Option<u32>,
    pub status: DoctorStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDoctor {
    pub department_id: Option<Uuid>,
    pub first_name: String,
    pub last_name: String,
    pub specialization: String,
    pub email: String,
    pub phone: String,
    pub license_number: Option<String>,
    pub experience_years: Option<u32>,
}

impl CreateDoctor {
    pub fn validate(&self) -> MediraResult<()> {
        validate::require("first_name", &self.first_name)?;
        validate::require("last_name", &self.last_name)?;
        validate::require("specialization", &self.specialization)?;
        validate::require_email("email", &self.email)?;
        validate::require("phone", &self.phone)?;
        Ok(())
    }
}
