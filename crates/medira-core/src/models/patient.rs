//! Patient domain model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::MediraResult;
use crate::validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: NaiveDate,
    pub gender: Option<String>,
    pub blood_group: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePatient {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: NaiveDate,
    pub gender: Option<String>,
    pub blood_group: Option<String>,
    pub address: Option<String>,
}

impl CreatePatient {
    pub fn validate(&self) -> MediraResult<()> {
        validate::require("first_name", &self.first_name)?;
        validate::require("last_name", &self.last_name)?;
        validate::require_email("email", &self.email)?;
        validate::require("phone", &self.phone)?;
        Ok(())
    }
}
