//! Department domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::MediraResult;
use crate::validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub head_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDepartment {
    pub name: String,
    pub description: Option<String>,
    pub head_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl CreateDepartment {
    pub fn validate(&self) -> MediraResult<()> {
        validate::require("name", &self.name)?;
        Ok(())
    }
}
