//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Clinical repositories take the
//! owning tenant id as an explicit, never-optional first parameter —
//! there is no call shape that reads or writes a clinical row without
//! naming the tenant.

use uuid::Uuid;

use crate::error::MediraResult;
use crate::models::{
    appointment::{Appointment, CreateAppointment},
    department::{CreateDepartment, Department},
    doctor::{CreateDoctor, Doctor},
    hospital::{Hospital, HospitalStatus, RegisterHospital},
    medical_record::{CreateMedicalRecord, MedicalRecord},
    patient::{CreatePatient, Patient},
    session::{CreateSession, Session},
    user::{CreateUser, User},
};

/// Pagination parameters for list queries.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 50,
        }
    }
}

/// A paginated result set, fully materialized and in insertion order.
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

// ---------------------------------------------------------------------------
// Identity (global scope)
// ---------------------------------------------------------------------------

pub trait HospitalRepository: Send + Sync {
    /// Create the tenant row and its single admin user in one atomic
    /// transaction: if either insert fails, neither persists. A license
    /// number collision fails with `DuplicateLicense`, sourced from the
    /// storage engine's unique-index violation.
    fn register(
        &self,
        hospital: RegisterHospital,
        admin: CreateUser,
    ) -> impl Future<Output = MediraResult<(Hospital, User)>> + Send;

    fn get_by_id(&self, id: Uuid) -> impl Future<Output = MediraResult<Hospital>> + Send;

    /// Forward-only lifecycle step; illegal transitions fail validation.
    fn update_status(
        &self,
        id: Uuid,
        status: HospitalStatus,
    ) -> impl Future<Output = MediraResult<Hospital>> + Send;
}

pub trait UserRepository: Send + Sync {
    /// Hashes the raw password with Argon2id before storage.
    fn create(&self, input: CreateUser) -> impl Future<Output = MediraResult<User>> + Send;

    /// Global lookup — email is unique across all tenants, so login
    /// does not need to know the tenant first.
    fn get_by_email(&self, email: &str) -> impl Future<Output = MediraResult<User>> + Send;

    fn get_by_id(
        &self,
        tenant_id: Uuid,
        id: Uuid,
    ) -> impl Future<Output = MediraResult<User>> + Send;
}

pub trait SessionRepository: Send + Sync {
    fn create(&self, input: CreateSession) -> impl Future<Output = MediraResult<Session>> + Send;

    /// Global lookup — the unguessable token is the capability; the
    /// tenant id comes out of the stored row.
    fn get_by_token_hash(
        &self,
        token_hash: &str,
    ) -> impl Future<Output = MediraResult<Session>> + Send;

    /// Remove a single session (logout). Idempotent.
    fn delete(&self, id: Uuid) -> impl Future<Output = MediraResult<()>> + Send;

    /// Remove all expired sessions, returning how many were swept.
    fn delete_expired(&self) -> impl Future<Output = MediraResult<u64>> + Send;
}

// ---------------------------------------------------------------------------
// Clinical entities (tenant-scoped)
// ---------------------------------------------------------------------------

pub trait PatientRepository: Send + Sync {
    fn create(
        &self,
        tenant_id: Uuid,
        input: CreatePatient,
    ) -> impl Future<Output = MediraResult<Patient>> + Send;
    fn get_by_id(
        &self,
        tenant_id: Uuid,
        id: Uuid,
    ) -> impl Future<Output = MediraResult<Patient>> + Send;
    fn list(
        &self,
        tenant_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = MediraResult<PaginatedResult<Patient>>> + Send;
}

pub trait DepartmentRepository: Send + Sync {
    fn create(
        &self,
        tenant_id: Uuid,
        input: CreateDepartment,
    ) -> impl Future<Output = MediraResult<Department>> + Send;
    fn get_by_id(
        &self,
        tenant_id: Uuid,
        id: Uuid,
    ) -> impl Future<Output = MediraResult<Department>> + Send;
    fn list(
        &self,
        tenant_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = MediraResult<PaginatedResult<Department>>> + Send;
}

pub trait DoctorRepository: Send + Sync {
    /// `input.department_id`, when present, must resolve within
    /// `tenant_id`; a department of another tenant fails with
    /// `CrossTenantReference` and nothing is persisted.
    fn create(
        &self,
        tenant_id: Uuid,
        input: CreateDoctor,
    ) -> impl Future<Output = MediraResult<Doctor>> + Send;
    fn get_by_id(
        &self,
        tenant_id: Uuid,
        id: Uuid,
    ) -> impl Future<Output = MediraResult<Doctor>> + Send;
    fn list(
        &self,
        tenant_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = MediraResult<PaginatedResult<Doctor>>> + Send;
}

pub trait AppointmentRepository: Send + Sync {
    /// Both referenced rows must belong to `tenant_id`; a reference
    /// owned by another tenant fails with `CrossTenantReference` and no
    /// appointment row persists.
    fn create(
        &self,
        tenant_id: Uuid,
        input: CreateAppointment,
    ) -> impl Future<Output = MediraResult<Appointment>> + Send;
    fn get_by_id(
        &self,
        tenant_id: Uuid,
        id: Uuid,
    ) -> impl Future<Output = MediraResult<Appointment>> + Send;
    fn list(
        &self,
        tenant_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = MediraResult<PaginatedResult<Appointment>>> + Send;
}

pub trait MedicalRecordRepository: Send + Sync {
    fn create(
        &self,
        tenant_id: Uuid,
        input: CreateMedicalRecord,
    ) -> impl Future<Output = MediraResult<MedicalRecord>> + Send;
    fn get_by_id(
        &self,
        tenant_id: Uuid,
        id: Uuid,
    ) -> impl Future<Output = MediraResult<MedicalRecord>> + Send;
    fn list(
        &self,
        tenant_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = MediraResult<PaginatedResult<MedicalRecord>>> + Send;
}
