//! Tenant-scoped data access handle.
//!
//! A [`ClinicalScope`] is the only way application code reaches the
//! clinical tables, and the only way to build one is from an
//! authenticated [`SessionIdentity`]. The tenant id travels inside the
//! handle, so callers cannot pass the wrong one.

use medira_core::error::MediraResult;
use medira_core::models::appointment::{Appointment, CreateAppointment};
use medira_core::models::department::{CreateDepartment, Department};
use medira_core::models::doctor::{CreateDoctor, Doctor};
use medira_core::models::medical_record::{CreateMedicalRecord, MedicalRecord};
use medira_core::models::patient::{CreatePatient, Patient};
use medira_core::models::session::SessionIdentity;
use medira_core::repository::{
    AppointmentRepository, DepartmentRepository, DoctorRepository, MedicalRecordRepository,
    Pagination, PaginatedResult, PatientRepository,
};
use surrealdb::{Connection, Surreal};
use uuid::Uuid;

use crate::repository::{
    SurrealAppointmentRepository, SurrealDepartmentRepository, SurrealDoctorRepository,
    SurrealMedicalRecordRepository, SurrealPatientRepository,
};

/// Clinical data access bound to one authenticated tenant.
#[derive(Clone)]
pub struct ClinicalScope<C: Connection> {
    identity: SessionIdentity,
    patients: SurrealPatientRepository<C>,
    departments: SurrealDepartmentRepository<C>,
    doctors: SurrealDoctorRepository<C>,
    appointments: SurrealAppointmentRepository<C>,
    medical_records: SurrealMedicalRecordRepository<C>,
}

impl<C: Connection> ClinicalScope<C> {
    /// Open a scope for the tenant an authenticated session belongs to.
    pub fn new(db: Surreal<C>, identity: SessionIdentity) -> Self {
        Self {
            identity,
            patients: SurrealPatientRepository::new(db.clone()),
            departments: SurrealDepartmentRepository::new(db.clone()),
            doctors: SurrealDoctorRepository::new(db.clone()),
            appointments: SurrealAppointmentRepository::new(db.clone()),
            medical_records: SurrealMedicalRecordRepository::new(db),
        }
    }

    pub fn identity(&self) -> &SessionIdentity {
        &self.identity
    }

    pub fn tenant_id(&self) -> Uuid {
        self.identity.tenant_id
    }

    pub async fn create_patient(&self, input: CreatePatient) -> MediraResult<Patient> {
        self.patients.create(self.identity.tenant_id, input).await
    }

    pub async fn get_patient(&self, id: Uuid) -> MediraResult<Patient> {
        self.patients.get_by_id(self.identity.tenant_id, id).await
    }

    pub async fn list_patients(&self, page: Pagination) -> MediraResult<PaginatedResult<Patient>> {
        self.patients.list(self.identity.tenant_id, page).await
    }

    pub async fn create_department(&self, input: CreateDepartment) -> MediraResult<Department> {
        self.departments.create(self.identity.tenant_id, input).await
    }

    pub async fn get_department(&self, id: Uuid) -> MediraResult<Department> {
        self.departments.get_by_id(self.identity.tenant_id, id).await
    }

    pub async fn list_departments(
        &self,
        page: Pagination,
    ) -> MediraResult<PaginatedResult<Department>> {
        self.departments.list(self.identity.tenant_id, page).await
    }

    pub async fn create_doctor(&self, input: CreateDoctor) -> MediraResult<Doctor> {
        self.doctors.create(self.identity.tenant_id, input).await
    }

    pub async fn get_doctor(&self, id: Uuid) -> MediraResult<Doctor> {
        self.doctors.get_by_id(self.identity.tenant_id, id).await
    }

    pub async fn list_doctors(&self, page: Pagination) -> MediraResult<PaginatedResult<Doctor>> {
        self.doctors.list(self.identity.tenant_id, page).await
    }

    pub async fn create_appointment(
        &self,
        input: CreateAppointment,
    ) -> MediraResult<Appointment> {
        self.appointments.create(self.identity.tenant_id, input).await
    }

    pub async fn get_appointment(&self, id: Uuid) -> MediraResult<Appointment> {
        self.appointments.get_by_id(self.identity.tenant_id, id).await
    }

    pub async fn list_appointments(
        &self,
        page: Pagination,
    ) -> MediraResult<PaginatedResult<Appointment>> {
        self.appointments.list(self.identity.tenant_id, page).await
    }

    pub async fn create_medical_record(
        &self,
        input: CreateMedicalRecord,
    ) -> MediraResult<MedicalRecord> {
        self.medical_records.create(self.identity.tenant_id, input).await
    }

    pub async fn get_medical_record(&self, id: Uuid) -> MediraResult<MedicalRecord> {
        self.medical_records.get_by_id(self.identity.tenant_id, id).await
    }

    pub async fn list_medical_records(
        &self,
        page: Pagination,
    ) -> MediraResult<PaginatedResult<MedicalRecord>> {
        self.medical_records.list(self.identity.tenant_id, page).await
    }
}
