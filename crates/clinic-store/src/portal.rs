//! The portal facade
//!
//! [`ClinicPortal`] wires the credential store, assignment policy, record
//! store and dashboard projection over one shared snapshot. The
//! presentation layer talks to this type and nothing else.

use crate::config::ClinicConfig;
use crate::credential::{Argon2Hasher, CredentialHasher, CredentialStore};
use crate::error::StoreError;
use crate::notify::Notifier;
use crate::records::{BookingOutcome, RecordStore};
use crate::session::Session;
use crate::snapshot::ClinicSnapshot;
use crate::storage::{MemoryStorage, Shared, StorageBackend};
use clinic_model::{
    Account, Appointment, AppointmentFilter, AppointmentId, AppointmentStatus, NewAccount,
    NewAppointment, NewReport, ProfileUpdate, Report, ReportId,
};
use clinic_projection::DashboardSummary;
use std::sync::Arc;

/// The clinic portal core
///
/// Owns the shared snapshot and composes the component stores over it.
#[derive(Debug, Clone)]
pub struct ClinicPortal {
    config: ClinicConfig,
    shared: Arc<Shared>,
    credentials: CredentialStore,
    records: RecordStore,
}

impl ClinicPortal {
    /// Open the portal against a storage backend
    ///
    /// Loads the persisted snapshot; a failure here is a startup-time
    /// condition, not something callers retry per operation.
    ///
    /// # Errors
    /// `StoreError::Storage` if the snapshot cannot be loaded
    pub fn open(config: ClinicConfig, backend: Box<dyn StorageBackend>) -> Result<Self, StoreError> {
        let shared = Shared::open(backend)?;
        Ok(Self::assemble(config, shared, Arc::new(Argon2Hasher), None))
    }

    /// Open an in-memory portal, the default for tests and demos
    #[must_use]
    pub fn in_memory(config: ClinicConfig) -> Self {
        let shared = Arc::new(Shared::with_snapshot(
            ClinicSnapshot::new(),
            Box::new(MemoryStorage::new()),
        ));
        Self::assemble(config, shared, Arc::new(Argon2Hasher), None)
    }

    fn assemble(
        config: ClinicConfig,
        shared: Arc<Shared>,
        hasher: Arc<dyn CredentialHasher>,
        notifier: Option<Arc<dyn Notifier>>,
    ) -> Self {
        let credentials = CredentialStore::new(config.clone(), Arc::clone(&shared), hasher);
        let records = RecordStore::new(Arc::clone(&shared), notifier);
        Self {
            config,
            shared,
            credentials,
            records,
        }
    }

    /// Replace the credential hasher (tests inject a cheap one)
    #[must_use]
    pub fn with_hasher(mut self, hasher: Arc<dyn CredentialHasher>) -> Self {
        self.credentials = CredentialStore::new(self.config.clone(), Arc::clone(&self.shared), hasher);
        self
    }

    /// Attach a best-effort notifier
    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.records = RecordStore::new(Arc::clone(&self.shared), Some(notifier));
        self
    }

    /// Configuration in effect
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ClinicConfig {
        &self.config
    }

    // --- credential operations ---

    /// Register a new account, see [`CredentialStore::register`]
    ///
    /// # Errors
    /// See [`CredentialStore::register`]
    pub fn register(&self, request: NewAccount) -> Result<clinic_model::AccountId, StoreError> {
        self.credentials.register(request)
    }

    /// Authenticate, see [`CredentialStore::authenticate`]
    ///
    /// # Errors
    /// See [`CredentialStore::authenticate`]
    pub fn authenticate(&self, email: &str, password: &str) -> Result<Session, StoreError> {
        self.credentials.authenticate(email, password)
    }

    /// Fetch the session's own account record
    ///
    /// # Errors
    /// See [`CredentialStore::profile`]
    pub fn profile(&self, session: &Session) -> Result<Account, StoreError> {
        self.credentials.profile(session)
    }

    /// Update the session's own profile
    ///
    /// # Errors
    /// See [`CredentialStore::update_profile`]
    pub fn update_profile(&self, session: &Session, update: ProfileUpdate) -> Result<(), StoreError> {
        self.credentials.update_profile(session, update)
    }

    /// List all accounts, admin only
    ///
    /// # Errors
    /// See [`CredentialStore::list_accounts`]
    pub fn list_accounts(&self, session: &Session) -> Result<Vec<Account>, StoreError> {
        self.credentials.list_accounts(session)
    }

    // --- record operations ---

    /// Book an appointment, see [`RecordStore::create_appointment`]
    ///
    /// # Errors
    /// See [`RecordStore::create_appointment`]
    pub fn create_appointment(
        &self,
        session: &Session,
        request: NewAppointment,
    ) -> Result<BookingOutcome, StoreError> {
        self.records.create_appointment(session, request)
    }

    /// List appointments visible to the session
    #[must_use]
    pub fn list_appointments(
        &self,
        session: &Session,
        filter: &AppointmentFilter,
    ) -> Vec<Appointment> {
        self.records.list_appointments(session, filter)
    }

    /// Move an appointment to a new status
    ///
    /// # Errors
    /// See [`RecordStore::update_status`]
    pub fn update_status(
        &self,
        session: &Session,
        id: AppointmentId,
        new_status: AppointmentStatus,
    ) -> Result<(), StoreError> {
        self.records.update_status(session, id, new_status)
    }

    /// Reassign an appointment, admin only
    ///
    /// # Errors
    /// See [`RecordStore::reassign`]
    pub fn reassign(
        &self,
        session: &Session,
        id: AppointmentId,
        new_staff: &str,
    ) -> Result<(), StoreError> {
        self.records.reassign(session, id, new_staff)
    }

    /// Mark an appointment paid
    ///
    /// # Errors
    /// See [`RecordStore::mark_paid`]
    pub fn mark_paid(&self, session: &Session, id: AppointmentId) -> Result<(), StoreError> {
        self.records.mark_paid(session, id)
    }

    /// Delete an appointment, admin only
    ///
    /// # Errors
    /// See [`RecordStore::delete_appointment`]
    pub fn delete_appointment(&self, session: &Session, id: AppointmentId) -> Result<(), StoreError> {
        self.records.delete_appointment(session, id)
    }

    /// Record a case report, staff/admin only
    ///
    /// # Errors
    /// See [`RecordStore::create_report`]
    pub fn create_report(&self, session: &Session, request: NewReport) -> Result<ReportId, StoreError> {
        self.records.create_report(session, request)
    }

    /// List reports visible to the session
    #[must_use]
    pub fn list_reports(&self, session: &Session) -> Vec<Report> {
        self.records.list_reports(session)
    }

    // --- projection ---

    /// Dashboard tallies, admin only
    ///
    /// Recomputed from the snapshot on every call; nothing is cached.
    ///
    /// # Errors
    /// `Forbidden` for non-admin sessions
    pub fn dashboard(&self, session: &Session) -> Result<DashboardSummary, StoreError> {
        if !session.is_admin() {
            return Err(StoreError::forbidden(session.role));
        }
        let state = self.shared.state.read();
        let accounts: Vec<Account> = state.accounts.values().cloned().collect();
        let appointments: Vec<Appointment> = state.appointments.values().cloned().collect();
        Ok(clinic_projection::summarize(
            &accounts,
            &appointments,
            &state.reports,
        ))
    }
}
