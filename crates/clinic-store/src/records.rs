//! Record store
//!
//! Owns the appointment and report tables. Every role and ownership
//! decision in the portal lives inside these operation contracts — callers
//! hand over a [`Session`] and never decide for themselves what a role may
//! do.
//!
//! Visibility scope:
//! - Admin sees every record
//! - Staff sees appointments assigned to them
//! - Patient sees appointments they created, and reports naming them

use crate::assignment::assign_next_staff;
use crate::error::StoreError;
use crate::notify::{Notifier, Warning};
use crate::session::Session;
use crate::storage::Shared;
use chrono::{NaiveDate, NaiveTime, Utc};
use clinic_model::{
    Appointment, AppointmentFilter, AppointmentId, AppointmentStatus, NewAppointment, NewReport,
    PaymentStatus, Report, ReportId, Role,
};
use std::sync::Arc;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

/// Result of a successful booking
///
/// `warnings` carries best-effort failures (currently only notification
/// delivery) that must not fail the booking itself.
#[derive(Debug, Clone)]
pub struct BookingOutcome {
    /// Id of the stored appointment
    pub id: AppointmentId,
    /// Staff the appointment ended up assigned to
    pub assigned_staff: Option<String>,
    /// Non-fatal conditions encountered after the record was stored
    pub warnings: Vec<Warning>,
}

/// Appointments and case reports with role-scoped access
#[derive(Clone)]
pub struct RecordStore {
    shared: Arc<Shared>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("notifier", &self.notifier.is_some())
            .finish_non_exhaustive()
    }
}

impl RecordStore {
    pub(crate) fn new(shared: Arc<Shared>, notifier: Option<Arc<dyn Notifier>>) -> Self {
        Self { shared, notifier }
    }

    /// Create an appointment
    ///
    /// Status starts `Pending`, payment `Unpaid`; the session's email is
    /// recorded as creator. Without an explicit staff choice the round-robin
    /// policy assigns one (or none, if no staff exist yet).
    ///
    /// # Errors
    /// - `ValidationFailed` for empty patient/service or malformed
    ///   date (`YYYY-MM-DD`) / time (`HH:MM`)
    /// - `NotFound` if an explicitly chosen staff email is not registered
    /// - `ValidationFailed` if the chosen account is not Staff
    pub fn create_appointment(
        &self,
        session: &Session,
        request: NewAppointment,
    ) -> Result<BookingOutcome, StoreError> {
        if request.patient_name.trim().is_empty() {
            return Err(StoreError::ValidationFailed("patient name is required".to_string()));
        }
        if request.service.trim().is_empty() {
            return Err(StoreError::ValidationFailed("service is required".to_string()));
        }
        let date = NaiveDate::parse_from_str(&request.date, DATE_FORMAT)
            .map_err(|_| StoreError::ValidationFailed(format!("malformed date: {}", request.date)))?;
        let time = NaiveTime::parse_from_str(&request.time, TIME_FORMAT)
            .map_err(|_| StoreError::ValidationFailed(format!("malformed time: {}", request.time)))?;

        let mut state = self.shared.state.write();

        let assigned_staff = match request.assigned_staff {
            Some(email) => {
                let email = email.to_lowercase();
                let Some(account) = state.account(&email) else {
                    return Err(StoreError::NotFound(email));
                };
                if account.role != Role::Staff {
                    return Err(StoreError::ValidationFailed(format!(
                        "{email} is not a staff account"
                    )));
                }
                Some(email)
            }
            None => assign_next_staff(&mut state),
        };

        let appointment = Appointment {
            id: AppointmentId::new(),
            patient_name: request.patient_name.trim().to_string(),
            service: request.service.trim().to_string(),
            date,
            time,
            assigned_staff: assigned_staff.clone(),
            telehealth: request.telehealth,
            status: AppointmentStatus::Pending,
            payment_status: PaymentStatus::Unpaid,
            created_by: session.email.clone(),
            booked_at: Utc::now(),
        };
        let id = appointment.id;
        let stored = appointment.clone();
        state.appointments.insert(id, appointment);
        drop(state);
        self.shared.commit()?;

        tracing::info!(
            "appointment {} booked by {} (staff: {})",
            id,
            session.email,
            assigned_staff.as_deref().unwrap_or("unassigned"),
        );

        let mut warnings = Vec::new();
        if let Some(notifier) = &self.notifier {
            if let Err(e) = notifier.appointment_booked(&stored) {
                tracing::warn!("booking notification failed for {id}: {e}");
                warnings.push(Warning::NotificationFailed(e.to_string()));
            }
        }

        Ok(BookingOutcome {
            id,
            assigned_staff,
            warnings,
        })
    }

    /// List appointments visible to the session, narrowed by `filter`
    ///
    /// Results keep insertion order and are identical across calls when no
    /// mutation happens in between.
    #[must_use]
    pub fn list_appointments(
        &self,
        session: &Session,
        filter: &AppointmentFilter,
    ) -> Vec<Appointment> {
        let state = self.shared.state.read();
        state
            .appointments
            .values()
            .filter(|a| visible_to(session, a))
            .filter(|a| filter.matches(a))
            .cloned()
            .collect()
    }

    /// Move an appointment to a new status
    ///
    /// Permitted for Admin and for the Staff member the record is assigned
    /// to. On any failure the stored status is unchanged.
    ///
    /// # Errors
    /// - `NotFound` for an absent id
    /// - `Forbidden` for anyone else
    /// - `ValidationFailed` for a transition the status table disallows
    pub fn update_status(
        &self,
        session: &Session,
        id: AppointmentId,
        new_status: AppointmentStatus,
    ) -> Result<(), StoreError> {
        let mut state = self.shared.state.write();
        let Some(appointment) = state.appointments.get_mut(&id) else {
            return Err(StoreError::NotFound(id.to_string()));
        };

        let is_assigned_staff = session.role == Role::Staff
            && appointment.assigned_staff.as_deref() == Some(session.email.as_str());
        if !(session.is_admin() || is_assigned_staff) {
            return Err(StoreError::forbidden(session.role));
        }

        if !appointment.status.can_transition_to(new_status) {
            return Err(StoreError::ValidationFailed(format!(
                "cannot move appointment from {} to {new_status}",
                appointment.status
            )));
        }

        let previous = appointment.status;
        appointment.status = new_status;
        drop(state);
        self.shared.commit()?;

        tracing::info!("appointment {id}: {previous} -> {new_status} by {}", session.email);
        Ok(())
    }

    /// Hand an appointment to a different staff member, admin only
    ///
    /// # Errors
    /// - `Forbidden` for non-admin sessions
    /// - `NotFound` for an absent appointment or staff email
    /// - `ValidationFailed` if the target account is not Staff
    pub fn reassign(
        &self,
        session: &Session,
        id: AppointmentId,
        new_staff: &str,
    ) -> Result<(), StoreError> {
        if !session.is_admin() {
            return Err(StoreError::forbidden(session.role));
        }

        let email = new_staff.to_lowercase();
        let mut state = self.shared.state.write();
        let Some(account) = state.account(&email) else {
            return Err(StoreError::NotFound(email));
        };
        if account.role != Role::Staff {
            return Err(StoreError::ValidationFailed(format!("{email} is not a staff account")));
        }
        let Some(appointment) = state.appointments.get_mut(&id) else {
            return Err(StoreError::NotFound(id.to_string()));
        };
        appointment.assigned_staff = Some(email.clone());
        drop(state);
        self.shared.commit()?;

        tracing::info!("appointment {id} reassigned to {email}");
        Ok(())
    }

    /// Mark an appointment paid
    ///
    /// The Patient who created the record may settle it, as may Admin.
    ///
    /// # Errors
    /// - `NotFound` for an absent id
    /// - `Forbidden` for anyone else
    pub fn mark_paid(&self, session: &Session, id: AppointmentId) -> Result<(), StoreError> {
        let mut state = self.shared.state.write();
        let Some(appointment) = state.appointments.get_mut(&id) else {
            return Err(StoreError::NotFound(id.to_string()));
        };

        let is_owner_patient =
            session.role == Role::Patient && appointment.created_by == session.email;
        if !(session.is_admin() || is_owner_patient) {
            return Err(StoreError::forbidden(session.role));
        }

        appointment.payment_status = PaymentStatus::Paid;
        drop(state);
        self.shared.commit()?;

        tracing::info!("appointment {id} marked paid by {}", session.email);
        Ok(())
    }

    /// Physically remove an appointment, admin only
    ///
    /// The one destructive operation in the store.
    ///
    /// # Errors
    /// - `Forbidden` for non-admin sessions
    /// - `NotFound` for an absent id
    pub fn delete_appointment(&self, session: &Session, id: AppointmentId) -> Result<(), StoreError> {
        if !session.is_admin() {
            return Err(StoreError::forbidden(session.role));
        }

        let mut state = self.shared.state.write();
        if state.appointments.shift_remove(&id).is_none() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        drop(state);
        self.shared.commit()?;

        tracing::warn!("appointment {id} deleted by {}", session.email);
        Ok(())
    }

    /// Store a case report, staff/admin only
    ///
    /// Reports are immutable once stored; no update path exists.
    ///
    /// # Errors
    /// - `Forbidden` for Patient sessions
    /// - `ValidationFailed` for an empty patient name
    pub fn create_report(&self, session: &Session, request: NewReport) -> Result<ReportId, StoreError> {
        if !session.role.can_author_reports() {
            return Err(StoreError::forbidden(session.role));
        }
        if request.patient_name.trim().is_empty() {
            return Err(StoreError::ValidationFailed("patient name is required".to_string()));
        }

        let report = Report {
            id: ReportId::new(),
            patient_name: request.patient_name.trim().to_string(),
            symptoms: request.symptoms,
            treatment: request.treatment,
            diagnosis: request.diagnosis,
            author: session.email.clone(),
            recorded_at: Utc::now(),
        };
        let id = report.id;
        self.shared.state.write().reports.push(report);
        self.shared.commit()?;

        tracing::info!("report {id} recorded by {}", session.email);
        Ok(id)
    }

    /// List reports visible to the session
    ///
    /// Admin and Staff see all; a Patient sees reports whose patient name
    /// matches their display name (case-insensitive weak reference).
    #[must_use]
    pub fn list_reports(&self, session: &Session) -> Vec<Report> {
        let state = self.shared.state.read();
        state
            .reports
            .iter()
            .filter(|r| match session.role {
                Role::Admin | Role::Staff => true,
                Role::Patient => r.patient_name.eq_ignore_ascii_case(&session.display_name),
            })
            .cloned()
            .collect()
    }
}

fn visible_to(session: &Session, appointment: &Appointment) -> bool {
    if session.role.sees_all_records() {
        return true;
    }
    match session.role {
        Role::Staff => appointment.assigned_staff.as_deref() == Some(session.email.as_str()),
        _ => appointment.created_by == session.email,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, Shared};
    use clinic_model::{Account, AccountId};

    fn store_with_accounts(accounts: &[(&str, Role)]) -> (RecordStore, Vec<Session>) {
        let shared = Shared::open(Box::new(MemoryStorage::new())).unwrap();
        let mut sessions = Vec::new();
        {
            let mut state = shared.state.write();
            for (email, role) in accounts {
                let account = Account {
                    id: AccountId::new(),
                    display_name: email.split('@').next().unwrap().to_string(),
                    email: (*email).to_string(),
                    password_hash: String::new(),
                    role: *role,
                    bio: None,
                    phone: None,
                    photo_path: None,
                    registered_at: Utc::now(),
                };
                sessions.push(Session::for_account(&account));
                state.accounts.insert(account.email.clone(), account);
            }
        }
        (RecordStore::new(shared, None), sessions)
    }

    #[test]
    fn booking_rejects_malformed_date_and_time() {
        let (store, sessions) = store_with_accounts(&[("alice@clinic.org", Role::Patient)]);
        let alice = &sessions[0];

        let bad_date = NewAppointment::new("Alice", "Psychotherapy", "10-01-2025", "14:30");
        assert!(matches!(
            store.create_appointment(alice, bad_date),
            Err(StoreError::ValidationFailed(_))
        ));

        let bad_time = NewAppointment::new("Alice", "Psychotherapy", "2025-01-10", "2pm");
        assert!(matches!(
            store.create_appointment(alice, bad_time),
            Err(StoreError::ValidationFailed(_))
        ));
    }

    #[test]
    fn booking_without_staff_uses_rotation() {
        let (store, sessions) = store_with_accounts(&[
            ("alice@clinic.org", Role::Patient),
            ("bob@clinic.org", Role::Staff),
        ]);
        let alice = &sessions[0];

        let outcome = store
            .create_appointment(
                alice,
                NewAppointment::new("Alice", "Psychotherapy", "2025-01-10", "14:30"),
            )
            .unwrap();
        assert_eq!(outcome.assigned_staff.as_deref(), Some("bob@clinic.org"));
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn explicit_staff_must_be_staff() {
        let (store, sessions) = store_with_accounts(&[
            ("alice@clinic.org", Role::Patient),
            ("carol@clinic.org", Role::Patient),
        ]);
        let alice = &sessions[0];

        let to_patient = NewAppointment::new("Alice", "Checkup", "2025-01-10", "09:00")
            .with_staff("carol@clinic.org");
        assert!(matches!(
            store.create_appointment(alice, to_patient),
            Err(StoreError::ValidationFailed(_))
        ));

        let to_nobody = NewAppointment::new("Alice", "Checkup", "2025-01-10", "09:00")
            .with_staff("ghost@clinic.org");
        assert!(matches!(
            store.create_appointment(alice, to_nobody),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn update_status_requires_assignment_or_admin() {
        let (store, sessions) = store_with_accounts(&[
            ("alice@clinic.org", Role::Patient),
            ("bob@clinic.org", Role::Staff),
            ("carol@clinic.org", Role::Staff),
            ("root@clinic.org", Role::Admin),
        ]);
        let (alice, bob, carol, admin) = (&sessions[0], &sessions[1], &sessions[2], &sessions[3]);

        let outcome = store
            .create_appointment(
                alice,
                NewAppointment::new("Alice", "Psychotherapy", "2025-01-10", "14:30")
                    .with_staff("bob@clinic.org"),
            )
            .unwrap();

        // Carol is staff but not assigned.
        let err = store
            .update_status(carol, outcome.id, AppointmentStatus::Approved)
            .unwrap_err();
        assert!(err.is_forbidden());
        let listed = store.list_appointments(admin, &AppointmentFilter::new());
        assert_eq!(listed[0].status, AppointmentStatus::Pending);

        store.update_status(bob, outcome.id, AppointmentStatus::Approved).unwrap();
        store.update_status(admin, outcome.id, AppointmentStatus::Completed).unwrap();
    }

    #[test]
    fn invalid_transition_is_validation_not_permission() {
        let (store, sessions) = store_with_accounts(&[
            ("alice@clinic.org", Role::Patient),
            ("bob@clinic.org", Role::Staff),
            ("root@clinic.org", Role::Admin),
        ]);
        let (alice, admin) = (&sessions[0], &sessions[2]);

        let outcome = store
            .create_appointment(
                alice,
                NewAppointment::new("Alice", "Psychotherapy", "2025-01-10", "14:30"),
            )
            .unwrap();
        store.update_status(admin, outcome.id, AppointmentStatus::Rejected).unwrap();

        let err = store
            .update_status(admin, outcome.id, AppointmentStatus::Approved)
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn mark_paid_owner_or_admin() {
        let (store, sessions) = store_with_accounts(&[
            ("alice@clinic.org", Role::Patient),
            ("dave@clinic.org", Role::Patient),
            ("bob@clinic.org", Role::Staff),
            ("root@clinic.org", Role::Admin),
        ]);
        let (alice, dave, bob, admin) = (&sessions[0], &sessions[1], &sessions[2], &sessions[3]);

        let outcome = store
            .create_appointment(
                alice,
                NewAppointment::new("Alice", "Psychotherapy", "2025-01-10", "14:30"),
            )
            .unwrap();

        assert!(store.mark_paid(dave, outcome.id).unwrap_err().is_forbidden());
        assert!(store.mark_paid(bob, outcome.id).unwrap_err().is_forbidden());

        store.mark_paid(alice, outcome.id).unwrap();
        let listed = store.list_appointments(admin, &AppointmentFilter::new());
        assert_eq!(listed[0].payment_status, PaymentStatus::Paid);
    }

    #[test]
    fn delete_is_admin_only() {
        let (store, sessions) = store_with_accounts(&[
            ("alice@clinic.org", Role::Patient),
            ("root@clinic.org", Role::Admin),
        ]);
        let (alice, admin) = (&sessions[0], &sessions[1]);

        let outcome = store
            .create_appointment(
                alice,
                NewAppointment::new("Alice", "Psychotherapy", "2025-01-10", "14:30"),
            )
            .unwrap();

        assert!(store.delete_appointment(alice, outcome.id).unwrap_err().is_forbidden());
        store.delete_appointment(admin, outcome.id).unwrap();
        assert!(matches!(
            store.delete_appointment(admin, outcome.id),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn reports_are_staff_authored_and_patient_scoped() {
        let (store, sessions) = store_with_accounts(&[
            ("alice@clinic.org", Role::Patient),
            ("bob@clinic.org", Role::Staff),
        ]);
        let (alice, bob) = (&sessions[0], &sessions[1]);

        let err = store
            .create_report(alice, NewReport::new("alice", "a", "b", "c"))
            .unwrap_err();
        assert!(err.is_forbidden());

        store
            .create_report(bob, NewReport::new("alice", "insomnia", "CBT", "stress"))
            .unwrap();
        store
            .create_report(bob, NewReport::new("Dave Jones", "cough", "rest", "cold"))
            .unwrap();

        assert_eq!(store.list_reports(bob).len(), 2);

        // Alice's display name (derived from email local part) matches only her report.
        let alices = store.list_reports(alice);
        assert_eq!(alices.len(), 1);
        assert_eq!(alices[0].patient_name, "alice");
    }
}
