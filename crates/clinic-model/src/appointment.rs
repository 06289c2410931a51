//! Appointment records
//!
//! The central entity of the record store. Appointments start `Pending` and
//! `Unpaid`; status moves through a small closed transition table and the
//! record is otherwise never rewritten (the admin-only delete in the store
//! crate is the one destructive path).

use crate::id::AppointmentId;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Appointment lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AppointmentStatus {
    /// Awaiting staff action
    Pending,
    /// Accepted by staff/admin
    Approved,
    /// Declined by staff/admin
    Rejected,
    /// Visit took place
    Completed,
    /// Entered retroactively by staff
    Recorded,
    /// Called off
    Canceled,
}

impl AppointmentStatus {
    /// Check if a transition to `next` is allowed
    ///
    /// `Pending` may move to any other status; `Approved` may still complete
    /// or cancel; everything else is terminal.
    #[inline]
    #[must_use]
    pub fn can_transition_to(self, next: AppointmentStatus) -> bool {
        match self {
            AppointmentStatus::Pending => next != AppointmentStatus::Pending,
            AppointmentStatus::Approved => matches!(
                next,
                AppointmentStatus::Completed | AppointmentStatus::Canceled
            ),
            _ => false,
        }
    }

    /// Check if no further transition is possible
    #[inline]
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            AppointmentStatus::Rejected
                | AppointmentStatus::Completed
                | AppointmentStatus::Recorded
                | AppointmentStatus::Canceled
        )
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AppointmentStatus::Pending => "Pending",
            AppointmentStatus::Approved => "Approved",
            AppointmentStatus::Rejected => "Rejected",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Recorded => "Recorded",
            AppointmentStatus::Canceled => "Canceled",
        };
        write!(f, "{name}")
    }
}

/// Payment state of an appointment
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Not yet paid
    Unpaid,
    /// Settled
    Paid,
}

/// A booked or recorded appointment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    /// Appointment identifier
    pub id: AppointmentId,
    /// Patient full name
    pub patient_name: String,
    /// Service requested (e.g. "Psychotherapy")
    pub service: String,
    /// Appointment date
    pub date: NaiveDate,
    /// Appointment time
    pub time: NaiveTime,
    /// Email of the assigned staff account, if any
    pub assigned_staff: Option<String>,
    /// Remote session rather than in-person
    pub telehealth: bool,
    /// Lifecycle status
    pub status: AppointmentStatus,
    /// Payment state
    pub payment_status: PaymentStatus,
    /// Email of the account that created the record
    pub created_by: String,
    /// Creation timestamp
    pub booked_at: DateTime<Utc>,
}

/// Booking request, field values as the presentation layer hands them over
///
/// Date and time arrive as strings and are validated by the store
/// (`YYYY-MM-DD` / `HH:MM`).
#[derive(Debug, Clone)]
pub struct NewAppointment {
    /// Patient full name
    pub patient_name: String,
    /// Service requested
    pub service: String,
    /// Date string, `YYYY-MM-DD`
    pub date: String,
    /// Time string, `HH:MM`
    pub time: String,
    /// Explicit staff choice; `None` lets the assignment policy pick
    pub assigned_staff: Option<String>,
    /// Remote session flag
    pub telehealth: bool,
}

impl NewAppointment {
    /// Create new booking request
    #[inline]
    #[must_use]
    pub fn new(
        patient_name: impl Into<String>,
        service: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            patient_name: patient_name.into(),
            service: service.into(),
            date: date.into(),
            time: time.into(),
            assigned_staff: None,
            telehealth: false,
        }
    }

    /// With an explicit staff assignment
    #[inline]
    #[must_use]
    pub fn with_staff(mut self, staff_email: impl Into<String>) -> Self {
        self.assigned_staff = Some(staff_email.into());
        self
    }

    /// Mark as a telehealth session
    #[inline]
    #[must_use]
    pub fn telehealth(mut self) -> Self {
        self.telehealth = true;
        self
    }
}
