//! Outbound notification seam
//!
//! The only externally-facing dependency of the store. Strictly best-effort:
//! a notifier failure never rolls back the record it was announcing, it is
//! attached to the successful outcome as a [`Warning`] and logged. Wiring a
//! real transport (email, SMS) is the deployment layer's problem.

use clinic_model::Appointment;

/// Best-effort outbound notifications
pub trait Notifier: Send + Sync {
    /// Announce a freshly booked appointment
    ///
    /// # Errors
    /// Opaque error if delivery fails; the store downgrades it to a warning
    fn appointment_booked(&self, appointment: &Appointment) -> anyhow::Result<()>;
}

/// Non-fatal condition attached to a successful mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The notifier failed; the record itself was stored
    NotificationFailed(String),
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::NotificationFailed(reason) => write!(f, "notification failed: {reason}"),
        }
    }
}
