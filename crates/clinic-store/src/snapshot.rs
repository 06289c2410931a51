//! In-memory working copy of the three logical tables
//!
//! Accounts are keyed by lowercased email, appointments by id; both maps
//! keep insertion order, which is the listing order the presentation layer
//! sees. Reports are a plain append-only log. The round-robin cursor lives
//! here too so rotation survives a process restart.

use clinic_model::{Account, Appointment, AppointmentId, Report, Role};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Full portal state: the three tables plus assignment metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClinicSnapshot {
    /// Accounts keyed by lowercased email
    pub accounts: IndexMap<String, Account>,
    /// Appointments keyed by id, insertion-ordered
    pub appointments: IndexMap<AppointmentId, Appointment>,
    /// Append-only case reports
    pub reports: Vec<Report>,
    /// Round-robin position for staff assignment
    pub assignment_cursor: u64,
}

impl ClinicSnapshot {
    /// Create empty snapshot
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an account by email, case-insensitively
    #[must_use]
    pub fn account(&self, email: &str) -> Option<&Account> {
        self.accounts.get(&email.to_lowercase())
    }

    /// Emails of all Staff accounts in registration order
    #[must_use]
    pub fn staff_emails(&self) -> Vec<String> {
        self.accounts
            .values()
            .filter(|a| a.role == Role::Staff)
            .map(|a| a.email.clone())
            .collect()
    }
}
