//! Appointment listing filters
//!
//! All criteria are optional and compose with AND semantics: every provided
//! predicate must match. Name matches are case-insensitive substring
//! searches; the date is an exact match. Filters narrow a role-scoped
//! listing — they never widen what a session may see.

use crate::appointment::Appointment;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Search criteria for appointment listings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentFilter {
    /// Case-insensitive substring of the patient name
    pub patient_contains: Option<String>,
    /// Case-insensitive substring of the assigned staff email/name
    pub staff_contains: Option<String>,
    /// Exact appointment date
    pub on_date: Option<NaiveDate>,
}

impl AppointmentFilter {
    /// Create empty filter (matches everything)
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With patient-name substring
    #[inline]
    #[must_use]
    pub fn patient_contains(mut self, needle: impl Into<String>) -> Self {
        self.patient_contains = Some(needle.into());
        self
    }

    /// With staff substring
    #[inline]
    #[must_use]
    pub fn staff_contains(mut self, needle: impl Into<String>) -> Self {
        self.staff_contains = Some(needle.into());
        self
    }

    /// With exact date
    #[inline]
    #[must_use]
    pub fn on_date(mut self, date: NaiveDate) -> Self {
        self.on_date = Some(date);
        self
    }

    /// Check if the filter has no criteria
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patient_contains.is_none() && self.staff_contains.is_none() && self.on_date.is_none()
    }

    /// Check whether an appointment satisfies every provided criterion
    #[must_use]
    pub fn matches(&self, appointment: &Appointment) -> bool {
        if let Some(needle) = &self.patient_contains {
            if !contains_ignore_case(&appointment.patient_name, needle) {
                return false;
            }
        }
        if let Some(needle) = &self.staff_contains {
            let Some(staff) = &appointment.assigned_staff else {
                return false;
            };
            if !contains_ignore_case(staff, needle) {
                return false;
            }
        }
        if let Some(date) = self.on_date {
            if appointment.date != date {
                return false;
            }
        }
        true
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
