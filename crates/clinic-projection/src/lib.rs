//! Clinic Projection - read-side dashboard aggregation
//!
//! Pure functions over record slices: totals and grouped counts for the
//! admin dashboard. Nothing here mutates or caches — record volume at a
//! single clinic is small enough that recomputation per request is always
//! cheap, so the summary is derived fresh from store contents every time.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

use chrono::NaiveDate;
use clinic_model::{Account, Appointment, AppointmentStatus, Report};
use serde::Serialize;
use std::collections::BTreeMap;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Dashboard tallies derived from store contents
///
/// Group-bys use sorted maps so rendered tables and charts come out in a
/// deterministic order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    /// Total registered accounts
    pub total_accounts: usize,
    /// Total appointments
    pub total_appointments: usize,
    /// Total case reports
    pub total_reports: usize,
    /// Appointments per lifecycle status
    pub by_status: BTreeMap<AppointmentStatus, usize>,
    /// Appointments per service type
    pub by_service: BTreeMap<String, usize>,
    /// Appointments per calendar date
    pub by_date: BTreeMap<NaiveDate, usize>,
}

impl DashboardSummary {
    /// Count for one status, zero if absent
    #[inline]
    #[must_use]
    pub fn status_count(&self, status: AppointmentStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }
}

/// Compute the dashboard summary from record slices
#[must_use]
pub fn summarize(
    accounts: &[Account],
    appointments: &[Appointment],
    reports: &[Report],
) -> DashboardSummary {
    let mut summary = DashboardSummary {
        total_accounts: accounts.len(),
        total_appointments: appointments.len(),
        total_reports: reports.len(),
        ..DashboardSummary::default()
    };

    for appointment in appointments {
        *summary.by_status.entry(appointment.status).or_default() += 1;
        *summary.by_service.entry(appointment.service.clone()).or_default() += 1;
        *summary.by_date.entry(appointment.date).or_default() += 1;
    }

    summary
}
