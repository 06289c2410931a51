//! Clinic Model - Entity types for the clinic record store
//!
//! Pure data definitions shared by every other crate in the workspace:
//! - Typed identifiers for accounts, appointments and reports
//! - The closed [`Role`] vocabulary
//! - Account, appointment and case-report records
//! - Query filters for appointment listings
//!
//! No storage, no permission logic — that lives in `clinic-store`.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod account;
pub mod appointment;
pub mod filter;
pub mod id;
pub mod report;
pub mod role;

// Re-exports for convenience
pub use account::{Account, NewAccount, ProfileUpdate};
pub use appointment::{Appointment, AppointmentStatus, NewAppointment, PaymentStatus};
pub use filter::AppointmentFilter;
pub use id::{AccountId, AppointmentId, ReportId};
pub use report::{NewReport, Report};
pub use role::Role;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
