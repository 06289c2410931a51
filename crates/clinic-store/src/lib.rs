//! Clinic Store - the authorization-aware core of the clinic portal
//!
//! The one component of the portal worth writing once instead of twenty
//! times:
//! - Credential store: registration, authentication, owner-only profiles
//! - Assignment policy: round-robin rotation across staff accounts
//! - Record store: appointments and case reports with role-scoped reads and
//!   centralized permission checks on every mutation
//! - A persisted snapshot behind a pluggable storage backend
//!
//! # Example
//!
//! ```rust,ignore
//! use clinic_model::{NewAccount, NewAppointment, Role};
//! use clinic_store::{ClinicConfig, ClinicPortal};
//!
//! let portal = ClinicPortal::in_memory(ClinicConfig::new());
//! portal.register(NewAccount::new("Bob", "bob@clinic.org", "secret", Role::Staff))?;
//! portal.register(NewAccount::new("Alice", "alice@clinic.org", "secret", Role::Patient))?;
//!
//! let alice = portal.authenticate("alice@clinic.org", "secret")?;
//! let outcome = portal.create_appointment(
//!     &alice,
//!     NewAppointment::new("Alice Smith", "Psychotherapy", "2025-01-10", "14:30"),
//! )?;
//! println!("booked {}", outcome.id);
//! # Ok::<(), clinic_store::StoreError>(())
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod assignment;
pub mod config;
pub mod credential;
pub mod error;
pub mod notify;
pub mod portal;
pub mod records;
pub mod session;
pub mod snapshot;
pub mod storage;

// Re-exports for convenience
pub use assignment::assign_next_staff;
pub use config::ClinicConfig;
pub use credential::{Argon2Hasher, CredentialHasher, CredentialStore};
pub use error::{StorageError, StoreError};
pub use notify::{Notifier, Warning};
pub use portal::ClinicPortal;
pub use records::{BookingOutcome, RecordStore};
pub use session::Session;
pub use snapshot::ClinicSnapshot;
pub use storage::{JsonFileStorage, MemoryStorage, StorageBackend};

// Re-export the dashboard type so portal callers need only this crate
pub use clinic_projection::DashboardSummary;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the clinic store
    pub use crate::{
        BookingOutcome, ClinicConfig, ClinicPortal, ClinicSnapshot, CredentialHasher,
        JsonFileStorage, MemoryStorage, Notifier, Session, StorageBackend, StoreError,
    };
    pub use clinic_model::{
        Account, Appointment, AppointmentFilter, AppointmentStatus, NewAccount, NewAppointment,
        NewReport, PaymentStatus, Report, Role,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
