//! Testing utilities for the clinic record store workspace
//!
//! Shared fixtures: a cheap reversible hasher (tests should not pay Argon2
//! costs per registration), a recording notifier, seeded portals, and a
//! tracing initializer.

#![allow(missing_docs)]

use clinic_model::{Appointment, NewAccount, Role};
use clinic_store::{ClinicConfig, ClinicPortal, CredentialHasher, Notifier, Session};
use parking_lot::Mutex;
use std::sync::Arc;

/// Transparent hasher for tests: stores `plain:<password>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainHasher;

impl CredentialHasher for PlainHasher {
    fn hash(&self, password: &str) -> anyhow::Result<String> {
        Ok(format!("plain:{password}"))
    }

    fn verify(&self, password: &str, stored: &str) -> bool {
        stored == format!("plain:{password}")
    }
}

/// Notifier that records what it was asked to announce.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub announced: Mutex<Vec<Appointment>>,
    pub fail_with: Mutex<Option<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make every subsequent delivery fail with `reason`.
    pub fn fail(&self, reason: &str) {
        *self.fail_with.lock() = Some(reason.to_string());
    }
}

impl Notifier for RecordingNotifier {
    fn appointment_booked(&self, appointment: &Appointment) -> anyhow::Result<()> {
        if let Some(reason) = self.fail_with.lock().clone() {
            anyhow::bail!("{reason}");
        }
        self.announced.lock().push(appointment.clone());
        Ok(())
    }
}

/// Empty in-memory portal with the cheap hasher.
pub fn test_portal() -> ClinicPortal {
    init_tracing();
    ClinicPortal::in_memory(ClinicConfig::new()).with_hasher(Arc::new(PlainHasher))
}

/// Portal seeded with one admin, two staff and one patient, plus their
/// open sessions.
pub struct SeededPortal {
    pub portal: ClinicPortal,
    pub admin: Session,
    pub staff: Vec<Session>,
    pub patient: Session,
}

pub fn seeded_portal() -> SeededPortal {
    let portal = test_portal();
    register(&portal, "Root Admin", "admin@clinic.org", Role::Admin);
    register(&portal, "Bob Reyes", "bob@clinic.org", Role::Staff);
    register(&portal, "Carol Nguyen", "carol@clinic.org", Role::Staff);
    register(&portal, "Alice Smith", "alice@clinic.org", Role::Patient);

    let admin = login(&portal, "admin@clinic.org");
    let staff = vec![login(&portal, "bob@clinic.org"), login(&portal, "carol@clinic.org")];
    let patient = login(&portal, "alice@clinic.org");

    SeededPortal {
        portal,
        admin,
        staff,
        patient,
    }
}

pub fn register(portal: &ClinicPortal, name: &str, email: &str, role: Role) {
    portal
        .register(NewAccount::new(name, email, "secret", role))
        .unwrap_or_else(|e| panic!("seeding {email} failed: {e}"));
}

pub fn login(portal: &ClinicPortal, email: &str) -> Session {
    portal
        .authenticate(email, "secret")
        .unwrap_or_else(|e| panic!("login {email} failed: {e}"))
}

/// Initialize tracing once for a test binary; respects `RUST_LOG`.
pub fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
