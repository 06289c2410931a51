//! File-backed persistence across portal restarts

use clinic_model::{AppointmentFilter, NewAppointment, Role};
use clinic_store::{ClinicConfig, ClinicPortal, JsonFileStorage};
use clinic_test_utils::{login, register, PlainHasher};
use std::path::Path;
use std::sync::Arc;

fn open_portal(dir: &Path) -> ClinicPortal {
    clinic_test_utils::init_tracing();
    let backend = JsonFileStorage::new(dir).unwrap();
    ClinicPortal::open(ClinicConfig::new(), Box::new(backend))
        .unwrap()
        .with_hasher(Arc::new(PlainHasher))
}

#[test]
fn records_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let portal = open_portal(dir.path());
        register(&portal, "Bob", "bob@clinic.org", Role::Staff);
        register(&portal, "Alice", "alice@clinic.org", Role::Patient);
        let alice = login(&portal, "alice@clinic.org");
        portal
            .create_appointment(&alice, NewAppointment::new("Alice", "Psychotherapy", "2025-01-10", "14:30"))
            .unwrap();
    }

    // Fresh portal over the same directory.
    let portal = open_portal(dir.path());
    let alice = login(&portal, "alice@clinic.org");
    let listed = portal.list_appointments(&alice, &AppointmentFilter::new());
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].assigned_staff.as_deref(), Some("bob@clinic.org"));
}

#[test]
fn rotation_continues_after_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let portal = open_portal(dir.path());
        register(&portal, "Bob", "bob@clinic.org", Role::Staff);
        register(&portal, "Carol", "carol@clinic.org", Role::Staff);
        register(&portal, "Alice", "alice@clinic.org", Role::Patient);
        let alice = login(&portal, "alice@clinic.org");
        let first = portal
            .create_appointment(&alice, NewAppointment::new("Alice", "Checkup", "2025-01-10", "09:00"))
            .unwrap();
        assert_eq!(first.assigned_staff.as_deref(), Some("bob@clinic.org"));
    }

    // The cursor is persisted: the next booking goes to Carol, not back to Bob.
    let portal = open_portal(dir.path());
    let alice = login(&portal, "alice@clinic.org");
    let second = portal
        .create_appointment(&alice, NewAppointment::new("Alice", "Checkup", "2025-01-11", "09:00"))
        .unwrap();
    assert_eq!(second.assigned_staff.as_deref(), Some("carol@clinic.org"));
}

#[test]
fn table_files_exist_per_logical_table() {
    let dir = tempfile::tempdir().unwrap();
    {
        let portal = open_portal(dir.path());
        register(&portal, "Bob", "bob@clinic.org", Role::Staff);
    }
    for file in ["accounts.json", "appointments.json", "reports.json", "meta.json"] {
        assert!(dir.path().join(file).exists(), "{file} missing");
    }
}
