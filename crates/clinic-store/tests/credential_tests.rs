//! Registration and authentication behavior

use clinic_model::{NewAccount, ProfileUpdate, Role};
use clinic_store::{ClinicConfig, ClinicPortal, StoreError};
use clinic_test_utils::{test_portal, PlainHasher};
use std::sync::Arc;

#[test]
fn authenticate_returns_the_registered_role() {
    let portal = test_portal();
    for (email, role) in [
        ("pat@clinic.org", Role::Patient),
        ("doc@clinic.org", Role::Staff),
        ("boss@clinic.org", Role::Admin),
    ] {
        portal.register(NewAccount::new("Someone", email, "pw1", role)).unwrap();
        let session = portal.authenticate(email, "pw1").unwrap();
        assert_eq!(session.role, role);
        assert_eq!(session.email, email);
    }
}

#[test]
fn duplicate_registration_leaves_original_untouched() {
    let portal = test_portal();
    portal
        .register(NewAccount::new("Alice", "alice@clinic.org", "first-pw", Role::Patient))
        .unwrap();

    let err = portal
        .register(NewAccount::new("Impostor", "ALICE@clinic.org", "other-pw", Role::Admin))
        .unwrap_err();
    assert!(matches!(err, StoreError::DuplicateAccount(_)));

    // Original credential and role still hold.
    let session = portal.authenticate("alice@clinic.org", "first-pw").unwrap();
    assert_eq!(session.role, Role::Patient);
    assert_eq!(session.display_name, "Alice");
    assert!(matches!(
        portal.authenticate("alice@clinic.org", "other-pw"),
        Err(StoreError::AuthenticationFailed)
    ));
}

#[test]
fn wrong_password_and_unknown_email_are_indistinguishable() {
    let portal = test_portal();
    portal
        .register(NewAccount::new("Alice", "alice@clinic.org", "pw", Role::Patient))
        .unwrap();

    let wrong_pw = portal.authenticate("alice@clinic.org", "nope").unwrap_err();
    let unknown = portal.authenticate("ghost@clinic.org", "nope").unwrap_err();
    assert_eq!(wrong_pw.to_string(), unknown.to_string());
}

#[test]
fn registration_enforces_configured_domain() {
    let portal = ClinicPortal::in_memory(ClinicConfig::new().with_email_domain("thrivewellness.com"))
        .with_hasher(Arc::new(PlainHasher));

    assert!(matches!(
        portal.register(NewAccount::new("Eve", "eve@gmail.com", "pw", Role::Patient)),
        Err(StoreError::InvalidDomain(_))
    ));
    portal
        .register(NewAccount::new("Eve", "eve@thrivewellness.com", "pw", Role::Patient))
        .unwrap();
}

#[test]
fn open_domain_config_accepts_anything() {
    let portal =
        ClinicPortal::in_memory(ClinicConfig::new().any_email_domain()).with_hasher(Arc::new(PlainHasher));
    portal
        .register(NewAccount::new("Eve", "eve@gmail.com", "pw", Role::Patient))
        .unwrap();
}

#[test]
fn registration_rejects_malformed_input() {
    let portal = test_portal();
    assert!(portal
        .register(NewAccount::new("", "a@clinic.org", "pw", Role::Patient))
        .unwrap_err()
        .is_validation());
    assert!(portal
        .register(NewAccount::new("Alice", "a@clinic.org", "", Role::Patient))
        .unwrap_err()
        .is_validation());
    assert!(portal
        .register(NewAccount::new("Alice", "not-an-email", "pw", Role::Patient))
        .unwrap_err()
        .is_validation());
}

#[test]
fn profile_edits_apply_to_the_owner_only() {
    let portal = test_portal();
    portal
        .register(NewAccount::new("Bob", "bob@clinic.org", "pw", Role::Staff))
        .unwrap();
    portal
        .register(NewAccount::new("Carol", "carol@clinic.org", "pw", Role::Staff))
        .unwrap();

    let bob = portal.authenticate("bob@clinic.org", "pw").unwrap();
    portal
        .update_profile(&bob, ProfileUpdate::new().with_bio("Psychiatrist").with_phone("555-0101"))
        .unwrap();

    let bob_profile = portal.profile(&bob).unwrap();
    assert_eq!(bob_profile.bio.as_deref(), Some("Psychiatrist"));

    let carol = portal.authenticate("carol@clinic.org", "pw").unwrap();
    assert!(portal.profile(&carol).unwrap().bio.is_none());
}

#[test]
fn account_listing_is_admin_only() {
    let portal = test_portal();
    portal
        .register(NewAccount::new("Root", "root@clinic.org", "pw", Role::Admin))
        .unwrap();
    portal
        .register(NewAccount::new("Bob", "bob@clinic.org", "pw", Role::Staff))
        .unwrap();

    let admin = portal.authenticate("root@clinic.org", "pw").unwrap();
    assert_eq!(portal.list_accounts(&admin).unwrap().len(), 2);

    let bob = portal.authenticate("bob@clinic.org", "pw").unwrap();
    assert!(portal.list_accounts(&bob).unwrap_err().is_forbidden());
}

#[test]
fn argon2_portal_roundtrip() {
    // The production hasher, exercised once end to end.
    let portal = ClinicPortal::in_memory(ClinicConfig::new());
    portal
        .register(NewAccount::new("Alice", "alice@clinic.org", "hunter2", Role::Patient))
        .unwrap();
    portal.authenticate("alice@clinic.org", "hunter2").unwrap();
    assert!(matches!(
        portal.authenticate("alice@clinic.org", "hunter3"),
        Err(StoreError::AuthenticationFailed)
    ));
}
