//! Round-robin staff assignment
//!
//! New appointments without an explicit staff choice rotate across Staff
//! accounts in registration order. The cursor lives in the snapshot and is
//! persisted with it, so a restart continues the rotation instead of
//! resetting to the first staff member.

use crate::snapshot::ClinicSnapshot;

/// Pick the next staff email in rotation and advance the cursor
///
/// Returns `None` when no Staff accounts exist; the cursor does not move in
/// that case.
#[must_use]
pub fn assign_next_staff(snapshot: &mut ClinicSnapshot) -> Option<String> {
    let staff = snapshot.staff_emails();
    if staff.is_empty() {
        return None;
    }
    let index = usize::try_from(snapshot.assignment_cursor).unwrap_or(0) % staff.len();
    snapshot.assignment_cursor = snapshot.assignment_cursor.wrapping_add(1);
    Some(staff[index].clone())
}
