//! Account roles
//!
//! A closed, tagged vocabulary. Every permission check in the store crate
//! dispatches on this type; role names are never compared as strings.

use serde::{Deserialize, Serialize};

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Books appointments, sees only their own records
    Patient,
    /// Works assigned appointments, authors case reports
    Staff,
    /// Full visibility, status/reassignment authority, dashboard access
    Admin,
}

impl Role {
    /// Check if this role may author case reports
    #[inline]
    #[must_use]
    pub fn can_author_reports(&self) -> bool {
        matches!(self, Role::Staff | Role::Admin)
    }

    /// Check if this role sees every record regardless of ownership
    #[inline]
    #[must_use]
    pub fn sees_all_records(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Role::Patient => "Patient",
            Role::Staff => "Staff",
            Role::Admin => "Admin",
        };
        write!(f, "{name}")
    }
}
