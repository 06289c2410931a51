//! Authenticated session context
//!
//! Produced by a successful [`authenticate`](crate::CredentialStore::authenticate)
//! and passed explicitly to every record operation — there is no ambient
//! "current user" anywhere in the store. The caller holds it for the length
//! of one interactive session; there is no token mechanism.

use clinic_model::{Account, AccountId, Role};

/// Identity of the authenticated caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Account identifier
    pub account_id: AccountId,
    /// Lowercased login email
    pub email: String,
    /// Display name at authentication time
    pub display_name: String,
    /// Account role
    pub role: Role,
}

impl Session {
    /// Build a session from an account record
    #[inline]
    #[must_use]
    pub fn for_account(account: &Account) -> Self {
        Self {
            account_id: account.id,
            email: account.email.clone(),
            display_name: account.display_name.clone(),
            role: account.role,
        }
    }

    /// Check if the session holds the admin role
    #[inline]
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
