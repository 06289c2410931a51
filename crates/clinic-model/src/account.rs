//! Account records
//!
//! An [`Account`] is created at registration and never deleted. The email is
//! the unique key (stored lowercased); appointments and reports refer to
//! accounts by this email string, not by a managed foreign key.

use crate::id::AccountId;
use crate::role::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered portal account
///
/// `password_hash` is an opaque PHC-format string produced by the store's
/// credential hasher; the raw password never reaches this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account identifier
    pub id: AccountId,
    /// Full display name
    pub display_name: String,
    /// Unique login email, lowercased
    pub email: String,
    /// Hashed credential (PHC string)
    pub password_hash: String,
    /// Account role
    pub role: Role,
    /// Short bio (profile page)
    pub bio: Option<String>,
    /// Contact phone
    pub phone: Option<String>,
    /// Reference to an uploaded profile photo
    pub photo_path: Option<String>,
    /// Registration timestamp
    pub registered_at: DateTime<Utc>,
}

/// Registration request
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Full display name
    pub display_name: String,
    /// Login email
    pub email: String,
    /// Raw password (hashed by the store before it is kept anywhere)
    pub password: String,
    /// Requested role
    pub role: Role,
}

impl NewAccount {
    /// Create new registration request
    #[inline]
    #[must_use]
    pub fn new(
        display_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            email: email.into(),
            password: password.into(),
            role,
        }
    }
}

/// Owner-editable profile fields
///
/// Fields left as `None` keep their current value.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    /// New display name
    pub display_name: Option<String>,
    /// New bio text
    pub bio: Option<String>,
    /// New contact phone
    pub phone: Option<String>,
    /// New photo reference
    pub photo_path: Option<String>,
}

impl ProfileUpdate {
    /// Create empty update
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With display name
    #[inline]
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// With bio
    #[inline]
    #[must_use]
    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into());
        self
    }

    /// With phone
    #[inline]
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// With photo reference
    #[inline]
    #[must_use]
    pub fn with_photo_path(mut self, path: impl Into<String>) -> Self {
        self.photo_path = Some(path.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_update_builder() {
        let update = ProfileUpdate::new()
            .with_display_name("Dr. Bob")
            .with_bio("Psychiatrist")
            .with_phone("555-0101");

        assert_eq!(update.display_name.as_deref(), Some("Dr. Bob"));
        assert_eq!(update.bio.as_deref(), Some("Psychiatrist"));
        assert_eq!(update.phone.as_deref(), Some("555-0101"));
        assert!(update.photo_path.is_none());
    }

    #[test]
    fn new_account_carries_role() {
        let req = NewAccount::new("Alice", "alice@clinic.org", "pw", Role::Patient);
        assert_eq!(req.role, Role::Patient);
        assert_eq!(req.email, "alice@clinic.org");
    }
}
