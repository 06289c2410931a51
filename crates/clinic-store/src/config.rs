//! Store configuration
//!
//! A plain struct handed to [`ClinicPortal::open`](crate::ClinicPortal::open);
//! there is no environment or CLI surface.

use serde::{Deserialize, Serialize};

/// Clinic store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicConfig {
    /// Organizational email domain required at registration.
    ///
    /// `Some("clinic.org")` rejects anything not ending in `@clinic.org`;
    /// `None` disables the check (some portal variants never enforced one).
    pub required_email_domain: Option<String>,
}

impl ClinicConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a required email domain
    #[inline]
    #[must_use]
    pub fn with_email_domain(mut self, domain: impl Into<String>) -> Self {
        self.required_email_domain = Some(domain.into());
        self
    }

    /// Accept any email domain at registration
    #[inline]
    #[must_use]
    pub fn any_email_domain(mut self) -> Self {
        self.required_email_domain = None;
        self
    }
}

impl Default for ClinicConfig {
    fn default() -> Self {
        Self {
            required_email_domain: Some("clinic.org".to_string()),
        }
    }
}
