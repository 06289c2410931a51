//! Case reports
//!
//! Clinical notes written by staff. Reports are an append-only log: once
//! stored there is no update or delete path, and the store crate exposes
//! none. `patient_name` is a weak reference — patient listings match it
//! against the session's display name.

use crate::id::ReportId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An immutable clinical case report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Report identifier
    pub id: ReportId,
    /// Patient full name
    pub patient_name: String,
    /// Presenting symptoms
    pub symptoms: String,
    /// Treatment given or prescribed
    pub treatment: String,
    /// Clinical diagnosis
    pub diagnosis: String,
    /// Email of the authoring staff account
    pub author: String,
    /// Authoring timestamp
    pub recorded_at: DateTime<Utc>,
}

/// Report authoring request
#[derive(Debug, Clone)]
pub struct NewReport {
    /// Patient full name
    pub patient_name: String,
    /// Presenting symptoms
    pub symptoms: String,
    /// Treatment given or prescribed
    pub treatment: String,
    /// Clinical diagnosis
    pub diagnosis: String,
}

impl NewReport {
    /// Create new report request
    #[inline]
    #[must_use]
    pub fn new(
        patient_name: impl Into<String>,
        symptoms: impl Into<String>,
        treatment: impl Into<String>,
        diagnosis: impl Into<String>,
    ) -> Self {
        Self {
            patient_name: patient_name.into(),
            symptoms: symptoms.into(),
            treatment: treatment.into(),
            diagnosis: diagnosis.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_request_fields() {
        let req = NewReport::new("Alice Smith", "insomnia", "CBT referral", "acute stress");
        assert_eq!(req.patient_name, "Alice Smith");
        assert_eq!(req.diagnosis, "acute stress");
    }
}
