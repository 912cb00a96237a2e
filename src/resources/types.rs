//! Resource and payload type definitions

use crate::types::{EnrollmentType, Id, Params};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Response Types
// ============================================================================

/// An account in the institution hierarchy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub parent_account_id: Option<Id>,
    #[serde(default)]
    pub root_account_id: Option<Id>,
    #[serde(default)]
    pub workflow_state: Option<String>,
}

/// A course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub course_code: Option<String>,
    #[serde(default)]
    pub account_id: Option<Id>,
    #[serde(default)]
    pub sis_course_id: Option<String>,
    #[serde(default)]
    pub enrollment_term_id: Option<Id>,
    #[serde(default)]
    pub workflow_state: Option<String>,
    #[serde(default)]
    pub start_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub time_zone: Option<String>,
}

/// A section within a course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: Id,
    pub name: String,
    pub course_id: Id,
    #[serde(default)]
    pub sis_section_id: Option<String>,
    #[serde(default)]
    pub start_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_at: Option<DateTime<Utc>>,
}

/// An enrollment binding a user to a course section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: Id,
    pub course_id: Id,
    pub course_section_id: Id,
    pub user_id: Id,
    /// Full upstream enrollment type, e.g. `StudentEnrollment`
    #[serde(rename = "type")]
    pub enrollment_type: String,
    #[serde(default)]
    pub enrollment_state: Option<String>,
    #[serde(default)]
    pub sis_section_id: Option<String>,
}

/// A grading standard attached to an account or course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingStandard {
    pub id: Id,
    pub title: String,
    #[serde(default)]
    pub context_type: Option<String>,
    #[serde(default)]
    pub context_id: Option<Id>,
    #[serde(default)]
    pub grading_scheme: Vec<GradingSchemeEntry>,
}

/// One cutoff row of a grading scheme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingSchemeEntry {
    pub name: String,
    pub value: f64,
}

// ============================================================================
// Request Payloads
// ============================================================================

/// Wire wrapper for course creation/update
#[derive(Debug, Clone, Default, Serialize)]
pub struct CoursePayload {
    pub course: CourseFields,
}

/// Course fields; unset fields are omitted from the request body
#[derive(Debug, Clone, Default, Serialize)]
pub struct CourseFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sis_course_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl CoursePayload {
    /// Payload for a course with the given name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            course: CourseFields {
                name: Some(name.into()),
                ..CourseFields::default()
            },
        }
    }
}

/// Wire wrapper for section creation/update
#[derive(Debug, Clone, Default, Serialize)]
pub struct SectionPayload {
    pub course_section: SectionFields,
}

/// Section fields; unset fields are omitted from the request body
#[derive(Debug, Clone, Default, Serialize)]
pub struct SectionFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `Some(None)` serializes an explicit `null`, which voids the SIS
    /// binding upstream; `None` omits the field entirely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sis_section_id: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_at: Option<DateTime<Utc>>,
}

impl SectionPayload {
    /// Payload for a section with the given name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            course_section: SectionFields {
                name: Some(name.into()),
                ..SectionFields::default()
            },
        }
    }

    /// Set the SIS identifier
    #[must_use]
    pub fn with_sis_id(mut self, sis_id: impl Into<String>) -> Self {
        self.course_section.sis_section_id = Some(Some(sis_id.into()));
        self
    }

    /// Payload that overwrites the SIS binding with an explicit null
    pub fn void_sis_section_id() -> Self {
        Self {
            course_section: SectionFields {
                sis_section_id: Some(None),
                ..SectionFields::default()
            },
        }
    }
}

/// Wire wrapper for enrollment creation
#[derive(Debug, Clone, Serialize)]
pub struct EnrollmentPayload {
    pub enrollment: EnrollmentFields,
}

/// Enrollment fields
#[derive(Debug, Clone, Serialize)]
pub struct EnrollmentFields {
    pub user_id: Id,
    /// Full upstream enrollment type, e.g. `StudentEnrollment`
    #[serde(rename = "type")]
    pub enrollment_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollment_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_section_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify: Option<bool>,
}

impl EnrollmentPayload {
    /// Payload enrolling a user with the given upstream enrollment type
    pub fn new(user_id: Id, enrollment_type: impl Into<String>) -> Self {
        Self {
            enrollment: EnrollmentFields {
                user_id,
                enrollment_type: enrollment_type.into(),
                enrollment_state: None,
                course_section_id: None,
                notify: None,
            },
        }
    }

    /// Target a specific section
    #[must_use]
    pub fn in_section(mut self, section_id: Id) -> Self {
        self.enrollment.course_section_id = Some(section_id);
        self
    }
}

// ============================================================================
// List Parameters
// ============================================================================

/// Filters for account course listings
#[derive(Debug, Clone, Default)]
pub struct CourseListParams {
    /// Only published (or only unpublished) courses
    pub published: Option<bool>,
    /// Only courses with at least one enrollment of these types
    pub enrollment_type: Vec<EnrollmentType>,
}

impl CourseListParams {
    pub(crate) fn to_query(&self) -> Params {
        let mut query = Params::new();
        if let Some(published) = self.published {
            query.push(("published".to_string(), published.to_string()));
        }
        for enrollment_type in &self.enrollment_type {
            query.push((
                "enrollment_type[]".to_string(),
                enrollment_type.as_str().to_string(),
            ));
        }
        query
    }
}
