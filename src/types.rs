//! Common types used throughout the LMS client
//!
//! This module contains the identifier types shared across the HTTP and
//! domain layers, including the SIS-alias reference types that render as
//! path segments.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// Native numeric resource identifier
pub type Id = u64;

/// Query parameters for a single request
pub type Params = Vec<(String, String)>;

// ============================================================================
// SIS-Alias References
// ============================================================================
//
// Every reference renders directly into a request path. The SIS variants
// carry the upstream's fixed literal prefix so no lookup round-trip is
// needed to resolve an external identifier.

/// Reference to a user: native ID, SIS alias, or the calling user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserRef {
    /// Native numeric ID
    Id(Id),
    /// External SIS identifier, rendered as `sis_user_id:<id>`
    Sis(String),
    /// The authenticated user, rendered as the literal `self`
    Current,
}

impl UserRef {
    /// Reference a user by SIS identifier
    pub fn sis(id: impl Into<String>) -> Self {
        Self::Sis(id.into())
    }
}

impl Default for UserRef {
    fn default() -> Self {
        Self::Current
    }
}

impl From<Id> for UserRef {
    fn from(id: Id) -> Self {
        Self::Id(id)
    }
}

impl fmt::Display for UserRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Sis(sis) => write!(f, "sis_user_id:{sis}"),
            Self::Current => write!(f, "self"),
        }
    }
}

/// Reference to a course: native ID or SIS alias
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseRef {
    /// Native numeric ID
    Id(Id),
    /// External SIS identifier, rendered as `sis_course_id:<id>`
    Sis(String),
}

impl CourseRef {
    /// Reference a course by SIS identifier
    pub fn sis(id: impl Into<String>) -> Self {
        Self::Sis(id.into())
    }
}

impl From<Id> for CourseRef {
    fn from(id: Id) -> Self {
        Self::Id(id)
    }
}

impl fmt::Display for CourseRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Sis(sis) => write!(f, "sis_course_id:{sis}"),
        }
    }
}

/// Reference to a section: native ID or SIS alias
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionRef {
    /// Native numeric ID
    Id(Id),
    /// External SIS identifier, rendered as `sis_section_id:<id>`
    Sis(String),
}

impl SectionRef {
    /// Reference a section by SIS identifier
    pub fn sis(id: impl Into<String>) -> Self {
        Self::Sis(id.into())
    }
}

impl From<Id> for SectionRef {
    fn from(id: Id) -> Self {
        Self::Id(id)
    }
}

impl fmt::Display for SectionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Sis(sis) => write!(f, "sis_section_id:{sis}"),
        }
    }
}

// ============================================================================
// Enrollment Type
// ============================================================================

/// Short enrollment type, as used in list filters and creation payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentType {
    Student,
    Teacher,
    Ta,
    Observer,
    Designer,
}

impl EnrollmentType {
    /// The wire form of the short type
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
            Self::Ta => "ta",
            Self::Observer => "observer",
            Self::Designer => "designer",
        }
    }
}

impl fmt::Display for EnrollmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_ref_display() {
        assert_eq!(UserRef::Id(42).to_string(), "42");
        assert_eq!(UserRef::sis("A100").to_string(), "sis_user_id:A100");
        assert_eq!(UserRef::Current.to_string(), "self");
        assert_eq!(UserRef::default(), UserRef::Current);
    }

    #[test]
    fn test_course_ref_display() {
        assert_eq!(CourseRef::Id(7).to_string(), "7");
        assert_eq!(CourseRef::sis("FA26.MATH").to_string(), "sis_course_id:FA26.MATH");
    }

    #[test]
    fn test_section_ref_display() {
        assert_eq!(SectionRef::Id(9).to_string(), "9");
        assert_eq!(
            SectionRef::sis("FA26.MATH.001").to_string(),
            "sis_section_id:FA26.MATH.001"
        );
        assert_eq!(SectionRef::from(9), SectionRef::Id(9));
    }

    #[test]
    fn test_enrollment_type_serde() {
        let t: EnrollmentType = serde_json::from_str("\"teacher\"").unwrap();
        assert_eq!(t, EnrollmentType::Teacher);

        let json = serde_json::to_string(&EnrollmentType::Ta).unwrap();
        assert_eq!(json, "\"ta\"");
    }

    #[test]
    fn test_enrollment_type_as_str() {
        assert_eq!(EnrollmentType::Student.as_str(), "student");
        assert_eq!(EnrollmentType::Observer.to_string(), "observer");
    }
}
