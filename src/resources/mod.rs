//! Domain resource types
//!
//! Typed request/response contracts for the account, course, section,
//! grading-standard, and enrollment endpoints. The connector layer treats
//! all of these as opaque serializable payloads; schema knowledge lives
//! entirely here.

mod types;

pub use types::{
    Account, Course, CourseFields, CourseListParams, CoursePayload, Enrollment, EnrollmentFields,
    EnrollmentPayload, GradingSchemeEntry, GradingStandard, Section, SectionFields, SectionPayload,
};

#[cfg(test)]
mod tests;
