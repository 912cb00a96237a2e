//! Tests for resource and payload types

use super::*;
use crate::types::EnrollmentType;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_course_deserializes_with_unknown_fields() {
    let course: Course = serde_json::from_value(json!({
        "id": 1234,
        "name": "Intro to Geology",
        "course_code": "GEOL 101",
        "account_id": 3,
        "sis_course_id": "FA26.GEOL.101",
        "workflow_state": "available",
        "start_at": "2026-08-24T06:00:00Z",
        "uuid": "ignored-by-this-client",
        "storage_quota_mb": 500
    }))
    .unwrap();

    assert_eq!(course.id, 1234);
    assert_eq!(course.course_code.as_deref(), Some("GEOL 101"));
    assert_eq!(course.sis_course_id.as_deref(), Some("FA26.GEOL.101"));
    assert!(course.end_at.is_none());
}

#[test]
fn test_enrollment_type_field_rename() {
    let enrollment: Enrollment = serde_json::from_value(json!({
        "id": 55,
        "course_id": 1234,
        "course_section_id": 88,
        "user_id": 9,
        "type": "StudentEnrollment",
        "enrollment_state": "active"
    }))
    .unwrap();

    assert_eq!(enrollment.enrollment_type, "StudentEnrollment");
    assert_eq!(enrollment.enrollment_state.as_deref(), Some("active"));
}

#[test]
fn test_course_payload_omits_unset_fields() {
    let payload = CoursePayload::named("Intro to Geology");
    let body = serde_json::to_value(&payload).unwrap();

    assert_eq!(body, json!({ "course": { "name": "Intro to Geology" } }));
}

#[test]
fn test_section_payload_with_sis_id() {
    let payload = SectionPayload::named("Section 001").with_sis_id("FA26.GEOL.101.001");
    let body = serde_json::to_value(&payload).unwrap();

    assert_eq!(
        body,
        json!({
            "course_section": {
                "name": "Section 001",
                "sis_section_id": "FA26.GEOL.101.001"
            }
        })
    );
}

#[test]
fn test_void_sis_payload_serializes_explicit_null() {
    // The strip-SIS stage relies on the null being present, not omitted.
    let payload = SectionPayload::void_sis_section_id();
    let body = serde_json::to_value(&payload).unwrap();

    assert_eq!(body, json!({ "course_section": { "sis_section_id": null } }));
}

#[test]
fn test_enrollment_payload() {
    let payload = EnrollmentPayload::new(9, "TeacherEnrollment").in_section(88);
    let body = serde_json::to_value(&payload).unwrap();

    assert_eq!(
        body,
        json!({
            "enrollment": {
                "user_id": 9,
                "type": "TeacherEnrollment",
                "course_section_id": 88
            }
        })
    );
}

#[test]
fn test_course_list_params_to_query() {
    let params = CourseListParams {
        published: Some(true),
        enrollment_type: vec![EnrollmentType::Teacher, EnrollmentType::Student],
    };

    assert_eq!(
        params.to_query(),
        vec![
            ("published".to_string(), "true".to_string()),
            ("enrollment_type[]".to_string(), "teacher".to_string()),
            ("enrollment_type[]".to_string(), "student".to_string()),
        ]
    );

    assert!(CourseListParams::default().to_query().is_empty());
}

#[test]
fn test_grading_standard_deserializes() {
    let standard: GradingStandard = serde_json::from_value(json!({
        "id": 4,
        "title": "Default Scheme",
        "context_type": "Account",
        "context_id": 1,
        "grading_scheme": [
            { "name": "A", "value": 0.9 },
            { "name": "B", "value": 0.8 }
        ]
    }))
    .unwrap();

    assert_eq!(standard.grading_scheme.len(), 2);
    assert_eq!(standard.grading_scheme[0].name, "A");
}
