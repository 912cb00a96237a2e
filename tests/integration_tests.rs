//! Integration tests using a mock HTTP server
//!
//! Tests the full end-to-end flow: dispatcher → connector → pagination →
//! typed resources.

use lms_client::{
    EnrollmentPayload, LmsClient, Section, SectionPayload, SectionRef, UserRef,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Pagination End-to-End
// ============================================================================

#[tokio::test]
async fn test_course_sections_across_three_pages() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    let link = format!(
        "<{base}/api/v1/courses/1/sections?page=1&per_page=1000>; rel=\"current\", \
         <{base}/api/v1/courses/1/sections?page=2&per_page=1000>; rel=\"next\", \
         <{base}/api/v1/courses/1/sections?page=3&per_page=1000>; rel=\"last\""
    );

    Mock::given(method("GET"))
        .and(path("/api/v1/courses/1/sections"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "1000"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("link", link.as_str())
                .set_body_json(json!([
                    {"id": 1, "name": "Section 001", "course_id": 1},
                    {"id": 2, "name": "Section 002", "course_id": 1}
                ])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/courses/1/sections"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 3, "name": "Section 003", "course_id": 1}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/courses/1/sections"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 4, "name": "Section 004", "course_id": 1}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = LmsClient::new(mock_server.uri()).unwrap();
    let sections: Vec<Section> = client.course_sections(1).await.unwrap();

    let ids: Vec<u64> = sections.iter().map(|section| section.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
}

// ============================================================================
// Multi-Credential Dispatch
// ============================================================================

#[tokio::test]
async fn test_multi_token_client_uses_bound_credentials() {
    let mock_server = MockServer::start().await;

    // Whichever connector is selected, the request must carry one of the
    // supplied credentials.
    Mock::given(method("GET"))
        .and(path("/api/v1/users/self/courses"))
        .and(header("authorization", "Bearer token-one"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/self/courses"))
        .and(header("authorization", "Bearer token-two"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let client = LmsClient::builder(mock_server.uri())
        .tokens(vec!["token-one".into(), "token-two".into()])
        .build()
        .unwrap();
    assert_eq!(client.connector_count(), 2);

    for _ in 0..4 {
        client.user_courses(&UserRef::Current).await.unwrap();
    }

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 4);
    assert!(requests
        .iter()
        .all(|request| request.headers.contains_key("authorization")));
}

// ============================================================================
// Domain Flows
// ============================================================================

#[tokio::test]
async fn test_create_section_and_enroll() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/courses/1/sections"))
        .and(body_json(json!({
            "course_section": {
                "name": "Section 001",
                "sis_section_id": "FA26.GEOL.101.001"
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 88, "name": "Section 001", "course_id": 1,
            "sis_section_id": "FA26.GEOL.101.001"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/courses/1/enrollments"))
        .and(body_json(json!({
            "enrollment": {
                "user_id": 9,
                "type": "StudentEnrollment",
                "course_section_id": 88
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 501, "course_id": 1, "course_section_id": 88, "user_id": 9,
            "type": "StudentEnrollment", "enrollment_state": "active"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = LmsClient::new(mock_server.uri()).unwrap();

    let section = client
        .create_section(
            1,
            &SectionPayload::named("Section 001").with_sis_id("FA26.GEOL.101.001"),
        )
        .await
        .unwrap();
    assert_eq!(section.sis_section_id.as_deref(), Some("FA26.GEOL.101.001"));

    let enrollment = client
        .create_enrollment(
            1,
            &EnrollmentPayload::new(9, "StudentEnrollment").in_section(section.id),
        )
        .await
        .unwrap();
    assert_eq!(enrollment.id, 501);
}

#[tokio::test]
async fn test_section_existence_probe_never_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/api/v1/sections/88"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let client = LmsClient::new(mock_server.uri()).unwrap();
    assert!(client.section_exists(&SectionRef::Id(88)).await);
    // Unmocked path responds 404; the probe resolves to false, no error.
    assert!(!client.section_exists(&SectionRef::Id(9999)).await);
}

#[tokio::test]
async fn test_delete_section_by_sis_full_workflow() {
    let mock_server = MockServer::start().await;
    let sis_path = "/api/v1/sections/sis_section_id:FA26.GEOL.101.001";

    Mock::given(method("GET"))
        .and(path(format!("{sis_path}/enrollments")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 501, "course_id": 1, "course_section_id": 88, "user_id": 9,
            "type": "StudentEnrollment", "enrollment_state": "active"
        }])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/courses/1/enrollments/501"))
        .and(query_param("task", "deactivate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 501, "course_id": 1, "course_section_id": 88, "user_id": 9,
            "type": "StudentEnrollment", "enrollment_state": "inactive"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path(sis_path))
        .and(body_json(json!({"course_section": {"sis_section_id": null}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 88})))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(sis_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 88})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = LmsClient::new(mock_server.uri()).unwrap();
    client
        .delete_section_by_sis("FA26.GEOL.101.001")
        .await
        .unwrap();
}

// ============================================================================
// Error Surface
// ============================================================================

#[tokio::test]
async fn test_upstream_error_propagates_unchanged() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/courses/1"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid access token"))
        .mount(&mock_server)
        .await;

    let client = LmsClient::new(mock_server.uri()).unwrap();
    let err = client.course(1).await.unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert!(err.to_string().contains("invalid access token"));
}
