//! Unit tests for the clinic_client crate.

use super::*; // Import items from lib.rs
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate}; // For constructing mock bodies

// --- Test fixtures ---

fn department_payload() -> NewDepartment {
    NewDepartment {
        department_name: "Cardiology Test".to_string(),
        description: "Heart stuff".to_string(),
    }
}

fn doctor_payload() -> NewDoctor {
    NewDoctor {
        user_name: "Dr. Test".to_string(),
        name: "Dr. Test".to_string(),
        email: "dr.test@clinic.test".to_string(),
        password: "Password@123".to_string(),
        specialization: "Cardiologist".to_string(),
        department_id: 5,
        phone: "1234567890".to_string(),
        status: "active".to_string(),
        schedule: [(
            "mon".to_string(),
            vec!["09:00".to_string(), "17:00".to_string()],
        )]
        .into_iter()
        .collect(),
    }
}

/// Mounts a successful login mock and returns a client plus session.
async fn login_session(server: &MockServer) -> (ClinicClient, Session) {
    Mock::given(method("POST"))
        .and(path("/api.php"))
        .and(query_param("route", "/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "PHPSESSID=abc123; Path=/; HttpOnly")
                .set_body_json(json!({
                    "ok": true,
                    "data": {
                        "csrf_token": "tok-1",
                        "user": { "user_name": "Admin", "role": "admin" }
                    }
                })),
        )
        .mount(server)
        .await;

    let client = ClinicClient::new(&server.uri()).unwrap();
    let session = client
        .login("admin@clinic.test", "Admin@123")
        .await
        .unwrap();
    (client, session)
}

#[tokio::test]
async fn test_login_success() {
    let mock_server = MockServer::start().await;
    let (_, session) = login_session(&mock_server).await;

    assert_eq!(session.csrf_token(), "tok-1");
    assert_eq!(session.user().user_name, "Admin");
    assert_eq!(session.user().role, "admin");
}

#[tokio::test]
async fn test_login_rejected() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api.php"))
        .and(query_param("route", "/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "ok": false,
            "error": "Invalid credentials"
        })))
        .mount(&mock_server)
        .await;

    let client = ClinicClient::new(&mock_server.uri()).unwrap();
    let result = client.login("admin@clinic.test", "wrong").await;

    match result {
        Err(Error::LoginFailed { email, message }) => {
            assert_eq!(email, "admin@clinic.test");
            assert_eq!(message, "Invalid credentials");
        }
        other => panic!("expected LoginFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_login_without_csrf_token_fails() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api.php"))
        .and(query_param("route", "/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "data": { "user": { "user_name": "Admin", "role": "admin" } }
        })))
        .mount(&mock_server)
        .await;

    let client = ClinicClient::new(&mock_server.uri()).unwrap();
    let result = client.login("admin@clinic.test", "Admin@123").await;

    assert!(matches!(result, Err(Error::MissingCsrfToken)));
}

#[tokio::test]
async fn test_create_department_nested_id_shape() {
    let mock_server = MockServer::start().await;
    let (client, session) = login_session(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/api.php"))
        .and(query_param("route", "/departments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "data": {
                "department": {
                    "department_id": 5,
                    "department_name": "Cardiology Test"
                }
            }
        })))
        .mount(&mock_server)
        .await;

    let outcome = client
        .create_department(&session, &department_payload())
        .await
        .unwrap();

    assert_eq!(outcome, CreateOutcome::Created(5));
}

#[tokio::test]
async fn test_create_doctor_flat_id_shape() {
    let mock_server = MockServer::start().await;
    let (client, session) = login_session(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/api.php"))
        .and(query_param("route", "/doctors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "data": { "id": 7 }
        })))
        .mount(&mock_server)
        .await;

    let outcome = client
        .create_doctor(&session, &doctor_payload())
        .await
        .unwrap();

    assert_eq!(outcome, CreateOutcome::Created(7));
}

#[tokio::test]
async fn test_create_department_duplicate() {
    let mock_server = MockServer::start().await;
    let (client, session) = login_session(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/api.php"))
        .and(query_param("route", "/departments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": false,
            "error": "Department 'Cardiology Test' already exists"
        })))
        .mount(&mock_server)
        .await;

    let outcome = client
        .create_department(&session, &department_payload())
        .await
        .unwrap();

    match outcome {
        CreateOutcome::Duplicate(message) => assert!(message.contains("already exists")),
        other => panic!("expected Duplicate, got {other:?}"),
    }
}

#[tokio::test]
async fn test_create_department_non_duplicate_failure() {
    let mock_server = MockServer::start().await;
    let (client, session) = login_session(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/api.php"))
        .and(query_param("route", "/departments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": false,
            "error": "Validation failed: department_name is required"
        })))
        .mount(&mock_server)
        .await;

    let result = client
        .create_department(&session, &department_payload())
        .await;

    match result {
        Err(Error::Api { route, message }) => {
            assert_eq!(route, "/departments");
            assert!(message.contains("Validation failed"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_create_without_any_id_field_fails() {
    let mock_server = MockServer::start().await;
    let (client, session) = login_session(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/api.php"))
        .and(query_param("route", "/departments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "data": { "message": "created" }
        })))
        .mount(&mock_server)
        .await;

    let result = client
        .create_department(&session, &department_payload())
        .await;

    assert!(matches!(
        result,
        Err(Error::MissingId {
            resource: "department"
        })
    ));
}

#[tokio::test]
async fn test_state_changing_request_carries_csrf_and_cookie() {
    let mock_server = MockServer::start().await;
    let (client, session) = login_session(&mock_server).await;

    // Only matches when both session headers are present.
    Mock::given(method("POST"))
        .and(path("/api.php"))
        .and(query_param("route", "/departments"))
        .and(header("X-CSRF-Token", "tok-1"))
        .and(header("cookie", "PHPSESSID=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "data": { "department": { "department_id": 5 } }
        })))
        .mount(&mock_server)
        .await;

    let result = client
        .create_department(&session, &department_payload())
        .await;

    assert!(result.is_ok(), "session headers were not attached: {result:?}");
}

#[tokio::test]
async fn test_list_doctors() {
    let mock_server = MockServer::start().await;
    let (client, session) = login_session(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/api.php"))
        .and(query_param("route", "/doctors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "data": {
                "items": [
                    { "doctor_id": 7, "login_email": "dr.test@clinic.test", "name": "Dr. Test" },
                    { "doctor_id": 8, "login_email": "dr.other@clinic.test" }
                ]
            }
        })))
        .mount(&mock_server)
        .await;

    let doctors = client.list_doctors(&session).await.unwrap();

    assert_eq!(doctors.len(), 2);
    assert_eq!(doctors[0].doctor_id, 7);
    assert_eq!(doctors[0].login_email, "dr.test@clinic.test");
}

#[tokio::test]
async fn test_list_doctor_schedule_sends_doctor_id() {
    let mock_server = MockServer::start().await;
    let (client, session) = login_session(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/api.php"))
        .and(query_param("route", "/doctor-schedule"))
        .and(query_param("doctor_id", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "data": {
                "items": [
                    { "day": "Monday", "start_time": "09:00", "end_time": "17:00" }
                ]
            }
        })))
        .mount(&mock_server)
        .await;

    let schedule = client.list_doctor_schedule(&session, 7).await.unwrap();

    assert_eq!(schedule.len(), 1);
    assert_eq!(schedule[0].day, "Monday");
}

#[tokio::test]
async fn test_list_without_items_is_empty() {
    let mock_server = MockServer::start().await;
    let (client, session) = login_session(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/api.php"))
        .and(query_param("route", "/doctor-schedule"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "data": {}
        })))
        .mount(&mock_server)
        .await;

    let schedule = client.list_doctor_schedule(&session, 7).await.unwrap();

    assert!(schedule.is_empty());
}

#[tokio::test]
async fn test_list_failure_is_api_error() {
    let mock_server = MockServer::start().await;
    let (client, session) = login_session(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/api.php"))
        .and(query_param("route", "/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": false,
            "error": "Not authorized"
        })))
        .mount(&mock_server)
        .await;

    let result = client.list_appointments(&session).await;

    assert!(matches!(result, Err(Error::Api { .. })));
}

#[test]
fn test_extract_id_prefers_nested_shape() {
    let data = json!({
        "department": { "department_id": 5 },
        "id": 99
    });

    assert_eq!(extract_id(&data, "department", "department_id"), Some(5));
}

#[test]
fn test_extract_id_falls_back_to_flat_fields() {
    let data = json!({ "id": 42 });
    assert_eq!(extract_id(&data, "appointment", "appointment_id"), Some(42));

    let data = json!({ "appointment_id": 43 });
    assert_eq!(extract_id(&data, "appointment", "appointment_id"), Some(43));
}

#[test]
fn test_extract_id_absent() {
    let data = json!({ "message": "created" });
    assert_eq!(extract_id(&data, "appointment", "appointment_id"), None);
}

#[test]
fn test_duplicate_pattern_is_case_insensitive() {
    assert!(DUPLICATE_PATTERN.is_match("Department already exists"));
    assert!(DUPLICATE_PATTERN.is_match("Duplicate entry 'dr.test@clinic.test'"));
    assert!(!DUPLICATE_PATTERN.is_match("Validation failed"));
}
