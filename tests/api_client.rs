//! Integration tests for `ApiClient` using wiremock HTTP mocks.

use employee_directory::AppError;
use employee_directory::client::ApiClient;
use employee_directory::models::FormDraft;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> ApiClient {
    ApiClient::with_base_url(base_url, 5).expect("client construction should not fail")
}

async fn mount_activation(server: &MockServer, code: &str) {
    Mock::given(method("POST"))
        .and(path("/get_activation_code"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "activationCode": code })))
        .mount(server)
        .await;
}

fn draft() -> FormDraft {
    FormDraft {
        first_name: "A".to_string(),
        last_name: "B".to_string(),
        email: "a@b.com".to_string(),
        phone_number: "1234567890".to_string(),
        employee_id: "E1".to_string(),
        city: "X".to_string(),
        country: "Y".to_string(),
        latitude: "12.000000".to_string(),
        longitude: "34.000000".to_string(),
    }
}

#[tokio::test]
async fn test_list_employees_parses_records() {
    let server = MockServer::start().await;
    mount_activation(&server, "code-1").await;

    Mock::given(method("POST"))
        .and(path("/get_all_employee"))
        .and(body_partial_json(json!({ "activationCode": "code-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "Hiring_TestID": 1,
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "ada@example.com",
                "city": "London",
                "latitude": 51.5,
                "longitude": "-0.12"
            },
            { "Hiring_TestID": "2", "firstName": "Bob", "latitude": null }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let employees = test_client(&server.uri())
        .list_employees()
        .await
        .expect("should parse employees");

    assert_eq!(employees.len(), 2);
    assert_eq!(employees[0].id.as_deref(), Some("1"));
    assert_eq!(employees[0].first_name.as_deref(), Some("Ada"));
    assert_eq!(employees[0].latitude.as_deref(), Some("51.5"));
    assert_eq!(employees[0].longitude.as_deref(), Some("-0.12"));
    assert_eq!(employees[1].latitude, None);
    assert_eq!(employees[1].country, None);
}

#[tokio::test]
async fn test_activation_failure_fails_list() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/get_activation_code"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/get_all_employee"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let err = test_client(&server.uri()).list_employees().await.unwrap_err();
    assert!(matches!(err, AppError::Fetch(_)), "unexpected error: {err:?}");
}

#[tokio::test]
async fn test_missing_activation_code_fails_list() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/get_activation_code"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let err = test_client(&server.uri()).list_employees().await.unwrap_err();
    assert!(matches!(err, AppError::Fetch(_)), "unexpected error: {err:?}");
}

#[tokio::test]
async fn test_list_server_error() {
    let server = MockServer::start().await;
    mount_activation(&server, "code-2").await;

    Mock::given(method("POST"))
        .and(path("/get_all_employee"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = test_client(&server.uri()).list_employees().await.unwrap_err();
    assert!(matches!(err, AppError::Fetch(_)), "unexpected error: {err:?}");
}

#[tokio::test]
async fn test_list_invalid_body() {
    let server = MockServer::start().await;
    mount_activation(&server, "code-3").await;

    Mock::given(method("POST"))
        .and(path("/get_all_employee"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": "bad code" })))
        .mount(&server)
        .await;

    let err = test_client(&server.uri()).list_employees().await.unwrap_err();
    assert!(matches!(err, AppError::Fetch(_)), "unexpected error: {err:?}");
}

#[tokio::test]
async fn test_create_employee_sends_draft_and_code() {
    let server = MockServer::start().await;
    mount_activation(&server, "code-4").await;

    Mock::given(method("POST"))
        .and(path("/add_employee"))
        .and(body_partial_json(json!({
            "activationCode": "code-4",
            "firstName": "A",
            "employeeID": "E1",
            "phoneNumber": "1234567890",
            "latitude": "12.000000"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Hiring_TestID": 42, "firstName": "A" })))
        .expect(1)
        .mount(&server)
        .await;

    let created = test_client(&server.uri())
        .create_employee(&draft())
        .await
        .expect("should create employee");

    assert_eq!(created.confirmation_id, "42");
}

#[tokio::test]
async fn test_create_without_confirmation_id_is_rejected() {
    let server = MockServer::start().await;
    mount_activation(&server, "code-5").await;

    Mock::given(method("POST"))
        .and(path("/add_employee"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "duplicate employee" })))
        .mount(&server)
        .await;

    let err = test_client(&server.uri()).create_employee(&draft()).await.unwrap_err();
    assert!(matches!(err, AppError::SubmissionRejected), "unexpected error: {err:?}");
}

#[tokio::test]
async fn test_each_call_fetches_new_activation_code() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/get_activation_code"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "activationCode": "fresh" })))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/get_all_employee"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(2)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    assert!(client.list_employees().await.unwrap().is_empty());
    assert!(client.list_employees().await.unwrap().is_empty());
}
