//! Integration tests for the HTTP location provider.

use employee_directory::location::{HttpLocation, LocationError, LocationProvider};
use serde_json::json;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn provider_for(response: ResponseTemplate) -> (MockServer, HttpLocation) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(response)
        .mount(&server)
        .await;
    let provider = HttpLocation::new(&server.uri(), 5).expect("provider construction should not fail");
    (server, provider)
}

#[tokio::test]
async fn test_lookup_success() {
    let (_server, provider) =
        provider_for(ResponseTemplate::new(200).set_body_json(json!({ "status": "success", "lat": 51.5, "lon": -0.12 })))
            .await;

    let coords = provider.current_position().await.expect("should resolve");
    assert_eq!(coords.latitude, 51.5);
    assert_eq!(coords.longitude, -0.12);
    assert_eq!(coords.to_fixed(), ("51.500000".to_string(), "-0.120000".to_string()));
}

#[tokio::test]
async fn test_lookup_forbidden_is_permission_denied() {
    let (_server, provider) = provider_for(ResponseTemplate::new(403)).await;
    assert_eq!(provider.current_position().await, Err(LocationError::PermissionDenied));
}

#[tokio::test]
async fn test_lookup_fail_status_is_unavailable() {
    let (_server, provider) = provider_for(
        ResponseTemplate::new(200).set_body_json(json!({ "status": "fail", "message": "private range" })),
    )
    .await;

    assert_eq!(
        provider.current_position().await,
        Err(LocationError::Unavailable("private range".to_string()))
    );
}

#[tokio::test]
async fn test_lookup_out_of_range_is_unavailable() {
    let (_server, provider) =
        provider_for(ResponseTemplate::new(200).set_body_json(json!({ "lat": 95.0, "lon": 0.0 }))).await;

    assert!(matches!(
        provider.current_position().await,
        Err(LocationError::Unavailable(_))
    ));
}

#[tokio::test]
async fn test_lookup_timeout() {
    let (_server, provider) = {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "lat": 1.0, "lon": 2.0 }))
                    .set_delay(std::time::Duration::from_secs(3)),
            )
            .mount(&server)
            .await;
        let provider = HttpLocation::new(&server.uri(), 1).expect("provider construction should not fail");
        (server, provider)
    };

    assert_eq!(provider.current_position().await, Err(LocationError::Timeout));
}
