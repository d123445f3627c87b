mod common;

use std::time::Duration;

use axum::{Router, routing::get};
use bloodaid_client::{
    ApiClient, ApiError, ClientConfig, Envelope,
    api::{funding, users},
    client::Scope,
};
use common::spawn_backend;
use serde_json::json;
use tokio::net::TcpListener;

#[tokio::test]
async fn test_health_check_returns_body() {
    let backend = spawn_backend().await;
    backend.on("GET", "/", 200, json!("BloodAid server is running"));

    let body = backend.public_client().health_check().await.expect("health");
    assert!(body.contains("running"));
}

#[tokio::test]
async fn test_public_client_sends_no_authorization() {
    let backend = spawn_backend().await;
    backend.on("GET", "/get-users", 200, json!([]));

    let client = backend.public_client();
    assert_eq!(client.scope(), Scope::Public);
    users::get_all_users(&client).await.expect("users");

    let hit = &backend.hits("GET", "/get-users")[0];
    assert!(hit.authorization.is_none());
    assert_eq!(hit.content_type.as_deref(), Some("application/json"));
}

#[tokio::test]
async fn test_secure_client_sends_bearer_and_request_id() {
    let backend = spawn_backend().await;
    backend.on("GET", "/get-user-role", 200, json!({ "role": "admin", "status": "active" }));

    let client = backend.secure_client("abc.def.ghi");
    assert_eq!(client.scope(), Scope::Secure);
    users::get_user_role(&client).await.expect("role");
    users::get_user_role(&client).await.expect("role");

    let hits = backend.hits("GET", "/get-user-role");
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].authorization.as_deref(), Some("Bearer abc.def.ghi"));
    let first = hits[0].request_id.clone().expect("request id");
    let second = hits[1].request_id.clone().expect("request id");
    assert_ne!(first, second, "every request gets its own correlation id");
}

#[tokio::test]
async fn test_unauthorized_maps_to_session_expiry() {
    let backend = spawn_backend().await;
    backend.on("GET", "/get-users", 401, json!({ "message": "jwt expired" }));

    let err = users::get_all_users(&backend.secure_client("old"))
        .await
        .unwrap_err();

    assert_eq!(err, ApiError::Unauthorized("jwt expired".to_string()));
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.user_message(), "Your session has expired. Please login again.");
}

#[tokio::test]
async fn test_forbidden_maps_to_permission_denied() {
    let backend = spawn_backend().await;
    backend.on("GET", "/get-users", 403, json!({ "error": "admins only" }));

    let err = users::get_all_users(&backend.secure_client("donor"))
        .await
        .unwrap_err();

    assert_eq!(err, ApiError::Forbidden("admins only".to_string()));
    assert_eq!(err.user_message(), "You don't have permission to do that.");
}

#[tokio::test]
async fn test_server_and_validation_errors_carry_server_message() {
    let backend = spawn_backend().await;
    backend.on("GET", "/fundings/total", 500, json!({ "message": "database offline" }));
    backend.on("PATCH", "/update-status", 422, json!({ "message": "unknown status" }));

    let err = funding::get_total_funding(&backend.public_client())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ApiError::Server {
            status: 500,
            message: "database offline".to_string()
        }
    );
    assert_eq!(err.user_message(), "database offline");

    let err = users::update_user_status(
        &backend.secure_client("t"),
        "a@b.com",
        bloodaid_client::models::UserStatus::Blocked,
    )
    .await
    .unwrap_err();
    assert_eq!(
        err,
        ApiError::Validation {
            status: 422,
            message: "unknown status".to_string()
        }
    );
}

#[tokio::test]
async fn test_missing_route_falls_back_to_message() {
    let backend = spawn_backend().await;

    let err = users::get_all_users(&backend.public_client())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.user_message(), "no such route");
}

#[tokio::test]
async fn test_undecodable_body_is_decode_error() {
    let backend = spawn_backend().await;
    backend.on("GET", "/get-users", 200, json!({ "not": "a list" }));

    let err = users::get_all_users(&backend.public_client())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_slow_backend_times_out() {
    let router = Router::new().route(
        "/get-users",
        get(|| async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            "[]"
        }),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = format!("http://127.0.0.1:{}", listener.local_addr().unwrap().port());
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let config = ClientConfig::default()
        .with_api_url(address)
        .with_timeout(Duration::from_millis(50));
    let err = users::get_all_users(&ApiClient::public(&config).unwrap())
        .await
        .unwrap_err();
    assert_eq!(err, ApiError::Timeout);
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    // Nothing listens on port 9 locally.
    let config = ClientConfig::default().with_api_url("http://127.0.0.1:9");
    let err = users::get_all_users(&ApiClient::public(&config).unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
    assert_eq!(err.user_message(), "Something went wrong. Please try again.");
}

#[test]
fn test_invalid_token_is_rejected_at_build_time() {
    let err = ApiClient::secure(&ClientConfig::default(), "bad\ntoken").unwrap_err();
    assert_eq!(err, ApiError::InvalidToken);
}

#[test]
fn test_endpoint_encodes_segments() {
    let client = ApiClient::public(&ClientConfig::default().with_api_url("http://localhost:5000/"))
        .unwrap();
    let url = client.endpoint(&["user", "a b@example.com"]);
    assert_eq!(url.as_str(), "http://localhost:5000/user/a%20b@example.com");
}

#[test]
fn test_envelope_shapes() {
    let ok: Envelope<u32> = Ok(3).into();
    assert_eq!(
        serde_json::to_value(&ok).unwrap(),
        json!({ "success": true, "data": 3 })
    );

    let failed: Envelope<u32> = Err(ApiError::Timeout).into();
    assert_eq!(
        serde_json::to_value(&failed).unwrap(),
        json!({ "success": false, "error": "Request timed out" })
    );
}
