//! Integration tests for the signed transport.
//!
//! These tests run the client against a local mock server and verify the
//! authentication headers, the body and query encoding, and the rejection
//! rule applied to responses.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::json;
use weebly_cloud::auth::{compute_signature_base64, compute_signature_hex};
use weebly_cloud::{
    BaseUrl, CloudConfig, HttpError, PublicKey, RestClient, RestError, SecretKey,
    SignatureEncoding,
};
use wiremock::matchers::{body_json, body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PUBLIC_KEY: &str = "test-public";
const SECRET: &str = "test-secret";

fn create_test_config(base_url: &str, encoding: SignatureEncoding) -> CloudConfig {
    CloudConfig::builder()
        .public_key(PublicKey::new(PUBLIC_KEY).unwrap())
        .secret_key(SecretKey::new(SECRET).unwrap())
        .base_url(BaseUrl::new(base_url).unwrap())
        .signature_encoding(encoding)
        .build()
        .unwrap()
}

fn create_test_client(server: &MockServer) -> RestClient {
    RestClient::new(&create_test_config(&server.uri(), SignatureEncoding::RawDigest)).unwrap()
}

fn expected_signature(message: &str) -> String {
    compute_signature_base64(message.as_bytes(), SECRET)
}

// ============================================================================
// Authentication Headers
// ============================================================================

#[tokio::test]
async fn test_get_is_signed_with_empty_body_placeholder() {
    let server = MockServer::start().await;
    let signature = expected_signature("GET\naccount\n[]");

    Mock::given(method("GET"))
        .and(path("/account"))
        .and(header("X-Public-Key", PUBLIC_KEY))
        .and(header("X-Signed-Request-Hash", signature.as_str()))
        .and(header("X-W-Client-Type", "rust"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"account":{"id":1}}"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let response = client.get("account", None).await.unwrap();

    assert_eq!(response.code, 200);
    assert_eq!(response.body, r#"{"account":{"id":1}}"#);
    assert_eq!(response.path, "account");
}

#[tokio::test]
async fn test_post_signs_and_sends_json_body() {
    let server = MockServer::start().await;
    let signature = expected_signature("POST\nuser\n{\"email\":\"a@example.com\"}");

    Mock::given(method("POST"))
        .and(path("/user"))
        .and(header("X-Signed-Request-Hash", signature.as_str()))
        .and(body_json(json!({"email": "a@example.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"user":{"user_id":"5"}}"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let body = json!({"email": "a@example.com"}).as_object().cloned();
    let response = client.post("user", body).await.unwrap();

    assert_eq!(response.code, 200);
}

#[tokio::test]
async fn test_post_without_body_sends_empty_array() {
    let server = MockServer::start().await;
    let signature = expected_signature("POST\nuser/5/enable\n[]");

    Mock::given(method("POST"))
        .and(path("/user/5/enable"))
        .and(header("X-Signed-Request-Hash", signature.as_str()))
        .and(body_string("[]"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    client.post("/user/5/enable", None).await.unwrap();
}

#[tokio::test]
async fn test_hex_digest_encoding() {
    let server = MockServer::start().await;
    let hex = compute_signature_hex(b"GET\naccount\n[]", SECRET);
    let signature = STANDARD.encode(hex);

    Mock::given(method("GET"))
        .and(path("/account"))
        .and(header("X-Signed-Request-Hash", signature.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let config = create_test_config(&server.uri(), SignatureEncoding::HexDigest);
    let client = RestClient::new(&config).unwrap();
    client.get("account", None).await.unwrap();
}

#[tokio::test]
async fn test_query_parameters_are_encoded_but_not_signed() {
    let server = MockServer::start().await;
    let signature = expected_signature("GET\nuser/1/site\n[]");

    Mock::given(method("GET"))
        .and(path("/user/1/site"))
        .and(query_param("limit", "10"))
        .and(query_param("query", "my site"))
        .and(header("X-Signed-Request-Hash", signature.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"sites":[]}"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let search = json!({"query": "my site"}).as_object().cloned();
    let response = client.get_list("user/1/site", search, Some(10)).await.unwrap();

    assert_eq!(response.query.get("limit"), Some(&json!(10)));
}

// ============================================================================
// Rejection Rule
// ============================================================================

#[tokio::test]
async fn test_no_content_is_success() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/user/1/site/2"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let response = client.delete("user/1/site/2", None).await.unwrap();

    assert_eq!(response.code, 204);
    assert!(response.body.is_empty());
    assert!(!response.is_paginated());
}

#[tokio::test]
async fn test_error_body_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/999"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_string(r#"{"error":{"message":"Not found","code":404}}"#),
        )
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let error = client.get("user/999", None).await.unwrap_err();

    let api = error.api_error().expect("should be an API rejection");
    assert_eq!(api.status, 404);
    assert_eq!(api.message, "Not found");
    assert_eq!(api.code, Some(404));
    assert_eq!(error.to_string(), "Not found");
}

#[tokio::test]
async fn test_error_body_is_rejected_even_with_success_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"error":{"message":"Email taken","code":"2001"}}"#),
        )
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let error = client.post("user", None).await.unwrap_err();

    let api = error.api_error().unwrap();
    assert_eq!(api.message, "Email taken");
    assert_eq!(api.code, Some(2001));
}

#[tokio::test]
async fn test_empty_body_is_no_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/account"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let error = client.get("account", None).await.unwrap_err();

    let api = error.api_error().unwrap();
    assert_eq!(api.status, 500);
    assert_eq!(api.message, "No response");
    assert_eq!(api.code, None);
}

#[tokio::test]
async fn test_null_error_field_is_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/account"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"error":null,"ok":true}"#))
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let response = client.get("account", None).await.unwrap();
    assert_eq!(response.json_field("ok").unwrap(), Some(json!(true)));
}

#[tokio::test]
async fn test_non_json_error_status_is_returned_as_is() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/account"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let response = client.get("account", None).await.unwrap();

    assert_eq!(response.code, 502);
    assert!(!response.is_ok());
    assert_eq!(response.body, "Bad Gateway");
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    let config = create_test_config("http://127.0.0.1:1", SignatureEncoding::RawDigest);
    let client = RestClient::new(&config).unwrap();

    let error = client.get("account", None).await.unwrap_err();
    assert!(matches!(error, RestError::Http(HttpError::Network(_))));
    assert!(error.api_error().is_none());
}

#[tokio::test]
async fn test_empty_path_is_rejected_before_sending() {
    let server = MockServer::start().await;
    let client = create_test_client(&server);

    let error = client.get("/", None).await.unwrap_err();
    assert!(matches!(error, RestError::InvalidPath { .. }));

    let received = server.received_requests().await.unwrap();
    assert!(received.is_empty());
}
