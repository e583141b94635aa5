//! REST API tests
//!
//! Drive the full router (middleware included) over in-memory dependencies.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;
use server_core::domains::auth::models::Otp;
use server_core::domains::users::models::Role;
use server_core::kernel::test_dependencies::{
    InMemoryCredentialStore, MockEmailService, MockIdentityVerifier, TEST_GOOGLE_CLIENT_ID,
};
use server_core::kernel::{BaseCredentialStore, TestDependencies};

use crate::common::{send, send_raw, test_app};

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn health_reports_database_ok() {
    let test_deps = TestDependencies::new();
    let app = test_app(test_deps.server_deps());

    let (status, body) = send(&app, Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["status"], "ok");
}

#[tokio::test]
async fn health_reports_unavailable_store() {
    let test_deps = TestDependencies::new();
    test_deps.store.set_unavailable(true);
    let app = test_app(test_deps.server_deps());

    let (status, body) = send(&app, Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unhealthy");
}

// ============================================================================
// OTP login
// ============================================================================

#[tokio::test]
async fn login_then_verify_issues_token() {
    let test_deps = TestDependencies::new();
    let deps = test_deps.server_deps();
    let jwt = deps.jwt_service.clone();
    let app = test_app(deps);

    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/login",
        Some(json!({ "email": "a@b.com" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "OTP sent successfully");

    let code = test_deps.email_service.last_code_for("a@b.com").unwrap();
    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/verify",
        Some(json!({ "email": "a@b.com", "otp": code })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    let claims = jwt.verify_token(body["token"].as_str().unwrap()).unwrap();
    assert_eq!(claims.sub, "a@b.com");
    assert_eq!(claims.role, Role::User);
}

#[tokio::test]
async fn login_requires_email() {
    let test_deps = TestDependencies::new();
    let app = test_app(test_deps.server_deps());

    let (status, body) = send(&app, Method::POST, "/auth/login", Some(json!({})), None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email is required");
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let test_deps = TestDependencies::new();
    let app = test_app(test_deps.server_deps());

    let (status, body) = send_raw(&app, "/auth/login", "{not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request payload");
}

#[tokio::test]
async fn delivery_failure_is_500_but_code_is_stored() {
    let test_deps = TestDependencies::new().mock_email(MockEmailService::failing());
    let app = test_app(test_deps.server_deps());

    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/login",
        Some(json!({ "email": "a@b.com" })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to send OTP email");
    assert_eq!(test_deps.store.otps_for("a@b.com").len(), 1);
}

#[tokio::test]
async fn verify_requires_both_fields() {
    let test_deps = TestDependencies::new();
    let app = test_app(test_deps.server_deps());

    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/verify",
        Some(json!({ "email": "a@b.com" })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email and OTP are required");
}

#[tokio::test]
async fn every_verification_failure_looks_the_same() {
    let test_deps = TestDependencies::new();
    let store = test_deps.store.clone();
    let app = test_app(test_deps.server_deps());

    // Expired
    let stale = Otp::new(
        "expired@b.com",
        "123456",
        chrono::Utc::now() - chrono::Duration::minutes(11),
    );
    store.insert_otp(&stale).await.unwrap();

    // Used
    let mut used = Otp::new("used@b.com", "123456", chrono::Utc::now());
    used.is_used = true;
    store.insert_otp(&used).await.unwrap();

    // Wrong code
    store
        .insert_otp(&Otp::new("wrong@b.com", "123456", chrono::Utc::now()))
        .await
        .unwrap();

    for (email, code) in [
        ("missing@b.com", "123456"),
        ("expired@b.com", "123456"),
        ("used@b.com", "123456"),
        ("wrong@b.com", "654321"),
    ] {
        let (status, body) = send(
            &app,
            Method::POST,
            "/auth/verify",
            Some(json!({ "email": email, "otp": code })),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", email);
        assert_eq!(body, json!({ "error": "Invalid or expired OTP" }), "{}", email);
    }
}

#[tokio::test]
async fn store_outage_is_opaque_500() {
    let test_deps = TestDependencies::new();
    test_deps.store.set_unavailable(true);
    let app = test_app(test_deps.server_deps());

    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/verify",
        Some(json!({ "email": "a@b.com", "otp": "123456" })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
}

#[tokio::test]
async fn verified_admin_gets_admin_role() {
    let test_deps = TestDependencies::new().mock_store(
        InMemoryCredentialStore::new().with_user("Root", "root@b.com", Role::Admin),
    );
    let deps = test_deps.server_deps();
    let jwt = deps.jwt_service.clone();
    let app = test_app(deps);

    send(
        &app,
        Method::POST,
        "/auth/login",
        Some(json!({ "email": "root@b.com" })),
        None,
    )
    .await;
    let code = test_deps.email_service.last_code_for("root@b.com").unwrap();

    let (_, body) = send(
        &app,
        Method::POST,
        "/auth/verify",
        Some(json!({ "email": "root@b.com", "otp": code })),
        None,
    )
    .await;

    let claims = jwt.verify_token(body["token"].as_str().unwrap()).unwrap();
    assert_eq!(claims.role, Role::Admin);
}

// ============================================================================
// Google login
// ============================================================================

#[tokio::test]
async fn google_login_with_verified_token() {
    let test_deps = TestDependencies::new().mock_identity(
        MockIdentityVerifier::new().with_token("id-token", TEST_GOOGLE_CLIENT_ID, "g@gmail.com"),
    );
    let deps = test_deps.server_deps();
    let jwt = deps.jwt_service.clone();
    let app = test_app(deps);

    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/google",
        Some(json!({ "id_token": "id-token" })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let claims = jwt.verify_token(body["token"].as_str().unwrap()).unwrap();
    assert_eq!(claims.email, "g@gmail.com");
}

#[tokio::test]
async fn google_login_rejects_unknown_token() {
    let test_deps = TestDependencies::new();
    let app = test_app(test_deps.server_deps());

    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/google",
        Some(json!({ "id_token": "forged" })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid Google token");
}

// ============================================================================
// User CRUD
// ============================================================================

#[tokio::test]
async fn user_crud_roundtrip() {
    let test_deps = TestDependencies::new();
    let app = test_app(test_deps.server_deps());

    let (status, created) = send(
        &app,
        Method::POST,
        "/users",
        Some(json!({ "name": "Ada", "email": "ada@example.com" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["role"], "USER");
    let id = created["id"].as_str().unwrap().to_string();

    let (status, fetched) = send(&app, Method::GET, &format!("/users/{}", id), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/users/{}", id),
        Some(json!({ "role": "ADMIN" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["role"], "ADMIN");
    assert_eq!(updated["name"], "Ada");

    let (status, list) = send(&app, Method::GET, "/users", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, Method::DELETE, &format!("/users/{}", id), None, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::GET, &format!("/users/{}", id), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn create_user_validation_and_conflict() {
    let test_deps = TestDependencies::new();
    let app = test_app(test_deps.server_deps());

    let (status, body) = send(
        &app,
        Method::POST,
        "/users",
        Some(json!({ "name": "Ada" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Name and Email are required");

    let payload = json!({ "name": "Ada", "email": "ada@example.com" });
    send(&app, Method::POST, "/users", Some(payload.clone()), None).await;
    let (status, _) = send(&app, Method::POST, "/users", Some(payload), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn bad_user_id_is_bad_request() {
    let test_deps = TestDependencies::new();
    let app = test_app(test_deps.server_deps());

    let (status, body) = send(&app, Method::GET, "/users/not-a-uuid", None, None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid user ID");
}

#[tokio::test]
async fn invalid_token_does_not_block_public_routes() {
    let test_deps = TestDependencies::new();
    let app = test_app(test_deps.server_deps());

    let (status, _) = send(&app, Method::GET, "/users", None, Some("garbage")).await;

    assert_eq!(status, StatusCode::OK);
}
