mod common;

use auth::Claims;
use chrono::Duration;
use chrono::Utc;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

fn ann() -> serde_json::Value {
    json!({
        "name": "Ann",
        "email": "ann@x.com",
        "phone": "555",
        "role": "buyer",
        "password": "secret1"
    })
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.text().await.expect("Failed to read body"),
        "House Hunter server is online"
    );
}

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app.register(ann()).await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body,
        json!({ "email": "ann@x.com", "message": "User registered successfully" })
    );

    assert_eq!(app.repository.insert_count(), 1);
    let stored = app.repository.stored("ann@x.com").expect("User not stored");
    assert_eq!(stored.name.as_str(), "Ann");
    assert_eq!(stored.phone.as_str(), "555");
    assert_eq!(stored.role.as_str(), "buyer");
    assert!(stored.password_hash.starts_with("$2b$10$"));
    assert!(!stored.password_hash.contains("secret1"));
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;

    let first = app.register(ann()).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app.register(ann()).await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = second.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "message": "Email already exists" }));
    assert_eq!(app.repository.insert_count(), 1);
}

#[tokio::test]
async fn test_register_duplicate_email_with_different_fields() {
    let app = TestApp::spawn().await;

    app.register(ann()).await;

    let response = app
        .register(json!({
            "name": "Another Ann",
            "email": "ann@x.com",
            "phone": "+44 20 7946 0000",
            "role": "seller",
            "password": "different"
        }))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.repository.insert_count(), 1);
    assert_eq!(
        app.repository.stored("ann@x.com").unwrap().name.as_str(),
        "Ann"
    );
}

#[tokio::test]
async fn test_register_existing_email_with_invalid_fields() {
    let app = TestApp::spawn().await;

    app.register(ann()).await;

    let response = app
        .register(json!({
            "name": "",
            "email": "ann@x.com",
            "phone": "",
            "role": "admin",
            "password": ""
        }))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "message": "Email already exists" }));
    assert_eq!(app.repository.insert_count(), 1);
}

#[tokio::test]
async fn test_register_email_is_case_sensitive() {
    let app = TestApp::spawn().await;

    app.register(ann()).await;

    let mut upper = ann();
    upper["email"] = json!("Ann@x.com");
    let response = app.register(upper).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(app.repository.insert_count(), 2);
}

#[tokio::test]
async fn test_register_invalid_email() {
    let app = TestApp::spawn().await;

    let mut body = ann();
    body["email"] = json!("not-an-email");
    let response = app.register(body).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .to_lowercase()
        .contains("email"));
    assert_eq!(app.repository.insert_count(), 0);
}

#[tokio::test]
async fn test_register_unknown_role() {
    let app = TestApp::spawn().await;

    let mut body = ann();
    body["role"] = json!("landlord");
    let response = app.register(body).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(app.repository.insert_count(), 0);
}

#[tokio::test]
async fn test_register_empty_password() {
    let app = TestApp::spawn().await;

    let mut body = ann();
    body["password"] = json!("");
    let response = app.register(body).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Password must not be empty");
}

#[tokio::test]
async fn test_register_missing_field() {
    let app = TestApp::spawn().await;

    let response = app
        .register(json!({ "name": "Ann", "email": "ann@x.com" }))
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"].is_string());
    assert_eq!(app.repository.insert_count(), 0);
}

#[tokio::test]
async fn test_register_store_failure_is_sanitized() {
    let app = TestApp::spawn().await;
    app.repository.set_unavailable(true);

    let response = app.register(ann()).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "message": "Internal server error" }));
}

#[tokio::test]
async fn test_issue_token() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/jwt")
        .json(&json!({ "email": "ann@x.com", "role": "buyer" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let token = body["token"].as_str().expect("Missing token");

    let claims = app.jwt_handler.verify(token).expect("Token did not verify");
    assert_eq!(claims.get("email"), Some(&json!("ann@x.com")));
    assert_eq!(claims.get("role"), Some(&json!("buyer")));
    assert_eq!(claims.exp.unwrap() - claims.iat.unwrap(), 24 * 60 * 60);
}

#[tokio::test]
async fn test_issue_token_without_body() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/jwt")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let claims = app
        .jwt_handler
        .verify(body["token"].as_str().expect("Missing token"))
        .expect("Token did not verify");
    assert!(claims.payload().is_empty());
    assert!(claims.exp.is_some());
}

#[tokio::test]
async fn test_issue_token_empty_json_body() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/jwt")
        .header("Content-Type", "application/json")
        .body("")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let claims = app
        .jwt_handler
        .verify(body["token"].as_str().expect("Missing token"))
        .expect("Token did not verify");
    assert!(claims.payload().is_empty());
}

#[tokio::test]
async fn test_issue_token_rejects_non_object() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/jwt")
        .json(&json!(["not", "an", "object"]))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_protected_route_with_issued_token() {
    let app = TestApp::spawn().await;

    let body: serde_json::Value = app
        .post("/jwt")
        .json(&json!({ "email": "ann@x.com" }))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");
    let token = body["token"].as_str().unwrap();

    let response = app
        .get_authenticated("/me", token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let claims: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(claims["email"], "ann@x.com");
    assert!(claims["exp"].is_i64());
}

#[tokio::test]
async fn test_protected_route_without_header() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/me")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "message": "unauthorized access" }));
}

#[tokio::test]
async fn test_protected_route_with_expired_token() {
    let app = TestApp::spawn().await;

    let token = app.token_issued_at(
        Claims::new().with_extra("email", "ann@x.com"),
        Utc::now() - Duration::hours(25),
    );

    let response = app
        .get_authenticated("/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "message": "unauthorized access" }));
}

#[tokio::test]
async fn test_protected_route_with_tampered_token() {
    let app = TestApp::spawn().await;

    let token = app.token_issued_at(
        Claims::new().with_extra("role", "buyer"),
        Utc::now(),
    );
    let forged = app.token_issued_at(
        Claims::new().with_extra("role", "seller"),
        Utc::now(),
    );

    // Seller payload under the buyer token's signature
    let (_, signature) = token.rsplit_once('.').unwrap();
    let (forged_unsigned, _) = forged.rsplit_once('.').unwrap();
    let tampered = format!("{}.{}", forged_unsigned, signature);

    let response = app
        .get_authenticated("/me", &tampered)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_with_wrong_scheme() {
    let app = TestApp::spawn().await;

    let token = app.token_issued_at(Claims::new(), Utc::now());

    let response = app
        .get("/me")
        .header("Authorization", format!("Token {}", token))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_concurrent_registrations_insert_once() {
    let app = TestApp::spawn().await;

    let (first, second) = tokio::join!(app.register(ann()), app.register(ann()));

    let mut statuses = vec![first.status(), second.status()];
    statuses.sort();
    assert_eq!(statuses, vec![StatusCode::CREATED, StatusCode::BAD_REQUEST]);
    assert_eq!(app.repository.insert_count(), 1);
}
