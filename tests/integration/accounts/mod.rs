//! Registration and login against a live database
//!
//! Run with `TEST_DATABASE_URL` pointing at a disposable Postgres and
//! `--include-ignored`.

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use coralbase_users::domain::validation::{
    EMAIL_TAKEN, INVALID_LOGIN, PASSWORD_TOO_SHORT, USERNAME_TAKEN,
};

use crate::common::{assert_error, parse_body, request, TestApp};

fn unique_account() -> (String, String) {
    let short = Uuid::new_v4().simple().to_string()[..10].to_string();
    (format!("reef_{}@coralbase.test", short), format!("reef_{}", short))
}

async fn register(app: &TestApp, email: &str, username: &str, password: &str) -> (StatusCode, Value) {
    let payload = json!({
        "email": email,
        "password": password,
        "username": username,
        "name": "Reef Diver",
    });
    let resp = app
        .test_router()
        .oneshot(request(Method::POST, "/api/auth/register", None, Some(payload)))
        .await
        .unwrap();
    let status = resp.status();
    (status, parse_body(resp).await)
}

async fn login(app: &TestApp, email: &str, password: &str) -> (StatusCode, Value) {
    let payload = json!({ "email": email, "password": password });
    let resp = app
        .test_router()
        .oneshot(request(Method::POST, "/api/auth/login", None, Some(payload)))
        .await
        .unwrap();
    let status = resp.status();
    (status, parse_body(resp).await)
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_register_login_and_me() {
    let app = TestApp::with_database().await.unwrap();
    let (email, username) = unique_account();

    let (status, body) = register(&app, &email, &username, "secret1").await;
    assert_eq!(status, StatusCode::CREATED, "body: {}", body);
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["email"], email);
    assert_eq!(body["user"]["username"], username);
    assert!(body["user"].get("password").is_none());

    let (status, body) = login(&app, &email, "secret1").await;
    assert_eq!(status, StatusCode::OK, "body: {}", body);
    let token = body["token"].as_str().unwrap().to_string();

    let resp = app
        .test_router()
        .oneshot(request(Method::GET, "/api/auth/me", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let me = parse_body(resp).await;
    assert_eq!(me["user"]["email"], email);

    let last_active: Option<chrono::DateTime<chrono::Utc>> =
        sqlx::query_scalar("SELECT last_active FROM users WHERE email = $1")
            .bind(&email)
            .fetch_one(&app.pool)
            .await
            .unwrap();
    assert!(last_active.is_some());

    app.cleanup_user(&email).await.unwrap();
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_register_duplicate_email_and_username() {
    let app = TestApp::with_database().await.unwrap();
    let (email, username) = unique_account();
    let (other_email, other_username) = unique_account();

    let (status, _) = register(&app, &email, &username, "secret1").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = register(&app, &email, &other_username, "secret1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "VALIDATION_ERROR", EMAIL_TAKEN);

    let (status, body) = register(&app, &other_email, &username, "secret1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "VALIDATION_ERROR", USERNAME_TAKEN);

    app.cleanup_user(&email).await.unwrap();
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_register_short_password() {
    let app = TestApp::with_database().await.unwrap();
    let (email, username) = unique_account();

    let (status, body) = register(&app, &email, &username, "12345").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "VALIDATION_ERROR", PASSWORD_TOO_SHORT);
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_login_failures_share_one_message() {
    let app = TestApp::with_database().await.unwrap();
    let (email, username) = unique_account();
    let (status, _) = register(&app, &email, &username, "secret1").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = login(&app, &email, "wrong-password").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_error(&body, "AUTHENTICATION_ERROR", INVALID_LOGIN);

    let (status, body) = login(&app, "nobody@coralbase.test", "secret1").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_error(&body, "AUTHENTICATION_ERROR", INVALID_LOGIN);

    sqlx::query("UPDATE users SET is_active = false WHERE email = $1")
        .bind(&email)
        .execute(&app.pool)
        .await
        .unwrap();

    let (status, body) = login(&app, &email, "secret1").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_error(&body, "AUTHENTICATION_ERROR", INVALID_LOGIN);

    app.cleanup_user(&email).await.unwrap();
}
