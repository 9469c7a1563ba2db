//! Fixed error responses, middleware behaviour, and routes that never reach
//! the database. None of these tests need a running PostgreSQL server.

mod common;

use axum::http::{Request, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use common::{body_text, build_test_app, location, unreachable_pool, Browser};
use signup_api::auth::password::PasswordHashError;
use signup_api::error::{AppError, INTERNAL_ERROR_BODY, NOT_FOUND_BODY};
use signup_api::handlers::errors::handle_panic;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;

// ---------------------------------------------------------------------------
// AppError mapping
// ---------------------------------------------------------------------------

#[tokio::test]
async fn database_error_returns_fixed_500() {
    let response = AppError::Database(sqlx::Error::PoolTimedOut).into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(response).await, INTERNAL_ERROR_BODY);
}

#[tokio::test]
async fn password_hash_error_returns_fixed_500() {
    let response = AppError::Password(PasswordHashError::Algorithm).into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(response).await, INTERNAL_ERROR_BODY);
}

// ---------------------------------------------------------------------------
// Fallback, panic, and middleware
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_page_not_found() {
    let mut browser = Browser::new(build_test_app(unreachable_pool()));

    let response = browser.get("/no/such/page").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(response).await, NOT_FOUND_BODY);
}

#[tokio::test]
async fn panic_returns_fixed_500() {
    async fn boom() -> &'static str {
        panic!("handler exploded");
    }
    let app = Router::new()
        .route("/boom", get(boom))
        .layer(CatchPanicLayer::custom(handle_panic));

    let request = Request::builder()
        .uri("/boom")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(response).await, INTERNAL_ERROR_BODY);
}

#[tokio::test]
async fn responses_carry_request_id() {
    let mut browser = Browser::new(build_test_app(unreachable_pool()));

    let response = browser.get("/").await;

    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn health_reports_degraded_without_database() {
    let mut browser = Browser::new(build_test_app(unreachable_pool()));

    let response = browser.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], false);
}

// ---------------------------------------------------------------------------
// Routes that must not touch the database
// ---------------------------------------------------------------------------

#[tokio::test]
async fn home_renders_login_form() {
    let mut browser = Browser::new(build_test_app(unreachable_pool()));

    let response = browser.get("/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("action=\"/login\""));
}

#[tokio::test]
async fn signup_form_renders() {
    let mut browser = Browser::new(build_test_app(unreachable_pool()));

    let response = browser.get("/signup").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("action=\"/signup\""));
}

#[tokio::test]
async fn login_with_missing_fields_is_invalid_credentials() {
    let mut browser = Browser::new(build_test_app(unreachable_pool()));

    let response = browser.post_form("/login", "username=alice").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Invalid username or password"));
    assert!(browser.cookie().is_none());
}

#[tokio::test]
async fn signup_without_form_content_type_rerenders_form() {
    let mut browser = Browser::new(build_test_app(unreachable_pool()));

    let response = browser
        .post_raw("/signup", None, "username=alice&password=pw123")
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("action=\"/signup\""));
    assert!(page.contains("Username and password are required"));
}

#[tokio::test]
async fn signup_with_json_body_rerenders_form() {
    let mut browser = Browser::new(build_test_app(unreachable_pool()));

    let response = browser
        .post_raw(
            "/signup",
            Some("application/json"),
            r#"{"username":"alice","password":"pw123"}"#,
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response)
        .await
        .contains("Username and password are required"));
}

#[tokio::test]
async fn login_with_repeated_field_is_invalid_credentials() {
    let mut browser = Browser::new(build_test_app(unreachable_pool()));

    let response = browser
        .post_form("/login", "username=alice&username=bob&password=pw123")
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("action=\"/login\""));
    assert!(page.contains("Invalid username or password"));
    assert!(browser.cookie().is_none());
}

#[tokio::test]
async fn anonymous_dashboard_redirects_home() {
    let mut browser = Browser::new(build_test_app(unreachable_pool()));

    let response = browser.get("/dashboard").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    assert!(browser.cookie().is_some(), "notice should be carried in the session");
}

#[tokio::test]
async fn logout_without_session_still_redirects_home() {
    let mut browser = Browser::new(build_test_app(unreachable_pool()));

    let response = browser.get("/logout").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let page = body_text(browser.get("/").await).await;
    assert!(page.contains("You have been logged out"));
}

#[tokio::test]
async fn forged_cookie_is_removed() {
    let mut browser = Browser::new(build_test_app(unreachable_pool()));
    browser.set_cookie(Some("session=bm90LWEtc2lnbmF0dXJl".to_string()));

    let response = browser.get("/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = response.headers()["set-cookie"].to_str().unwrap();
    assert!(set_cookie.contains("Max-Age=0"));
    assert!(browser.cookie().is_none());
}
