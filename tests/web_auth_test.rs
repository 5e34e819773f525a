#![cfg(feature = "web")]
//! Authentication flow tests for the web dashboard.

mod common;

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHasher};
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use pricedesk::adapters::demo_adapter::DemoCatalogAdapter;
use pricedesk::adapters::web::{build_router, AppState, Backend};
use pricedesk::domain::alerts::{evaluate, AlertThresholds};
use pricedesk::ports::catalog_port::CatalogPort;
use std::sync::Mutex;
use tower::ServiceExt;
use tower_sessions::cookie::Key;

use common::*;

const USERNAME: &str = "reviewer";
const PASSWORD: &str = "orange-crate-42";

fn hash_password(password: &str) -> String {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .unwrap()
        .to_string()
}

fn create_app() -> Router {
    let catalog = DemoCatalogAdapter::new().load_catalog().unwrap();
    let session = session_from_catalog(&catalog);
    let alerts = evaluate(&catalog, &AlertThresholds::default(), at(2024, 11, 22, 9));

    let state = AppState {
        catalog,
        session: Mutex::new(session),
        alerts,
    };
    let backend = Backend::new(USERNAME.to_string(), hash_password(PASSWORD));
    build_router(state, backend, Key::generate())
}

fn login_request(username: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!(
            "username={username}&password={password}"
        )))
        .unwrap()
}

fn session_cookie(response: &axum::response::Response) -> String {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .collect::<Vec<_>>()
        .join("; ")
}

#[tokio::test]
async fn unauthenticated_view_redirects_to_login() {
    let app = create_app();

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert!(response.status().is_redirection());
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(location.contains("/login"));
}

#[tokio::test]
async fn login_page_renders_without_auth() {
    let app = create_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/login")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let app = create_app();

    let response = app
        .oneshot(login_request(USERNAME, "not-the-password"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_user_is_unauthorized() {
    let app = create_app();

    let response = app
        .oneshot(login_request("intruder", PASSWORD))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn successful_login_grants_access_to_views() {
    let app = create_app();

    let response = app
        .clone()
        .oneshot(login_request(USERNAME, PASSWORD))
        .await
        .unwrap();
    assert!(response.status().is_redirection());

    let cookie = session_cookie(&response);
    assert!(!cookie.is_empty());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn logout_invalidates_the_session() {
    let app = create_app();

    let response = app
        .clone()
        .oneshot(login_request(USERNAME, PASSWORD))
        .await
        .unwrap();
    let cookie = session_cookie(&response);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/logout")
                .header(header::COOKIE, cookie.clone())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(response.status().is_redirection());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(response.status().is_redirection());
}
