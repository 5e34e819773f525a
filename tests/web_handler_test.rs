#![cfg(feature = "web")]
//! Web handler integration tests.
//!
//! Tests cover:
//! - Each of the four views renders with expected content
//! - HTMX fragment vs full page responses
//! - Decide endpoint: transition, conflict on re-decision, unknown id
//! - Error template rendering for unknown routes

mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use pricedesk::adapters::demo_adapter::DemoCatalogAdapter;
use pricedesk::adapters::web::{build_test_router, AppState};
use pricedesk::domain::alerts::{evaluate, AlertThresholds};
use pricedesk::ports::catalog_port::CatalogPort;
use std::sync::Mutex;
use tower::ServiceExt;

use common::*;

fn create_test_app() -> Router {
    let catalog = DemoCatalogAdapter::new().load_catalog().unwrap();
    let session = session_from_catalog(&catalog);
    let alerts = evaluate(&catalog, &AlertThresholds::default(), at(2024, 11, 22, 9));

    build_test_router(AppState {
        catalog,
        session: Mutex::new(session),
        alerts,
    })
}

async fn body_text(response: axum::response::Response) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&body).to_string()
}

mod dashboard_tests {
    use super::*;

    #[tokio::test]
    async fn dashboard_renders_with_ok_status() {
        let app = create_test_app();

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn dashboard_contains_summary_cards() {
        let app = create_test_app();

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let html = body_text(response).await;

        assert!(html.contains("Insights"));
        assert!(html.contains("Average Margin"));
        assert!(html.contains("Category Performance"));
        assert!(html.contains("Elasticity by Tier"));
    }

    #[tokio::test]
    async fn dashboard_htmx_fragment_excludes_html_wrapper() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header("HX-Request", "true")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let html = body_text(response).await;

        assert!(html.contains("<div id=\"content\">"));
        assert!(!html.contains("<!DOCTYPE html>"));
    }
}

mod pricing_tests {
    use super::*;

    #[tokio::test]
    async fn pricing_view_lists_products() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/pricing")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let html = body_text(response).await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Pricing Engine"));
        assert!(html.contains("Lysol Disinfecting Spray"));
        assert!(html.contains("Proposed"));
    }
}

mod approvals_tests {
    use super::*;

    #[tokio::test]
    async fn approvals_view_shows_queue_and_audit() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/approvals")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let html = body_text(response).await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Pending Your Review"));
        assert!(html.contains("Audit Trail"));
        assert!(html.contains("/decide"));
    }

    #[tokio::test]
    async fn decide_approve_redirects_then_conflicts() {
        let app = create_test_app();

        let request = |body: &'static str| {
            Request::builder()
                .method("POST")
                .uri("/approvals/1/decide")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .unwrap()
        };

        let response = app.clone().oneshot(request("decision=approve")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/approvals"
        );

        // Terminal state: a second decision conflicts.
        let response = app.oneshot(request("decision=reject")).await.unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn decide_unknown_id_returns_not_found() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/approvals/999/decide")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("decision=approve"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn decide_with_unknown_verb_is_bad_request() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/approvals/1/decide")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("decision=maybe"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn approved_item_appears_in_audit_trail() {
        let app = create_test_app();

        let decide = Request::builder()
            .method("POST")
            .uri("/approvals/1/decide")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("decision=approve&note=looks+right"))
            .unwrap();
        app.clone().oneshot(decide).await.unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/approvals")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let html = body_text(response).await;

        assert!(html.contains("Approved"));
        assert!(html.contains("looks right"));
    }
}

mod alerts_tests {
    use super::*;

    #[tokio::test]
    async fn alerts_view_shows_severity_summary() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/alerts")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let html = body_text(response).await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Alerts"));
        assert!(html.contains("Critical"));
        assert!(html.contains("Warning"));
        // The demo catalog ships with threshold violations.
        assert!(html.contains("alert-"));
    }
}

mod error_handling_tests {
    use super::*;

    #[tokio::test]
    async fn unknown_route_returns_404_error_page() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/nonexistent")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let html = body_text(response).await;
        assert!(html.contains("class=\"error\""));
    }
}
