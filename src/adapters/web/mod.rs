//! Web dashboard adapter.
//!
//! Axum server with an HTMX-friendly frontend: insights, pricing engine,
//! approvals, and alerts views over one shared in-memory review session.

mod auth;
mod error;
mod handlers;
mod templates;

pub use auth::{Backend, Credentials, User};
pub use error::WebError;
pub use handlers::*;
pub use templates::*;

use std::sync::{Arc, Mutex};

use axum::{
    Router,
    routing::{get, post},
};
use axum_login::{login_required, AuthManagerLayerBuilder};
use tower_http::services::ServeDir;
use tower_sessions::{cookie::Key, Expiry, MemoryStore, SessionManagerLayer};

use crate::domain::alerts::AlertEntry;
use crate::domain::product::Catalog;
use crate::domain::review::ReviewSession;

pub struct AppState {
    pub catalog: Catalog,
    pub session: Mutex<ReviewSession>,
    pub alerts: Vec<AlertEntry>,
}

pub fn build_router(state: AppState, backend: Backend, session_key: Key) -> Router {
    // State is in-memory only; the session store follows suit.
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(false)
        .with_expiry(Expiry::OnInactivity(time::Duration::hours(8)))
        .with_signed(session_key);
    let auth_layer = AuthManagerLayerBuilder::new(backend, session_layer).build();

    Router::new()
        .route("/", get(handlers::dashboard))
        .route("/pricing", get(handlers::pricing))
        .route("/approvals", get(handlers::approvals))
        .route("/approvals/{id}/decide", post(handlers::decide))
        .route("/alerts", get(handlers::alerts))
        .route_layer(login_required!(Backend, login_url = "/login"))
        .route("/login", get(handlers::login_form).post(handlers::login))
        .route("/logout", post(handlers::logout))
        .nest_service("/static", ServeDir::new("static"))
        .fallback(handlers::not_found)
        .layer(auth_layer)
        .with_state(Arc::new(state))
}

/// Router without the login gate. The auth layer is still installed so the
/// session extractors work; every view is reachable anonymously.
pub fn build_test_router(state: AppState) -> Router {
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(false)
        .with_signed(Key::generate());
    let backend = Backend::new("testuser".to_string(), String::new());
    let auth_layer = AuthManagerLayerBuilder::new(backend, session_layer).build();

    Router::new()
        .route("/", get(handlers::dashboard))
        .route("/pricing", get(handlers::pricing))
        .route("/approvals", get(handlers::approvals))
        .route("/approvals/{id}/decide", post(handlers::decide))
        .route("/alerts", get(handlers::alerts))
        .route("/login", get(handlers::login_form).post(handlers::login))
        .route("/logout", post(handlers::logout))
        .fallback(handlers::not_found)
        .layer(auth_layer)
        .with_state(Arc::new(state))
}

fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("HX-Request").is_some()
}
