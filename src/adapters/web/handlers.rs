//! HTTP request handlers for the web adapter.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use std::sync::Arc;

use crate::domain::alerts::severity_counts;
use crate::domain::insights::{category_rollups, InsightsSummary};
use crate::domain::pricing::Recommendation;
use crate::domain::review::Decision;

use super::auth::{Backend, Credentials};
use super::templates::{
    elasticity_rows, AlertRow, AlertsTemplate, ApprovalsTemplate, AuditRow, DashboardTemplate,
    LoginTemplate, PricingTemplate, RecRow, RollupRow, SummaryView,
};
use super::{is_htmx_request, AppState, WebError};

pub type AuthSession = axum_login::AuthSession<Backend>;

/// Owned copy of every recommendation, taken under the session lock.
fn snapshot(state: &AppState) -> Result<Vec<Recommendation>, WebError> {
    let session = state
        .session
        .lock()
        .map_err(|_| WebError::internal("review session lock poisoned"))?;
    Ok(session.recommendations().into_iter().cloned().collect())
}

pub async fn dashboard(
    auth_session: AuthSession,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    let recommendations = snapshot(&state)?;
    let summary = InsightsSummary::compute(&recommendations);
    let rollups = category_rollups(&recommendations)
        .iter()
        .map(RollupRow::from_rollup)
        .collect();

    let template = DashboardTemplate {
        username: auth_session
            .user
            .map(|u| u.username)
            .unwrap_or_default(),
        summary: SummaryView::from_summary(&summary),
        rollups,
        elasticity: elasticity_rows(),
    };

    if is_htmx_request(&headers) {
        Ok(Html(template.fragment()).into_response())
    } else {
        Ok(template.into_response())
    }
}

pub async fn pricing(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    let rows = snapshot(&state)?
        .iter()
        .map(RecRow::from_recommendation)
        .collect();
    let template = PricingTemplate { rows };

    if is_htmx_request(&headers) {
        Ok(Html(template.fragment()).into_response())
    } else {
        Ok(template.into_response())
    }
}

pub async fn approvals(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    let session = state
        .session
        .lock()
        .map_err(|_| WebError::internal("review session lock poisoned"))?;

    let pending = session
        .pending()
        .into_iter()
        .filter(|r| r.requires_review())
        .map(RecRow::from_recommendation)
        .collect();
    let history = session.history().iter().map(AuditRow::from_entry).collect();
    let template = ApprovalsTemplate {
        stats: session.workflow_stats(),
        decisions: session.decision_stats(),
        pending,
        history,
    };
    drop(session);

    if is_htmx_request(&headers) {
        Ok(Html(template.fragment()).into_response())
    } else {
        Ok(template.into_response())
    }
}

#[derive(Debug, serde::Deserialize)]
pub struct DecideForm {
    pub decision: String,
    pub note: Option<String>,
}

pub async fn decide(
    auth_session: AuthSession,
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Form(form): Form<DecideForm>,
) -> Result<Response, WebError> {
    let decision = match form.decision.as_str() {
        "approve" => Decision::Approve,
        "reject" => Decision::Reject,
        other => {
            return Err(WebError::bad_request(format!(
                "unknown decision '{other}'"
            )))
        }
    };

    let actor = auth_session
        .user
        .as_ref()
        .map(|u| u.username.clone())
        .unwrap_or_else(|| "reviewer".to_string());
    let now = chrono::Utc::now().naive_utc();

    let mut session = state
        .session
        .lock()
        .map_err(|_| WebError::internal("review session lock poisoned"))?;
    session.decide(id, decision, &actor, form.note.as_deref().unwrap_or(""), now)?;
    drop(session);

    Ok(Redirect::to("/approvals").into_response())
}

pub async fn alerts(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    let (info, warning, critical) = severity_counts(&state.alerts);
    let rows = state.alerts.iter().map(AlertRow::from_entry).collect();
    let template = AlertsTemplate {
        info,
        warning,
        critical,
        rows,
    };

    if is_htmx_request(&headers) {
        Ok(Html(template.fragment()).into_response())
    } else {
        Ok(template.into_response())
    }
}

pub async fn login_form() -> Response {
    LoginTemplate { message: None }.into_response()
}

pub async fn login(
    mut auth_session: AuthSession,
    Form(creds): Form<Credentials>,
) -> Result<Response, WebError> {
    match auth_session.authenticate(creds).await {
        Ok(Some(user)) => {
            auth_session
                .login(&user)
                .await
                .map_err(|_| WebError::internal("failed to establish session"))?;
            Ok(Redirect::to("/").into_response())
        }
        Ok(None) => {
            let template = LoginTemplate {
                message: Some("Invalid username or password".to_string()),
            };
            Ok((StatusCode::UNAUTHORIZED, template).into_response())
        }
        Err(_) => Err(WebError::internal("authentication backend failure")),
    }
}

pub async fn logout(mut auth_session: AuthSession) -> Result<Response, WebError> {
    auth_session
        .logout()
        .await
        .map_err(|_| WebError::internal("failed to clear session"))?;
    Ok(Redirect::to("/login").into_response())
}

pub async fn not_found() -> WebError {
    WebError::not_found("page not found")
}
