//! HTML templates using Askama.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::domain::alerts::AlertEntry;
use crate::domain::elasticity::tier_elasticity;
use crate::domain::insights::{CategoryRollup, InsightsSummary};
use crate::domain::pricing::Recommendation;
use crate::domain::product::Tier;
use crate::domain::review::{AuditLogEntry, DecisionStats, WorkflowStats};

/// Preformatted recommendation row shared by the pricing and approvals views.
pub struct RecRow {
    pub id: u64,
    pub sku: String,
    pub name: String,
    pub category: String,
    pub tier: String,
    pub current: String,
    pub proposed: String,
    pub change: String,
    pub change_positive: bool,
    pub margin: String,
    pub demand: String,
    pub level: String,
    pub status: String,
}

impl RecRow {
    pub fn from_recommendation(rec: &Recommendation) -> Self {
        RecRow {
            id: rec.id,
            sku: rec.sku.clone(),
            name: rec.name.clone(),
            category: rec.category.clone(),
            tier: rec.tier.to_string(),
            current: format!("${:.2}", rec.current_price),
            proposed: format!("${:.2}", rec.proposed_price),
            change: format!("{:+.1}%", rec.change_pct() * 100.0),
            change_positive: rec.change_pct() >= 0.0,
            margin: format!("{:.1}%", rec.margin_after * 100.0),
            demand: format!("{:.2}", rec.demand_index),
            level: rec.approval_level.to_string(),
            status: rec.status.to_string(),
        }
    }
}

pub struct AuditRow {
    pub id: u64,
    pub sku: String,
    pub actor: String,
    pub when: String,
    pub from_status: String,
    pub to_status: String,
    pub note: String,
}

impl AuditRow {
    pub fn from_entry(entry: &AuditLogEntry) -> Self {
        AuditRow {
            id: entry.recommendation_id,
            sku: entry.sku.clone(),
            actor: entry.actor.clone(),
            when: entry.decided_at.format("%Y-%m-%d %H:%M").to_string(),
            from_status: entry.from_status.to_string(),
            to_status: entry.to_status.to_string(),
            note: entry.note.clone(),
        }
    }
}

pub struct AlertRow {
    pub severity: String,
    pub severity_class: String,
    pub sku: String,
    pub condition: String,
    pub raised: String,
}

impl AlertRow {
    pub fn from_entry(entry: &AlertEntry) -> Self {
        AlertRow {
            severity: entry.severity.to_string(),
            severity_class: entry.severity.as_str().to_lowercase(),
            sku: entry.sku.clone(),
            condition: entry.condition.to_string(),
            raised: entry.raised_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

pub struct SummaryView {
    pub recommendation_count: usize,
    pub avg_margin: String,
    pub revenue_change: String,
    pub optimal: String,
    pub competitive: String,
    pub pending_review: usize,
}

impl SummaryView {
    pub fn from_summary(summary: &InsightsSummary) -> Self {
        SummaryView {
            recommendation_count: summary.recommendation_count,
            avg_margin: format!("{:.1}%", summary.avg_margin * 100.0),
            revenue_change: format!("{:+.1}%", summary.revenue_change_pct * 100.0),
            optimal: format!("{:.1}%", summary.optimal_pricing_pct * 100.0),
            competitive: format!("{:.1}%", summary.competitive_pct * 100.0),
            pending_review: summary.pending_review,
        }
    }
}

pub struct RollupRow {
    pub category: String,
    pub products: usize,
    pub avg_margin: String,
    pub avg_change: String,
}

impl RollupRow {
    pub fn from_rollup(rollup: &CategoryRollup) -> Self {
        RollupRow {
            category: rollup.category.clone(),
            products: rollup.products,
            avg_margin: format!("{:.1}%", rollup.avg_margin * 100.0),
            avg_change: format!("{:+.1}%", rollup.avg_change_pct * 100.0),
        }
    }
}

pub struct ElasticityRow {
    pub tier: String,
    pub elasticity: String,
}

pub fn elasticity_rows() -> Vec<ElasticityRow> {
    Tier::ALL
        .iter()
        .map(|&tier| ElasticityRow {
            tier: tier.to_string(),
            elasticity: format!("{:.1}", tier_elasticity(tier)),
        })
        .collect()
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub username: String,
    pub summary: SummaryView,
    pub rollups: Vec<RollupRow>,
    pub elasticity: Vec<ElasticityRow>,
}

impl DashboardTemplate {
    pub fn fragment(&self) -> String {
        let mut html = String::from("<div id=\"content\"><h1>Insights</h1>");
        html.push_str(&format!(
            "<p>{} recommendations, average margin {}, projected revenue {}</p>",
            self.summary.recommendation_count, self.summary.avg_margin, self.summary.revenue_change
        ));
        html.push_str(&format!(
            "<p>{} pending review</p>",
            self.summary.pending_review
        ));
        html.push_str("</div>");
        html
    }
}

#[derive(Template)]
#[template(path = "pricing.html")]
pub struct PricingTemplate {
    pub rows: Vec<RecRow>,
}

impl PricingTemplate {
    pub fn fragment(&self) -> String {
        let mut html = String::from("<div id=\"content\"><h1>Pricing Engine</h1><table>");
        html.push_str(
            "<tr><th>SKU</th><th>Product</th><th>Current</th><th>Proposed</th><th>Change</th></tr>",
        );
        for row in &self.rows {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                row.sku, row.name, row.current, row.proposed, row.change
            ));
        }
        html.push_str("</table></div>");
        html
    }
}

#[derive(Template)]
#[template(path = "approvals.html")]
pub struct ApprovalsTemplate {
    pub stats: WorkflowStats,
    pub decisions: DecisionStats,
    pub pending: Vec<RecRow>,
    pub history: Vec<AuditRow>,
}

impl ApprovalsTemplate {
    pub fn fragment(&self) -> String {
        let mut html = String::from("<div id=\"content\"><h1>Approvals</h1>");
        html.push_str(&format!(
            "<p>{} awaiting manager, {} director, {} executive</p>",
            self.stats.manager, self.stats.director, self.stats.executive
        ));
        for row in &self.pending {
            html.push_str(&format!(
                "<div class=\"approval-card\">{}: {} → {} ({}) requires {}</div>",
                row.name, row.current, row.proposed, row.change, row.level
            ));
        }
        html.push_str("</div>");
        html
    }
}

#[derive(Template)]
#[template(path = "alerts.html")]
pub struct AlertsTemplate {
    pub info: usize,
    pub warning: usize,
    pub critical: usize,
    pub rows: Vec<AlertRow>,
}

impl AlertsTemplate {
    pub fn fragment(&self) -> String {
        let mut html = String::from("<div id=\"content\"><h1>Alerts</h1>");
        html.push_str(&format!(
            "<p>{} critical, {} warning, {} info</p>",
            self.critical, self.warning, self.info
        ));
        for row in &self.rows {
            html.push_str(&format!(
                "<div class=\"alert alert-{}\">{}: {}</div>",
                row.severity_class, row.sku, row.condition
            ));
        }
        html.push_str("</div>");
        html
    }
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub message: Option<String>,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub message: String,
    pub status: u16,
}

impl ErrorTemplate {
    pub fn fragment(&self) -> String {
        format!(
            "<div id=\"error\" class=\"error\"><h1>Error {}</h1><p>{}</p></div>",
            self.status, self.message
        )
    }
}

/// Render a full-page template to an HTML response, returning `500` on a
/// rendering error. Mirrors the `IntoResponse` behaviour the Askama/Axum
/// integration provides, kept local so it binds to the crate's Axum version.
macro_rules! impl_template_into_response {
    ($($t:ty),+ $(,)?) => {
        $(
            impl IntoResponse for $t {
                fn into_response(self) -> Response {
                    match self.render() {
                        Ok(html) => Html(html).into_response(),
                        Err(_) => (
                            StatusCode::INTERNAL_SERVER_ERROR,
                            "template rendering failed",
                        )
                            .into_response(),
                    }
                }
            }
        )+
    };
}

impl_template_into_response!(
    DashboardTemplate,
    PricingTemplate,
    ApprovalsTemplate,
    AlertsTemplate,
    LoginTemplate,
);
