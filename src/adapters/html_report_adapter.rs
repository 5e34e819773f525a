//! Static HTML report adapter implementing ReportPort.
//!
//! Writes a single-file snapshot of the review session: summary metrics,
//! category rollup, recommendation table, alerts, and the audit trail.

use std::fs;
use std::path::Path;

use crate::domain::error::PricedeskError;
use crate::ports::report_port::{ReportPort, ReportSnapshot};

pub struct HtmlReportAdapter;

impl HtmlReportAdapter {
    pub fn new() -> Self {
        Self
    }

    fn render(snapshot: &ReportSnapshot<'_>) -> String {
        let mut html = String::from(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
             <title>Pricing Review Report</title>\n\
             <style>body{font-family:sans-serif;margin:2rem}table{border-collapse:collapse}\
             td,th{border:1px solid #ccc;padding:4px 8px}</style>\n</head>\n<body>\n",
        );

        html.push_str("<h1>Pricing Review Report</h1>");

        let summary = snapshot.summary;
        html.push_str("<h2>Summary</h2><table>");
        html.push_str(&format!(
            "<tr><td>Recommendations</td><td>{}</td></tr>",
            summary.recommendation_count
        ));
        html.push_str(&format!(
            "<tr><td>Average Margin</td><td>{:.1}%</td></tr>",
            summary.avg_margin * 100.0
        ));
        html.push_str(&format!(
            "<tr><td>Projected Revenue Change</td><td>{:+.1}%</td></tr>",
            summary.revenue_change_pct * 100.0
        ));
        html.push_str(&format!(
            "<tr><td>Optimal Pricing</td><td>{:.1}%</td></tr>",
            summary.optimal_pricing_pct * 100.0
        ));
        html.push_str(&format!(
            "<tr><td>Competitive Positioning</td><td>{:.1}%</td></tr>",
            summary.competitive_pct * 100.0
        ));
        html.push_str(&format!(
            "<tr><td>Pending Review</td><td>{}</td></tr>",
            summary.pending_review
        ));
        html.push_str("</table>");

        if !snapshot.rollups.is_empty() {
            html.push_str("<h2>Category Performance</h2><table>");
            html.push_str(
                "<tr><th>Category</th><th>Products</th><th>Avg Margin</th><th>Avg Change</th></tr>",
            );
            for rollup in snapshot.rollups {
                html.push_str(&format!(
                    "<tr><td>{}</td><td>{}</td><td>{:.1}%</td><td>{:+.1}%</td></tr>",
                    rollup.category,
                    rollup.products,
                    rollup.avg_margin * 100.0,
                    rollup.avg_change_pct * 100.0
                ));
            }
            html.push_str("</table>");
        }

        if !snapshot.recommendations.is_empty() {
            html.push_str("<h2>Recommendations</h2><table>");
            html.push_str(
                "<tr><th>SKU</th><th>Product</th><th>Tier</th><th>Current</th>\
                 <th>Proposed</th><th>Change</th><th>Level</th><th>Status</th></tr>",
            );
            for rec in snapshot.recommendations {
                html.push_str(&format!(
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>${:.2}</td>\
                     <td>${:.2}</td><td>{:+.1}%</td><td>{}</td><td>{}</td></tr>",
                    rec.sku,
                    rec.name,
                    rec.tier,
                    rec.current_price,
                    rec.proposed_price,
                    rec.change_pct() * 100.0,
                    rec.approval_level,
                    rec.status
                ));
            }
            html.push_str("</table>");
        }

        if !snapshot.alerts.is_empty() {
            html.push_str("<h2>Alerts</h2><table>");
            html.push_str("<tr><th>Severity</th><th>SKU</th><th>Condition</th><th>Raised</th></tr>");
            for alert in snapshot.alerts {
                html.push_str(&format!(
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                    alert.severity, alert.sku, alert.condition, alert.raised_at
                ));
            }
            html.push_str("</table>");
        }

        if !snapshot.history.is_empty() {
            html.push_str("<h2>Audit Trail</h2><table>");
            html.push_str(
                "<tr><th>Id</th><th>SKU</th><th>Actor</th><th>When</th>\
                 <th>From</th><th>To</th><th>Note</th></tr>",
            );
            for entry in snapshot.history {
                html.push_str(&format!(
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
                     <td>{}</td><td>{}</td><td>{}</td></tr>",
                    entry.recommendation_id,
                    entry.sku,
                    entry.actor,
                    entry.decided_at,
                    entry.from_status,
                    entry.to_status,
                    entry.note
                ));
            }
            html.push_str("</table>");
        }

        html.push_str("</body>\n</html>\n");
        html
    }
}

impl Default for HtmlReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPort for HtmlReportAdapter {
    fn write(
        &self,
        snapshot: &ReportSnapshot<'_>,
        output_path: &str,
    ) -> Result<(), PricedeskError> {
        let html = Self::render(snapshot);

        let path = Path::new(output_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(PricedeskError::Io)?;
        }
        fs::write(path, html).map_err(PricedeskError::Io)?;

        Ok(())
    }
}
