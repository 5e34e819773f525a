//! Report generation port trait.

use crate::domain::alerts::AlertEntry;
use crate::domain::error::PricedeskError;
use crate::domain::insights::{CategoryRollup, InsightsSummary};
use crate::domain::pricing::Recommendation;
use crate::domain::review::AuditLogEntry;

/// Everything a report needs, captured at write time.
pub struct ReportSnapshot<'a> {
    pub summary: &'a InsightsSummary,
    pub rollups: &'a [CategoryRollup],
    pub recommendations: &'a [Recommendation],
    pub alerts: &'a [AlertEntry],
    pub history: &'a [AuditLogEntry],
}

/// Port for writing pricing review reports.
pub trait ReportPort {
    fn write(&self, snapshot: &ReportSnapshot<'_>, output_path: &str)
        -> Result<(), PricedeskError>;
}
