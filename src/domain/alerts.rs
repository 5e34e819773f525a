//! Threshold-driven alert evaluation over the catalog.
//!
//! The evaluator is a pure function of its inputs: re-running on an unchanged
//! catalog with the same `as_of` produces an identical sequence.

use chrono::NaiveDateTime;

use super::pricing::margin;
use super::product::Catalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

impl AlertSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSeverity::Info => "Info",
            AlertSeverity::Warning => "Warning",
            AlertSeverity::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The condition that tripped, with measured value and threshold.
#[derive(Debug, Clone, PartialEq)]
pub enum AlertCondition {
    MarginBelowFloor { margin: f64, floor: f64 },
    PriceAboveMarket { deviation: f64, ceiling: f64 },
    DemandSurge { demand_index: f64, threshold: f64 },
    OutsideTierRange { price: f64, low: f64, high: f64 },
}

impl std::fmt::Display for AlertCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertCondition::MarginBelowFloor { margin, floor } => write!(
                f,
                "margin {:.1}% below {:.1}% floor",
                margin * 100.0,
                floor * 100.0
            ),
            AlertCondition::PriceAboveMarket { deviation, ceiling } => write!(
                f,
                "price {:.1}% above competitor average (ceiling {:.1}%)",
                deviation * 100.0,
                ceiling * 100.0
            ),
            AlertCondition::DemandSurge {
                demand_index,
                threshold,
            } => write!(
                f,
                "demand index {demand_index:.2} at or above {threshold:.2}"
            ),
            AlertCondition::OutsideTierRange { price, low, high } => {
                write!(f, "price ${price:.2} outside tier range ${low:.2}-${high:.2}")
            }
        }
    }
}

/// One violated threshold on one record. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertEntry {
    pub sku: String,
    pub severity: AlertSeverity,
    pub condition: AlertCondition,
    pub raised_at: NaiveDateTime,
}

/// Static thresholds the evaluator scans against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlertThresholds {
    /// Margins below this trigger a Warning.
    pub margin_floor: f64,
    /// Deviation above the competitor average beyond this triggers a Critical.
    pub deviation_ceiling: f64,
    /// Demand index at or above this triggers an Info.
    pub demand_surge: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        AlertThresholds {
            margin_floor: 0.20,
            deviation_ceiling: 0.15,
            demand_surge: 1.4,
        }
    }
}

/// Scan the catalog, one entry per violated threshold per record, in catalog
/// order with a fixed per-record check order.
pub fn evaluate(
    catalog: &Catalog,
    thresholds: &AlertThresholds,
    as_of: NaiveDateTime,
) -> Vec<AlertEntry> {
    let mut entries = Vec::new();

    for record in catalog.records() {
        if let Some(m) = margin(record.price, record.cost) {
            if m < thresholds.margin_floor {
                entries.push(AlertEntry {
                    sku: record.sku.clone(),
                    severity: AlertSeverity::Warning,
                    condition: AlertCondition::MarginBelowFloor {
                        margin: m,
                        floor: thresholds.margin_floor,
                    },
                    raised_at: as_of,
                });
            }
        }

        if let Some(avg) = record.competitor_avg() {
            let deviation = (record.price - avg) / avg;
            if deviation > thresholds.deviation_ceiling {
                entries.push(AlertEntry {
                    sku: record.sku.clone(),
                    severity: AlertSeverity::Critical,
                    condition: AlertCondition::PriceAboveMarket {
                        deviation,
                        ceiling: thresholds.deviation_ceiling,
                    },
                    raised_at: as_of,
                });
            }
        }

        if record.demand_index >= thresholds.demand_surge {
            entries.push(AlertEntry {
                sku: record.sku.clone(),
                severity: AlertSeverity::Info,
                condition: AlertCondition::DemandSurge {
                    demand_index: record.demand_index,
                    threshold: thresholds.demand_surge,
                },
                raised_at: as_of,
            });
        }

        let (low, high) = record.tier.price_range();
        if record.price < low || record.price > high {
            entries.push(AlertEntry {
                sku: record.sku.clone(),
                severity: AlertSeverity::Warning,
                condition: AlertCondition::OutsideTierRange {
                    price: record.price,
                    low,
                    high,
                },
                raised_at: as_of,
            });
        }
    }

    entries
}

/// Counts per severity, for summary views.
pub fn severity_counts(entries: &[AlertEntry]) -> (usize, usize, usize) {
    let mut info = 0;
    let mut warning = 0;
    let mut critical = 0;
    for entry in entries {
        match entry.severity {
            AlertSeverity::Info => info += 1,
            AlertSeverity::Warning => warning += 1,
            AlertSeverity::Critical => critical += 1,
        }
    }
    (info, warning, critical)
}
