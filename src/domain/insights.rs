//! Summary metrics over a pricing pass, for the insights view.

use std::collections::BTreeMap;

use super::pricing::{Recommendation, RecommendationStatus};

/// Margin band considered optimally priced.
const OPTIMAL_MARGIN_LOW: f64 = 0.20;
const OPTIMAL_MARGIN_HIGH: f64 = 0.35;

/// Competitive positioning window around the competitor average.
const COMPETITIVE_WINDOW: f64 = 0.05;

#[derive(Debug, Clone, PartialEq)]
pub struct InsightsSummary {
    pub recommendation_count: usize,
    /// Mean proposed margin across recommendations.
    pub avg_margin: f64,
    /// Fractional revenue change if every proposal were applied.
    pub revenue_change_pct: f64,
    /// Share of proposals landing in the optimal margin band.
    pub optimal_pricing_pct: f64,
    /// Share of proposals within ±5% of their competitor average, over
    /// proposals that have competitor data.
    pub competitive_pct: f64,
    pub pending_review: usize,
}

impl InsightsSummary {
    pub fn compute(recommendations: &[Recommendation]) -> Self {
        let n = recommendations.len();
        if n == 0 {
            return InsightsSummary {
                recommendation_count: 0,
                avg_margin: 0.0,
                revenue_change_pct: 0.0,
                optimal_pricing_pct: 0.0,
                competitive_pct: 0.0,
                pending_review: 0,
            };
        }

        let avg_margin =
            recommendations.iter().map(|r| r.margin_after).sum::<f64>() / n as f64;

        let current_total: f64 = recommendations.iter().map(|r| r.current_price).sum();
        let proposed_total: f64 = recommendations.iter().map(|r| r.proposed_price).sum();
        let revenue_change_pct = if current_total > 0.0 {
            (proposed_total - current_total) / current_total
        } else {
            0.0
        };

        let optimal = recommendations
            .iter()
            .filter(|r| {
                r.margin_after >= OPTIMAL_MARGIN_LOW && r.margin_after <= OPTIMAL_MARGIN_HIGH
            })
            .count();

        let with_competitors: Vec<_> = recommendations
            .iter()
            .filter_map(|r| r.competitor_avg.map(|avg| (r, avg)))
            .collect();
        let competitive = with_competitors
            .iter()
            .filter(|(r, avg)| ((r.proposed_price - avg) / avg).abs() <= COMPETITIVE_WINDOW)
            .count();
        let competitive_pct = if with_competitors.is_empty() {
            0.0
        } else {
            competitive as f64 / with_competitors.len() as f64
        };

        let pending_review = recommendations
            .iter()
            .filter(|r| r.status == RecommendationStatus::Pending && r.requires_review())
            .count();

        InsightsSummary {
            recommendation_count: n,
            avg_margin,
            revenue_change_pct,
            optimal_pricing_pct: optimal as f64 / n as f64,
            competitive_pct,
            pending_review,
        }
    }
}

/// Per-category aggregate for the insights table.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRollup {
    pub category: String,
    pub products: usize,
    pub avg_margin: f64,
    pub avg_change_pct: f64,
}

/// Roll recommendations up by category, alphabetically.
pub fn category_rollups(recommendations: &[Recommendation]) -> Vec<CategoryRollup> {
    let mut groups: BTreeMap<&str, Vec<&Recommendation>> = BTreeMap::new();
    for rec in recommendations {
        groups.entry(rec.category.as_str()).or_default().push(rec);
    }

    groups
        .into_iter()
        .map(|(category, recs)| {
            let n = recs.len() as f64;
            CategoryRollup {
                category: category.to_string(),
                products: recs.len(),
                avg_margin: recs.iter().map(|r| r.margin_after).sum::<f64>() / n,
                avg_change_pct: recs.iter().map(|r| r.change_pct()).sum::<f64>() / n,
            }
        })
        .collect()
}
