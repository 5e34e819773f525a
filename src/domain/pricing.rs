//! Rule-based price recommendation engine.
//!
//! Deterministic pipeline: demand adjustment, lifecycle adjustment,
//! competition adjustment, tier change cap, market band clamp, tier margin
//! floor. The floor is applied last and wins over every cap.

use chrono::NaiveDate;

use super::error::PricedeskError;
use super::product::{ProductRecord, Tier};

/// Fixed adjustment rule constants.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingRules {
    /// Uplift range applied when demand is above par.
    pub demand_up_min: f64,
    pub demand_up_max: f64,
    /// Maximum discount when demand is below par.
    pub demand_down_max: f64,

    /// Acceptable band around the competitor average, as fractions.
    pub market_band_low_pct: f64,
    pub market_band_high_pct: f64,
    /// Bump range when the rest of the market is out of stock.
    pub oos_bump_min: f64,
    pub oos_bump_max: f64,

    pub launch_discount: f64,
    pub growth_increase: f64,
    pub maturity_adjustment: f64,
    pub decline_discount: f64,
}

impl Default for PricingRules {
    fn default() -> Self {
        PricingRules {
            demand_up_min: 0.05,
            demand_up_max: 0.10,
            demand_down_max: 0.10,
            market_band_low_pct: -0.10,
            market_band_high_pct: 0.15,
            oos_bump_min: 0.05,
            oos_bump_max: 0.10,
            launch_discount: 0.10,
            growth_increase: 0.05,
            maturity_adjustment: 0.00,
            decline_discount: 0.20,
        }
    }
}

/// Per-tier pricing policy: minimum margin and per-adjustment change cap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierPolicy {
    pub min_margin_pct: f64,
    pub change_cap_pct: f64,
}

impl TierPolicy {
    pub fn for_tier(tier: Tier) -> TierPolicy {
        match tier {
            Tier::Low => TierPolicy {
                min_margin_pct: 0.10,
                change_cap_pct: 0.10,
            },
            Tier::Mid => TierPolicy {
                min_margin_pct: 0.15,
                change_cap_pct: 0.05,
            },
            Tier::High => TierPolicy {
                min_margin_pct: 0.20,
                change_cap_pct: 0.07,
            },
            Tier::Premium => TierPolicy {
                min_margin_pct: 0.25,
                change_cap_pct: 0.05,
            },
        }
    }
}

/// Fractional profit on a unit sale: (price - cost) / price.
/// Undefined when price is zero.
pub fn margin(price: f64, cost: f64) -> Option<f64> {
    if price == 0.0 {
        return None;
    }
    Some((price - cost) / price)
}

/// Who has to sign off on a proposed change, routed by its magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ApprovalLevel {
    Auto,
    Manager,
    Director,
    Executive,
}

impl ApprovalLevel {
    pub const ALL: [ApprovalLevel; 4] = [
        ApprovalLevel::Auto,
        ApprovalLevel::Manager,
        ApprovalLevel::Director,
        ApprovalLevel::Executive,
    ];

    pub fn from_change_pct(change_pct: f64) -> ApprovalLevel {
        let abs = change_pct.abs();
        if abs <= 0.03 {
            ApprovalLevel::Auto
        } else if abs <= 0.07 {
            ApprovalLevel::Manager
        } else if abs <= 0.15 {
            ApprovalLevel::Director
        } else {
            ApprovalLevel::Executive
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalLevel::Auto => "Auto",
            ApprovalLevel::Manager => "Manager",
            ApprovalLevel::Director => "Director",
            ApprovalLevel::Executive => "Executive",
        }
    }
}

impl std::fmt::Display for ApprovalLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Review state of a recommendation. Pending is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecommendationStatus {
    Pending,
    Approved,
    Rejected,
}

impl RecommendationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationStatus::Pending => "Pending",
            RecommendationStatus::Approved => "Approved",
            RecommendationStatus::Rejected => "Rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, RecommendationStatus::Pending)
    }
}

impl std::fmt::Display for RecommendationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A proposed price change awaiting review.
///
/// Created by [`recommend`]; the id is assigned when the recommendation is
/// submitted to a review session, and the status is mutated only by that
/// session. Recommendations are never deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub id: u64,
    pub sku: String,
    pub name: String,
    pub category: String,
    pub tier: Tier,
    pub current_price: f64,
    pub proposed_price: f64,
    pub margin_before: f64,
    pub margin_after: f64,
    pub demand_index: f64,
    pub competitor_avg: Option<f64>,
    pub approval_level: ApprovalLevel,
    pub status: RecommendationStatus,
    pub suggested_on: NaiveDate,
}

impl Recommendation {
    /// Fractional price change relative to the current price.
    pub fn change_pct(&self) -> f64 {
        (self.proposed_price - self.current_price) / self.current_price
    }

    /// Margin delta introduced by the proposal.
    pub fn margin_delta(&self) -> f64 {
        self.margin_after - self.margin_before
    }

    /// Auto-approved changes stay out of the human review queues.
    pub fn requires_review(&self) -> bool {
        self.approval_level != ApprovalLevel::Auto
    }
}

fn clamp(value: f64, low: f64, high: f64) -> f64 {
    value.max(low).min(high)
}

fn apply_demand_adjustment(price: f64, demand_index: f64, rules: &PricingRules) -> f64 {
    if demand_index > 1.0 {
        let intensity = clamp(demand_index - 1.0, 0.0, 1.0);
        let uplift = rules.demand_up_min + intensity * (rules.demand_up_max - rules.demand_up_min);
        price * (1.0 + uplift)
    } else if demand_index < 1.0 {
        let intensity = clamp(1.0 - demand_index, 0.0, 1.0);
        price * (1.0 - intensity * rules.demand_down_max)
    } else {
        price
    }
}

fn apply_lifecycle_adjustment(price: f64, record: &ProductRecord, rules: &PricingRules) -> f64 {
    use super::product::Lifecycle::*;
    match record.lifecycle {
        Launch => price * (1.0 - rules.launch_discount),
        Growth => price * (1.0 + rules.growth_increase),
        Maturity => price * (1.0 + rules.maturity_adjustment),
        Decline => price * (1.0 - rules.decline_discount),
    }
}

fn apply_competition_adjustment(price: f64, record: &ProductRecord, rules: &PricingRules) -> f64 {
    if record.market_out_of_stock {
        let bump = (rules.oos_bump_min + rules.oos_bump_max) / 2.0;
        price * (1.0 + bump)
    } else {
        price
    }
}

/// Produce a recommendation for one record. Pure function of its inputs.
pub fn recommend(
    record: &ProductRecord,
    rules: &PricingRules,
    suggested_on: NaiveDate,
) -> Result<Recommendation, PricedeskError> {
    let margin_before = margin(record.price, record.cost).ok_or_else(|| {
        PricedeskError::UndefinedMargin {
            sku: record.sku.clone(),
        }
    })?;

    let policy = TierPolicy::for_tier(record.tier);

    let mut price = record.price;
    price = apply_demand_adjustment(price, record.demand_index, rules);
    price = apply_lifecycle_adjustment(price, record, rules);
    price = apply_competition_adjustment(price, record, rules);

    // Tier change cap bounds the total adjustment.
    price = clamp(
        price,
        record.price * (1.0 - policy.change_cap_pct),
        record.price * (1.0 + policy.change_cap_pct),
    );

    // Keep the proposal inside the market band when competitors are tracked.
    if let Some(avg) = record.competitor_avg() {
        price = clamp(
            price,
            avg * (1.0 + rules.market_band_low_pct),
            avg * (1.0 + rules.market_band_high_pct),
        );
    }

    // Tier margin floor wins over every cap.
    let floor = record.cost * (1.0 + policy.min_margin_pct);
    price = price.max(floor);

    let margin_after = margin(price, record.cost).ok_or_else(|| {
        PricedeskError::UndefinedMargin {
            sku: record.sku.clone(),
        }
    })?;

    let change_pct = (price - record.price) / record.price;

    Ok(Recommendation {
        id: 0,
        sku: record.sku.clone(),
        name: record.name.clone(),
        category: record.category.clone(),
        tier: record.tier,
        current_price: record.price,
        proposed_price: price,
        margin_before,
        margin_after,
        demand_index: record.demand_index,
        competitor_avg: record.competitor_avg(),
        approval_level: ApprovalLevel::from_change_pct(change_pct),
        status: RecommendationStatus::Pending,
        suggested_on,
    })
}
