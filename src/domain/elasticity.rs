//! Price elasticity estimates.
//!
//! Per-tier values are fixed estimates, not model output.

use super::pricing::Recommendation;
use super::product::Tier;

/// Fixed elasticity estimate for a tier. Premium buyers are the least
/// price-sensitive.
pub fn tier_elasticity(tier: Tier) -> f64 {
    match tier {
        Tier::Low => -1.8,
        Tier::Mid => -1.2,
        Tier::High => -0.9,
        Tier::Premium => -0.6,
    }
}

/// Arc elasticity: (%ΔQ) / (%ΔP). Zero when either baseline is zero or the
/// price did not move.
pub fn arc_elasticity(price_old: f64, price_new: f64, qty_old: f64, qty_new: f64) -> f64 {
    if price_old == 0.0 || qty_old == 0.0 {
        return 0.0;
    }
    let pct_price = (price_new - price_old) / price_old;
    if pct_price == 0.0 {
        return 0.0;
    }
    let pct_qty = (qty_new - qty_old) / qty_old;
    pct_qty / pct_price
}

/// Projected fractional demand change if a recommendation is applied, using
/// the tier's fixed elasticity.
pub fn demand_response(rec: &Recommendation) -> f64 {
    tier_elasticity(rec.tier) * rec.change_pct()
}
