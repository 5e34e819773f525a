//! Product records and the in-memory catalog.

use super::error::PricedeskError;

/// Demand index bounds after normalization.
pub const DEMAND_INDEX_MIN: f64 = 0.5;
pub const DEMAND_INDEX_MAX: f64 = 1.5;

/// Coarse pricing tier used to bucket pricing behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Low,
    Mid,
    High,
    Premium,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Low, Tier::Mid, Tier::High, Tier::Premium];

    pub fn parse(value: &str) -> Option<Tier> {
        match value.trim().to_lowercase().as_str() {
            "low" => Some(Tier::Low),
            "mid" => Some(Tier::Mid),
            "high" => Some(Tier::High),
            "premium" => Some(Tier::Premium),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Low => "Low",
            Tier::Mid => "Mid",
            Tier::High => "High",
            Tier::Premium => "Premium",
        }
    }

    /// Catalog price range a product of this tier is expected to sit in.
    pub fn price_range(&self) -> (f64, f64) {
        match self {
            Tier::Low => (5.0, 15.0),
            Tier::Mid => (12.0, 25.0),
            Tier::High => (22.0, 40.0),
            Tier::Premium => (35.0, 100.0),
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Product lifecycle stage; drives the lifecycle price adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    Launch,
    Growth,
    Maturity,
    Decline,
}

impl Lifecycle {
    pub fn parse(value: &str) -> Option<Lifecycle> {
        match value.trim().to_lowercase().as_str() {
            "launch" => Some(Lifecycle::Launch),
            "growth" => Some(Lifecycle::Growth),
            "maturity" => Some(Lifecycle::Maturity),
            "decline" => Some(Lifecycle::Decline),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Lifecycle::Launch => "Launch",
            Lifecycle::Growth => "Growth",
            Lifecycle::Maturity => "Maturity",
            Lifecycle::Decline => "Decline",
        }
    }
}

impl std::fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single catalog entry with its competitor and demand signals.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub sku: String,
    pub name: String,
    pub category: String,
    pub tier: Tier,
    pub lifecycle: Lifecycle,
    pub price: f64,
    pub cost: f64,
    pub competitor_prices: Vec<f64>,
    pub demand_index: f64,
    pub market_out_of_stock: bool,
}

impl ProductRecord {
    /// Build a validated record. Economic validity requires price > cost >= 0;
    /// the demand index is clamped to its normalized range.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        sku: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        tier: Tier,
        lifecycle: Lifecycle,
        price: f64,
        cost: f64,
        competitor_prices: Vec<f64>,
        demand_index: f64,
        market_out_of_stock: bool,
    ) -> Result<Self, PricedeskError> {
        let sku = sku.into();
        if !cost.is_finite() || cost < 0.0 {
            return Err(PricedeskError::InvalidRecord {
                sku,
                reason: "cost must be non-negative".into(),
            });
        }
        if !price.is_finite() || price <= cost {
            return Err(PricedeskError::InvalidRecord {
                sku,
                reason: format!("price {price} must exceed cost {cost}"),
            });
        }
        if competitor_prices.iter().any(|p| !p.is_finite() || *p <= 0.0) {
            return Err(PricedeskError::InvalidRecord {
                sku,
                reason: "competitor prices must be positive".into(),
            });
        }
        Ok(ProductRecord {
            sku,
            name: name.into(),
            category: category.into(),
            tier,
            lifecycle,
            price,
            cost,
            competitor_prices,
            demand_index: demand_index.clamp(DEMAND_INDEX_MIN, DEMAND_INDEX_MAX),
            market_out_of_stock,
        })
    }

    /// Mean of the tracked competitor prices; `None` when none are tracked.
    pub fn competitor_avg(&self) -> Option<f64> {
        if self.competitor_prices.is_empty() {
            return None;
        }
        let sum: f64 = self.competitor_prices.iter().sum();
        Some(sum / self.competitor_prices.len() as f64)
    }
}

/// Ordered product collection, de-duplicated by SKU (first occurrence wins).
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<ProductRecord>,
}

impl Catalog {
    pub fn new(records: Vec<ProductRecord>) -> Self {
        let mut seen = std::collections::HashSet::new();
        let records = records
            .into_iter()
            .filter(|r| seen.insert(r.sku.clone()))
            .collect();
        Catalog { records }
    }

    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }

    pub fn get(&self, sku: &str) -> Option<&ProductRecord> {
        self.records.iter().find(|r| r.sku == sku)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct categories in catalog order.
    pub fn categories(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.records
            .iter()
            .filter(|r| seen.insert(r.category.clone()))
            .map(|r| r.category.clone())
            .collect()
    }
}
