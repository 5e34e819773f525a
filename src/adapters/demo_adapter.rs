//! Seeded demo catalog adapter.
//!
//! Fixed product set for running the dashboard without a data file. The
//! records deliberately include thin margins, out-of-band prices, and a
//! demand surge so every view has content.

use crate::domain::error::PricedeskError;
use crate::domain::product::{Catalog, Lifecycle, ProductRecord, Tier};
use crate::ports::catalog_port::CatalogPort;

#[derive(Debug, Default)]
pub struct DemoCatalogAdapter;

impl DemoCatalogAdapter {
    pub fn new() -> Self {
        Self
    }
}

struct Seed {
    sku: &'static str,
    name: &'static str,
    category: &'static str,
    tier: Tier,
    lifecycle: Lifecycle,
    price: f64,
    cost: f64,
    competitors: &'static [f64],
    demand_index: f64,
    market_oos: bool,
}

const SEEDS: &[Seed] = &[
    Seed {
        sku: "CLN-001",
        name: "Lysol Disinfecting Spray",
        category: "Cleaning",
        tier: Tier::Mid,
        lifecycle: Lifecycle::Maturity,
        price: 8.99,
        cost: 6.98,
        competitors: &[9.29, 8.75],
        demand_index: 1.2,
        market_oos: false,
    },
    Seed {
        sku: "HYG-001",
        name: "Purell Hand Sanitizer",
        category: "Hygiene",
        tier: Tier::High,
        lifecycle: Lifecycle::Growth,
        price: 12.99,
        cost: 9.31,
        competitors: &[12.49],
        demand_index: 1.45,
        market_oos: false,
    },
    Seed {
        sku: "CLN-002",
        name: "Clorox Disinfecting Wipes",
        category: "Cleaning",
        tier: Tier::Mid,
        lifecycle: Lifecycle::Maturity,
        price: 7.49,
        cost: 6.01,
        competitors: &[7.79],
        demand_index: 1.2,
        market_oos: false,
    },
    Seed {
        sku: "PPR-001",
        name: "Bounty Paper Towels",
        category: "Paper Products",
        tier: Tier::Mid,
        lifecycle: Lifecycle::Maturity,
        price: 24.99,
        cost: 21.19,
        competitors: &[25.49],
        demand_index: 1.0,
        market_oos: false,
    },
    Seed {
        sku: "PPR-002",
        name: "Charmin Ultra Soft",
        category: "Paper Products",
        tier: Tier::High,
        lifecycle: Lifecycle::Maturity,
        price: 28.99,
        cost: 23.60,
        competitors: &[29.99],
        demand_index: 1.2,
        market_oos: false,
    },
    Seed {
        sku: "LDY-001",
        name: "Tide Laundry Detergent",
        category: "Laundry",
        tier: Tier::High,
        lifecycle: Lifecycle::Maturity,
        price: 19.99,
        cost: 15.05,
        competitors: &[20.99],
        demand_index: 1.45,
        market_oos: true,
    },
    Seed {
        sku: "AIR-001",
        name: "Febreze Air Freshener",
        category: "Air Care",
        tier: Tier::Mid,
        lifecycle: Lifecycle::Maturity,
        price: 5.99,
        cost: 4.71,
        competitors: &[6.49],
        demand_index: 1.0,
        market_oos: false,
    },
    Seed {
        sku: "HSH-001",
        name: "Glad Trash Bags",
        category: "Household",
        tier: Tier::Low,
        lifecycle: Lifecycle::Maturity,
        price: 12.49,
        cost: 10.39,
        competitors: &[13.29],
        demand_index: 1.2,
        market_oos: false,
    },
    Seed {
        sku: "CLN-003",
        name: "Swiffer WetJet Pads",
        category: "Cleaning",
        tier: Tier::Mid,
        lifecycle: Lifecycle::Maturity,
        price: 14.99,
        cost: 11.53,
        competitors: &[15.99],
        demand_index: 1.0,
        market_oos: false,
    },
    Seed {
        sku: "PPR-003",
        name: "Kleenex Facial Tissue",
        category: "Paper Products",
        tier: Tier::Low,
        lifecycle: Lifecycle::Decline,
        price: 3.99,
        cost: 3.21,
        competitors: &[4.49],
        demand_index: 1.2,
        market_oos: false,
    },
];

impl CatalogPort for DemoCatalogAdapter {
    fn load_catalog(&self) -> Result<Catalog, PricedeskError> {
        let mut records = Vec::with_capacity(SEEDS.len());
        for seed in SEEDS {
            records.push(ProductRecord::new(
                seed.sku,
                seed.name,
                seed.category,
                seed.tier,
                seed.lifecycle,
                seed.price,
                seed.cost,
                seed.competitors.to_vec(),
                seed.demand_index,
                seed.market_oos,
            )?);
        }
        Ok(Catalog::new(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::alerts::{evaluate, AlertThresholds};
    use crate::domain::pricing::margin;
    use chrono::NaiveDate;

    #[test]
    fn demo_catalog_loads_all_seeds() {
        let catalog = DemoCatalogAdapter::new().load_catalog().unwrap();
        assert_eq!(catalog.len(), 10);
        assert!(catalog.get("CLN-001").is_some());
    }

    #[test]
    fn demo_records_are_economically_valid() {
        let catalog = DemoCatalogAdapter::new().load_catalog().unwrap();
        for record in catalog.records() {
            assert!(record.price > record.cost, "{} mispriced", record.sku);
            let m = margin(record.price, record.cost).unwrap();
            assert!(m > 0.0 && m < 1.0);
        }
    }

    #[test]
    fn demo_catalog_covers_all_categories() {
        let catalog = DemoCatalogAdapter::new().load_catalog().unwrap();
        let categories = catalog.categories();
        assert!(categories.len() >= 5);
        assert!(categories.contains(&"Cleaning".to_string()));
        assert!(categories.contains(&"Paper Products".to_string()));
    }

    #[test]
    fn demo_catalog_trips_alerts() {
        let catalog = DemoCatalogAdapter::new().load_catalog().unwrap();
        let as_of = NaiveDate::from_ymd_opt(2024, 11, 22)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let entries = evaluate(&catalog, &AlertThresholds::default(), as_of);
        // Thin paper margins and surging sanitizer demand are part of the seed.
        assert!(!entries.is_empty());
        assert!(entries.iter().any(|e| e.sku == "PPR-001"));
        assert!(entries.iter().any(|e| e.sku == "HYG-001"));
    }

    #[test]
    fn list_skus_returns_sorted_set() {
        let skus = DemoCatalogAdapter::new().list_skus().unwrap();
        assert_eq!(skus.len(), 10);
        let mut sorted = skus.clone();
        sorted.sort();
        assert_eq!(skus, sorted);
    }
}
