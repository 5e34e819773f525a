#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use pricedesk::domain::error::PricedeskError;
use pricedesk::domain::pricing::{recommend, PricingRules, Recommendation};
pub use pricedesk::domain::product::{Catalog, Lifecycle, ProductRecord, Tier};
use pricedesk::domain::review::ReviewSession;
use pricedesk::ports::catalog_port::CatalogPort;

pub struct MockCatalogPort {
    pub records: Vec<ProductRecord>,
    pub error: Option<String>,
}

impl MockCatalogPort {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            error: None,
        }
    }

    pub fn with_record(mut self, record: ProductRecord) -> Self {
        self.records.push(record);
        self
    }

    pub fn with_error(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }
}

impl CatalogPort for MockCatalogPort {
    fn load_catalog(&self) -> Result<Catalog, PricedeskError> {
        if let Some(reason) = &self.error {
            return Err(PricedeskError::Catalog {
                reason: reason.clone(),
            });
        }
        Ok(Catalog::new(self.records.clone()))
    }
}

pub fn make_record(sku: &str, tier: Tier, price: f64, cost: f64, demand: f64) -> ProductRecord {
    ProductRecord::new(
        sku,
        format!("Product {sku}"),
        "Cleaning",
        tier,
        Lifecycle::Maturity,
        price,
        cost,
        vec![],
        demand,
        false,
    )
    .unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, 0, 0).unwrap()
}

pub fn make_recommendation(record: &ProductRecord) -> Recommendation {
    recommend(record, &PricingRules::default(), date(2024, 11, 22)).unwrap()
}

/// Run a pricing pass over every record and load the results into a session.
pub fn session_from_catalog(catalog: &Catalog) -> ReviewSession {
    let mut session = ReviewSession::new();
    for record in catalog.records() {
        session.submit(make_recommendation(record));
    }
    session
}
