//! CSV file catalog adapter.
//!
//! Expected columns: sku, name, category, tier, lifecycle, price, cost,
//! competitor1, competitor2, competitor3, demand_index, market_out_of_stock.
//! The three competitor columns and the trailing two are optional per row.

use crate::domain::error::PricedeskError;
use crate::domain::product::{Catalog, Lifecycle, ProductRecord, Tier};
use crate::ports::catalog_port::CatalogPort;
use std::fs;
use std::path::PathBuf;

pub struct CsvCatalogAdapter {
    path: PathBuf,
}

impl CsvCatalogAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

fn required<'a>(
    record: &'a csv::StringRecord,
    index: usize,
    column: &str,
) -> Result<&'a str, PricedeskError> {
    record
        .get(index)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| PricedeskError::Catalog {
            reason: format!("missing {column} column"),
        })
}

fn parse_f64(value: &str, column: &str) -> Result<f64, PricedeskError> {
    value.parse().map_err(|_| PricedeskError::Catalog {
        reason: format!("invalid {column} value '{value}'"),
    })
}

fn optional_f64(
    record: &csv::StringRecord,
    index: usize,
    column: &str,
) -> Result<Option<f64>, PricedeskError> {
    match record.get(index).map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => parse_f64(v, column).map(Some),
    }
}

impl CatalogPort for CsvCatalogAdapter {
    fn load_catalog(&self) -> Result<Catalog, PricedeskError> {
        let content = fs::read_to_string(&self.path).map_err(|e| PricedeskError::Catalog {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut records = Vec::new();

        for result in rdr.records() {
            let row = result.map_err(|e| PricedeskError::Catalog {
                reason: format!("CSV parse error: {e}"),
            })?;

            let sku = required(&row, 0, "sku")?;
            let name = required(&row, 1, "name")?;
            let category = required(&row, 2, "category")?;

            let tier_str = required(&row, 3, "tier")?;
            let tier = Tier::parse(tier_str).ok_or_else(|| PricedeskError::Catalog {
                reason: format!("unknown tier '{tier_str}' for {sku}"),
            })?;

            let lifecycle_str = required(&row, 4, "lifecycle")?;
            let lifecycle =
                Lifecycle::parse(lifecycle_str).ok_or_else(|| PricedeskError::Catalog {
                    reason: format!("unknown lifecycle '{lifecycle_str}' for {sku}"),
                })?;

            let price = parse_f64(required(&row, 5, "price")?, "price")?;
            let cost = parse_f64(required(&row, 6, "cost")?, "cost")?;

            let mut competitors = Vec::new();
            for (index, column) in [(7, "competitor1"), (8, "competitor2"), (9, "competitor3")] {
                if let Some(value) = optional_f64(&row, index, column)? {
                    competitors.push(value);
                }
            }

            let demand_index = optional_f64(&row, 10, "demand_index")?.unwrap_or(1.0);
            let market_oos = row
                .get(11)
                .map(str::trim)
                .map(|v| matches!(v.to_lowercase().as_str(), "true" | "yes" | "1"))
                .unwrap_or(false);

            records.push(ProductRecord::new(
                sku,
                name,
                category,
                tier,
                lifecycle,
                price,
                cost,
                competitors,
                demand_index,
                market_oos,
            )?);
        }

        Ok(Catalog::new(records))
    }
}
