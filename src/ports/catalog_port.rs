//! Catalog access port trait.

use crate::domain::error::PricedeskError;
use crate::domain::product::Catalog;

pub trait CatalogPort {
    /// Load the full product catalog from the underlying source.
    fn load_catalog(&self) -> Result<Catalog, PricedeskError>;

    /// SKUs available in the source, sorted.
    fn list_skus(&self) -> Result<Vec<String>, PricedeskError> {
        let catalog = self.load_catalog()?;
        let mut skus: Vec<String> = catalog.records().iter().map(|r| r.sku.clone()).collect();
        skus.sort();
        Ok(skus)
    }
}
