//! Loaded product catalog and the loader that builds it.
//!
//! Loading follows a skip-and-collect policy: a malformed record is dropped and
//! reported in [`LoadReport::rejected`], while the rest of the document loads.

use serde_json::Value as JsonValue;

use goodshop_core::{DomainError, DomainResult};

use crate::product::{Product, RawProduct};
use crate::query::{self, CatalogQuery};

/// Catalog shipped with the storefront.
const DEFAULT_STOCK: &str = include_str!("../data/stock.json");

/// Immutable, ordered product collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

/// A record that was skipped during loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    /// Zero-based position of the record in the source.
    pub index: usize,
    pub error: DomainError,
}

/// Outcome of loading a catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub catalog: Catalog,
    pub rejected: Vec<RejectedRecord>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Validate unvalidated records, skipping the malformed ones.
    pub fn from_records(records: impl IntoIterator<Item = RawProduct>) -> LoadReport {
        let mut products = Vec::new();
        let mut rejected = Vec::new();

        for (index, raw) in records.into_iter().enumerate() {
            match Product::try_from(raw) {
                Ok(product) => products.push(product),
                Err(error) => reject(&mut rejected, index, error),
            }
        }

        LoadReport {
            catalog: Self::new(products),
            rejected,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Run the query engine over this catalog.
    pub fn query(&self, q: &CatalogQuery) -> Vec<&Product> {
        let query::StageOutput {
            matched_category,
            results,
        } = query::run_stages(&self.products, q);

        tracing::debug!(
            total = self.products.len(),
            matched_category,
            matched_search = results.len(),
            category = %q.category,
            search = q.search.as_str(),
            sort = %q.sort,
            "catalog query"
        );
        results
    }
}

fn reject(rejected: &mut Vec<RejectedRecord>, index: usize, error: DomainError) {
    tracing::warn!(index, error = %error, "skipping malformed product record");
    rejected.push(RejectedRecord { index, error });
}

/// Load a catalog from a JSON document.
///
/// Accepts either a top-level array of records or an object with a `products`
/// array. Only a document that is not JSON, or has neither shape, fails as a
/// whole; bad records inside it are skipped.
pub fn load_catalog_json(source: &str) -> DomainResult<LoadReport> {
    let document: JsonValue = serde_json::from_str(source)
        .map_err(|e| DomainError::validation(format!("catalog is not valid JSON: {e}")))?;

    let records = match document {
        JsonValue::Array(records) => records,
        JsonValue::Object(mut map) => match map.remove("products") {
            Some(JsonValue::Array(records)) => records,
            _ => {
                return Err(DomainError::validation(
                    "catalog object must contain a `products` array",
                ));
            }
        },
        _ => {
            return Err(DomainError::validation(
                "catalog must be an array of products or an object with `products`",
            ));
        }
    };

    let mut raws = Vec::with_capacity(records.len());
    let mut rejected = Vec::new();
    for (index, record) in records.into_iter().enumerate() {
        if !record.is_object() {
            reject(
                &mut rejected,
                index,
                DomainError::malformed("record", "is not an object"),
            );
            continue;
        }
        match serde_json::from_value::<RawProduct>(record) {
            Ok(raw) => raws.push((index, raw)),
            Err(e) => reject(&mut rejected, index, DomainError::malformed("record", e.to_string())),
        }
    }

    let mut products = Vec::with_capacity(raws.len());
    for (index, raw) in raws {
        match Product::try_from(raw) {
            Ok(product) => products.push(product),
            Err(error) => reject(&mut rejected, index, error),
        }
    }
    rejected.sort_by_key(|r| r.index);

    tracing::info!(
        loaded = products.len(),
        rejected = rejected.len(),
        "catalog loaded"
    );

    Ok(LoadReport {
        catalog: Catalog::new(products),
        rejected,
    })
}

/// The built-in fashion catalog.
pub fn default_stock() -> DomainResult<LoadReport> {
    load_catalog_json(DEFAULT_STOCK)
}
