//! Product catalog domain module.
//!
//! This crate contains the product record, the catalog loader, and the query
//! engine (category filter, text search, price sort), implemented purely as
//! deterministic domain logic (no IO, no UI, no storage).

pub mod catalog;
pub mod product;
pub mod query;
pub mod session;

pub use catalog::{Catalog, LoadReport, RejectedRecord, default_stock, load_catalog_json};
pub use product::{Price, Product, RawProduct};
pub use query::{
    CatalogQuery, CategoryFilter, CategoryMatch, SearchTerm, SortOrder, filter_by_category,
    filter_by_search, query, sort_by_price,
};
pub use session::{FilterPreset, ShopAction, ShopState};
