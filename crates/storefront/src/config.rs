//! Storefront configuration from environment variables.

use std::path::PathBuf;

use anyhow::Context;

use goodshop_catalog::{CategoryMatch, LoadReport, ShopState, SortOrder, default_stock, load_catalog_json};

/// Path to a JSON catalog; the built-in stock is used when unset.
pub const ENV_CATALOG: &str = "GOODSHOP_CATALOG";
/// `token` (default) or `substring`.
pub const ENV_CATEGORY_MATCH: &str = "GOODSHOP_CATEGORY_MATCH";
/// Initial price order: `none` (default), `asc` or `desc`.
pub const ENV_SORT: &str = "GOODSHOP_SORT";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StorefrontConfig {
    pub catalog_path: Option<PathBuf>,
    pub category_match: CategoryMatch,
    pub initial_sort: SortOrder,
}

impl StorefrontConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`. Invalid values fall back to their
    /// defaults with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let catalog_path = lookup(ENV_CATALOG)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let category_match = parse_or_default(ENV_CATEGORY_MATCH, lookup(ENV_CATEGORY_MATCH));
        let initial_sort = parse_or_default(ENV_SORT, lookup(ENV_SORT));

        Self {
            catalog_path,
            category_match,
            initial_sort,
        }
    }

    /// Load the configured catalog, or the built-in stock.
    pub fn load_catalog(&self) -> anyhow::Result<LoadReport> {
        let report = match &self.catalog_path {
            Some(path) => {
                let source = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read catalog {}", path.display()))?;
                load_catalog_json(&source)
                    .with_context(|| format!("failed to load catalog {}", path.display()))?
            }
            None => {
                tracing::info!("{ENV_CATALOG} not set; using built-in stock");
                default_stock().context("built-in stock is invalid")?
            }
        };
        Ok(report)
    }

    /// Session start state for this configuration.
    pub fn initial_state(&self) -> ShopState {
        ShopState::with_defaults(self.category_match, self.initial_sort)
    }
}

fn parse_or_default<T>(key: &str, value: Option<String>) -> T
where
    T: core::str::FromStr + Default,
    T::Err: core::fmt::Display,
{
    let Some(value) = value else {
        return T::default();
    };
    match value.parse() {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(key, error = %e, "invalid configuration value; using default");
            T::default()
        }
    }
}
