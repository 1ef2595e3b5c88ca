//! Shop session state driven by user actions.
//!
//! Data flows one way: an input event becomes a [`ShopAction`], the action is
//! applied to [`ShopState`], and the listing is re-derived from the state.

use crate::catalog::Catalog;
use crate::product::Product;
use crate::query::{CatalogQuery, CategoryFilter, CategoryMatch, SearchTerm, SortOrder};

/// A user interaction that changes the query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShopAction {
    SelectCategory(CategoryFilter),
    ShowAll,
    /// Replace the search term with the current contents of the search box.
    Search(String),
    ResetSearch,
    SortBy(SortOrder),
}

/// Transient query parameters for one shopper. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShopState {
    query: CatalogQuery,
}

impl ShopState {
    pub fn new(query: CatalogQuery) -> Self {
        Self { query }
    }

    /// Start state with a given category matching mode and initial sort.
    pub fn with_defaults(category_match: CategoryMatch, sort: SortOrder) -> Self {
        Self::new(CatalogQuery::new(CategoryFilter::All, "", sort).with_category_match(category_match))
    }

    pub fn query(&self) -> &CatalogQuery {
        &self.query
    }

    /// Apply one action. Only the parameter the action targets changes.
    pub fn apply(&mut self, action: ShopAction) {
        tracing::trace!(?action, "applying shop action");
        match action {
            ShopAction::SelectCategory(filter) => self.query.category = filter,
            ShopAction::ShowAll => self.query.category = CategoryFilter::All,
            ShopAction::Search(text) => self.query.search = SearchTerm::new(text),
            ShopAction::ResetSearch => self.query.search = SearchTerm::default(),
            ShopAction::SortBy(order) => self.query.sort = order,
        }
    }

    /// Products to display for the current state.
    pub fn view<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Product> {
        catalog.query(&self.query)
    }
}

/// A labelled category shortcut (one filter button).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterPreset {
    pub label: &'static str,
    pub filter: &'static str,
}

static PRESETS: [FilterPreset; 4] = [
    FilterPreset { label: "Shirts", filter: "shirts" },
    FilterPreset { label: "Jackets", filter: "jackets" },
    FilterPreset { label: "Pants & Skirts", filter: "pants skirts" },
    FilterPreset { label: "All", filter: "all" },
];

impl FilterPreset {
    pub fn all_presets() -> &'static [FilterPreset] {
        &PRESETS
    }

    /// Look a preset up by label, ignoring case.
    pub fn by_label(label: &str) -> Option<&'static FilterPreset> {
        PRESETS.iter().find(|p| p.label.eq_ignore_ascii_case(label.trim()))
    }

    /// The preset's filter, parsed the same way as typed filter text.
    pub fn category_filter(&self) -> CategoryFilter {
        self.filter.parse().unwrap_or_default()
    }

    pub fn action(&self) -> ShopAction {
        match self.category_filter() {
            CategoryFilter::All => ShopAction::ShowAll,
            filter => ShopAction::SelectCategory(filter),
        }
    }
}
