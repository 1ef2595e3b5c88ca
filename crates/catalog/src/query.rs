//! Catalog query engine: category filter, then text search, then price sort.
//!
//! Every stage borrows the input and returns views into it; nothing here
//! clones or mutates a [`Product`].

use core::str::FromStr;

use goodshop_core::{DomainError, ValueObject};

use crate::product::Product;

/// Which products the category stage keeps.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// No category filtering.
    #[default]
    All,
    /// Keep products in any of these categories.
    Only {
        /// Input order, deduplicated.
        tokens: Vec<String>,
        /// Filter text as given, used by [`CategoryMatch::Substring`].
        text: String,
    },
}

impl CategoryFilter {
    pub fn only<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let given: Vec<String> = categories.into_iter().map(Into::into).collect();
        let text = given.join(" ");
        Self::with_text(given, text)
    }

    fn with_text(given: Vec<String>, text: String) -> Self {
        let mut tokens: Vec<String> = Vec::new();
        for category in given {
            if !tokens.contains(&category) {
                tokens.push(category);
            }
        }
        Self::Only { tokens, text }
    }

    /// Category tokens, or `None` for [`CategoryFilter::All`].
    pub fn tokens(&self) -> Option<&[String]> {
        match self {
            Self::All => None,
            Self::Only { tokens, .. } => Some(tokens.as_slice()),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Whether `category` passes the filter under `mode`.
    pub fn matches(&self, category: &str, mode: CategoryMatch) -> bool {
        match self {
            Self::All => true,
            Self::Only { tokens, text } => match mode {
                CategoryMatch::Token => tokens.iter().any(|t| t == category),
                CategoryMatch::Substring => text.contains(category),
            },
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = DomainError;

    /// `"all"` (any case) and blank input select everything; anything else is
    /// split on whitespace into category tokens. The trimmed text is kept for
    /// substring matching.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        let given = trimmed.split_whitespace().map(str::to_string).collect();
        Ok(Self::with_text(given, trimmed.to_string()))
    }
}

impl core::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only { text, .. } => f.write_str(text),
        }
    }
}

/// How a category is compared against a [`CategoryFilter::Only`] filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryMatch {
    /// The category must equal one of the tokens.
    #[default]
    Token,
    /// The category must be a substring of the filter text, so `"pant"`
    /// passes the filter `"pants skirts"`.
    Substring,
}

impl FromStr for CategoryMatch {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "token" | "exact" => Ok(Self::Token),
            "substring" | "legacy" => Ok(Self::Substring),
            _ => Err(DomainError::invalid_parameter("category_match", s)),
        }
    }
}

/// Case-insensitive search text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchTerm {
    text: String,
    folded: String,
}

impl SearchTerm {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let folded = text.to_lowercase();
        Self { text, folded }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.folded.is_empty()
    }

    pub fn matches(&self, product: &Product) -> bool {
        if self.is_empty() {
            return true;
        }
        product.name().to_lowercase().contains(&self.folded)
            || product.description().to_lowercase().contains(&self.folded)
    }
}

impl From<&str> for SearchTerm {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SearchTerm {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Price ordering applied by the last stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Keep the order produced by the search stage.
    #[default]
    None,
    Ascending,
    Descending,
}

impl FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(Self::None),
            "asc" | "ascending" | "up" => Ok(Self::Ascending),
            "desc" | "descending" | "down" => Ok(Self::Descending),
            _ => Err(DomainError::invalid_parameter("sort_order", s)),
        }
    }
}

impl core::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Ascending => "asc",
            Self::Descending => "desc",
        })
    }
}

/// The three query parameters, passed by value into the engine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogQuery {
    pub category: CategoryFilter,
    pub category_match: CategoryMatch,
    pub search: SearchTerm,
    pub sort: SortOrder,
}

impl CatalogQuery {
    pub fn new(category: CategoryFilter, search: impl Into<SearchTerm>, sort: SortOrder) -> Self {
        Self {
            category,
            category_match: CategoryMatch::default(),
            search: search.into(),
            sort,
        }
    }

    pub fn with_category_match(mut self, mode: CategoryMatch) -> Self {
        self.category_match = mode;
        self
    }
}

impl ValueObject for CatalogQuery {}

/// Stage 1: keep products whose category passes `filter`.
pub fn filter_by_category<'a, I>(
    products: I,
    filter: &CategoryFilter,
    mode: CategoryMatch,
) -> Vec<&'a Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    products
        .into_iter()
        .filter(|p| filter.matches(p.category(), mode))
        .collect()
}

/// Stage 2: keep products whose name or description contains `term`.
pub fn filter_by_search<'a, I>(products: I, term: &SearchTerm) -> Vec<&'a Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    products.into_iter().filter(|p| term.matches(p)).collect()
}

/// Stage 3: stable sort by price.
pub fn sort_by_price(products: &mut [&Product], order: SortOrder) {
    match order {
        SortOrder::None => {}
        SortOrder::Ascending => products.sort_by_key(|p| p.price()),
        SortOrder::Descending => products.sort_by(|a, b| b.price().cmp(&a.price())),
    }
}

/// Run the full pipeline over `products`.
pub fn query<'a>(products: &'a [Product], query: &CatalogQuery) -> Vec<&'a Product> {
    run_stages(products, query).results
}

/// Pipeline output plus the count left after the category stage.
pub(crate) struct StageOutput<'a> {
    pub matched_category: usize,
    pub results: Vec<&'a Product>,
}

pub(crate) fn run_stages<'a>(products: &'a [Product], query: &CatalogQuery) -> StageOutput<'a> {
    let by_category = filter_by_category(products, &query.category, query.category_match);
    let matched_category = by_category.len();
    let mut results = filter_by_search(by_category, &query.search);
    sort_by_price(&mut results, query.sort);
    StageOutput {
        matched_category,
        results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::Price;

    fn product(name: &str, description: &str, category: &str, price: u64) -> Product {
        Product::new(name, description, category, Price::from_cents(price * 100)).unwrap()
    }

    fn sample() -> Vec<Product> {
        vec![
            product("Red Shirt", "", "shirts", 20),
            product("Blue Jacket", "", "jackets", 50),
            product("Black Pants", "", "pants", 30),
        ]
    }

    fn names(results: &[&Product]) -> Vec<String> {
        results.iter().map(|p| p.name().to_string()).collect()
    }

    #[test]
    fn category_filter_keeps_listed_categories() {
        let products = sample();
        let q = CatalogQuery::new("pants skirts".parse().unwrap(), "", SortOrder::None);
        let results = query(&products, &q);
        assert_eq!(names(&results), vec!["Black Pants"]);
        assert_eq!(results[0].price(), Price::from_cents(3000));
    }

    #[test]
    fn search_is_case_insensitive() {
        let products = sample();
        let q = CatalogQuery::new(CategoryFilter::All, "shirt", SortOrder::None);
        assert_eq!(names(&query(&products, &q)), vec!["Red Shirt"]);

        let q = CatalogQuery::new(CategoryFilter::All, "BLUE", SortOrder::None);
        assert_eq!(names(&query(&products, &q)), vec!["Blue Jacket"]);
    }

    #[test]
    fn search_matches_description() {
        let products = vec![
            product("Wrap", "Soft linen", "skirts", 45),
            product("Chinos", "Stretch twill", "pants", 55),
        ];
        let q = CatalogQuery::new(CategoryFilter::All, "LINEN", SortOrder::None);
        assert_eq!(names(&query(&products, &q)), vec!["Wrap"]);
    }

    #[test]
    fn descending_sort_orders_by_price() {
        let products = sample();
        let q = CatalogQuery::new(CategoryFilter::All, "", SortOrder::Descending);
        assert_eq!(
            names(&query(&products, &q)),
            vec!["Blue Jacket", "Black Pants", "Red Shirt"]
        );
    }

    #[test]
    fn ascending_sort_orders_by_price() {
        let products = sample();
        let q = CatalogQuery::new(CategoryFilter::All, "", SortOrder::Ascending);
        assert_eq!(
            names(&query(&products, &q)),
            vec!["Red Shirt", "Black Pants", "Blue Jacket"]
        );
    }

    #[test]
    fn sort_is_stable_for_equal_prices() {
        let products = vec![
            product("A", "", "shirts", 10),
            product("B", "", "shirts", 5),
            product("C", "", "shirts", 10),
            product("D", "", "shirts", 5),
        ];
        let asc = query(&products, &CatalogQuery::new(CategoryFilter::All, "", SortOrder::Ascending));
        assert_eq!(names(&asc), vec!["B", "D", "A", "C"]);

        let desc = query(&products, &CatalogQuery::new(CategoryFilter::All, "", SortOrder::Descending));
        assert_eq!(names(&desc), vec!["A", "C", "B", "D"]);
    }

    #[test]
    fn none_sort_keeps_input_order() {
        let products = sample();
        let results = query(&products, &CatalogQuery::default());
        assert_eq!(names(&results), vec!["Red Shirt", "Blue Jacket", "Black Pants"]);
    }

    #[test]
    fn empty_catalog_yields_empty_result() {
        let products: Vec<Product> = Vec::new();
        let q = CatalogQuery::new("shirts".parse().unwrap(), "red", SortOrder::Ascending);
        assert!(query(&products, &q).is_empty());
    }

    #[test]
    fn token_match_rejects_partial_category() {
        let products = vec![product("Short Pant", "", "pant", 15)];
        let filter: CategoryFilter = "pants skirts".parse().unwrap();

        let token = CatalogQuery::new(filter.clone(), "", SortOrder::None);
        assert!(query(&products, &token).is_empty());

        let legacy = CatalogQuery::new(filter, "", SortOrder::None)
            .with_category_match(CategoryMatch::Substring);
        assert_eq!(names(&query(&products, &legacy)), vec!["Short Pant"]);
    }

    #[test]
    fn substring_match_uses_filter_text_as_given() {
        let products = vec![product("Double", "", "pants pants", 10)];
        let filter: CategoryFilter = "pants pants".parse().unwrap();
        assert_eq!(filter.tokens(), Some(&["pants".to_string()][..]));

        let legacy = CatalogQuery::new(filter.clone(), "", SortOrder::None)
            .with_category_match(CategoryMatch::Substring);
        assert_eq!(names(&query(&products, &legacy)), vec!["Double"]);

        let token = CatalogQuery::new(filter, "", SortOrder::None);
        assert!(query(&products, &token).is_empty());
    }

    #[test]
    fn sub_cent_prices_sort_by_supplied_value() {
        let products = vec![
            Product::new("A", "", "shirts", Price::from_amount(0.014).unwrap()).unwrap(),
            Product::new("B", "", "shirts", Price::from_amount(0.011).unwrap()).unwrap(),
        ];
        let asc = query(&products, &CatalogQuery::new(CategoryFilter::All, "", SortOrder::Ascending));
        assert_eq!(names(&asc), vec!["B", "A"]);
        let desc = query(&products, &CatalogQuery::new(CategoryFilter::All, "", SortOrder::Descending));
        assert_eq!(names(&desc), vec!["A", "B"]);
    }

    #[test]
    fn category_filter_parsing() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(" ALL ".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!("".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        let parsed = "pants  skirts pants".parse::<CategoryFilter>().unwrap();
        assert_eq!(
            parsed.tokens(),
            Some(&["pants".to_string(), "skirts".to_string()][..])
        );
        assert_eq!(parsed.to_string(), "pants  skirts pants");
        assert_eq!(
            "pants skirts".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::only(["pants", "skirts"])
        );
        assert_eq!(CategoryFilter::only(["pants", "skirts"]).to_string(), "pants skirts");
    }

    #[test]
    fn empty_token_list_matches_nothing() {
        let products = sample();
        let q = CatalogQuery::new(CategoryFilter::only(Vec::<String>::new()), "", SortOrder::None);
        assert!(query(&products, &q).is_empty());
    }

    #[test]
    fn sort_order_parsing() {
        assert_eq!("asc".parse::<SortOrder>().unwrap(), SortOrder::Ascending);
        assert_eq!("Descending".parse::<SortOrder>().unwrap(), SortOrder::Descending);
        assert_eq!("".parse::<SortOrder>().unwrap(), SortOrder::None);
        assert_eq!("none".parse::<SortOrder>().unwrap(), SortOrder::None);
    }

    #[test]
    fn unknown_sort_order_is_rejected() {
        let err = "sideways".parse::<SortOrder>().unwrap_err();
        match err {
            DomainError::InvalidParameter { name, value } => {
                assert_eq!(name, "sort_order");
                assert_eq!(value, "sideways");
            }
            _ => panic!("Expected InvalidParameter for unknown sort order"),
        }
    }

    #[test]
    fn unknown_category_match_is_rejected() {
        assert!("fuzzy".parse::<CategoryMatch>().is_err());
        assert_eq!("substring".parse::<CategoryMatch>().unwrap(), CategoryMatch::Substring);
    }

    #[test]
    fn query_does_not_mutate_input() {
        let products = sample();
        let before = products.clone();
        let _ = query(&products, &CatalogQuery::new(CategoryFilter::All, "", SortOrder::Descending));
        assert_eq!(products, before);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        const CATEGORIES: [&str; 5] = ["shirts", "jackets", "pants", "skirts", "pant"];

        fn arb_product() -> impl Strategy<Value = Product> {
            (
                "[A-Za-z][A-Za-z ]{0,15}",
                "[A-Za-z ]{0,20}",
                0usize..CATEGORIES.len(),
                0u64..10_000,
            )
                .prop_map(|(name, description, category, cents)| {
                    Product::new(name, description, CATEGORIES[category], Price::from_cents(cents))
                        .unwrap()
                })
        }

        fn arb_filter() -> impl Strategy<Value = CategoryFilter> {
            prop_oneof![
                Just(CategoryFilter::All),
                proptest::sample::subsequence(CATEGORIES.to_vec(), 0..=CATEGORIES.len())
                    .prop_map(CategoryFilter::only),
            ]
        }

        fn arb_sort() -> impl Strategy<Value = SortOrder> {
            prop_oneof![
                Just(SortOrder::None),
                Just(SortOrder::Ascending),
                Just(SortOrder::Descending),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: the "all" filter is a no-op for the category stage.
            #[test]
            fn all_filter_keeps_everything(products in prop::collection::vec(arb_product(), 0..30)) {
                let kept = filter_by_category(&products, &CategoryFilter::All, CategoryMatch::Token);
                let expected: Vec<&Product> = products.iter().collect();
                prop_assert_eq!(kept, expected);
            }

            /// Property: token filters never let an unlisted category through.
            #[test]
            fn token_filter_never_leaks(
                products in prop::collection::vec(arb_product(), 0..30),
                filter in arb_filter(),
            ) {
                let kept = filter_by_category(&products, &filter, CategoryMatch::Token);
                if let Some(tokens) = filter.tokens() {
                    for p in &kept {
                        prop_assert!(tokens.iter().any(|t| t == p.category()));
                    }
                    let expected = products
                        .iter()
                        .filter(|p| tokens.iter().any(|t| t == p.category()))
                        .count();
                    prop_assert_eq!(kept.len(), expected);
                }
            }

            /// Property: an empty search term is a no-op.
            #[test]
            fn empty_search_keeps_everything(products in prop::collection::vec(arb_product(), 0..30)) {
                let kept = filter_by_search(&products, &SearchTerm::default());
                prop_assert_eq!(kept.len(), products.len());
            }

            /// Property: every hit contains the term, and a longer term never finds more.
            #[test]
            fn search_is_sound_and_monotone(
                products in prop::collection::vec(arb_product(), 0..30),
                term in "[A-Za-z]{0,3}",
                suffix in "[A-Za-z]{1,2}",
            ) {
                let short = filter_by_search(&products, &SearchTerm::new(term.clone()));
                let folded = term.to_lowercase();
                for p in &short {
                    prop_assert!(
                        p.name().to_lowercase().contains(&folded)
                            || p.description().to_lowercase().contains(&folded)
                    );
                }
                let longer = filter_by_search(&products, &SearchTerm::new(format!("{term}{suffix}")));
                prop_assert!(longer.len() <= short.len());
            }

            /// Property: adjacent pairs respect the requested order.
            #[test]
            fn sorted_output_is_ordered(
                products in prop::collection::vec(arb_product(), 0..30),
                sort in arb_sort(),
            ) {
                let results = query(&products, &CatalogQuery::new(CategoryFilter::All, "", sort));
                prop_assert_eq!(results.len(), products.len());
                for pair in results.windows(2) {
                    match sort {
                        SortOrder::Ascending => prop_assert!(pair[0].price() <= pair[1].price()),
                        SortOrder::Descending => prop_assert!(pair[0].price() >= pair[1].price()),
                        SortOrder::None => {}
                    }
                }
            }

            /// Property: querying a result again with the same parameters changes nothing.
            #[test]
            fn query_is_idempotent(
                products in prop::collection::vec(arb_product(), 0..30),
                filter in arb_filter(),
                term in "[a-z]{0,2}",
                sort in arb_sort(),
            ) {
                let q = CatalogQuery::new(filter, term, sort);
                let first: Vec<Product> = query(&products, &q).into_iter().cloned().collect();
                let second: Vec<Product> = query(&first, &q).into_iter().cloned().collect();
                prop_assert_eq!(&first, &second);
                let again: Vec<Product> = query(&products, &q).into_iter().cloned().collect();
                prop_assert_eq!(first, again);
            }
        }
    }
}
