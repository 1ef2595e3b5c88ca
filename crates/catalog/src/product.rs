use serde::Deserialize;
use serde_json::Value as JsonValue;

use goodshop_core::{DomainError, DomainResult, ValueObject};

/// Product price as supplied, in major currency units.
///
/// Ordering and equality use [`f64::total_cmp`]; NaN, infinities and negative
/// values never get past [`Price::from_amount`], and `-0.0` is stored as `0.0`.
#[derive(Debug, Copy, Clone, Default)]
pub struct Price(f64);

impl Price {
    /// Price from a whole number of cents.
    pub fn from_cents(cents: u64) -> Self {
        Self(cents as f64 / 100.0)
    }

    /// Validate a decimal amount. The value is kept exactly, including any
    /// sub-cent fraction.
    pub fn from_amount(amount: f64) -> DomainResult<Self> {
        if !amount.is_finite() {
            return Err(DomainError::malformed("price", "is not a finite number"));
        }
        if amount < 0.0 {
            return Err(DomainError::malformed("price", format!("is negative ({amount})")));
        }
        Ok(Self(amount + 0.0))
    }

    pub fn amount(&self) -> f64 {
        self.0
    }

    /// Amount rounded to the nearest cent.
    pub fn cents(&self) -> u64 {
        (self.0 * 100.0).round() as u64
    }
}

impl PartialEq for Price {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == core::cmp::Ordering::Equal
    }
}

impl Eq for Price {}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Price {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl core::hash::Hash for Price {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl ValueObject for Price {}

/// A catalog entry. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    name: String,
    description: String,
    category: String,
    price: Price,
}

impl Product {
    /// Build a validated product.
    ///
    /// `name` and `category` must be non-blank; both are trimmed. `description`
    /// is kept verbatim and may be empty.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        price: Price,
    ) -> DomainResult<Self> {
        let name = required_text("name", name.into())?;
        let category = required_text("category", category.into())?;
        Ok(Self {
            name,
            description: description.into(),
            category,
            price,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn price(&self) -> Price {
        self.price
    }
}

impl ValueObject for Product {}

fn required_text(field: &'static str, value: String) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::malformed(field, "cannot be empty"));
    }
    Ok(trimmed.to_string())
}

/// Unvalidated product record as supplied by an external source.
///
/// Every field is optional so that a single bad record can be reported
/// precisely instead of failing the whole document. `null` counts as missing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawProduct {
    pub name: Option<JsonValue>,
    pub description: Option<JsonValue>,
    pub category: Option<JsonValue>,
    pub price: Option<JsonValue>,
}

impl TryFrom<RawProduct> for Product {
    type Error = DomainError;

    fn try_from(raw: RawProduct) -> Result<Self, Self::Error> {
        let name = text_field("name", raw.name)?
            .ok_or_else(|| DomainError::malformed("name", "is missing"))?;
        let description = text_field("description", raw.description)?.unwrap_or_default();
        let category = text_field("category", raw.category)?
            .ok_or_else(|| DomainError::malformed("category", "is missing"))?;
        let price = match raw.price {
            None | Some(JsonValue::Null) => {
                return Err(DomainError::malformed("price", "is missing"));
            }
            Some(JsonValue::Number(n)) => {
                let amount = n
                    .as_f64()
                    .ok_or_else(|| DomainError::malformed("price", "is not representable"))?;
                Price::from_amount(amount)?
            }
            Some(other) => {
                return Err(DomainError::malformed(
                    "price",
                    format!("is not a number ({other})"),
                ));
            }
        };

        Product::new(name, description, category, price)
    }
}

fn text_field(field: &'static str, value: Option<JsonValue>) -> DomainResult<Option<String>> {
    match value {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::String(s)) => Ok(Some(s)),
        Some(other) => Err(DomainError::malformed(
            field,
            format!("is not a string ({other})"),
        )),
    }
}
