//! Value object trait: equality by value, not identity.
//!
//! Catalog records and query parameters carry **no identity**. Two products with
//! the same name, description, category and price are the same product as far
//! as listing is concerned.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "change" one,
/// build a new one. Products loaded at startup and the query parameters handed
/// to the engine are both value objects:
///
/// - **Send + Sync**: a loaded catalog can be read from several threads at once
/// - **Clone**: callers own their copy of query parameters
/// - **PartialEq + Debug**: results can be compared and logged in tests
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Price(u64);
///
/// impl ValueObject for Price {}
///
/// assert_eq!(Price(2000), Price(2000));
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug + Send + Sync {}
