//! Read-only access to a bundled dataset.
//!
//! A [`Dataset`] hands a consumer everything it needs to replay a fixed set of
//! features: the feature type name, its schema, the records themselves, the
//! queries to run after ingesting them, and a filter selecting the subset of
//! interest.

use crate::{AddressFeature, Filter, QuerySpec, Schema};

/// A fixed collection of features with its schema and replay queries.
///
/// Implementations compute each value at most once and return the cached
/// value on every later call.
///
/// # Examples
///
/// ```rust
/// use std::sync::OnceLock;
/// use geo::Point;
/// use address_core::{
///     AddressFeature, AttributeDescriptor, Dataset, Filter, QuerySpec, Schema, Srid,
/// };
///
/// struct Fixed {
///     schema: Schema,
///     features: Vec<AddressFeature>,
///     queries: Vec<QuerySpec>,
/// }
///
/// impl Dataset for Fixed {
///     type Error = std::convert::Infallible;
///
///     fn type_name(&self) -> &str {
///         "address"
///     }
///     fn schema(&self) -> &Schema {
///         &self.schema
///     }
///     fn features(&self) -> Result<&[AddressFeature], Self::Error> {
///         Ok(&self.features)
///     }
///     fn queries(&self) -> &[QuerySpec] {
///         &self.queries
///     }
///     fn subset_filter(&self) -> Filter {
///         Filter::Include
///     }
/// }
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dataset = Fixed {
///     schema: Schema::new(
///         "address",
///         vec![AttributeDescriptor::point("geom", Srid::WGS84).as_default_geometry()],
///     )?,
///     features: vec![AddressFeature::new("A1", "Alice", Point::new(120.5, 31.2))],
///     queries: vec![QuerySpec::select_all("address")],
/// };
/// assert_eq!(dataset.features()?.len(), 1);
/// # Ok(())
/// # }
/// ```
pub trait Dataset {
    /// Failure raised while loading the features.
    type Error: std::error::Error;

    /// Name of the feature type.
    fn type_name(&self) -> &str;

    /// Schema of the feature type.
    fn schema(&self) -> &Schema;

    /// All features, in source order.
    fn features(&self) -> Result<&[AddressFeature], Self::Error>;

    /// Queries to replay against a store holding [`Self::features`].
    fn queries(&self) -> &[QuerySpec];

    /// Filter selecting the features of interest.
    fn subset_filter(&self) -> Filter;
}
