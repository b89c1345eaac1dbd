//! Write-then-query interface expected of a feature store.
//!
//! The `FeatureStore` trait describes the collaborator a [`Dataset`](crate::Dataset)
//! is handed to: it registers the schema, ingests features under their own
//! identifiers, and answers [`QuerySpec`]s.

use crate::{AddressFeature, QuerySpec, Schema};

/// Storage for address features.
///
/// Implementers must keep the identifier supplied by each feature rather than
/// generating their own, and must return features from [`FeatureStore::query`]
/// in insertion order.
pub trait FeatureStore {
    /// Failure raised by the store.
    type Error: std::error::Error;

    /// Register the feature type described by `schema`.
    fn create_schema(&mut self, schema: &Schema) -> Result<(), Self::Error>;

    /// Ingest `features` into the named feature type.
    ///
    /// Returns the number of features written.
    fn write_features<'a, I>(&mut self, type_name: &str, features: I) -> Result<usize, Self::Error>
    where
        I: IntoIterator<Item = &'a AddressFeature>;

    /// Return every stored feature matching `query`.
    fn query(
        &self,
        query: &QuerySpec,
    ) -> Result<Box<dyn Iterator<Item = AddressFeature> + '_>, Self::Error>;
}
