//! Test-only, in-memory `FeatureStore` implementation used by unit and
//! behaviour tests.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::{AddressFeature, FeatureStore, QuerySpec, Schema};

/// Schema of the `address` feature type, for tests that need one.
#[must_use]
pub fn address_schema() -> Schema {
    AddressFeature::schema()
}

/// Errors raised by [`MemoryFeatureStore`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MemoryStoreError {
    /// The feature type was never registered.
    #[error("feature type `{type_name}` has not been registered")]
    UnknownType {
        /// Requested feature type.
        type_name: String,
    },
    /// A feature with the same identifier already exists or appears twice in
    /// one write. The write stores nothing.
    #[error("feature `{id}` already exists")]
    DuplicateId {
        /// Conflicting identifier.
        id: String,
    },
}

#[derive(Debug, Default)]
struct TypeEntry {
    ids: HashSet<String>,
    features: Vec<AddressFeature>,
}

/// In-memory `FeatureStore` implementation used in tests.
///
/// Queries perform a linear scan and are intended only for small datasets.
#[derive(Debug, Default)]
pub struct MemoryFeatureStore {
    types: HashMap<String, TypeEntry>,
}

impl MemoryFeatureStore {
    /// Names of the registered feature types.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    fn entry(&self, type_name: &str) -> Result<&TypeEntry, MemoryStoreError> {
        self.types
            .get(type_name)
            .ok_or_else(|| MemoryStoreError::UnknownType {
                type_name: type_name.to_owned(),
            })
    }
}

impl FeatureStore for MemoryFeatureStore {
    type Error = MemoryStoreError;

    fn create_schema(&mut self, schema: &Schema) -> Result<(), Self::Error> {
        self.types.entry(schema.type_name().to_owned()).or_default();
        Ok(())
    }

    fn write_features<'a, I>(&mut self, type_name: &str, features: I) -> Result<usize, Self::Error>
    where
        I: IntoIterator<Item = &'a AddressFeature>,
    {
        let entry = self
            .types
            .get_mut(type_name)
            .ok_or_else(|| MemoryStoreError::UnknownType {
                type_name: type_name.to_owned(),
            })?;
        let batch: Vec<&AddressFeature> = features.into_iter().collect();
        let mut incoming = HashSet::with_capacity(batch.len());
        for &feature in &batch {
            let id = feature.id();
            if entry.ids.contains(id) || !incoming.insert(id) {
                return Err(MemoryStoreError::DuplicateId { id: id.to_owned() });
            }
        }

        let written = batch.len();
        entry.ids.extend(incoming.into_iter().map(str::to_owned));
        entry.features.extend(batch.into_iter().cloned());
        Ok(written)
    }

    fn query(
        &self,
        query: &QuerySpec,
    ) -> Result<Box<dyn Iterator<Item = AddressFeature> + '_>, Self::Error> {
        let entry = self.entry(query.type_name())?;
        let filter = query.filter();
        Ok(Box::new(
            entry
                .features
                .iter()
                .filter(move |f| filter.matches(f))
                .cloned(),
        ))
    }
}
