//! Facade crate for the address demo dataset.
//!
//! This crate re-exports the core domain types and exposes the CSV-backed
//! loader behind a feature flag.

#![forbid(unsafe_code)]

pub use address_core::{
    ADDRESS_TYPE_NAME, AddressFeature, AttributeDescriptor, AttributeType, AttributeValue, Dataset,
    FeatureStore, Filter, QuerySpec, Schema, SchemaError, Srid,
};

#[cfg(feature = "loader")]
pub use address_data::{
    AddressLoader, BundledResources, DirectoryLocator, LoadError, NumberError, ResourceError,
    ResourceLocator,
};

#[cfg(feature = "test-support")]
pub use address_core::test_support::MemoryFeatureStore;
