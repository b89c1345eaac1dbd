//! Core domain types for the address demo dataset.
//!
//! These models describe a single point feature type: its schema, the
//! records parsed for it, and the fixed queries a consumer replays against
//! them. Constructors that can be handed invalid input return `Result` so
//! problems surface before a record reaches a store.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod dataset;
pub mod feature;
pub mod query;
pub mod schema;
pub mod store;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use dataset::Dataset;
pub use feature::{ADDRESS_TYPE_NAME, AddressFeature, AttributeValue};
pub use query::{Filter, QuerySpec};
pub use schema::{AttributeDescriptor, AttributeType, Schema, SchemaError, Srid};
pub use store::FeatureStore;
