//! Loading of the bundled address dataset.
//!
//! Responsibilities:
//! - Resolve named data resources from memory or from disk.
//! - Map comma-separated rows onto [`AddressFeature`](address_core::AddressFeature)s.
//! - Cache the schema, records and replay queries behind [`AddressLoader`].
//!
//! Boundaries:
//! - Domain types and validation live in `address-core`.
//! - No logger is installed here; callers choose a `log` backend.
//!
//! Invariants:
//! - Cached values are written at most once and never reset.
//! - A failed load leaves the record cache empty.

#![forbid(unsafe_code)]

mod error;
mod loader;
mod resource;
mod rows;

pub use error::{LoadError, NumberError};
pub use loader::AddressLoader;
pub use resource::{
    BundledResources, CHINA_POI_RESOURCE, DirectoryLocator, ResourceError, ResourceLocator,
};
pub use rows::read_addresses;
