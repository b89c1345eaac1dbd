//! Error types produced while loading the address dataset.

use std::{error::Error as StdError, num::ParseFloatError};

use thiserror::Error;

use crate::ResourceError;

/// Errors raised by [`AddressLoader::records`](crate::AddressLoader::records).
///
/// Every variant is fatal for the load attempt; nothing from a failed attempt
/// is cached.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    /// The named resource could not be located.
    #[error("couldn't load resource {name}")]
    ResourceNotFound {
        /// Logical resource name.
        name: String,
    },
    /// A coordinate column was not a finite floating-point number.
    #[error("{resource} line {line}: {column} value {value:?} is not a number: {source}")]
    MalformedNumber {
        /// Logical resource name.
        resource: String,
        /// One-based line of the offending row.
        line: u64,
        /// Name of the coordinate column.
        column: &'static str,
        /// Raw column text.
        value: String,
        /// Why the value was rejected.
        #[source]
        source: NumberError,
    },
    /// A row had fewer than the four required columns.
    #[error("{resource} line {line}: missing {column} column")]
    MissingColumn {
        /// Logical resource name.
        resource: String,
        /// One-based line of the offending row.
        line: u64,
        /// Name of the absent column.
        column: &'static str,
    },
    /// Reading or decoding the resource failed.
    #[error("error reading {name} data: {source}")]
    DataLoadFailure {
        /// Logical resource name.
        name: String,
        /// Underlying I/O or CSV error.
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

/// Reason a coordinate value was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberError {
    /// The text is not a floating-point literal.
    #[error(transparent)]
    Parse(#[from] ParseFloatError),
    /// The text parsed to NaN or an infinity.
    #[error("value is not finite")]
    NonFinite,
}

impl From<ResourceError> for LoadError {
    fn from(err: ResourceError) -> Self {
        match err {
            ResourceError::NotFound { name } => Self::ResourceNotFound { name },
            ResourceError::Io { name, source } => Self::DataLoadFailure {
                name,
                source: Box::new(source),
            },
        }
    }
}
