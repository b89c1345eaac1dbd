//! Queries replayed against a loaded dataset.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::AddressFeature;

/// Predicate over address features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Filter {
    /// Matches every feature.
    #[default]
    Include,
    /// Matches no feature.
    Exclude,
}

impl Filter {
    /// Evaluate the predicate for `feature`.
    #[must_use]
    pub const fn matches(self, _feature: &AddressFeature) -> bool {
        match self {
            Self::Include => true,
            Self::Exclude => false,
        }
    }
}

/// A filter scoped to one feature type.
///
/// # Examples
/// ```
/// use geo::Point;
/// use address_core::{AddressFeature, Filter, QuerySpec};
///
/// let query = QuerySpec::new("address", Filter::Include);
/// let feature = AddressFeature::new("A1", "Alice", Point::new(120.5, 31.2));
/// assert!(query.matches(&feature));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QuerySpec {
    type_name: String,
    filter: Filter,
}

impl QuerySpec {
    /// Construct a query for `type_name`.
    pub fn new(type_name: impl Into<String>, filter: Filter) -> Self {
        Self {
            type_name: type_name.into(),
            filter,
        }
    }

    /// Full-scan query returning every feature of `type_name`.
    pub fn select_all(type_name: impl Into<String>) -> Self {
        Self::new(type_name, Filter::Include)
    }

    /// Feature type this query targets.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Predicate applied to each feature.
    #[must_use]
    pub const fn filter(&self) -> Filter {
        self.filter
    }

    /// Evaluate the query predicate for `feature`.
    #[must_use]
    pub const fn matches(&self, feature: &AddressFeature) -> bool {
        self.filter.matches(feature)
    }
}
