//! Feature type schemas.
//!
//! A [`Schema`] names a feature type and lists its attributes in order.
//! Exactly one geometric attribute may be flagged as the default geometry,
//! which downstream stores use as the primary spatial attribute.

use std::collections::HashSet;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Spatial reference identifier of a geometry attribute.
///
/// # Examples
/// ```
/// use address_core::Srid;
///
/// assert_eq!(Srid::WGS84.code(), 4326);
/// assert_eq!(Srid::default(), Srid::WGS84);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Srid(u32);

impl Srid {
    /// Geographic WGS84 coordinates (`x = longitude`, `y = latitude`).
    pub const WGS84: Self = Self(4326);

    /// Wrap a raw EPSG code.
    #[must_use]
    pub const fn new(code: u32) -> Self {
        Self(code)
    }

    /// Return the raw EPSG code.
    #[must_use]
    pub const fn code(self) -> u32 {
        self.0
    }
}

impl Default for Srid {
    fn default() -> Self {
        Self::WGS84
    }
}

impl fmt::Display for Srid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.0)
    }
}

/// Value type of a schema attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AttributeType {
    /// Free-form UTF-8 text.
    Text,
    /// A single position in the given spatial reference.
    Point {
        /// Spatial reference of stored coordinates.
        srid: Srid,
    },
}

impl AttributeType {
    /// Return `true` for geometry-bearing types.
    #[must_use]
    pub const fn is_geometry(self) -> bool {
        matches!(self, Self::Point { .. })
    }
}

/// A named, typed attribute of a feature type.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AttributeDescriptor {
    name: String,
    kind: AttributeType,
    #[cfg_attr(feature = "serde", serde(default))]
    default_geometry: bool,
}

impl AttributeDescriptor {
    /// Describe a text attribute.
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: AttributeType::Text,
            default_geometry: false,
        }
    }

    /// Describe a point attribute in the given spatial reference.
    pub fn point(name: impl Into<String>, srid: Srid) -> Self {
        Self {
            name: name.into(),
            kind: AttributeType::Point { srid },
            default_geometry: false,
        }
    }

    /// Mark this attribute as the default geometry of its schema.
    #[must_use]
    pub fn as_default_geometry(mut self) -> Self {
        self.default_geometry = true;
        self
    }

    /// Attribute name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute type.
    #[must_use]
    pub const fn kind(&self) -> AttributeType {
        self.kind
    }

    /// Whether this attribute is the schema's default geometry.
    #[must_use]
    pub const fn is_default_geometry(&self) -> bool {
        self.default_geometry
    }
}

/// Errors returned by [`Schema::new`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// The feature type name was empty.
    #[error("schema type name must not be empty")]
    EmptyTypeName,
    /// No attributes were supplied.
    #[error("schema `{type_name}` must declare at least one attribute")]
    NoAttributes {
        /// Name of the offending feature type.
        type_name: String,
    },
    /// An attribute had an empty name.
    #[error("attribute at position {position} has an empty name")]
    EmptyAttributeName {
        /// Zero-based position in the attribute list.
        position: usize,
    },
    /// Two attributes shared a name.
    #[error("attribute `{name}` is declared more than once")]
    DuplicateAttribute {
        /// The repeated name.
        name: String,
    },
    /// More than one attribute claimed to be the default geometry.
    #[error("attributes `{first}` and `{second}` are both marked as the default geometry")]
    MultipleDefaultGeometries {
        /// First attribute flagged as default.
        first: String,
        /// Second attribute flagged as default.
        second: String,
    },
    /// A non-geometric attribute was flagged as the default geometry.
    #[error("attribute `{name}` is not a geometry and cannot be the default geometry")]
    NonGeometricDefault {
        /// Name of the offending attribute.
        name: String,
    },
}

/// Ordered attribute layout of a feature type.
///
/// # Examples
/// ```
/// use address_core::{AttributeDescriptor, Schema, Srid};
///
/// # fn main() -> Result<(), address_core::SchemaError> {
/// let schema = Schema::new(
///     "address",
///     vec![
///         AttributeDescriptor::text("name"),
///         AttributeDescriptor::point("geom", Srid::WGS84).as_default_geometry(),
///     ],
/// )?;
/// assert_eq!(schema.index_of("geom"), Some(1));
/// assert_eq!(schema.default_geometry().map(|a| a.name()), Some("geom"));
/// # Ok(())
/// # }
/// ```
///
/// Deserialisation runs the same checks as [`Schema::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "SchemaLayout"))]
pub struct Schema {
    type_name: String,
    attributes: Vec<AttributeDescriptor>,
}

/// Unchecked wire form of a [`Schema`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct SchemaLayout {
    type_name: String,
    attributes: Vec<AttributeDescriptor>,
}

#[cfg(feature = "serde")]
impl TryFrom<SchemaLayout> for Schema {
    type Error = SchemaError;

    fn try_from(layout: SchemaLayout) -> Result<Self, Self::Error> {
        Self::new(layout.type_name, layout.attributes)
    }
}

impl Schema {
    /// Validate and construct a [`Schema`].
    pub fn new(
        type_name: impl Into<String>,
        attributes: Vec<AttributeDescriptor>,
    ) -> Result<Self, SchemaError> {
        let type_name = type_name.into();
        if type_name.is_empty() {
            return Err(SchemaError::EmptyTypeName);
        }
        if attributes.is_empty() {
            return Err(SchemaError::NoAttributes { type_name });
        }

        let mut seen = HashSet::with_capacity(attributes.len());
        let mut default_geometry: Option<&str> = None;
        for (position, attribute) in attributes.iter().enumerate() {
            if attribute.name.is_empty() {
                return Err(SchemaError::EmptyAttributeName { position });
            }
            if !seen.insert(attribute.name.as_str()) {
                return Err(SchemaError::DuplicateAttribute {
                    name: attribute.name.clone(),
                });
            }
            if !attribute.default_geometry {
                continue;
            }
            if !attribute.kind.is_geometry() {
                return Err(SchemaError::NonGeometricDefault {
                    name: attribute.name.clone(),
                });
            }
            if let Some(first) = default_geometry {
                return Err(SchemaError::MultipleDefaultGeometries {
                    first: first.to_owned(),
                    second: attribute.name.clone(),
                });
            }
            default_geometry = Some(&attribute.name);
        }

        Ok(Self {
            type_name,
            attributes,
        })
    }

    /// Build a schema from attributes already known to be valid.
    pub(crate) fn from_validated(type_name: &str, attributes: Vec<AttributeDescriptor>) -> Self {
        debug_assert!(Self::new(type_name, attributes.clone()).is_ok());
        Self {
            type_name: type_name.to_owned(),
            attributes,
        }
    }

    /// Name of the feature type described by this schema.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Attributes in declaration order.
    #[must_use]
    pub fn attributes(&self) -> &[AttributeDescriptor] {
        &self.attributes
    }

    /// Look up an attribute by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttributeDescriptor> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Position of the named attribute.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|a| a.name == name)
    }

    /// The attribute flagged as the default geometry, if any.
    ///
    /// When no attribute carries the flag explicitly, the first geometric
    /// attribute is used.
    #[must_use]
    pub fn default_geometry(&self) -> Option<&AttributeDescriptor> {
        self.attributes
            .iter()
            .find(|a| a.default_geometry)
            .or_else(|| self.attributes.iter().find(|a| a.kind.is_geometry()))
    }
}
