//! Address point features.

use geo::Point;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{AttributeDescriptor, Schema, Srid};

/// Feature type name of address records.
pub const ADDRESS_TYPE_NAME: &str = "address";

/// Attribute name of the address identifier.
pub const ADDRESS_ID: &str = "addressId";
/// Attribute name of the display name.
pub const NAME: &str = "name";
/// Attribute name of the point geometry.
pub const GEOM: &str = "geom";

/// A named address with a geographic position.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. The feature
/// identifier is always the address identifier, never a generated value.
///
/// # Examples
/// ```
/// use geo::Point;
/// use address_core::AddressFeature;
///
/// let feature = AddressFeature::new("A1", "Alice", Point::new(120.5, 31.2));
/// assert_eq!(feature.id(), "A1");
/// assert_eq!(feature.geom().x(), 120.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AddressFeature {
    #[cfg_attr(feature = "serde", serde(rename = "addressId"))]
    address_id: String,
    name: String,
    geom: Point<f64>,
}

impl AddressFeature {
    /// Construct a feature from its attribute values.
    pub fn new(address_id: impl Into<String>, name: impl Into<String>, geom: Point<f64>) -> Self {
        Self {
            address_id: address_id.into(),
            name: name.into(),
            geom,
        }
    }

    /// Feature identifier, equal to [`Self::address_id`].
    #[must_use]
    pub fn id(&self) -> &str {
        &self.address_id
    }

    /// Address identifier column.
    #[must_use]
    pub fn address_id(&self) -> &str {
        &self.address_id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position as (longitude, latitude).
    #[must_use]
    pub const fn geom(&self) -> Point<f64> {
        self.geom
    }

    /// Schema of the `address` feature type.
    ///
    /// Attributes are `addressId: text`, `name: text` and
    /// `geom: point(EPSG:4326)`, with `geom` as the default geometry.
    #[must_use]
    pub fn schema() -> Schema {
        Schema::from_validated(
            ADDRESS_TYPE_NAME,
            vec![
                AttributeDescriptor::text(ADDRESS_ID),
                AttributeDescriptor::text(NAME),
                AttributeDescriptor::point(GEOM, Srid::WGS84).as_default_geometry(),
            ],
        )
    }

    /// Read an attribute by its schema name.
    ///
    /// ```
    /// use geo::Point;
    /// use address_core::{AddressFeature, AttributeValue};
    ///
    /// let feature = AddressFeature::new("A1", "Alice", Point::new(120.5, 31.2));
    /// assert_eq!(feature.attribute("name"), Some(AttributeValue::Text("Alice")));
    /// assert_eq!(feature.attribute("missing"), None);
    /// ```
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<AttributeValue<'_>> {
        match name {
            ADDRESS_ID => Some(AttributeValue::Text(&self.address_id)),
            NAME => Some(AttributeValue::Text(&self.name)),
            GEOM => Some(AttributeValue::Point(self.geom)),
            _ => None,
        }
    }
}

/// Borrowed view of a single attribute value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttributeValue<'a> {
    /// Text attribute.
    Text(&'a str),
    /// Point geometry attribute.
    Point(Point<f64>),
}
