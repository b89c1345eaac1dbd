//! Mapping of delimited text rows onto address features.
//!
//! Rows have the form `addressId,name,longitude,latitude`. There is no header
//! row, columns beyond the fourth are ignored, and the point is built with
//! longitude first.

use std::io::Read;

use address_core::AddressFeature;
use csv::{ReaderBuilder, StringRecord};
use geo::Point;
use log::warn;

use crate::{LoadError, NumberError};

const ADDRESS_ID_COLUMN: (usize, &str) = (0, "addressId");
const NAME_COLUMN: (usize, &str) = (1, "name");
const LONGITUDE_COLUMN: (usize, &str) = (2, "longitude");
const LATITUDE_COLUMN: (usize, &str) = (3, "latitude");
const REQUIRED_COLUMNS: usize = 4;

/// Parse every row of `reader` into an [`AddressFeature`], in source order.
///
/// `resource` names the input in error messages.
///
/// # Examples
/// ```
/// use address_data::read_addresses;
///
/// # fn main() -> Result<(), address_data::LoadError> {
/// let input = "A1,Alice,120.5,31.2\nA2,Bob,121.0,31.5\n";
/// let features = read_addresses(input.as_bytes(), "inline")?;
/// assert_eq!(features.len(), 2);
/// assert_eq!(features[1].geom().x(), 121.0);
/// # Ok(())
/// # }
/// ```
pub fn read_addresses<R: Read>(reader: R, resource: &str) -> Result<Vec<AddressFeature>, LoadError> {
    let mut csv = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut features = Vec::new();
    let mut wide_rows = 0_usize;
    for result in csv.records() {
        let record = result.map_err(|source| LoadError::DataLoadFailure {
            name: resource.to_owned(),
            source: Box::new(source),
        })?;
        if record.len() > REQUIRED_COLUMNS {
            wide_rows += 1;
        }
        features.push(RowMapper::new(&record, resource).into_feature()?);
    }

    if wide_rows > 0 {
        warn!("{resource}: ignored extra columns on {wide_rows} rows");
    }
    Ok(features)
}

struct RowMapper<'a> {
    record: &'a StringRecord,
    resource: &'a str,
    line: u64,
}

impl<'a> RowMapper<'a> {
    fn new(record: &'a StringRecord, resource: &'a str) -> Self {
        let line = record.position().map_or(0, csv::Position::line);
        Self {
            record,
            resource,
            line,
        }
    }

    fn into_feature(self) -> Result<AddressFeature, LoadError> {
        let address_id = self.text(ADDRESS_ID_COLUMN)?;
        let name = self.text(NAME_COLUMN)?;
        let longitude = self.number(LONGITUDE_COLUMN)?;
        let latitude = self.number(LATITUDE_COLUMN)?;
        Ok(AddressFeature::new(
            address_id,
            name,
            Point::new(longitude, latitude),
        ))
    }

    fn text(&self, (index, column): (usize, &'static str)) -> Result<&'a str, LoadError> {
        self.record
            .get(index)
            .ok_or_else(|| LoadError::MissingColumn {
                resource: self.resource.to_owned(),
                line: self.line,
                column,
            })
    }

    fn number(&self, slot: (usize, &'static str)) -> Result<f64, LoadError> {
        let raw = self.text(slot)?;
        parse_coordinate(raw).map_err(|source| LoadError::MalformedNumber {
            resource: self.resource.to_owned(),
            line: self.line,
            column: slot.1,
            value: raw.to_owned(),
            source,
        })
    }
}

/// `NaN` and infinity spellings are rejected along with non-numeric text.
fn parse_coordinate(raw: &str) -> Result<f64, NumberError> {
    let value = raw.trim().parse::<f64>()?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(NumberError::NonFinite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn maps_columns_in_order() {
        let features =
            read_addresses("A1,Alice,120.5,31.2\nA2,Bob,121.0,31.5".as_bytes(), "fixture")
                .expect("valid rows");
        assert_eq!(
            features,
            vec![
                AddressFeature::new("A1", "Alice", Point::new(120.5, 31.2)),
                AddressFeature::new("A2", "Bob", Point::new(121.0, 31.5)),
            ]
        );
    }

    #[rstest]
    fn first_row_is_data() {
        let features = read_addresses("addressId,name,1,2\n".as_bytes(), "fixture")
            .expect("header-like row is still data");
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].id(), "addressId");
    }

    #[rstest]
    fn ignores_extra_columns_and_honours_quotes() {
        let input = "A1,\"Smith, Alice\",120.5,31.2,extra,more\n";
        let features = read_addresses(input.as_bytes(), "fixture").expect("valid row");
        assert_eq!(features[0].name(), "Smith, Alice");
        assert_eq!(features[0].geom(), Point::new(120.5, 31.2));
    }

    #[rstest]
    fn tolerates_padding_around_numbers() {
        let features =
            read_addresses("A1,Alice, 120.5 ,31.2\r\n".as_bytes(), "fixture").expect("valid row");
        assert_eq!(features[0].geom(), Point::new(120.5, 31.2));
    }

    #[rstest]
    #[case("A1,Alice,east,31.2\n", "longitude", "east")]
    #[case("A1,Alice,120.5,\n", "latitude", "")]
    #[case("A1,Alice,nan,31.2\n", "longitude", "nan")]
    #[case("A1,Alice,120.5,inf\n", "latitude", "inf")]
    #[case("A1,Alice,-Infinity,31.2\n", "longitude", "-Infinity")]
    fn rejects_non_numeric_coordinates(
        #[case] input: &str,
        #[case] expected_column: &str,
        #[case] expected_value: &str,
    ) {
        let err = read_addresses(input.as_bytes(), "fixture").expect_err("malformed row");
        match err {
            LoadError::MalformedNumber {
                line,
                column,
                value,
                ..
            } => {
                assert_eq!(line, 1);
                assert_eq!(column, expected_column);
                assert_eq!(value, expected_value);
            }
            other => panic!("expected MalformedNumber, got {other:?}"),
        }
    }

    #[rstest]
    fn non_finite_values_report_their_reason() {
        let err = read_addresses("A1,Alice,NaN,31.2\n".as_bytes(), "fixture")
            .expect_err("NaN longitude");
        assert!(matches!(
            err,
            LoadError::MalformedNumber {
                source: NumberError::NonFinite,
                ..
            }
        ));
        assert!(err.to_string().contains("is not a number: value is not finite"));
    }

    #[rstest]
    fn reports_short_rows_with_their_line() {
        let err = read_addresses("A1,Alice,120.5,31.2\nA2,Bob\n".as_bytes(), "fixture")
            .expect_err("short row");
        match err {
            LoadError::MissingColumn { line, column, .. } => {
                assert_eq!(line, 2);
                assert_eq!(column, "longitude");
            }
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[rstest]
    fn invalid_utf8_is_a_load_failure() {
        let err = read_addresses(&b"A1,\xff\xfe,120.5,31.2\n"[..], "fixture")
            .expect_err("not utf-8");
        assert!(matches!(err, LoadError::DataLoadFailure { .. }));
    }
}
