// src/core/interpreter/geo.rs

//! The geo interpreter: `lat<TAB>lon` records move the shared target.

use crate::core::FeedError;
use crate::core::feed::Coordinates;

/// Parses one coordinate leniently. Anything that is not a finite number
/// becomes `0.0` so a bad sample never interrupts the feed.
pub fn parse_coordinate(field: &str) -> f64 {
    field
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Reads latitude and longitude from the first two fields of a record.
pub fn parse_record(fields: &[&str]) -> Result<Coordinates, FeedError> {
    match fields {
        [lat, lon, ..] => Ok(Coordinates::new(
            parse_coordinate(lat),
            parse_coordinate(lon),
        )),
        _ => Err(FeedError::MissingFields {
            expected: 2,
            found: fields.len(),
        }),
    }
}
