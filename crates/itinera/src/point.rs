use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

const MAX_LATITUDE: f64 = 90.0;
const MAX_LONGITUDE: f64 = 180.0;

/// A selectable location identified by its display label.
///
/// Coordinates are in degrees. `Point::new` validates them; `new_unchecked`
/// hands them to the distance formula as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "JsonPoint")]
pub struct Point {
    label: String,
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct JsonPoint {
    label: String,
    latitude: f64,
    longitude: f64,
}

impl TryFrom<JsonPoint> for Point {
    type Error = ValidationError;

    fn try_from(value: JsonPoint) -> Result<Self, Self::Error> {
        Point::new(value.label, value.latitude, value.longitude)
    }
}

impl Point {
    pub fn new(
        label: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Result<Self, ValidationError> {
        let label = label.into();

        if label.trim().is_empty() {
            return Err(ValidationError::EmptyLabel);
        }

        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(ValidationError::NonFiniteCoordinate {
                label,
                latitude,
                longitude,
            });
        }

        if !(-MAX_LATITUDE..=MAX_LATITUDE).contains(&latitude) {
            return Err(ValidationError::LatitudeOutOfRange { label, latitude });
        }

        if !(-MAX_LONGITUDE..=MAX_LONGITUDE).contains(&longitude) {
            return Err(ValidationError::LongitudeOutOfRange { label, longitude });
        }

        Ok(Self {
            label,
            latitude,
            longitude,
        })
    }

    pub fn new_unchecked(label: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            label: label.into(),
            latitude,
            longitude,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl From<&Point> for geo::Point<f64> {
    fn from(point: &Point) -> Self {
        geo::Point::new(point.longitude, point.latitude)
    }
}

impl From<&Point> for geo::Coord<f64> {
    fn from(point: &Point) -> Self {
        geo::Coord {
            x: point.longitude,
            y: point.latitude,
        }
    }
}
