use std::fmt;

use itinera::Point;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Coordinates come as strings from the catalog service, plain numbers are
/// accepted as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum CatalogCoordinate {
    Number(f64),
    Text(String),
}

impl fmt::Display for CatalogCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogCoordinate::Number(value) => write!(f, "{value}"),
            CatalogCoordinate::Text(value) => write!(f, "{value}"),
        }
    }
}

impl From<f64> for CatalogCoordinate {
    fn from(value: f64) -> Self {
        CatalogCoordinate::Number(value)
    }
}

impl From<&str> for CatalogCoordinate {
    fn from(value: &str) -> Self {
        CatalogCoordinate::Text(value.to_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename = "City")]
pub struct CatalogCity {
    pub name: String,
    pub state: String,
    pub lat: CatalogCoordinate,
    pub lon: CatalogCoordinate,
}

impl CatalogCity {
    pub fn new(
        name: impl Into<String>,
        state: impl Into<String>,
        lat: impl Into<CatalogCoordinate>,
        lon: impl Into<CatalogCoordinate>,
    ) -> Self {
        Self {
            name: name.into(),
            state: state.into(),
            lat: lat.into(),
            lon: lon.into(),
        }
    }

    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.state)
    }

    pub fn to_point(&self) -> Result<Point, CatalogError> {
        let label = self.label();
        let latitude = parse_coordinate(&label, "latitude", &self.lat)?;
        let longitude = parse_coordinate(&label, "longitude", &self.lon)?;

        Ok(Point::new(label, latitude, longitude)?)
    }
}

fn parse_coordinate(
    label: &str,
    field: &'static str,
    value: &CatalogCoordinate,
) -> Result<f64, CatalogError> {
    match value {
        CatalogCoordinate::Number(number) => Ok(*number),
        CatalogCoordinate::Text(text) => {
            text.trim()
                .parse::<f64>()
                .map_err(|_| CatalogError::InvalidCoordinate {
                    label: label.to_owned(),
                    field,
                    value: text.clone(),
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use itinera::ValidationError;

    use super::*;

    #[test]
    fn test_label_includes_state() {
        let city = CatalogCity::new("Mumbai", "Maharashtra", "19.076", "72.8777");
        assert_eq!(city.label(), "Mumbai (Maharashtra)");
    }

    #[test]
    fn test_to_point_parses_text_and_numbers() {
        let city = CatalogCity::new("Mumbai", "Maharashtra", " 19.076 ", 72.8777);
        let point = city.to_point().unwrap();

        assert_eq!(point.label(), "Mumbai (Maharashtra)");
        assert_eq!(point.latitude(), 19.076);
        assert_eq!(point.longitude(), 72.8777);
    }

    #[test]
    fn test_to_point_rejects_unparseable_coordinate() {
        let city = CatalogCity::new("Nowhere", "Unknown", "north", "0");
        let err = city.to_point().unwrap_err();

        assert!(matches!(
            err,
            CatalogError::InvalidCoordinate {
                field: "latitude",
                ..
            }
        ));
        assert!(err.to_string().contains("\"north\""));
    }

    #[test]
    fn test_to_point_rejects_out_of_range() {
        let city = CatalogCity::new("Nowhere", "Unknown", "0", "200");
        assert!(matches!(
            city.to_point(),
            Err(CatalogError::Validation(
                ValidationError::LongitudeOutOfRange { .. }
            ))
        ));
    }

    #[test]
    fn test_to_point_rejects_nan_text() {
        let city = CatalogCity::new("Nowhere", "Unknown", "NaN", "0");
        assert!(matches!(
            city.to_point(),
            Err(CatalogError::Validation(
                ValidationError::NonFiniteCoordinate { .. }
            ))
        ));
    }

    #[test]
    fn test_deserialize_mixed_coordinates() {
        let city: CatalogCity = serde_json::from_str(
            r#"{"name":"Pune","state":"Maharashtra","lat":"18.5204","lon":73.8567,"id":7}"#,
        )
        .unwrap();

        assert_eq!(city.lat, CatalogCoordinate::Text("18.5204".to_owned()));
        assert_eq!(city.lon, CatalogCoordinate::Number(73.8567));
    }
}
