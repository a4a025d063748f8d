use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Point label must not be empty")]
    EmptyLabel,

    #[error("Point {label}: coordinates must be finite (lat = {latitude}, lon = {longitude})")]
    NonFiniteCoordinate {
        label: String,
        latitude: f64,
        longitude: f64,
    },

    #[error("Point {label}: latitude {latitude} is outside [-90, 90]")]
    LatitudeOutOfRange { label: String, latitude: f64 },

    #[error("Point {label}: longitude {longitude} is outside [-180, 180]")]
    LongitudeOutOfRange { label: String, longitude: f64 },
}
