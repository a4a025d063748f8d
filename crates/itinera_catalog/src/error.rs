use itinera::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("City {label}: invalid {field} {value:?}")]
    InvalidCoordinate {
        label: String,
        field: &'static str,
        value: String,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Unknown city: {0}")]
    UnknownCity(String),

    #[error("Ambiguous city {name}, matches: {}", .candidates.join(", "))]
    AmbiguousCity {
        name: String,
        candidates: Vec<String>,
    },
}
