// crates/vaxmap-core/src/error.rs
use thiserror::Error;

/// Everything that can stop the region table from being built or queried.
///
/// Join misses and derived-metric anomalies are not errors:
/// they are reported through [`crate::TableStats`] and
/// [`crate::Region::anomalies`] instead.
#[derive(Debug, Error)]
pub enum VaxError {
    #[error("Source not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Column '{column}' not found in {dataset} source")]
    MissingColumn {
        dataset: &'static str,
        column: String,
    },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Region code {0} appears more than once in the boundary source")]
    DuplicateRegionCode(u32),

    #[error("Region name '{0}' is shared by more than one joined region")]
    DuplicateRegionName(String),

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Column '{0}' has no defined value in any region")]
    EmptyColumn(String),
}

#[cfg(feature = "fetch")]
impl From<reqwest::Error> for VaxError {
    fn from(e: reqwest::Error) -> Self {
        VaxError::Http(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, VaxError>;
