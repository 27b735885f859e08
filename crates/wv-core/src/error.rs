use thiserror::Error;

/// Errors that can occur while building or querying visualization state
#[derive(Error, Debug)]
pub enum VizError {
    #[error("No records for year {year}")]
    EmptySelection { year: i32 },

    #[error("Year {year} outside {min}..={max}")]
    YearOutOfRange { year: i32, min: i32, max: i32 },

    #[error("Unknown indicator '{0}'")]
    UnknownIndicator(String),

    #[error("Unknown region '{0}'")]
    UnknownRegion(String),

    #[error("Invalid settings: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, VizError>;
