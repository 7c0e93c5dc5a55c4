use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Data source {url} responded with status {status}")]
    Status { url: String, status: u16 },

    #[error("Fetch cancelled before the response arrived")]
    Cancelled,

    #[error("Record {record_id}: invalid years '{value}': {reason}")]
    Format {
        record_id: i64,
        value: String,
        reason: String,
    },

    #[error("Record {record_id}: monarch name is empty")]
    EmptyName { record_id: i64 },

    #[error("No monarchs to aggregate")]
    EmptyInput,

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse grouping of [`StatsError`] variants, used for reporting and metrics labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Format,
    EmptyInput,
    Other,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Network => "network",
            ErrorKind::Format => "format",
            ErrorKind::EmptyInput => "empty_input",
            ErrorKind::Other => "other",
        }
    }
}

impl StatsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StatsError::Http(_) | StatsError::Status { .. } | StatsError::Cancelled => {
                ErrorKind::Network
            }
            StatsError::Format { .. } | StatsError::EmptyName { .. } => ErrorKind::Format,
            StatsError::EmptyInput => ErrorKind::EmptyInput,
            StatsError::Json(_) | StatsError::Toml(_) | StatsError::Io(_) | StatsError::Config(_) => {
                ErrorKind::Other
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, StatsError>;
