use thiserror::Error;

#[derive(Error, Debug)]
pub enum FirstPitchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Empty payload for subject {subject_id}")]
    EmptyPayload { subject_id: u64 },
}

impl FirstPitchError {
    /// Errors worth another fetch attempt. Everything on the ingestion path
    /// is treated as transient; configuration and local I/O are not.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            FirstPitchError::Http(_)
                | FirstPitchError::Csv(_)
                | FirstPitchError::Json(_)
                | FirstPitchError::MissingColumn(_)
                | FirstPitchError::Status { .. }
                | FirstPitchError::EmptyPayload { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, FirstPitchError>;
