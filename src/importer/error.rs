// ==========================================
// Zuidplas Logistics - Import Errors
// ==========================================
// Only malformed payloads are errors; missing fields never are
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    // ===== File =====
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("file read failed: {0}")]
    FileReadError(String),

    // ===== Payload =====
    #[error("JSON parse failed: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    #[error("row {row} is not a JSON object (found {found})")]
    InvalidRow { row: usize, found: String },
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

pub type ImportResult<T> = Result<T, ImportError>;
