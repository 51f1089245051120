// ==========================================
// Zuidplas Logistics - Export Error Types
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Output write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

pub type ExportResult<T> = Result<T, ExportError>;
