use thiserror::Error;

/// Errors from the edges of the application. The quiz core itself never fails.
#[derive(Debug, Error)]
pub enum KanaflashError {
    #[error("unknown kana: {0}")]
    UnknownGlyph(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("logging setup failed: {0}")]
    Logging(String),
}
