use std::path::PathBuf;

/// Every way a generation request can fail.
///
/// Callers treat all variants the same way (one opaque failure shown to the
/// user); the variants exist for logs and tests.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("failed to read image '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Transport(String),

    #[error("the model returned no content: {0}")]
    Blocked(String),

    #[error("the model returned an invalid JSON format: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("the model returned an empty or invalid quiz array")]
    EmptyQuiz,

    #[error("quiz question {index} is malformed: {reason}")]
    MalformedQuiz { index: usize, reason: String },
}

pub type GenerationResult<T> = std::result::Result<T, GenerationError>;
