use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Question is empty")]
    EmptyQuestion,

    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Backend returned HTTP {status}: {body}")]
    BackendError { status: u16, body: String },

    #[error("Backend response has no generated text ({reason}):\n{body}")]
    MalformedResponse { reason: String, body: String },

    #[error("Model did not return a SELECT query:\n{raw}")]
    NotASelectQuery { raw: String },

    #[error("Query uses {keyword}, only SELECT is allowed:\n{raw}")]
    DisallowedOperation { keyword: String, raw: String },

    #[error("Model returned markdown (```), refused:\n{raw}")]
    UnexpectedMarkup { raw: String },
}

impl TranslateError {
    /// The model output that triggered a guardrail, if any.
    pub fn raw_text(&self) -> Option<&str> {
        match self {
            Self::NotASelectQuery { raw }
            | Self::DisallowedOperation { raw, .. }
            | Self::UnexpectedMarkup { raw } => Some(raw),
            Self::MalformedResponse { body, .. } | Self::BackendError { body, .. } => Some(body),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TranslateError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            TranslateError::Configuration(format!("invalid backend request: {}", err))
        } else if err.is_timeout() {
            TranslateError::BackendUnavailable(format!("request timed out: {}", err))
        } else if err.is_decode() {
            // The body could not be read, so there is no text to carry
            TranslateError::MalformedResponse {
                reason: err.to_string(),
                body: String::new(),
            }
        } else {
            TranslateError::BackendUnavailable(err.to_string())
        }
    }
}

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Column '{0}' not found in CSV header")]
    MissingColumn(String),

    #[error("Expected a top-level JSON array")]
    NotAnArray,
}
