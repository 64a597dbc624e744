//! Error types shared by every pipeline stage.
//!
//! Each variant maps to one failure class of the run. All of them are fatal:
//! they bubble up to `main`, get logged, and end the process with a non-zero
//! status before any output file is written.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, NewsError>;

#[derive(Debug, Error)]
pub enum NewsError {
    /// Transport-level failure (DNS, connect, timeout, body read).
    #[error("network error fetching {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    #[error("{url}: found {headlines} headlines but {bodies} bodies")]
    ExtractionMismatch {
        url: String,
        headlines: usize,
        bodies: usize,
    },

    #[error("invalid selector `{selector}`: {message}")]
    InvalidSelector { selector: String, message: String },

    #[error("invalid seed url `{0}`")]
    InvalidSeed(String),

    #[error("unknown tagging backend `{0}`; expected one of {expected}", expected = crate::tagger::BACKENDS.join(", "))]
    UnknownTagger(String),

    #[error("{path}: missing required column `{column}`")]
    MissingColumn { path: String, column: &'static str },

    #[error("config error: {0}")]
    Config(String),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl NewsError {
    /// Whether a fetch that failed with this error is worth another attempt.
    ///
    /// Transport failures, throttling (429) and server errors (5xx) are
    /// transient. Everything else, including other 4xx statuses, is not.
    pub fn is_retryable(&self) -> bool {
        match self {
            NewsError::Network { .. } => true,
            NewsError::Http { status, .. } => *status == 429 || (500..600).contains(status),
            _ => false,
        }
    }
}

impl From<serde_yaml::Error> for NewsError {
    fn from(err: serde_yaml::Error) -> Self {
        NewsError::Config(err.to_string())
    }
}
