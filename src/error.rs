//! Error taxonomy for the poll loop.
//!
//! Only `ConfigError` is fatal. The per-iteration kinds are folded into
//! `PollError` and turned into chat messages at the loop boundary;
//! `DeliveryError` is logged and dropped.

use reqwest::StatusCode;
use thiserror::Error;

/// A required setting is absent at startup.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// The status API could not be reached or answered with something other than 200.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("status API request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("status API request timed out")]
    Timeout,

    #[error("status API returned {0}, expected 200 OK")]
    Status(StatusCode),

    #[error("status API body is not valid JSON: {0}")]
    Decode(#[source] reqwest::Error),
}

impl FetchError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_decode() {
            FetchError::Decode(err)
        } else {
            FetchError::Transport(err)
        }
    }
}

/// The decoded payload does not have the `{"homeworks": [...]}` shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("API response is not a JSON object")]
    NotAMapping,

    #[error("API response has no \"homeworks\" key")]
    MissingKey,

    #[error("\"homeworks\" in API response is not a list")]
    NotASequence,
}

/// A tracked homework record is incomplete or carries an unknown status.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("В ответе отсутствует имя домашней работы")]
    MissingName,

    #[error("В ответе отсутствует статус домашней работы")]
    MissingStatus,

    #[error("Неизвестный статус домашней работы: {0}")]
    UnknownStatus(String),
}

/// The chat transport refused or failed to take the message.
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("telegram request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("telegram request timed out")]
    Timeout,

    #[error("telegram returned {0}")]
    Status(StatusCode),

    #[error("telegram rejected the message: {0}")]
    Rejected(String),
}

impl DeliveryError {
    /// The Bot API URL embeds the token, so it is dropped before the error is kept.
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() { DeliveryError::Timeout } else { DeliveryError::Transport(err.without_url()) }
    }
}

/// Everything one iteration can recover from.
#[derive(Error, Debug)]
pub enum PollError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    Field(#[from] FieldError),
}

impl PollError {
    /// Stable short name used in log fields and JSON envelopes.
    pub fn kind(&self) -> &'static str {
        match self {
            PollError::Fetch(_) => "fetch",
            PollError::Shape(_) => "shape",
            PollError::Field(_) => "field",
        }
    }
}
