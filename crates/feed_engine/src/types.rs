use std::fmt;

use feed_core::{Msg, Page, RequestId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    PageCompleted {
        request_id: RequestId,
        result: Result<Page, SourceError>,
    },
}

impl EngineEvent {
    /// Converts an engine completion into the store message that reports it.
    pub fn into_msg(self) -> Msg {
        match self {
            EngineEvent::PageCompleted {
                request_id,
                result: Ok(page),
            } => Msg::PageLoaded { request_id, page },
            EngineEvent::PageCompleted {
                request_id,
                result: Err(error),
            } => Msg::PageFailed {
                request_id,
                message: error.user_message(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct SourceError {
    pub kind: FailureKind,
    pub message: String,
}

impl SourceError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Text shown in the feed's error panel.
    pub fn user_message(&self) -> String {
        match &self.kind {
            FailureKind::Api { .. } => self.message.clone(),
            _ => "Failed to fetch repositories".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    /// The backend answered with its `{ error, code }` body.
    Api { code: String },
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Api { code } => write!(f, "api error {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Decode => write!(f, "malformed response"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
