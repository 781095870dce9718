use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type RequestId = u64;

/// Body of the outbound call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

/// Expected success body. Extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ReplyCompleted {
        request_id: RequestId,
        result: Result<String, ChatError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ChatError {
    pub kind: FailureKind,
    pub message: String,
}

impl ChatError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureKind {
    #[error("invalid url")]
    InvalidUrl,
    #[error("invalid request")]
    InvalidRequest,
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("timeout")]
    Timeout,
    #[error("malformed response")]
    MalformedResponse,
    #[error("engine stopped")]
    EngineStopped,
    #[error("network error")]
    Network,
}
