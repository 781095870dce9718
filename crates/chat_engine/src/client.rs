use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use url::Url;

use crate::{ChatError, ChatReply, ChatRequest, FailureKind};

/// Path of the chat endpoint, resolved against the server origin.
pub const CHAT_PATH: &str = "/chat";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub base_url: String,
    /// `None` leaves the transport default in place.
    pub connect_timeout: Option<Duration>,
    /// `None` waits for the server indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            connect_timeout: None,
            request_timeout: None,
        }
    }
}

#[async_trait::async_trait]
pub trait ChatClient: Send + Sync {
    /// Posts one user message and returns the reply text.
    async fn send(&self, message: &str) -> Result<String, ChatError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestChatClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl ReqwestChatClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, ChatError> {
        let endpoint = chat_endpoint(&settings.base_url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ChatError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl ChatClient for ReqwestChatClient {
    async fn send(&self, message: &str) -> Result<String, ChatError> {
        let body = serde_json::to_vec(&ChatRequest { message })
            .map_err(|err| ChatError::new(FailureKind::InvalidRequest, err.to_string()))?;

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        parse_reply(&bytes)
    }
}

/// Resolves the chat endpoint against the configured server origin.
pub fn chat_endpoint(base_url: &str) -> Result<Url, ChatError> {
    let base = Url::parse(base_url)
        .map_err(|err| ChatError::new(FailureKind::InvalidUrl, err.to_string()))?;
    if base.cannot_be_a_base() {
        return Err(ChatError::new(
            FailureKind::InvalidUrl,
            format!("{base_url} cannot be a base url"),
        ));
    }
    base.join(CHAT_PATH)
        .map_err(|err| ChatError::new(FailureKind::InvalidUrl, err.to_string()))
}

fn parse_reply(bytes: &[u8]) -> Result<String, ChatError> {
    serde_json::from_slice::<ChatReply>(bytes)
        .map(|body| body.reply)
        .map_err(|err| ChatError::new(FailureKind::MalformedResponse, err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> ChatError {
    if err.is_timeout() {
        return ChatError::new(FailureKind::Timeout, err.to_string());
    }
    ChatError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::{chat_endpoint, parse_reply};
    use crate::FailureKind;

    #[test]
    fn endpoint_is_resolved_from_origin() {
        let url = chat_endpoint("http://localhost:8080").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/chat");

        let url = chat_endpoint("https://example.com/app/").unwrap();
        assert_eq!(url.as_str(), "https://example.com/chat");
    }

    #[test]
    fn invalid_base_is_rejected() {
        let err = chat_endpoint("not a url").unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);
        let err = chat_endpoint("mailto:bot@example.com").unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);
    }

    #[test]
    fn reply_field_is_extracted() {
        let reply = parse_reply(br#"{"reply":"hi","extra":1}"#).unwrap();
        assert_eq!(reply, "hi");
    }

    #[test]
    fn missing_or_wrong_reply_is_malformed() {
        let bodies: [&[u8]; 4] = [b"{}", br#"{"reply":3}"#, b"<html>", br#""hi""#];
        for body in bodies {
            let err = parse_reply(body).unwrap_err();
            assert_eq!(err.kind, FailureKind::MalformedResponse);
        }
    }
}
