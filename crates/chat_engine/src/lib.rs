//! Chat engine: the `/chat` HTTP client, background request execution and
//! markup-to-display conversion.
mod client;
mod display;
mod engine;
mod types;

pub use client::{chat_endpoint, ChatClient, ClientSettings, ReqwestChatClient, CHAT_PATH};
pub use display::{DisplayMessage, FragmentRenderer, Speaker, Span};
pub use engine::{EngineError, EngineHandle};
pub use types::{ChatError, ChatReply, ChatRequest, EngineEvent, FailureKind, RequestId};
