use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// POST the trimmed user text to the chat endpoint.
    PostChat {
        request_id: crate::RequestId,
        message: String,
    },
    /// Animate the chat box to its bottom.
    ScrollToBottom { duration: Duration },
}
