#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Input field content replaced (typing, paste, line break insertion).
    InputChanged(String),
    /// Enter pressed while the input field has focus.
    EnterPressed { shift: bool },
    /// User activated the send control.
    SendClicked,
    /// Server answered a pending request.
    ReplyReceived {
        request_id: crate::RequestId,
        reply: String,
    },
    /// A pending request failed for any reason.
    ReplyFailed {
        request_id: crate::RequestId,
        error: String,
    },
    /// UI/render tick.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
