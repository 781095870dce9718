use crate::{MessageId, Role};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatViewModel {
    pub messages: Vec<MessageView>,
    pub input: String,
    pub input_enabled: bool,
    pub awaiting_reply: bool,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub id: MessageId,
    pub role: Role,
    pub markup: String,
    pub is_placeholder: bool,
}
