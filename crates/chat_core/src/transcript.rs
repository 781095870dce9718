use crate::message::{Message, MessageId};

/// Ordered messages plus the handle of the pending placeholder, if any.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transcript {
    messages: Vec<Message>,
    placeholder: Option<MessageId>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn placeholder(&self) -> Option<MessageId> {
        self.placeholder
    }

    /// Appends a message. A placeholder replaces any placeholder already shown.
    pub(crate) fn push(&mut self, message: Message) {
        if message.is_placeholder {
            self.remove_placeholder();
            self.placeholder = Some(message.id);
        }
        self.messages.push(message);
    }

    /// Removes the current placeholder. Returns whether one was shown.
    pub(crate) fn remove_placeholder(&mut self) -> bool {
        let Some(id) = self.placeholder.take() else {
            return false;
        };
        let before = self.messages.len();
        self.messages.retain(|msg| msg.id != id);
        before != self.messages.len()
    }
}
