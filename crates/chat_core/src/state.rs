use crate::config::{WidgetConfig, SCROLL_DURATION};
use crate::message::{Message, MessageId, Role};
use crate::transcript::Transcript;
use crate::view_model::{ChatViewModel, MessageView};
use crate::Effect;

pub type RequestId = u64;

/// Chat widget state: transcript, input field and outstanding requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatWidget {
    config: WidgetConfig,
    transcript: Transcript,
    input: String,
    pending: Vec<RequestId>,
    next_message_id: MessageId,
    next_request_id: RequestId,
    dirty: bool,
}

impl Default for ChatWidget {
    fn default() -> Self {
        Self::new(WidgetConfig::default())
    }
}

impl ChatWidget {
    pub fn new(config: WidgetConfig) -> Self {
        Self {
            config,
            transcript: Transcript::new(),
            input: String::new(),
            pending: Vec::new(),
            next_message_id: 1,
            next_request_id: 1,
            dirty: false,
        }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn pending_requests(&self) -> &[RequestId] {
        &self.pending
    }

    pub fn is_awaiting_reply(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Whether a send would be accepted right now.
    pub fn accepts_input(&self) -> bool {
        !(self.config.single_flight && self.is_awaiting_reply())
    }

    pub fn view(&self) -> ChatViewModel {
        ChatViewModel {
            messages: self
                .transcript
                .messages()
                .iter()
                .map(|msg| MessageView {
                    id: msg.id,
                    role: msg.role,
                    markup: msg.markup.clone(),
                    is_placeholder: msg.is_placeholder,
                })
                .collect(),
            input: self.input.clone(),
            input_enabled: self.accepts_input(),
            awaiting_reply: self.is_awaiting_reply(),
            dirty: self.dirty,
        }
    }

    /// Returns whether the view changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Appends a message to the transcript.
    ///
    /// A non-placeholder append first removes the pending placeholder. Every
    /// append asks the view to scroll to the bottom.
    pub fn render_message(&mut self, role: Role, text: &str, is_placeholder: bool) -> Vec<Effect> {
        if !is_placeholder {
            self.transcript.remove_placeholder();
        }
        let id = self.next_message_id;
        self.next_message_id += 1;
        let message = Message::new(
            id,
            role,
            text,
            is_placeholder,
            &self.config.bot_icon_url,
            self.config.escape_html,
        );
        self.transcript.push(message);
        self.dirty = true;
        vec![Effect::ScrollToBottom {
            duration: SCROLL_DURATION,
        }]
    }

    /// Sends the current input: user message, cleared input, placeholder and
    /// one outbound request. Blank input (or a busy single-flight widget) is
    /// a no-op.
    pub fn submit_user_message(&mut self) -> Vec<Effect> {
        let message = self.input.trim().to_string();
        if message.is_empty() || !self.accepts_input() {
            return Vec::new();
        }

        let mut effects = self.render_message(Role::User, &message, false);
        self.input.clear();
        let placeholder = self.config.placeholder_text.clone();
        effects.extend(self.render_message(Role::Bot, &placeholder, true));

        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.pending.push(request_id);
        effects.push(Effect::PostChat {
            request_id,
            message,
        });
        effects
    }

    pub(crate) fn apply_reply(&mut self, request_id: RequestId, reply: &str) -> Vec<Effect> {
        self.complete(request_id);
        self.render_message(Role::Bot, reply, false)
    }

    pub(crate) fn apply_failure(&mut self, request_id: RequestId) -> Vec<Effect> {
        self.complete(request_id);
        if self.transcript.remove_placeholder() {
            self.dirty = true;
        }
        let apology = self.config.apology_text.clone();
        self.render_message(Role::Bot, &apology, false)
    }

    /// Replaces the input value. Ignored while a single-flight request is
    /// pending, so nothing is typed into a field that cannot send.
    pub(crate) fn set_input(&mut self, text: String) {
        if !self.accepts_input() || self.input == text {
            return;
        }
        self.input = text;
        self.dirty = true;
    }

    fn complete(&mut self, request_id: RequestId) {
        self.pending.retain(|id| *id != request_id);
        self.dirty = true;
    }
}
