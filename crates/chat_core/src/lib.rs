//! Chat widget core: pure state machine, bot text formatting and view-model helpers.
mod config;
mod effect;
mod format;
mod message;
mod msg;
mod state;
mod transcript;
mod update;
mod view_model;

pub use config::{
    WidgetConfig, APOLOGY_TEXT, DEFAULT_BOT_ICON_URL, PLACEHOLDER_TEXT, SCROLL_DURATION,
};
pub use effect::Effect;
pub use format::{escape_html, format_bot_text, format_user_text, BULLET, LINE_BREAK};
pub use message::{Message, MessageId, Role, THINKING_CLASS};
pub use msg::Msg;
pub use state::{ChatWidget, RequestId};
pub use transcript::Transcript;
pub use update::update;
pub use view_model::{ChatViewModel, MessageView};
