use crate::format::{escape_html, format_bot_text, format_user_text};

pub type MessageId = u64;

/// Class carried by the wrapper of a placeholder message.
pub const THINKING_CLASS: &str = "thinking";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Bot,
}

/// A transcript entry. Never edited after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    /// Raw text as submitted or received.
    pub text: String,
    /// Formatted body fragment.
    pub html: String,
    /// Full wrapper markup as it is placed in the chat box.
    pub markup: String,
    pub is_placeholder: bool,
}

impl Message {
    pub(crate) fn new(
        id: MessageId,
        role: Role,
        text: &str,
        is_placeholder: bool,
        bot_icon_url: &str,
        escape: bool,
    ) -> Self {
        let (html, markup) = match role {
            Role::User => {
                let html = format_user_text(text, escape);
                let markup = user_markup(&html);
                (html, markup)
            }
            Role::Bot => {
                let html = format_bot_text(text, escape);
                let markup = bot_markup(bot_icon_url, &html, is_placeholder);
                (html, markup)
            }
        };
        Self {
            id,
            role,
            text: text.to_string(),
            html,
            markup,
            is_placeholder,
        }
    }
}

fn user_markup(html: &str) -> String {
    format!(r#"<div class="msg-wrapper user-wrapper"><div class="message user">{html}</div></div>"#)
}

fn bot_markup(icon_url: &str, html: &str, thinking: bool) -> String {
    let extra = if thinking {
        format!(" {THINKING_CLASS}")
    } else {
        String::new()
    };
    let icon = escape_html(icon_url);
    format!(
        r#"<div class="msg-wrapper bot-wrapper{extra}"><img src="{icon}" class="chat-icon"><div class="message bot">{html}</div></div>"#
    )
}

#[cfg(test)]
mod tests {
    use super::{Message, Role};

    #[test]
    fn user_wrapper_has_no_icon() {
        let msg = Message::new(1, Role::User, "hi", false, "/bot.png", true);
        assert_eq!(
            msg.markup,
            r#"<div class="msg-wrapper user-wrapper"><div class="message user">hi</div></div>"#
        );
    }

    #[test]
    fn placeholder_wrapper_carries_thinking_class_and_icon() {
        let msg = Message::new(2, Role::Bot, "wait", true, "/bot.png", true);
        assert_eq!(
            msg.markup,
            r#"<div class="msg-wrapper bot-wrapper thinking"><img src="/bot.png" class="chat-icon"><div class="message bot">wait</div></div>"#
        );
    }

    #[test]
    fn regular_bot_wrapper_has_no_thinking_class() {
        let msg = Message::new(3, Role::Bot, "a\nb", false, "/bot.png", true);
        assert!(!msg.markup.contains("thinking"));
        assert_eq!(msg.html, "a<br>b");
        assert_eq!(msg.text, "a\nb");
    }
}
