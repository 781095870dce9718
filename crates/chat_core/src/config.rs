use std::time::Duration;

/// Text of the placeholder shown while a reply is pending.
pub const PLACEHOLDER_TEXT: &str = "Searching the knowledge store for an answer...";
/// Text shown when the reply could not be obtained.
pub const APOLOGY_TEXT: &str =
    "Sorry, the server cannot be reached right now. Please try again in a moment.";
pub const DEFAULT_BOT_ICON_URL: &str = "/static/images/bot-icon.png";
/// Duration of the scroll-to-bottom animation after each append.
pub const SCROLL_DURATION: Duration = Duration::from_millis(300);

/// Injected settings for a [`crate::ChatWidget`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    pub bot_icon_url: String,
    pub placeholder_text: String,
    pub apology_text: String,
    /// Escape raw text before formatting. Off reproduces trusted-text rendering.
    pub escape_html: bool,
    /// Ignore sends while a reply is pending.
    pub single_flight: bool,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            bot_icon_url: DEFAULT_BOT_ICON_URL.to_string(),
            placeholder_text: PLACEHOLDER_TEXT.to_string(),
            apology_text: APOLOGY_TEXT.to_string(),
            escape_html: true,
            single_flight: true,
        }
    }
}
