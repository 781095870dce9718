use std::time::Duration;

pub const SEND_LABEL: &str = "[ Send ]";
pub const INPUT_PROMPT: &str = "> ";
pub const WAITING_HINT: &str = "waiting for reply...";
pub const USER_LABEL: &str = "you";
pub const BOT_LABEL: &str = "bot";
/// Indentation of message bodies under their header line.
pub const BODY_INDENT: &str = "  ";
pub const MAX_INPUT_ROWS: u16 = 5;
pub const PAGE_SCROLL_LINES: u16 = 5;
pub const WHEEL_SCROLL_LINES: u16 = 2;
/// Event poll interval; also the animation frame rate.
pub const TICK: Duration = Duration::from_millis(16);
