use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::widgets::{Block, Borders};
use unicode_width::UnicodeWidthStr;

use super::constants::{INPUT_PROMPT, MAX_INPUT_ROWS, SEND_LABEL};

/// Screen regions: chat box on top, then the input block (a top border over
/// the prompt, the text field and the send control).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChatLayout {
    pub chat_box: Rect,
    pub input_block: Rect,
    pub prompt: Rect,
    pub input: Rect,
    pub send_button: Rect,
}

impl ChatLayout {
    pub fn hits_send_button(&self, column: u16, row: u16) -> bool {
        self.send_button.contains(Position::new(column, row))
    }
}

/// Splits `area` for an input field of `input_rows` text rows, clamped to
/// `1..=MAX_INPUT_ROWS`.
pub fn compute_layout(area: Rect, input_rows: u16) -> ChatLayout {
    let rows = input_rows.clamp(1, MAX_INPUT_ROWS);
    let [chat_box, input_block] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(rows + 1)]).areas(area);

    let inner = input_border().inner(input_block);
    let [prompt, input, _gap, send_button] = Layout::horizontal([
        Constraint::Length(columns(INPUT_PROMPT)),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(columns(SEND_LABEL)),
    ])
    .areas(inner);

    ChatLayout {
        chat_box,
        input_block,
        prompt,
        input,
        send_button: Rect {
            height: send_button.height.min(1),
            ..send_button
        },
    }
}

/// Border drawn around the input rows.
pub fn input_border() -> Block<'static> {
    Block::default().borders(Borders::TOP)
}

fn columns(text: &str) -> u16 {
    u16::try_from(text.width()).unwrap_or(u16::MAX)
}
