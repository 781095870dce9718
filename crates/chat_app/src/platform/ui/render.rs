use std::collections::HashMap;
use std::time::{Duration, Instant};

use chat_core::{ChatViewModel, MessageId};
use chat_engine::{DisplayMessage, FragmentRenderer, Speaker};
use chrono::{DateTime, Local};
use ratatui::layout::Position;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use super::constants::{BODY_INDENT, BOT_LABEL, INPUT_PROMPT, SEND_LABEL, USER_LABEL, WAITING_HINT};
use super::input::InputField;
use super::layout::{compute_layout, input_border, ChatLayout};
use super::scroll::ChatScroll;

struct Entry {
    display: DisplayMessage,
    shown_at: DateTime<Local>,
}

/// Terminal rendition of the chat box: converted messages, scroll state and
/// the layout of the last frame.
pub struct ChatBox {
    renderer: FragmentRenderer,
    order: Vec<MessageId>,
    entries: HashMap<MessageId, Entry>,
    scroll: ChatScroll,
    layout: ChatLayout,
    total_rows: u16,
}

impl ChatBox {
    pub fn new() -> Self {
        Self {
            renderer: FragmentRenderer::new(),
            order: Vec::new(),
            entries: HashMap::new(),
            scroll: ChatScroll::default(),
            layout: ChatLayout::default(),
            total_rows: 0,
        }
    }

    pub fn layout(&self) -> &ChatLayout {
        &self.layout
    }

    /// Mirrors the transcript: new messages are converted once, removed
    /// ones (a cleared placeholder) are dropped.
    pub fn sync(&mut self, view: &ChatViewModel, now: DateTime<Local>) {
        self.order = view.messages.iter().map(|msg| msg.id).collect();
        self.entries.retain(|id, _| view.messages.iter().any(|msg| msg.id == *id));
        for msg in &view.messages {
            self.entries.entry(msg.id).or_insert_with(|| Entry {
                display: self.renderer.render(&msg.markup),
                shown_at: now,
            });
        }
    }

    pub fn scroll_to_bottom(&mut self, now: Instant, duration: Duration) {
        self.scroll.animate_to_bottom(now, duration);
    }

    pub fn scroll_up(&mut self, lines: u16) {
        let max = self.total_rows.saturating_sub(self.layout.chat_box.height);
        self.scroll.scroll_up(lines, max);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll.scroll_down(lines);
    }

    /// Advances the scroll animation. Returns whether a redraw is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.scroll.is_animating() && self.scroll.tick(now)
    }

    pub fn transcript(&self) -> Text<'static> {
        let mut lines = Vec::new();
        for id in &self.order {
            let Some(entry) = self.entries.get(id) else {
                continue;
            };
            if !lines.is_empty() {
                lines.push(Line::default());
            }
            lines.extend(message_lines(entry));
        }
        Text::from(lines)
    }

    pub fn draw(&mut self, frame: &mut Frame, view: &ChatViewModel, field: &InputField) {
        let area = frame.area();
        // The text column width does not depend on the number of rows.
        let text_width = compute_layout(area, 1).input.width;
        self.layout = compute_layout(area, field.height(text_width));
        let layout = self.layout;

        let transcript = Paragraph::new(self.transcript()).wrap(Wrap { trim: false });
        self.total_rows = u16::try_from(transcript.line_count(layout.chat_box.width))
            .unwrap_or(u16::MAX);
        let max_offset = self.total_rows.saturating_sub(layout.chat_box.height);
        let top = max_offset - self.scroll.offset().min(max_offset);
        frame.render_widget(transcript.scroll((top, 0)), layout.chat_box);

        draw_input(frame, &layout, view, field);
    }
}

impl Default for ChatBox {
    fn default() -> Self {
        Self::new()
    }
}

fn message_lines(entry: &Entry) -> Vec<Line<'static>> {
    let (label, color) = match entry.display.speaker {
        Speaker::User => (USER_LABEL, Color::Cyan),
        Speaker::Bot => (BOT_LABEL, Color::Green),
    };
    let header = Line::styled(
        format!("{label} · {}", entry.shown_at.format("%H:%M")),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    );

    let body = if entry.display.thinking {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC)
    } else {
        Style::default()
    };
    let mut lines = vec![header];
    for runs in &entry.display.lines {
        let mut spans = vec![Span::raw(BODY_INDENT)];
        spans.extend(runs.iter().map(|run| {
            let style = if run.bold {
                body.add_modifier(Modifier::BOLD)
            } else {
                body
            };
            Span::styled(run.text.clone(), style)
        }));
        lines.push(Line::from(spans));
    }
    lines
}

fn draw_input(frame: &mut Frame, layout: &ChatLayout, view: &ChatViewModel, field: &InputField) {
    let dim = Style::default().fg(Color::DarkGray);
    let mut border = input_border().border_style(dim);
    if !view.input_enabled {
        border = border.title(Span::styled(WAITING_HINT, dim.add_modifier(Modifier::ITALIC)));
    }
    frame.render_widget(border, layout.input_block);
    frame.render_widget(Paragraph::new(Span::styled(INPUT_PROMPT, dim)), layout.prompt);

    let width = layout.input.width;
    let (cursor_row, cursor_column) = field.cursor(width);
    // Keep the cursor row in view when the text outgrows the field.
    let first = cursor_row.saturating_add(1).saturating_sub(layout.input.height);
    let text_style = if view.input_enabled { Style::default() } else { dim };
    let rows: Vec<Line> = field
        .rows(width)
        .into_iter()
        .skip(usize::from(first))
        .map(|row| Line::styled(row, text_style))
        .collect();
    frame.render_widget(Paragraph::new(rows), layout.input);

    let send_style = if view.input_enabled {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        dim
    };
    frame.render_widget(
        Paragraph::new(Span::styled(SEND_LABEL, send_style)),
        layout.send_button,
    );

    if view.input_enabled {
        frame.set_cursor_position(Position::new(
            layout.input.x.saturating_add(cursor_column),
            layout.input.y.saturating_add(cursor_row.saturating_sub(first)),
        ));
    }
}
