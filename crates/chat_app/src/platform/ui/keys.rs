use chat_core::Msg;
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use tui_input::InputRequest;

use super::constants::{PAGE_SCROLL_LINES, WHEEL_SCROLL_LINES};
use super::layout::ChatLayout;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    Widget(Msg),
    /// Edit of the input field; the new value goes to the widget.
    Edit(InputRequest),
    ScrollUp(u16),
    ScrollDown(u16),
    Quit,
}

/// Maps a terminal key event onto the widget bindings.
///
/// Enter sends; Enter with Shift (or Alt, for terminals that cannot report
/// Shift+Enter) inserts a line break in the input field.
pub fn key_to_action(key: KeyEvent) -> Option<UiAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let modifiers = key.modifiers;
    let control = modifiers.contains(KeyModifiers::CONTROL);
    let action = match key.code {
        KeyCode::Char('c' | 'q') if control => UiAction::Quit,
        KeyCode::Char('s') if control => UiAction::Widget(Msg::SendClicked),
        KeyCode::Char('w') if control => UiAction::Edit(InputRequest::DeletePrevWord),
        KeyCode::Char('u') if control => UiAction::Edit(InputRequest::DeleteLine),
        KeyCode::Esc => UiAction::Quit,
        KeyCode::Enter if modifiers.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT) => {
            UiAction::Edit(InputRequest::InsertChar('\n'))
        }
        KeyCode::Enter => UiAction::Widget(Msg::EnterPressed { shift: false }),
        KeyCode::Backspace => UiAction::Edit(InputRequest::DeletePrevChar),
        KeyCode::Delete => UiAction::Edit(InputRequest::DeleteNextChar),
        KeyCode::Left => UiAction::Edit(InputRequest::GoToPrevChar),
        KeyCode::Right => UiAction::Edit(InputRequest::GoToNextChar),
        KeyCode::Home => UiAction::Edit(InputRequest::GoToStart),
        KeyCode::End => UiAction::Edit(InputRequest::GoToEnd),
        KeyCode::PageUp => UiAction::ScrollUp(PAGE_SCROLL_LINES),
        KeyCode::PageDown => UiAction::ScrollDown(PAGE_SCROLL_LINES),
        KeyCode::Char(ch) if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            UiAction::Edit(InputRequest::InsertChar(ch))
        }
        _ => return None,
    };
    Some(action)
}

pub fn mouse_to_action(mouse: MouseEvent, layout: &ChatLayout) -> Option<UiAction> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left)
            if layout.hits_send_button(mouse.column, mouse.row) =>
        {
            Some(UiAction::Widget(Msg::SendClicked))
        }
        MouseEventKind::ScrollUp => Some(UiAction::ScrollUp(WHEEL_SCROLL_LINES)),
        MouseEventKind::ScrollDown => Some(UiAction::ScrollDown(WHEEL_SCROLL_LINES)),
        _ => None,
    }
}
