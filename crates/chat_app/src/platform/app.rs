use std::io::{self, Stdout};
use std::time::Instant;

use anyhow::Context;
use chat_core::{update, ChatWidget, Msg};
use chat_engine::EngineHandle;
use chat_logging::{chat_debug, chat_info};
use chrono::Local;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use super::config;
use super::effects::EffectRunner;
use super::logging;
use super::ui::constants::TICK;
use super::ui::input::InputField;
use super::ui::keys::{key_to_action, mouse_to_action, UiAction};
use super::ui::render::ChatBox;

type ChatTerminal = Terminal<CrosstermBackend<Stdout>>;

pub fn run_app() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("resolve working directory")?;
    let (settings, warning) = config::load_config(&cwd);
    logging::initialize(settings.log_destination, settings.log_level.to_filter());
    config::log_config(&settings, warning.as_deref());

    let engine = EngineHandle::new(&settings.client_settings()).context("start chat engine")?;
    let mut runner = EffectRunner::new(engine);
    let mut widget = ChatWidget::new(settings.widget_config());

    let mut guard = TerminalGuard::enter().context("prepare terminal")?;
    let result = event_loop(&mut widget, &runner, &mut guard.terminal);
    drop(guard);
    runner.shutdown();
    chat_info!("Chat widget closed");
    result.context("terminal event loop")
}

/// Raw mode and alternate screen for the lifetime of the UI.
struct TerminalGuard {
    terminal: ChatTerminal,
    enhanced_keys: bool,
}

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        // Needed for the terminal to report Shift+Enter distinctly.
        let enhanced_keys = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if enhanced_keys {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
            )?;
        }
        chat_debug!("Terminal ready, keyboard enhancement={}", enhanced_keys);
        Ok(Self {
            terminal: Terminal::new(CrosstermBackend::new(stdout))?,
            enhanced_keys,
        })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let backend = self.terminal.backend_mut();
        if self.enhanced_keys {
            let _ = execute!(backend, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(backend, DisableMouseCapture, LeaveAlternateScreen);
        let _ = disable_raw_mode();
        let _ = self.terminal.show_cursor();
    }
}

fn event_loop(
    widget: &mut ChatWidget,
    runner: &EffectRunner,
    terminal: &mut ChatTerminal,
) -> io::Result<()> {
    let mut chat_box = ChatBox::new();
    let mut field = InputField::default();
    let mut needs_redraw = true;

    loop {
        for msg in runner.poll_events() {
            needs_redraw |= dispatch(widget, msg, runner, &mut chat_box);
        }
        needs_redraw |= chat_box.tick(Instant::now());

        if needs_redraw {
            let view = widget.view();
            field.sync(&view.input);
            chat_box.sync(&view, Local::now());
            terminal.draw(|frame| chat_box.draw(frame, &view, &field))?;
            needs_redraw = false;
        }

        if !event::poll(TICK)? {
            continue;
        }
        let action = match event::read()? {
            Event::Key(key) => key_to_action(key),
            Event::Mouse(mouse) => mouse_to_action(mouse, chat_box.layout()),
            Event::Resize(..) => {
                needs_redraw = true;
                None
            }
            _ => None,
        };

        match action {
            Some(UiAction::Quit) => return Ok(()),
            Some(UiAction::Widget(msg)) => {
                needs_redraw |= dispatch(widget, msg, runner, &mut chat_box);
            }
            Some(UiAction::Edit(request)) => {
                // Refused edits are undone by the next sync.
                if let Some(value) = field.edit(request) {
                    dispatch(widget, Msg::InputChanged(value), runner, &mut chat_box);
                }
                needs_redraw = true;
            }
            Some(UiAction::ScrollUp(lines)) => {
                chat_box.scroll_up(lines);
                needs_redraw = true;
            }
            Some(UiAction::ScrollDown(lines)) => {
                chat_box.scroll_down(lines);
                needs_redraw = true;
            }
            None => {}
        }
    }
}

/// Runs one message through `update` and its effects. Returns whether the
/// view changed.
fn dispatch(
    widget: &mut ChatWidget,
    msg: Msg,
    runner: &EffectRunner,
    chat_box: &mut ChatBox,
) -> bool {
    let state = std::mem::take(widget);
    let (state, effects) = update(state, msg);
    *widget = state;

    let outcome = runner.run(effects);
    if let Some(duration) = outcome.scroll {
        chat_box.scroll_to_bottom(Instant::now(), duration);
    }

    let mut changed = widget.consume_dirty();
    for follow_up in outcome.follow_up {
        changed |= dispatch(widget, follow_up, runner, chat_box);
    }
    changed
}
