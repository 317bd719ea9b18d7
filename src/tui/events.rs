//! Event Handling - Keyboard input processing

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use super::state::{AppState, PanelFocus};
use crate::language;
use crate::session::RunTicket;

/// Actions that can be triggered by user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Run,
    /// Language switched; carries the run it cancelled, if any
    LanguageChanged {
        cancelled: Option<RunTicket>,
    },
    NextPanel,
    PrevPanel,
    ScrollUp,
    ScrollDown,
    /// Key belongs to the editor widget
    Edit(KeyEvent),
    None,
}

/// Handle keyboard events
pub fn handle_key_event(key: KeyEvent, state: &mut AppState) -> Action {
    // Global keybindings (work in any panel)
    match (key.modifiers, key.code) {
        // Quit: Ctrl+C or Ctrl+Q
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => return Action::Quit,
        (KeyModifiers::CONTROL, KeyCode::Char('q')) => return Action::Quit,

        // Run: F5 or Ctrl+R
        (_, KeyCode::F(5)) | (KeyModifiers::CONTROL, KeyCode::Char('r')) => return run(state),

        // Panel navigation: Tab / Shift+Tab
        (KeyModifiers::NONE, KeyCode::Tab) => {
            state.focus = state.focus.next();
            return Action::NextPanel;
        }
        (_, KeyCode::BackTab) => {
            state.focus = state.focus.prev();
            return Action::PrevPanel;
        }

        _ => {}
    }

    // Panel-specific keybindings
    match state.focus {
        PanelFocus::Selector => match key.code {
            KeyCode::Left | KeyCode::Up | KeyCode::Char('h') | KeyCode::Char('k') => {
                switch_language(state, false)
            }
            KeyCode::Right | KeyCode::Down | KeyCode::Char('l') | KeyCode::Char('j') => {
                switch_language(state, true)
            }
            KeyCode::Enter => run(state),
            _ => Action::None,
        },
        PanelFocus::Editor => Action::Edit(key),
        PanelFocus::Output => match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                state.scroll_output(-1);
                Action::ScrollUp
            }
            KeyCode::Down | KeyCode::Char('j') => {
                state.scroll_output(1);
                Action::ScrollDown
            }
            KeyCode::PageUp => {
                state.scroll_output(-10);
                Action::ScrollUp
            }
            KeyCode::PageDown => {
                state.scroll_output(10);
                Action::ScrollDown
            }
            KeyCode::Enter => run(state),
            _ => Action::None,
        },
    }
}

/// The run action is disabled while a run is outstanding
fn run(state: &AppState) -> Action {
    if state.session.is_busy() {
        Action::None
    } else {
        Action::Run
    }
}

fn switch_language(state: &mut AppState, forward: bool) -> Action {
    let next = language::cycle(state.session.language(), forward);
    let cancelled = state.session.select_language(next.id);
    state.last_run = None;
    state.output_scroll = 0;
    Action::LanguageChanged { cancelled }
}

/// Poll for key presses with timeout
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<KeyEvent>> {
    if event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(Some(key));
            }
        }
    }
    Ok(None)
}
