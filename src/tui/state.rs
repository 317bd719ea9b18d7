//! AppState - Domain Layer
//!
//! The playground session plus the UI-only bits (focus, scroll, status line).

use std::time::Duration;

use crate::session::Session;

// ─────────────────────────────────────────────────────────────────────────────
// Core State
// ─────────────────────────────────────────────────────────────────────────────

/// Main application state
#[derive(Debug)]
pub struct AppState {
    // Language, buffer, result, busy flag
    pub session: Session,

    // Last settled run
    pub last_run: Option<RunSummary>,

    // UI state
    pub focus: PanelFocus,
    pub output_scroll: u16,
    pub should_quit: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Session::default())
    }
}

impl AppState {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            last_run: None,
            focus: PanelFocus::Editor,
            output_scroll: 0,
            should_quit: false,
        }
    }

    pub fn status(&self) -> RunStatus {
        if self.session.is_busy() {
            RunStatus::Running
        } else {
            match self.last_run {
                Some(RunSummary { success: false, .. }) => RunStatus::Failed,
                Some(RunSummary { success: true, .. }) => RunStatus::Done,
                None => RunStatus::Idle,
            }
        }
    }

    /// Scroll the output panel, kept between the first and last output line
    pub fn scroll_output(&mut self, delta: i32) {
        let last_line = self.session.output().lines().count().saturating_sub(1);
        let max = u16::try_from(last_line).unwrap_or(u16::MAX);

        let scrolled = if delta < 0 {
            self.output_scroll.saturating_sub(delta.unsigned_abs() as u16)
        } else {
            self.output_scroll.saturating_add(delta as u16)
        };
        self.output_scroll = scrolled.min(max);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Run Status
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Idle,
    Running,
    Done,
    Failed,
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "IDLE"),
            Self::Running => write!(f, "RUNNING"),
            Self::Done => write!(f, "DONE"),
            Self::Failed => write!(f, "FAILED"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub success: bool,
    pub elapsed: Duration,
}

// ─────────────────────────────────────────────────────────────────────────────
// Focus
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelFocus {
    Selector,
    Editor,
    Output,
}

impl PanelFocus {
    pub fn next(self) -> Self {
        match self {
            Self::Selector => Self::Editor,
            Self::Editor => Self::Output,
            Self::Output => Self::Selector,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Selector => Self::Output,
            Self::Editor => Self::Selector,
            Self::Output => Self::Editor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::RunOutcome;
    use crate::piston::ExecutionResponse;

    #[test]
    fn test_focus_cycle_round_trip() {
        let start = PanelFocus::Editor;
        assert_eq!(start.next().next().next(), start);
        assert_eq!(start.prev(), PanelFocus::Selector);
        assert_eq!(start.next().prev(), start);
    }

    #[test]
    fn test_status_follows_session() {
        let mut state = AppState::default();
        assert_eq!(state.status(), RunStatus::Idle);

        let _ = state.session.begin_run().unwrap();
        assert_eq!(state.status(), RunStatus::Running);
        assert_eq!(format!("{}", state.status()), "RUNNING");
    }

    #[test]
    fn test_status_after_failed_run() {
        let mut state = AppState::default();
        state.last_run = Some(RunSummary {
            success: false,
            elapsed: Duration::from_millis(10),
        });
        assert_eq!(state.status(), RunStatus::Failed);
    }

    fn state_with_output(output: &str) -> AppState {
        let mut state = AppState::default();
        let (ticket, _) = state.session.begin_run().unwrap();
        let outcome = RunOutcome::Completed(ExecutionResponse::with_output(output));
        state.session.finish_run(ticket, &outcome);
        state
    }

    #[test]
    fn test_scroll_output_saturates() {
        let mut state = state_with_output("a\nb\nc\nd\n");
        state.scroll_output(-3);
        assert_eq!(state.output_scroll, 0);
        state.scroll_output(2);
        state.scroll_output(-1);
        assert_eq!(state.output_scroll, 1);
    }

    #[test]
    fn test_scroll_output_stops_at_last_line() {
        let mut state = state_with_output("one\ntwo\nthree\n");
        state.scroll_output(10);
        assert_eq!(state.output_scroll, 2);

        let mut empty = AppState::default();
        empty.scroll_output(10);
        assert_eq!(empty.output_scroll, 0);
    }
}
