//! TUI Widgets - UI Components
//!
//! Stateless builders that turn state into Ratatui primitives.

use ratatui::text::{Line, Span};

use super::theme::{icons, PlaygroundTheme};
use crate::language;
use crate::session::Session;

/// Selector row: every language by display name, the current one highlighted
pub fn language_selector(current: &str, theme: &PlaygroundTheme) -> Line<'static> {
    let mut spans = Vec::with_capacity(language::all().len() * 2);
    for (i, lang) in language::all().iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let style = if lang.id == current {
            theme.selected()
        } else {
            theme.text()
        };
        spans.push(Span::styled(
            format!(" {} ", language::display_name(lang.id)),
            style,
        ));
    }
    Line::from(spans)
}

/// Run button label with its icon
pub fn run_button(session: &Session, theme: &PlaygroundTheme) -> Line<'static> {
    let icon = if session.is_busy() {
        icons::BUSY
    } else {
        icons::RUN
    };
    Line::from(Span::styled(
        format!(" {} {} ", icon, session.run_label()),
        theme.run_button(session.is_busy()),
    ))
    .centered()
}

/// Common widget utilities
pub mod utils {
    /// Make service output safe to draw as literal text.
    ///
    /// Newlines are kept, tabs become four spaces, carriage returns are
    /// dropped, other control characters (ANSI escapes included) become `�`.
    pub fn literal_text(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '\n' => out.push('\n'),
                '\t' => out.push_str("    "),
                '\r' => {}
                c if c.is_control() => out.push('\u{FFFD}'),
                c => out.push(c),
            }
        }
        out
    }

    /// Format a duration in milliseconds as `850ms` or `1.25s`
    pub fn format_elapsed(ms: u128) -> String {
        if ms < 1000 {
            format!("{}ms", ms)
        } else {
            format!("{:.2}s", ms as f64 / 1000.0)
        }
    }

    /// Truncate string with ellipsis (char-boundary safe)
    pub fn truncate(s: &str, max_len: usize) -> String {
        if s.chars().count() <= max_len {
            s.to_string()
        } else if max_len <= 3 {
            s.chars().take(max_len).collect()
        } else {
            let head: String = s.chars().take(max_len - 3).collect();
            format!("{}...", head)
        }
    }
}
