//! Playground Theme - Visual Design System
//!
//! Violet/amber palette on a dark background, shared by every panel.

use ratatui::style::{Color, Modifier, Style};

use super::state::RunStatus;

/// Color palette
pub struct PlaygroundTheme {
    // Primary palette
    pub space_violet: Color,
    pub amber_gold: Color,
    pub cyan_teal: Color,
    pub star_white: Color,

    // Status colors
    pub success_green: Color,
    pub warning_orange: Color,
    pub error_red: Color,

    // Dimmed versions
    pub dim_gray: Color,
}

impl Default for PlaygroundTheme {
    fn default() -> Self {
        Self {
            space_violet: Color::Rgb(138, 43, 226), // #8A2BE2
            amber_gold: Color::Rgb(255, 191, 0),    // #FFBF00
            cyan_teal: Color::Rgb(0, 255, 255),     // #00FFFF
            star_white: Color::Rgb(230, 237, 243),  // #E6EDF3

            success_green: Color::Rgb(63, 185, 80),   // #3FB950
            warning_orange: Color::Rgb(210, 153, 34), // #D29922
            error_red: Color::Rgb(248, 81, 73),       // #F85149

            dim_gray: Color::Rgb(128, 128, 128),
        }
    }
}

impl PlaygroundTheme {
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Styles
    // ─────────────────────────────────────────────────────────────────────

    /// Default text style
    pub fn text(&self) -> Style {
        Style::default().fg(self.star_white)
    }

    pub fn dimmed(&self) -> Style {
        Style::default().fg(self.dim_gray)
    }

    /// Bold header style
    pub fn header(&self) -> Style {
        Style::default()
            .fg(self.space_violet)
            .add_modifier(Modifier::BOLD)
    }

    /// Accent style (amber)
    pub fn accent(&self) -> Style {
        Style::default().fg(self.amber_gold)
    }

    /// Highlight style (cyan)
    pub fn highlight(&self) -> Style {
        Style::default()
            .fg(self.cyan_teal)
            .add_modifier(Modifier::BOLD)
    }

    /// Currently selected language in the selector
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.amber_gold)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    }

    pub fn success(&self) -> Style {
        Style::default().fg(self.success_green)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning_orange)
    }

    pub fn error(&self) -> Style {
        Style::default()
            .fg(self.error_red)
            .add_modifier(Modifier::BOLD)
    }

    /// Border of a panel, brighter when focused
    pub fn border(&self, focused: bool) -> Style {
        if focused {
            self.highlight()
        } else {
            self.dimmed()
        }
    }

    pub fn status(&self, status: RunStatus) -> Style {
        match status {
            RunStatus::Idle => self.dimmed(),
            RunStatus::Running => self.warning(),
            RunStatus::Done => self.success(),
            RunStatus::Failed => self.error(),
        }
    }

    /// Run button: amber when ready, dimmed while busy
    pub fn run_button(&self, busy: bool) -> Style {
        if busy {
            self.dimmed().add_modifier(Modifier::ITALIC)
        } else {
            Style::default()
                .fg(self.amber_gold)
                .add_modifier(Modifier::BOLD)
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Icons and Symbols
// ─────────────────────────────────────────────────────────────────────────────

pub mod icons {
    pub const LOGO: &str = "◉";
    pub const RUN: &str = "▶";
    pub const BUSY: &str = "◌";
    pub const SEPARATOR: &str = "│";
}
