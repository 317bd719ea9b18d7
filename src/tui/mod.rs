//! TUI Module - Code Playground
//!
//! Full-screen playground: language selector, editor, run button, output.
//!
//! Architecture:
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    UI LAYER (app.rs, widgets/)                      │
//! │  Pure rendering. Reads AppState, draws panels.                      │
//! └─────────────────────────────────────────────────────────────────────┘
//!                               ▲
//!                               │ AppState
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                DOMAIN LAYER (state.rs, events.rs)                   │
//! │  Session transitions driven by keys and finished runs.              │
//! └─────────────────────────────────────────────────────────────────────┘
//!                               ▲
//!                               │ RuntimeEvent
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    CONNECTOR LAYER (runtime/)                       │
//! │  RunBridge: spawns executions, aborts cancelled ones.               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

mod app;
mod events;
mod state;
mod theme;

pub mod runtime;
pub mod widgets;

pub use app::TuiApp;
pub use events::Action;
pub use state::{AppState, PanelFocus, RunStatus};
pub use theme::PlaygroundTheme;

use crate::controller::RunController;

/// Run the playground until the user quits
pub async fn run(language: &str, controller: RunController) -> anyhow::Result<()> {
    let app = TuiApp::new(language, controller);
    app.run().await
}
