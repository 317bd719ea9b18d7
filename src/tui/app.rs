//! TUI Application - Main entry point and run loop

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use tui_textarea::TextArea;

use super::events::{handle_key_event, poll_event, Action};
use super::runtime::{RunBridge, RuntimeEvent};
use super::state::{AppState, PanelFocus, RunSummary};
use super::theme::{icons, PlaygroundTheme};
use super::widgets::{self, utils};
use crate::controller::RunController;
use crate::language;
use crate::session::Session;

/// TUI Application
pub struct TuiApp {
    state: AppState,
    theme: PlaygroundTheme,
    editor: TextArea<'static>,
    bridge: RunBridge,
}

impl TuiApp {
    /// Create the playground on `language` with runs going through `controller`
    pub fn new(language: &str, controller: RunController) -> Self {
        let state = AppState::new(Session::new(language));
        let theme = PlaygroundTheme::new();
        let editor = TextArea::default();

        let mut app = Self {
            state,
            theme,
            editor,
            bridge: RunBridge::new(controller),
        };
        app.reload_editor();
        app
    }

    /// Run the TUI application
    pub async fn run(mut self) -> anyhow::Result<()> {
        let mut terminal = self.setup_terminal()?;

        tracing::info!(
            language = self.state.session.language(),
            executor = self.bridge.controller().executor_name(),
            "Playground started"
        );

        let result = self.main_loop(&mut terminal).await;

        self.restore_terminal(&mut terminal)?;

        result
    }

    /// Setup terminal for TUI
    fn setup_terminal(&self) -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    /// Restore terminal to normal state
    fn restore_terminal(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> anyhow::Result<()> {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        Ok(())
    }

    /// Main event loop
    async fn main_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> anyhow::Result<()> {
        let tick_rate = Duration::from_millis(16); // ~60fps

        loop {
            // Apply finished runs
            while let Some(event) = self.bridge.try_next() {
                self.apply_runtime_event(event);
            }

            terminal.draw(|frame| self.render(frame))?;

            if let Some(key) = poll_event(tick_rate)? {
                let action = handle_key_event(key, &mut self.state);
                self.dispatch(action);
            }

            if self.state.should_quit {
                break;
            }

            // Let spawned runs make progress on this worker too
            tokio::task::yield_now().await;
        }

        Ok(())
    }

    /// Carry out an action produced by the key handler
    fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.state.should_quit = true,
            Action::Run => self.start_run(),
            Action::LanguageChanged { cancelled } => {
                if let Some(ticket) = cancelled {
                    self.bridge.cancel(ticket);
                }
                self.reload_editor();
                tracing::debug!(language = self.state.session.language(), "Language changed");
            }
            Action::NextPanel | Action::PrevPanel => self.style_editor(),
            Action::Edit(key) => {
                if self.editor.input(key) {
                    self.state.session.edit_code(self.editor.lines().join("\n"));
                }
            }
            Action::ScrollUp | Action::ScrollDown | Action::None => {}
        }
    }

    fn start_run(&mut self) {
        if let Some((ticket, request)) = self.state.session.begin_run() {
            self.bridge.spawn(ticket, request);
        }
    }

    fn apply_runtime_event(&mut self, event: RuntimeEvent) {
        tracing::debug!(event = %event.description(), "Runtime event");
        match event {
            RuntimeEvent::RunFinished {
                ticket,
                outcome,
                elapsed,
            } => {
                if self.state.session.finish_run(ticket, &outcome) {
                    self.state.output_scroll = 0;
                    self.state.last_run = Some(RunSummary {
                        success: outcome.is_success(),
                        elapsed,
                    });
                }
            }
        }
    }

    /// Load the session's buffer into a fresh editor
    fn reload_editor(&mut self) {
        let lines: Vec<String> = self
            .state
            .session
            .code()
            .split('\n')
            .map(String::from)
            .collect();
        self.editor = TextArea::new(lines);
        self.style_editor();
    }

    /// Editor block and cursor follow language and focus
    fn style_editor(&mut self) {
        let focused = self.state.focus == PanelFocus::Editor;
        let title = format!(
            " ✎ EDITOR {} {} ",
            icons::SEPARATOR,
            language::display_name(self.state.session.language())
        );
        self.editor.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(self.theme.border(focused))
                .title(title),
        );
        self.editor.set_style(self.theme.text());
        self.editor.set_cursor_line_style(Style::default());
        self.editor.set_cursor_style(if focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        });
    }

    /// Render the UI
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),      // Header
                Constraint::Length(3),      // Language selector
                Constraint::Min(8),         // Editor
                Constraint::Length(3),      // Run button
                Constraint::Percentage(30), // Output
                Constraint::Length(1),      // Footer
            ])
            .split(area);

        self.render_header(frame, chunks[0]);
        self.render_selector(frame, chunks[1]);
        frame.render_widget(&self.editor, chunks[2]);
        self.render_run_button(frame, chunks[3]);
        self.render_output(frame, chunks[4]);
        self.render_footer(frame, chunks[5]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let status = self.state.status();
        let mut spans = vec![
            Span::styled(format!("{} RUNPAD", icons::LOGO), self.theme.header()),
            Span::raw(format!("  {}  ", icons::SEPARATOR)),
            Span::styled(
                language::display_name(self.state.session.language()),
                self.theme.accent(),
            ),
            Span::raw(format!("  {}  ", icons::SEPARATOR)),
            Span::styled(status.to_string(), self.theme.status(status)),
        ];

        if let Some(summary) = self.state.last_run {
            spans.push(Span::raw(format!("  {}  ", icons::SEPARATOR)));
            spans.push(Span::styled(
                format!("⏱ {}", utils::format_elapsed(summary.elapsed.as_millis())),
                self.theme.text(),
            ));
        }

        spans.push(Span::raw(format!("  {}  ", icons::SEPARATOR)));
        spans.push(Span::styled(
            utils::truncate(self.bridge.controller().executor_name(), 12),
            self.theme.dimmed(),
        ));

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.header())
            .title(" CODE PLAYGROUND ");

        frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }

    fn render_selector(&self, frame: &mut Frame, area: Rect) {
        let focused = self.state.focus == PanelFocus::Selector;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border(focused))
            .title(" LANGUAGE ");

        let line = widgets::language_selector(self.state.session.language(), &self.theme);
        frame.render_widget(Paragraph::new(line).block(block), area);
    }

    fn render_run_button(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.run_button(self.state.session.is_busy()));

        let line = widgets::run_button(&self.state.session, &self.theme);
        frame.render_widget(Paragraph::new(line).block(block), area);
    }

    fn render_output(&self, frame: &mut Frame, area: Rect) {
        let focused = self.state.focus == PanelFocus::Output;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border(focused))
            .title(" OUTPUT ");

        let style = match self.state.last_run {
            Some(RunSummary { success: false, .. }) => self.theme.error(),
            _ => self.theme.text(),
        };

        let text = utils::literal_text(self.state.session.output());
        let paragraph = Paragraph::new(text)
            .style(style)
            .wrap(Wrap { trim: false })
            .scroll((self.state.output_scroll, 0))
            .block(block);
        frame.render_widget(paragraph, area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let help = Line::from(vec![
            Span::styled(" [F5]", self.theme.accent()),
            Span::styled(" run  ", self.theme.dimmed()),
            Span::styled("[Tab]", self.theme.accent()),
            Span::styled(" focus  ", self.theme.dimmed()),
            Span::styled("[←→]", self.theme.accent()),
            Span::styled(" language  ", self.theme.dimmed()),
            Span::styled("[↑↓]", self.theme.accent()),
            Span::styled(" scroll  ", self.theme.dimmed()),
            Span::styled("[^Q]", self.theme.accent()),
            Span::styled("uit", self.theme.dimmed()),
        ]);

        frame.render_widget(Paragraph::new(help), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piston::{ExecutionResponse, MockExecutor};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use std::sync::Arc;

    fn app_with(mock: MockExecutor, language: &str) -> TuiApp {
        let controller = RunController::new(Arc::new(mock), Duration::from_secs(5));
        TuiApp::new(language, controller)
    }

    fn draw(app: &TuiApp) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    fn buffer_to_string(buffer: &Buffer) -> String {
        let mut result = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                result.push_str(buffer[(x, y)].symbol());
            }
            result.push('\n');
        }
        result
    }

    fn type_text(app: &mut TuiApp, text: &str) {
        for c in text.chars() {
            let key = KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
            let action = handle_key_event(key, &mut app.state);
            app.dispatch(action);
        }
    }

    #[test]
    fn test_initial_render() {
        let app = app_with(MockExecutor::new(), "python");
        let screen = draw(&app);

        assert!(screen.contains("RUNPAD"));
        assert!(screen.contains("Run Code"));
        assert!(screen.contains("print(\"Hello, World!\")"));
        assert!(screen.contains(" Python "));
        assert!(screen.contains("IDLE"));
    }

    #[test]
    fn test_editor_changes_reach_session() {
        let mut app = app_with(MockExecutor::new(), "ruby");
        app.dispatch(Action::Edit(KeyEvent::new(KeyCode::End, KeyModifiers::NONE)));
        type_text(&mut app, "!");

        assert_eq!(app.state.session.code(), "puts \"Hello, World!\"!");
        assert_eq!(app.state.session.language(), "ruby");
    }

    #[test]
    fn test_language_change_reloads_editor() {
        let mut app = app_with(MockExecutor::new(), "javascript");
        type_text(&mut app, "garbage");

        app.state.focus = PanelFocus::Selector;
        let action = handle_key_event(
            KeyEvent::new(KeyCode::Right, KeyModifiers::NONE),
            &mut app.state,
        );
        app.dispatch(action);

        assert_eq!(app.state.session.language(), "python");
        assert_eq!(app.editor.lines().join("\n"), language::default_code("python"));
        assert!(draw(&app).contains("EDITOR │ Python"));
    }

    #[tokio::test]
    async fn test_run_shows_loading_then_output() {
        let mock = MockExecutor::new().with_delay(Duration::from_millis(20));
        mock.queue_response(ExecutionResponse::with_output("Hello, World!\n"));
        let mut app = app_with(mock, "python");

        app.dispatch(Action::Run);
        assert!(app.state.session.is_busy());
        assert!(draw(&app).contains("Loading..."));

        let event = app.bridge.next().await.unwrap();
        app.apply_runtime_event(event);

        let screen = draw(&app);
        assert!(!app.state.session.is_busy());
        assert!(screen.contains("Run Code"));
        assert!(screen.contains("Hello, World!"));
        assert!(screen.contains("DONE"));
    }

    #[tokio::test]
    async fn test_failed_run_renders_error() {
        let mock = MockExecutor::new();
        mock.queue_failure("timeout");
        let mut app = app_with(mock, "go");

        app.dispatch(Action::Run);
        let event = app.bridge.next().await.unwrap();
        app.apply_runtime_event(event);

        assert_eq!(app.state.session.output(), "Error: timeout");
        assert!(draw(&app).contains("FAILED"));
    }

    #[tokio::test]
    async fn test_language_switch_resets_failed_status() {
        let mock = MockExecutor::new();
        mock.queue_failure("boom");
        let mut app = app_with(mock, "javascript");

        app.dispatch(Action::Run);
        let event = app.bridge.next().await.unwrap();
        app.apply_runtime_event(event);
        assert!(draw(&app).contains("FAILED"));

        app.state.focus = PanelFocus::Selector;
        let action = handle_key_event(
            KeyEvent::new(KeyCode::Right, KeyModifiers::NONE),
            &mut app.state,
        );
        app.dispatch(action);

        let screen = draw(&app);
        assert_eq!(app.state.session.output(), "");
        assert!(!screen.contains("FAILED"));
        assert!(screen.contains("IDLE"));
    }

    #[test]
    fn test_output_is_drawn_literally() {
        let mut app = app_with(MockExecutor::new(), "c");
        let (ticket, _) = app.state.session.begin_run().unwrap();
        let outcome = crate::controller::RunOutcome::Completed(ExecutionResponse::with_output(
            "\u{1b}[1mbold\u{1b}[0m",
        ));
        app.state.session.finish_run(ticket, &outcome);

        let screen = draw(&app);
        assert!(screen.contains("[1mbold"));
    }
}
