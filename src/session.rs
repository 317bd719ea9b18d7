//! Session - the playground's view state
//!
//! One record holds the current language, the source buffer, the last
//! execution result and the outstanding run (if any). It only changes
//! through the transitions below:
//!
//! ```text
//! select_language ──► code = default(lang), output = "", pending run cancelled
//! edit_code       ──► code = text
//! begin_run       ──► pending = ticket          (refused while busy)
//! finish_run      ──► output = result, idle    (ignored for stale tickets)
//! ```

use crate::controller::RunOutcome;
use crate::language;
use crate::piston::ExecutionRequest;

/// Run button label while idle
pub const RUN_LABEL: &str = "Run Code";

/// Run button label while a run is outstanding
pub const BUSY_LABEL: &str = "Loading...";

/// Identifies one run; results from any other ticket are dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunTicket(u64);

impl RunTicket {
    pub fn id(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    language: String,
    code: String,
    output: String,
    pending: Option<RunTicket>,
    tickets_issued: u64,
}

impl Session {
    /// Open a session on `language` with its starter snippet loaded
    pub fn new(language: &str) -> Self {
        Self {
            language: language.to_string(),
            code: language::default_code(language).to_string(),
            output: String::new(),
            pending: None,
            tickets_issued: 0,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    /// Busy Flag: a run has started and not yet settled
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn run_label(&self) -> &'static str {
        if self.is_busy() {
            BUSY_LABEL
        } else {
            RUN_LABEL
        }
    }

    /// Switch language: load its starter, clear the result, drop any pending run.
    ///
    /// Returns the ticket of the run that was cancelled, if any.
    pub fn select_language(&mut self, id: &str) -> Option<RunTicket> {
        self.language = id.to_string();
        self.code = language::default_code(id).to_string();
        self.output.clear();
        self.pending.take()
    }

    /// Replace the source buffer verbatim
    pub fn edit_code(&mut self, text: impl Into<String>) {
        self.code = text.into();
    }

    /// Request for the current language and buffer
    pub fn request(&self) -> ExecutionRequest {
        ExecutionRequest::for_source(&self.language, self.code.clone())
    }

    /// Mark a run as started.
    ///
    /// Returns `None` while another run is outstanding. The previous result
    /// stays visible until the new one settles.
    pub fn begin_run(&mut self) -> Option<(RunTicket, ExecutionRequest)> {
        if self.is_busy() {
            return None;
        }
        self.tickets_issued += 1;
        let ticket = RunTicket(self.tickets_issued);
        self.pending = Some(ticket);
        Some((ticket, self.request()))
    }

    /// Settle a run. Returns `false` (and changes nothing) for stale tickets.
    pub fn finish_run(&mut self, ticket: RunTicket, outcome: &RunOutcome) -> bool {
        if self.pending != Some(ticket) {
            return false;
        }
        self.pending = None;
        self.output = outcome.display_text();
        true
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(language::DEFAULT_LANGUAGE)
    }
}
