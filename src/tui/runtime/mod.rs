//! Runtime Bridge - Connector Layer
//!
//! Runs executions off the UI loop and hands results back as events.
//! At most one run is in flight; a language switch aborts it.

use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::controller::{RunController, RunOutcome};
use crate::piston::ExecutionRequest;
use crate::session::RunTicket;

// ─────────────────────────────────────────────────────────────────────────────
// Runtime Events
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum RuntimeEvent {
    RunFinished {
        ticket: RunTicket,
        outcome: RunOutcome,
        elapsed: Duration,
    },
}

impl RuntimeEvent {
    /// Short description for logging
    pub fn description(&self) -> String {
        match self {
            Self::RunFinished {
                ticket, outcome, ..
            } => {
                let verdict = if outcome.is_success() { "completed" } else { "failed" };
                format!("Run #{} {}", ticket.id(), verdict)
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Bridge
// ─────────────────────────────────────────────────────────────────────────────

pub struct RunBridge {
    controller: RunController,
    tx: mpsc::UnboundedSender<RuntimeEvent>,
    rx: mpsc::UnboundedReceiver<RuntimeEvent>,
    in_flight: Option<(RunTicket, JoinHandle<()>)>,
}

impl RunBridge {
    pub fn new(controller: RunController) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            controller,
            tx,
            rx,
            in_flight: None,
        }
    }

    pub fn controller(&self) -> &RunController {
        &self.controller
    }

    /// Start `request` in the background. Must be called inside a Tokio runtime.
    pub fn spawn(&mut self, ticket: RunTicket, request: ExecutionRequest) {
        let controller = self.controller.clone();
        let tx = self.tx.clone();

        tracing::debug!(ticket = ticket.id(), language = %request.language, "Spawning run");

        let handle = tokio::spawn(async move {
            let started = Instant::now();
            let outcome = controller.execute(request).await;
            // Receiver gone means the UI already exited
            let _ = tx.send(RuntimeEvent::RunFinished {
                ticket,
                outcome,
                elapsed: started.elapsed(),
            });
        });

        if let Some((_, previous)) = self.in_flight.replace((ticket, handle)) {
            previous.abort();
        }
    }

    /// Abort the run holding `ticket`, if it is still in flight
    pub fn cancel(&mut self, ticket: RunTicket) {
        if matches!(self.in_flight, Some((current, _)) if current == ticket) {
            if let Some((_, handle)) = self.in_flight.take() {
                handle.abort();
                tracing::debug!(ticket = ticket.id(), "Run cancelled");
            }
        }
    }

    /// Next finished run, without waiting
    pub fn try_next(&mut self) -> Option<RuntimeEvent> {
        let event = self.rx.try_recv().ok()?;
        let RuntimeEvent::RunFinished { ticket, .. } = &event;
        if matches!(self.in_flight, Some((current, _)) if current == *ticket) {
            self.in_flight = None;
        }
        Some(event)
    }

    /// Wait for the next finished run
    pub async fn next(&mut self) -> Option<RuntimeEvent> {
        let event = self.rx.recv().await?;
        let RuntimeEvent::RunFinished { ticket, .. } = &event;
        if matches!(self.in_flight, Some((current, _)) if current == *ticket) {
            self.in_flight = None;
        }
        Some(event)
    }
}
