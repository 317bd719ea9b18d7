//! Runpad - terminal code playground backed by the Piston execution API

pub mod config;
pub mod controller;
pub mod error;
pub mod language;
pub mod piston;
pub mod session;
pub mod tui;

pub use config::PlaygroundConfig;
pub use controller::{RunController, RunOutcome};
pub use error::{FixSuggestion, PlaygroundError};
pub use piston::{ExecutionRequest, ExecutionResponse, Executor};
pub use session::{RunTicket, Session};
