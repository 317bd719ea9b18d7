//! Runpad CLI - terminal code playground

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use runpad::controller::{RunController, RunOutcome};
use runpad::error::{FixSuggestion, PlaygroundError};
use runpad::language;
use runpad::{PlaygroundConfig, Session};

#[derive(Parser)]
#[command(name = "runpad")]
#[command(about = "Runpad - code playground backed by the Piston execution API")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.config/runpad/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Piston execute endpoint URL
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Seconds before a run is reported as timed out
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Executor backend (piston, mock)
    #[arg(long, global = true)]
    executor: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive playground (default)
    Tui {
        /// Language selected at startup
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Run a source file once and print its output
    Run {
        /// Path to the source file
        file: PathBuf,

        /// Language identifier (inferred from the extension when omitted)
        #[arg(short, long)]
        language: Option<String>,
    },

    /// List supported languages
    Languages,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui { language: None });

    // The TUI owns the terminal, so its logs go to a file
    match command {
        Commands::Tui { .. } => init_tracing(Some(log_file_path())),
        _ => init_tracing(None),
    }

    let config = match load_config(
        cli.config.as_deref(),
        cli.endpoint,
        cli.timeout,
        cli.executor,
    ) {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    let result = match command {
        Commands::Tui { language } => {
            let language = language.unwrap_or_else(|| config.default_language.clone());
            match run_tui(&config, &language).await {
                Ok(()) => Ok(()),
                Err(e) => {
                    eprintln!("{} {:#}", "Error:".red().bold(), e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Run { file, language } => run_file(&config, &file, language).await,
        Commands::Languages => {
            list_languages();
            Ok(())
        }
    };

    if let Err(e) = result {
        exit_with(&e);
    }
}

fn exit_with(e: &PlaygroundError) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), e);
    if let Some(suggestion) = e.fix_suggestion() {
        eprintln!("  {} {}", "Fix:".yellow(), suggestion);
    }
    std::process::exit(1);
}

/// Defaults < config file < environment < flags
fn load_config(
    path: Option<&Path>,
    endpoint: Option<String>,
    timeout: Option<u64>,
    executor: Option<String>,
) -> Result<PlaygroundConfig, PlaygroundError> {
    let mut config = match path {
        Some(path) => PlaygroundConfig::load_from(path)?,
        None => PlaygroundConfig::load()?,
    }
    .with_env()?;

    if let Some(endpoint) = endpoint {
        config.endpoint = endpoint;
    }
    if let Some(timeout) = timeout {
        config.timeout_secs = timeout;
    }
    if let Some(executor) = executor {
        config.executor = executor;
    }

    config.validate()?;
    tracing::debug!(?config, "Configuration loaded");
    Ok(config)
}

fn log_file_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("runpad")
        .join("runpad.log")
}

/// Initialize tracing to stderr, or to `log_file` when given.
///
/// If the log file cannot be opened, logging stays off.
fn init_tracing(log_file: Option<PathBuf>) {
    let filter = |default: &str| {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
    };

    match log_file {
        None => tracing_subscriber::fmt()
            .with_env_filter(filter("warn"))
            .with_writer(std::io::stderr)
            .init(),
        Some(path) => {
            if let Some(parent) = path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            if let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) {
                tracing_subscriber::fmt()
                    .with_env_filter(filter("info"))
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .init();
            }
        }
    }
}

async fn run_tui(config: &PlaygroundConfig, language: &str) -> anyhow::Result<()> {
    let controller = RunController::from_config(config)?;
    runpad::tui::run(language, controller).await
}

async fn run_file(
    config: &PlaygroundConfig,
    file: &Path,
    language_override: Option<String>,
) -> Result<(), PlaygroundError> {
    let code = tokio::fs::read_to_string(file).await?;

    let language = match language_override {
        Some(language) => language,
        None => file
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(language::from_extension)
            .map(|lang| lang.id.to_string())
            .ok_or_else(|| PlaygroundError::UnknownLanguage {
                path: file.display().to_string(),
            })?,
    };

    let controller = RunController::from_config(config)?;
    let mut session = Session::new(&language);
    session.edit_code(code);

    eprintln!(
        "{} Running {} as {} via {}",
        "→".cyan(),
        file.display().to_string().cyan(),
        language::api_name(&language).cyan().bold(),
        controller.executor_name()
    );

    let Some(outcome) = controller.run_session(&mut session).await else {
        return Ok(());
    };

    match outcome {
        RunOutcome::Completed(_) => {
            let output = session.output();
            if output.ends_with('\n') {
                print!("{}", output);
            } else {
                println!("{}", output);
            }
            Ok(())
        }
        RunOutcome::Failed(err) => Err(err),
    }
}

fn list_languages() {
    println!("{}", "Supported languages:".cyan().bold());
    for lang in language::all() {
        println!(
            "  {:<12} {:<12} {} {}",
            lang.id,
            language::display_name(lang.id),
            "→".dimmed(),
            lang.api_name
        );
    }
}
