//! Parlance - a terminal console shell around a pluggable evaluator.
//!
//! # Usage
//!
//! ```bash
//! parlance
//! parlance --eval "scheme-eval --batch"
//! parlance --no-mouse --prompt "λ> "
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use parlance::app::App;
use parlance::config::PreferenceStore;
use parlance::evaluator::{CommandEvaluator, EchoEvaluator, Evaluator};

/// A terminal console shell around a pluggable evaluator
#[derive(Parser, Debug)]
#[command(name = "parlance", version, about, long_about = None)]
struct Cli {
    /// External evaluator command; each submitted line is appended as the
    /// final argument and stdout becomes the echoed result
    #[arg(long, value_name = "CMD")]
    eval: Option<String>,

    /// Prompt marker shown before the input line
    #[arg(long, value_name = "TEXT")]
    prompt: Option<String>,

    /// Disable pointer-gesture input (mouse capture)
    #[arg(long)]
    no_mouse: bool,

    /// Directory for the persisted font/theme preference slots
    #[arg(long, value_name = "DIR")]
    store_dir: Option<PathBuf>,

    /// Start with session diagnostics mirrored into the transcript
    #[arg(long)]
    trace: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let evaluator: Box<dyn Evaluator> = match cli.eval.as_deref() {
        Some(command_line) => Box::new(
            CommandEvaluator::new(command_line)
                .context("--eval needs a non-empty command line")?,
        ),
        None => Box::new(EchoEvaluator),
    };

    let store = cli
        .store_dir
        .map_or_else(PreferenceStore::open_default, PreferenceStore::new);

    let mut app = App::new(evaluator)
        .with_pointer_input(!cli.no_mouse)
        .with_trace(cli.trace)
        .with_store(store);
    if let Some(prompt) = cli.prompt {
        app = app.with_prompt(prompt);
    }

    app.run().context("Application error")
}
