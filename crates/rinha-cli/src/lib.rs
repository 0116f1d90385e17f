//! Command-line driver for the Rinha evaluator.
//!
//! Reads a JSON program from disk, evaluates it with `print` lines going to
//! stdout, and optionally echoes the value of the root expression.

use anyhow::{Context, Result};
use clap::Parser;
use rinha_eval::{EvalConfig, EvalError, Evaluator, PrintHandler, Value};
use rinha_types::ast::Program;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Once;

/// Evaluate a JSON-encoded Rinha program.
#[derive(Parser, Debug)]
#[command(name = "rinha", version)]
pub struct Cli {
    /// Program file: a JSON document with a top-level `expression`
    pub input: PathBuf,

    /// JSON file with evaluator settings, e.g. `{"gas_limit": 1000}`
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Maximum number of terms reduced before evaluation is aborted;
    /// overrides the config file
    #[arg(long, env = "RINHA_GAS_LIMIT")]
    pub gas_limit: Option<u64>,

    /// Print the value of the root expression after evaluation
    #[arg(long)]
    pub show_result: bool,

    /// Discard `print` output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Settings from `--config` (or defaults), with command-line overrides applied.
    pub fn config(&self) -> Result<EvalConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("invalid config {}", path.display()))?
            }
            None => EvalConfig::default(),
        };
        if let Some(gas_limit) = self.gas_limit {
            config = config.with_gas_limit(gas_limit);
        }
        Ok(config)
    }

    fn print_handler(&self) -> PrintHandler {
        if self.quiet {
            PrintHandler::Silent
        } else {
            PrintHandler::Stdout
        }
    }
}

static TRACING_INIT: Once = Once::new();

/// Install the global tracing subscriber.
///
/// Logs go to stderr so they never interleave with program output.
/// Filtered by `RUST_LOG` (e.g. `RUST_LOG=rinha_eval=trace`), warnings only
/// by default. Safe to call multiple times.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(filter)
            .try_init();
    });
}

/// Run the driver for parsed arguments.
pub fn run(cli: &Cli) -> Result<()> {
    let (value, _) = evaluate_file(&cli.input, cli.config()?, cli.print_handler())?;
    if cli.show_result {
        println!("{value}");
    }
    Ok(())
}

/// Decode and evaluate the program at `path`.
///
/// Returns the root value together with the print handler, so callers
/// using [`PrintHandler::Buffer`] can inspect what was printed.
pub fn evaluate_file(
    path: &Path,
    config: EvalConfig,
    output: PrintHandler,
) -> Result<(Value, PrintHandler)> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let program = Program::from_reader(file)
        .map_err(EvalError::from)
        .with_context(|| format!("failed to decode {}", path.display()))?;

    tracing::info!(path = %path.display(), gas_limit = config.gas_limit, "evaluating");
    let mut evaluator = Evaluator::with_config(config, output);
    let value = evaluator
        .eval_program(&program)
        .with_context(|| format!("failed to evaluate {}", path.display()))?;
    Ok((value, evaluator.output))
}
