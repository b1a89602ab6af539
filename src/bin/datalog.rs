//! # Datalog CLI
//!
//! The §6.2 entry point: run a single Datalog source file and print its
//! evaluation trace and query answers. Exit code `0` on success, non-zero
//! on a parse error (reported as `Failure!\n  (<token>,"<lexeme>",<line>)`)
//! or any other fatal evaluation error.
//!
//! ```bash
//! datalog path/to/program.dl
//! ```

use clap::Parser;
use datalog::config::Config;
use datalog::error::DatalogError;
use datalog::{interpreter, parser};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Evaluate a Datalog program and print its rule trace and query answers.
#[derive(Debug, Parser)]
#[command(name = "datalog", version, about)]
struct Cli {
    /// Path to the Datalog source file to evaluate.
    source: PathBuf,

    /// Path to a config file, overriding the default `datalog.toml` lookup.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(&path.to_string_lossy()),
        None => Config::load(),
    }
    .unwrap_or_else(|_| Config::default());

    init_tracing(&config);

    match run(&cli, &config) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, config: &Config) -> datalog::Result<String> {
    let source = std::fs::read_to_string(&cli.source).map_err(|io_err| DatalogError::Parse {
        token_kind: "IO".to_string(),
        lexeme: io_err.to_string(),
        line: 0,
    })?;
    let program = parser::parse_program(&source)?;
    interpreter::run(&program, config.limits.max_passes)
}

/// Render the §6.2 `Failure!` contract for parse (and file-read) errors;
/// other fatal evaluation errors are reported with their own `Display` text,
/// per SPEC_FULL.md §7.
fn report(err: &DatalogError) {
    if let DatalogError::Parse { token_kind, lexeme, line } = err {
        eprintln!("Failure!\n  ({token_kind},\"{lexeme}\",{line})");
    } else {
        eprintln!("{err}");
    }
    error!(error = %err, "evaluation aborted");
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.logging.level).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    if config.logging.format == "json" {
        let _ = subscriber.json().try_init();
    } else {
        let _ = subscriber.try_init();
    }
}
