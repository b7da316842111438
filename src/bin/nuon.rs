//! Binary entry point for the nuon graph shell.
#![forbid(unsafe_code)]

use std::error::Error;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use clap::Parser;
use nuon::cli::{CliConfig, Session};
use nuon::Database;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "nuon",
    version,
    about = "In-memory property graph with a small pattern language"
)]
struct Cli {
    #[arg(long, env = "NUON_CONFIG", help = "Path to the TOML config file")]
    config: Option<PathBuf>,

    #[arg(
        short = 'e',
        long = "execute",
        value_name = "STATEMENT",
        conflicts_with = "script",
        help = "Run a statement and exit (repeatable, runs in order)"
    )]
    execute: Vec<String>,

    #[arg(long, value_name = "FILE", help = "Run one statement per line of FILE")]
    script: Option<PathBuf>,

    #[arg(
        long,
        value_name = "FILTER",
        help = "Log filter, e.g. `debug` or `nuon=trace` (defaults to RUST_LOG)"
    )]
    log_level: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = CliConfig::load(cli.config)?;
    let mut session = Session::new(Database::with_config(config.engine_config()));

    if let Some(path) = cli.script {
        let file = File::open(&path)
            .map_err(|err| format!("failed to open script {}: {err}", path.display()))?;
        session.run_script(BufReader::new(file), &mut io::stdout().lock())?;
        return Ok(());
    }

    if !cli.execute.is_empty() {
        let mut out = io::stdout().lock();
        for statement in &cli.execute {
            session.run_statement(statement, &mut out)?;
        }
        return Ok(());
    }

    session.run_interactive(&config)?;
    Ok(())
}
