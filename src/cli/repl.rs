use std::fmt::Display;
use std::io::{self, BufRead, IsTerminal, Write};

use nu_ansi_term::Color;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use thiserror::Error;
use tracing::{debug, warn};

use crate::cli::config::CliConfig;
use crate::db::Database;
use crate::types::NuonError;

/// Failures that end a REPL or script run.
#[derive(Debug, Error)]
pub enum ReplError {
    /// Line editor failure other than Ctrl-C / Ctrl-D.
    #[error("line editor: {0}")]
    Readline(#[from] ReadlineError),
    /// Reading input or writing results failed.
    #[error("i/o: {0}")]
    Io(#[from] io::Error),
    /// A statement failed in non-interactive mode.
    #[error("line {line}: {source}")]
    Statement {
        /// 1-based input line of the statement.
        line: usize,
        /// What went wrong.
        source: NuonError,
    },
}

/// A database plus the output conventions of the command line.
#[derive(Debug)]
pub struct Session {
    db: Database,
    paint: bool,
}

impl Session {
    /// Wraps `db`. Errors are painted when stderr is a terminal.
    pub fn new(db: Database) -> Self {
        Self {
            db,
            paint: io::stderr().is_terminal(),
        }
    }

    /// Borrows the database.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Runs one statement, writing each matched vertex on its own line.
    ///
    /// A closed pipe drops the remaining rows quietly; any other write
    /// failure is returned.
    pub fn run_statement<W: Write>(
        &mut self,
        statement: &str,
        out: &mut W,
    ) -> Result<(), NuonError> {
        let result = self.db.execute(statement)?;
        for row in result.rows() {
            match writeln!(out, "{row}") {
                Ok(()) => {}
                Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
                    debug!("cli.output.closed");
                    break;
                }
                Err(err) => return Err(err.into()),
            }
        }
        Ok(())
    }

    /// Runs one statement per non-empty line of `input`, skipping `#`
    /// comments. Stops at the first failing statement.
    pub fn run_script<R: BufRead, W: Write>(
        &mut self,
        input: R,
        out: &mut W,
    ) -> Result<usize, ReplError> {
        let mut executed = 0;
        for (idx, line) in input.lines().enumerate() {
            let line = line?;
            let statement = line.trim();
            if statement.is_empty() || statement.starts_with('#') {
                continue;
            }
            self.run_statement(statement, out)
                .map_err(|source| ReplError::Statement {
                    line: idx + 1,
                    source,
                })?;
            executed += 1;
        }
        out.flush()?;
        debug!(executed, "cli.script.done");
        Ok(executed)
    }

    /// Interactive loop until `.exit`, `.quit` or Ctrl-D.
    pub fn run_interactive(&mut self, config: &CliConfig) -> Result<(), ReplError> {
        let mut rl = DefaultEditor::new()?;
        if let Some(history) = config.history_file() {
            if let Err(err) = rl.load_history(history) {
                debug!(path = %history.display(), error = %err, "cli.history.load_skipped");
            }
        }
        println!("nuon {}", env!("CARGO_PKG_VERSION"));
        println!("Type .help for instructions, .exit to quit.");

        let stdout = io::stdout();
        loop {
            match rl.readline(config.prompt()) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    if let Err(err) = rl.add_history_entry(line) {
                        debug!(error = %err, "cli.history.add_skipped");
                    }
                    if line.starts_with('.') {
                        match line {
                            ".exit" | ".quit" => break,
                            ".help" => print_help(),
                            _ => self.report(format_args!("unknown meta-command {line}")),
                        }
                        continue;
                    }
                    let mut out = stdout.lock();
                    if let Err(err) = self.run_statement(line, &mut out) {
                        self.report(err);
                    }
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err.into()),
            }
        }

        if let Some(history) = config.history_file() {
            if let Err(err) = rl.save_history(history) {
                warn!(path = %history.display(), error = %err, "cli.history.save_failed");
            }
        }
        Ok(())
    }

    /// Prints `error: <message>` to stderr.
    pub fn report(&self, message: impl Display) {
        let label = if self.paint {
            Color::Red.bold().paint("error:").to_string()
        } else {
            "error:".to_owned()
        };
        eprintln!("{label} {message}");
    }
}

fn print_help() {
    println!("Statements:");
    println!("  CREATE (p:Person {{name:\"Matt\"}}), (q:Person), (p)-[:knows]->(q)");
    println!("  MATCH (p:Person {{name:\"Matt\"}}) SET p.name = \"jim\" SET (p)-[:likes]->(q)");
    println!("Commands:");
    println!("  .help         Show this message");
    println!("  .exit, .quit  Leave the REPL");
}
