pub mod anthro;
pub mod kabbalah;
pub mod runes;

use std::io::{self, IsTerminal, Write};
use std::path::Path;

use colored::Colorize;
use serde::Serialize;

use sg_core::export::{self, SaveMode};
use sg_core::{KdfConfig, KdfMode, OracleConfig, Progress, SeedPolicy, SortError};

use crate::GlobalArgs;

/// Why a subcommand failed.
#[derive(Debug, thiserror::Error)]
pub enum Failure {
    /// Rejected before any hashing.
    #[error("{0}")]
    Invalid(String),
    /// Failed while building, reading back, or saving a reading.
    #[error("{0}")]
    Fatal(String),
}

impl Failure {
    /// Process exit status: 2 for bad input, as clap uses for usage errors.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Invalid(_) => 2,
            Self::Fatal(_) => 1,
        }
    }
}

impl From<SortError> for Failure {
    fn from(e: SortError) -> Self {
        if e.is_invalid_input() {
            Self::Invalid(e.to_string())
        } else {
            Self::Fatal(e.to_string())
        }
    }
}

/// Build the oracle configuration from the global flags.
fn oracle_config(global: &GlobalArgs, timestamped: bool) -> OracleConfig {
    let mode = if global.fallback_kdf {
        KdfMode::IteratedSha256
    } else {
        KdfMode::Pbkdf2
    };
    let seed = if timestamped {
        SeedPolicy::WithTimestamp
    } else {
        SeedPolicy::QueryOnly
    };
    tracing::debug!(iterations = global.iterations, ?mode, ?seed, "oracle configured");
    OracleConfig::default()
        .with_kdf(KdfConfig::default().with_iterations(global.iterations).with_mode(mode))
        .with_seed(seed)
}

/// Status line on stderr while a reading is worked out.
///
/// Only drawn when stderr is a terminal, so piped output stays clean.
struct Status {
    live: bool,
}

impl Status {
    fn new() -> Self {
        Self {
            live: io::stderr().is_terminal(),
        }
    }

    fn report(&mut self, progress: Progress) {
        if !self.live {
            return;
        }
        let mut err = io::stderr().lock();
        match progress {
            Progress::Done => {
                let _ = write!(err, "\r\x1b[2K");
            }
            other => {
                let _ = write!(err, "\r\x1b[2K  {}", other.to_string().dimmed());
            }
        }
        let _ = err.flush();
    }
}

/// Save a finished reading and say where it went.
fn save_reading<T: Serialize>(reading: &T, path: Option<&Path>) -> Result<(), Failure> {
    let Some(path) = path else {
        return Ok(());
    };
    let mode = export::save(reading, path)
        .map_err(|e| Failure::Fatal(format!("failed to save reading: {e}")))?;
    let verb = match mode {
        SaveMode::JsonLines => "Appended",
        SaveMode::Json => "Saved",
    };
    println!("  {} reading to {}", verb.green(), path.display());
    Ok(())
}

fn print_header(title: &str, query: &str) {
    println!();
    println!("  {}", title.bold());
    println!("  {} {}", "Query:".dimmed(), query.italic());
}

fn print_footer(timestamp: &str, timestamp_seeded: bool, authentication: &str) {
    println!();
    let seeded = if timestamp_seeded { " (seeded)" } else { "" };
    println!("  {} {timestamp}{seeded}", "Cast at:".dimmed());
    println!("  {} {}", "Auth:".dimmed(), authentication.yellow().bold());
}
