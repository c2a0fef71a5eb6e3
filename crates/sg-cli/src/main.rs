//! CLI frontend for the Sortilege oracles.

mod commands;

use std::path::PathBuf;
use std::process;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sg_core::config::DEFAULT_ITERATIONS;

#[derive(Parser)]
#[command(
    name = "sg",
    about = "Sortilege: deterministic divination from cryptographic hashing",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every oracle.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Key-stretching rounds
    #[arg(long, global = true, env = "SG_ITERATIONS", default_value_t = DEFAULT_ITERATIONS)]
    pub iterations: u32,

    /// Use iterated SHA-256 instead of PBKDF2
    #[arg(long, global = true)]
    pub fallback_kdf: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub plain: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Cast Elder Futhark runes
    Runes {
        /// Your question or situation for the runes
        #[arg(short, long)]
        query: String,

        /// Number of runes to cast (1, 3, or 5)
        #[arg(short, long, default_value = "3")]
        number: usize,

        /// Mix the capture time into the seed, so each cast differs
        #[arg(long)]
        timestamped: bool,

        /// Capture time to use instead of now (RFC 3339)
        #[arg(long)]
        at: Option<DateTime<Utc>>,

        /// Save the reading (.jsonl appends, anything else overwrites)
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Read the Tree of Life
    Kabbalah {
        /// Your sacred query
        #[arg(short, long)]
        query: String,

        /// Reading type: 1 single, 3 mind/heart/body, 10 full tree, 4 four worlds
        #[arg(short, long, default_value = "3")]
        reading_type: u32,

        /// Number of paths to draw (0-22); derived from the query if omitted
        #[arg(short, long)]
        paths: Option<usize>,

        /// Mix the capture time into the seed
        #[arg(long)]
        timestamped: bool,

        /// Capture time to use instead of now (RFC 3339)
        #[arg(long)]
        at: Option<DateTime<Utc>>,

        /// Save the reading (.jsonl appends, anything else overwrites)
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Consult the anthro totem oracle
    Anthro {
        /// Your question (prompted for if omitted)
        #[arg(short, long)]
        query: Option<String>,

        /// Number of totems to reveal (1, 3, or 5; prompted for if omitted)
        #[arg(short, long)]
        number: Option<usize>,

        /// Size of the token pool to display
        #[arg(short, long, default_value = "96")]
        size: usize,

        /// Enable shadow aspects (doubles the pool)
        #[arg(short, long)]
        reversals: bool,

        /// Token prefixes to pick, comma-separated (prompted for if omitted)
        #[arg(long, value_delimiter = ',')]
        pick: Option<Vec<String>>,

        /// Save the reading (.jsonl appends, anything else overwrites)
        #[arg(long)]
        save: Option<PathBuf>,
    },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);
    if cli.global.plain {
        colored::control::set_override(false);
    }

    let global = cli.global;
    let result = match cli.command {
        Commands::Runes {
            query,
            number,
            timestamped,
            at,
            save,
        } => commands::runes::run(&global, &query, number, timestamped, at, save.as_deref()),
        Commands::Kabbalah {
            query,
            reading_type,
            paths,
            timestamped,
            at,
            save,
        } => commands::kabbalah::run(
            &global,
            &query,
            reading_type,
            paths,
            timestamped,
            at,
            save.as_deref(),
        ),
        Commands::Anthro {
            query,
            number,
            size,
            reversals,
            pick,
            save,
        } => commands::anthro::run(
            &global,
            commands::anthro::AnthroArgs {
                query,
                number,
                size,
                reversals,
                pick,
                save,
            },
        ),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(e.exit_code());
    }
}
