use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use sg_core::{Progress, SortError};
use sg_oracle::anthro::{Aspect, SPREAD_SIZES};
use sg_oracle::{AnthroOracle, TotemPool, TotemReading};

use super::Failure;
use crate::GlobalArgs;

/// Tokens per row in the pool grid.
const GRID_COLUMNS: usize = 8;

pub struct AnthroArgs {
    pub query: Option<String>,
    pub number: Option<usize>,
    pub size: usize,
    pub reversals: bool,
    pub pick: Option<Vec<String>>,
    pub save: Option<PathBuf>,
}

pub fn run(global: &GlobalArgs, args: AnthroArgs) -> Result<(), Failure> {
    let stdin = io::stdin();
    let mut reader = stdin.lock();

    if let Some(n) = args.number {
        check_count(n)?;
    }
    let query = match args.query {
        Some(q) => q,
        None => prompt(&mut reader, "Your question: ")?
            .ok_or_else(|| Failure::Invalid("no question given".into()))?,
    };
    let count = match args.number {
        Some(n) => n,
        None => ask_count(&mut reader)?,
    };

    let config = super::oracle_config(global, false).with_reversals(args.reversals);
    let oracle = AnthroOracle::new(config).with_pool_size(args.size);
    oracle.check_request(count, args.pick.as_deref())?;

    let mut status = super::Status::new();
    let pool =
        oracle.build_pool_with_progress(&query, None, &mut |p: Progress| status.report(p))?;

    super::print_header("Anthro Oracle", pool.query());
    print_pool(&pool);

    let reading = match args.pick {
        Some(picks) => pool.reveal(count, &picks)?,
        None => ask_picks(&mut reader, &pool, count)?,
    };

    print_reading(&reading);
    super::print_footer(
        &reading.timestamp,
        reading.timestamp_seeded,
        &reading.authentication,
    );

    super::save_reading(&reading, args.save.as_deref())
}

fn check_count(n: usize) -> Result<(), Failure> {
    if SPREAD_SIZES.contains(&n) {
        Ok(())
    } else {
        Err(Failure::Invalid(format!(
            "totem count must be 1, 3, or 5 (got {n})"
        )))
    }
}

/// Print `message` and read one trimmed line. `None` on end of input.
fn prompt(reader: &mut impl BufRead, message: &str) -> Result<Option<String>, Failure> {
    print!("{message}");
    io::stdout()
        .flush()
        .map_err(|e| Failure::Fatal(e.to_string()))?;

    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) => Ok(None),
        Ok(_) => Ok(Some(line.trim().to_string())),
        Err(e) => Err(Failure::Fatal(e.to_string())),
    }
}

fn ask_count(reader: &mut impl BufRead) -> Result<usize, Failure> {
    loop {
        let Some(answer) = prompt(reader, "How many totems? (1, 3, or 5) [3]: ")? else {
            return Err(Failure::Invalid("no totem count given".into()));
        };
        if answer.is_empty() {
            return Ok(3);
        }
        match answer.parse::<usize>() {
            Ok(n) if SPREAD_SIZES.contains(&n) => return Ok(n),
            _ => println!("{}", "Choose 1, 3, or 5.".yellow()),
        }
    }
}

/// Ask for picks until the count and prefix lengths are right.
///
/// A prefix that matches nothing, or more than one token, ends the reading.
fn ask_picks(
    reader: &mut impl BufRead,
    pool: &TotemPool,
    count: usize,
) -> Result<TotemReading, Failure> {
    let message = format!("Pick {count} token(s), comma-separated (3+ characters each): ");
    loop {
        let Some(answer) = prompt(reader, &message)? else {
            return Err(Failure::Invalid("no tokens picked".into()));
        };
        let picks: Vec<&str> = answer
            .split([',', ' '])
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        match pool.reveal(count, &picks) {
            Ok(reading) => return Ok(reading),
            Err(e @ (SortError::PickCount { .. } | SortError::PrefixTooShort(_))) => {
                println!("{}", e.to_string().yellow());
            }
            Err(e) => return Err(e.into()),
        }
    }
}

fn print_pool(pool: &TotemPool) {
    println!();
    println!(
        "  {} {} tokens. Trust your instinct.",
        "Pool:".bold(),
        pool.pool().len()
    );

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    for row in pool.tokens().chunks(GRID_COLUMNS) {
        table.add_row(row.to_vec());
    }
    println!("{table}");
}

fn print_reading(reading: &TotemReading) {
    println!();
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Position", "Token", "Totem", "Element", "Virtue", "Shadow", "Gift", "Aspect", "Auth",
    ]);
    for drawn in &reading.totems {
        let totem = &drawn.totem;
        table.add_row(vec![
            drawn.position.clone(),
            totem.token.clone(),
            format!("{} {}", totem.species, totem.role),
            totem.element.to_string(),
            totem.virtue.to_string(),
            totem.shadow.to_string(),
            totem.gift.to_string(),
            totem.aspect.to_string(),
            totem.auth(),
        ]);
    }
    println!("{table}");

    if reading.totems.iter().any(|t| t.totem.aspect == Aspect::Shadowed) {
        println!(
            "  {}",
            "A shadowed totem speaks through its weakness.".dimmed()
        );
    }
}
