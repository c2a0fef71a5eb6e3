use std::path::Path;

use chrono::{DateTime, Utc};
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use sg_core::Progress;
use sg_oracle::kabbalah::RevealedSephirah;
use sg_oracle::{ReadingType, TreeOracle, TreeReading};

use super::Failure;
use crate::GlobalArgs;

pub fn run(
    global: &GlobalArgs,
    query: &str,
    reading_type: u32,
    paths: Option<usize>,
    timestamped: bool,
    at: Option<DateTime<Utc>>,
    save: Option<&Path>,
) -> Result<(), Failure> {
    let reading_type = ReadingType::from_selector(reading_type)?;

    let oracle = TreeOracle::new(super::oracle_config(global, timestamped));
    let mut status = super::Status::new();
    let reading = oracle
        .read_with_progress(query, reading_type, paths, at, &mut |p: Progress| {
            status.report(p)
        })?;

    super::print_header(&format!("Tree of Life: {}", reading.reading_type), &reading.query);
    print_sephirot(&reading);
    print_paths(&reading);
    super::print_footer(
        &reading.timestamp,
        reading.timestamp_seeded,
        &reading.authentication,
    );

    super::save_reading(&reading, save)
}

fn print_sephirot(reading: &TreeReading) {
    match &reading.worlds {
        Some(worlds) => {
            for group in worlds {
                println!();
                println!("  {}", format!("{} World", group.world).cyan().bold());
                println!("{}", sephirah_table(&group.sephirot));
            }
        }
        None => println!("{}", sephirah_table(&reading.sephirot)),
    }
}

fn sephirah_table(sephirot: &[RevealedSephirah]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Position", "Sephirah", "Pillar", "State", "Token"]);
    for s in sephirot {
        table.add_row(vec![
            s.position.clone(),
            s.sephirah.to_string(),
            s.sephirah.pillar.to_string(),
            s.state.to_string(),
            s.token.clone(),
        ]);
    }
    table
}

fn print_paths(reading: &TreeReading) {
    println!();
    let source = if reading.path_count_derived {
        " (count drawn from the query)"
    } else {
        ""
    };
    println!(
        "  {} {}{}",
        "Paths:".bold(),
        reading.paths.len(),
        source.dimmed()
    );
    if reading.paths.is_empty() {
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Position", "Path", "Token"]);
    for p in &reading.paths {
        table.add_row(vec![p.position.clone(), p.path.to_string(), p.token.clone()]);
    }
    println!("{table}");
}
