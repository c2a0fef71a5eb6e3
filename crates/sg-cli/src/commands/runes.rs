use std::path::Path;

use chrono::{DateTime, Utc};
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use sg_core::Progress;
use sg_oracle::RuneCaster;
use sg_oracle::runes::SPREAD_SIZES;

use super::Failure;
use crate::GlobalArgs;

pub fn run(
    global: &GlobalArgs,
    query: &str,
    number: usize,
    timestamped: bool,
    at: Option<DateTime<Utc>>,
    save: Option<&Path>,
) -> Result<(), Failure> {
    if !SPREAD_SIZES.contains(&number) {
        return Err(Failure::Invalid(format!(
            "rune count must be 1, 3, or 5 (got {number})"
        )));
    }

    let caster = RuneCaster::new(super::oracle_config(global, timestamped));
    let mut status = super::Status::new();
    let reading = caster
        .cast_with_progress(query, number, at, &mut |p: Progress| status.report(p))?;

    super::print_header("Rune Casting", &reading.query);

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Position", "Rune", "Orientation", "Meaning"]);
    for drawn in &reading.drawn_runes {
        let rune = format!(
            "{} {} ({})",
            drawn.rune.symbol, drawn.rune.name, drawn.rune.phonetic
        );
        table.add_row(vec![
            drawn.position.as_str(),
            rune.as_str(),
            drawn.orientation(),
            drawn.meaning(),
        ]);
    }
    println!("{table}");

    super::print_footer(
        &reading.timestamp,
        reading.timestamp_seeded,
        &reading.authentication,
    );
    if reading.drawn_runes.iter().any(|d| d.is_reversed) {
        println!("  {}", "Reversed runes speak of blocked or inverted energy.".dimmed());
    }

    super::save_reading(&reading, save)
}
