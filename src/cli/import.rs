use std::path::PathBuf;

use colored::Colorize;

use crate::cli::open_ledger;
use crate::csv_source;
use crate::error::Result;

pub fn run(file: &str) -> Result<()> {
    let rows = csv_source::read_file(&PathBuf::from(file))?;
    let mut ledger = open_ledger()?;
    let result = ledger.ingest(rows)?;

    println!(
        "Successfully uploaded {} transactions, {} skipped",
        result.created, result.skipped
    );
    for failure in &result.failures {
        println!("  {} row {}: {}", "skipped".yellow(), failure.row, failure.error);
    }
    Ok(())
}
