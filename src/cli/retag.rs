use colored::Colorize;

use crate::cli::open_ledger;
use crate::error::Result;

pub fn run() -> Result<()> {
    let mut ledger = open_ledger()?;
    let report = ledger.retag()?;
    println!(
        "{} scanned, {} retagged, {} unchanged",
        report.scanned, report.updated, report.unchanged
    );
    if !report.is_complete() {
        println!("{}", format!("{} could not be updated:", report.failed()).red());
        for (id, reason) in &report.failures {
            println!("  transaction {id}: {reason}");
        }
    }
    Ok(())
}
