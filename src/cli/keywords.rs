use comfy_table::{Cell, Table};

use crate::cli::open_ledger;
use crate::error::Result;
use crate::tags;

pub fn add(keyword: &str, tag: &str) -> Result<()> {
    let mut ledger = open_ledger()?;
    let change = ledger.add_keyword(keyword, tag)?;
    println!(
        "Added keyword {}: '{}' \u{2192} {} ({} transactions retagged)",
        change.keyword.id, change.keyword.keyword, change.keyword.tag, change.propagation.updated
    );
    Ok(())
}

pub fn list() -> Result<()> {
    let ledger = open_ledger()?;
    let mut table = Table::new();
    table.set_header(vec!["ID", "Keyword", "Tag"]);
    for kw in ledger.keywords()? {
        table.add_row(vec![Cell::new(kw.id), Cell::new(kw.keyword), Cell::new(kw.tag)]);
    }
    println!("Keywords\n{table}");
    Ok(())
}

pub fn match_description(description: &str) -> Result<()> {
    let ledger = open_ledger()?;
    let tags = tags::canonical(ledger.match_tags(description)?);
    if tags.is_empty() {
        println!("No keywords match");
    } else {
        println!("{tags}");
    }
    Ok(())
}

pub fn delete(id: i64) -> Result<()> {
    let mut ledger = open_ledger()?;
    let change = ledger.remove_keyword(id)?;
    println!(
        "Deleted keyword {id}: '{}' \u{2192} {} ({} transactions retagged)",
        change.keyword.keyword, change.keyword.tag, change.propagation.updated
    );
    Ok(())
}
