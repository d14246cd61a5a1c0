use comfy_table::{Cell, CellAlignment, Table};

use crate::cli::open_ledger;
use crate::error::Result;
use crate::fmt::money;
use crate::settings::load_settings;

pub fn list() -> Result<()> {
    let symbol = load_settings().currency_symbol;
    let ledger = open_ledger()?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Description", "Spent", "Received", "Tags"]);
    for txn in ledger.transactions()? {
        table.add_row(vec![
            Cell::new(txn.id),
            Cell::new(txn.date),
            Cell::new(txn.description),
            Cell::new(money(txn.amount_spent, &symbol)).set_alignment(CellAlignment::Right),
            Cell::new(money(txn.amount_received, &symbol)).set_alignment(CellAlignment::Right),
            Cell::new(txn.tags),
        ]);
    }
    println!("Transactions\n{table}");
    Ok(())
}
