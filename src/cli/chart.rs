use colored::Colorize;
use comfy_table::{Cell, CellAlignment, Table};

use crate::charts::{ChartPayload, ChartScope};
use crate::cli::{open_ledger, parse_month, ChartCommands};
use crate::error::Result;
use crate::fmt::money;
use crate::settings::load_settings;

pub fn run(command: ChartCommands, json: bool) -> Result<()> {
    let scope = match command {
        ChartCommands::Month { month } => {
            let (year, month) = parse_month(&month)?;
            ChartScope::Month { year, month }
        }
        ChartCommands::Year { year } => ChartScope::Year { year },
        ChartCommands::All => ChartScope::AllTime,
    };
    let payload = open_ledger()?.chart(scope)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        print_tables(scope, &payload, &load_settings().currency_symbol);
    }
    Ok(())
}

fn amount_cell(val: f64, symbol: &str) -> Cell {
    Cell::new(money(val, symbol)).set_alignment(CellAlignment::Right)
}

fn print_tables(scope: ChartScope, payload: &ChartPayload, symbol: &str) {
    let mut table = Table::new();
    table.set_header(vec!["Period", "Spending", "Income", "Net"]);
    let rows = payload
        .labels
        .iter()
        .zip(&payload.spending)
        .zip(&payload.income);
    for ((label, spent), received) in rows {
        let net = received - spent;
        let net_text = if net >= 0.0 {
            money(net, symbol).green()
        } else {
            money(net, symbol).red()
        };
        table.add_row(vec![
            Cell::new(label),
            amount_cell(*spent, symbol),
            amount_cell(*received, symbol),
            Cell::new(net_text).set_alignment(CellAlignment::Right),
        ]);
    }
    let total_spent: f64 = payload.spending.iter().sum();
    let total_received: f64 = payload.income.iter().sum();
    table.add_row(vec![
        Cell::new("Total".bold()),
        amount_cell(total_spent, symbol),
        amount_cell(total_received, symbol),
        amount_cell(total_received - total_spent, symbol),
    ]);
    println!("{}\n{table}", scope.title());

    if payload.tag_totals.is_empty() {
        return;
    }
    let mut tags: Vec<(&String, &f64)> = payload.tag_totals.iter().collect();
    tags.sort_by(|a, b| b.1.total_cmp(a.1));
    let mut ttable = Table::new();
    ttable.set_header(vec!["Tag", "Spending", "%"]);
    for (tag, total) in tags {
        let pct = if total_spent > 0.0 { total / total_spent * 100.0 } else { 0.0 };
        ttable.add_row(vec![
            Cell::new(tag),
            amount_cell(*total, symbol),
            Cell::new(format!("{pct:.1}%")).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("\nSpending by Tag\n{ttable}");
}
