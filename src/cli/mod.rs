pub mod chart;
pub mod import;
pub mod init;
pub mod keywords;
pub mod retag;
pub mod transactions;

use clap::{Parser, Subcommand};

use crate::error::{Result, TagbookError};
use crate::ledger::Ledger;
use crate::settings::{db_path, get_data_dir};
use crate::store::SqliteStore;

pub(crate) fn open_ledger() -> Result<Ledger<SqliteStore>> {
    std::fs::create_dir_all(get_data_dir())?;
    Ok(Ledger::new(SqliteStore::open(&db_path())?))
}

pub(crate) fn parse_month(month: &str) -> Result<(i32, u32)> {
    let invalid = || TagbookError::InvalidMonth(month.to_string());
    let (y, m) = month.trim().split_once('-').ok_or_else(invalid)?;
    let year: i32 = y.parse().map_err(|_| invalid())?;
    let month: u32 = m.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}

#[derive(Parser)]
#[command(name = "tagbook", version, about = "Keyword auto-tagging and spending charts for CSV bank exports.")]
pub struct Cli {
    /// Increase log output (-v info, -vv debug). RUST_LOG overrides this.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Choose a data directory and initialize the database.
    Init {
        /// Path for tagbook data (default: ~/Documents/tagbook)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Import a CSV file: date, description, amount spent, amount received.
    Import {
        /// Path to the CSV file
        file: String,
    },
    /// Manage keyword tagging rules.
    Keywords {
        #[command(subcommand)]
        command: KeywordsCommands,
    },
    /// List all transactions, newest first.
    Transactions,
    /// Recompute the tags of every transaction from the current keywords.
    Retag,
    /// Show spending and income charts.
    Chart {
        #[command(subcommand)]
        command: ChartCommands,
        /// Print the chart payload as JSON
        #[arg(long, global = true)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum KeywordsCommands {
    /// Add a keyword and retag all transactions.
    Add {
        /// Text to look for in descriptions (case-insensitive)
        keyword: String,
        /// Tag to apply when the keyword matches
        #[arg(long)]
        tag: String,
    },
    /// List all keywords.
    List,
    /// Show which tags a description would receive.
    Match {
        description: String,
    },
    /// Delete a keyword by ID and retag all transactions.
    Delete {
        /// Keyword ID (shown in `tagbook keywords list`)
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum ChartCommands {
    /// One month, grouped by day.
    Month {
        /// Month: YYYY-MM
        month: String,
    },
    /// One year, grouped by month.
    Year {
        year: i32,
    },
    /// Everything, grouped by year.
    All,
}
