mod charts;
mod cli;
mod csv_source;
mod db;
mod error;
mod fmt;
mod importer;
mod keywords;
mod ledger;
mod logging;
mod models;
mod propagator;
mod settings;
mod store;
mod tags;
#[cfg(test)]
mod test_utils;

use clap::Parser;

use cli::{Cli, Commands, KeywordsCommands};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Import { file } => cli::import::run(&file),
        Commands::Keywords { command } => match command {
            KeywordsCommands::Add { keyword, tag } => cli::keywords::add(&keyword, &tag),
            KeywordsCommands::List => cli::keywords::list(),
            KeywordsCommands::Match { description } => cli::keywords::match_description(&description),
            KeywordsCommands::Delete { id } => cli::keywords::delete(id),
        },
        Commands::Transactions => cli::transactions::list(),
        Commands::Retag => cli::retag::run(),
        Commands::Chart { command, json } => cli::chart::run(command, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
