pub mod add;
pub mod backup;
pub mod categories;
pub mod demo;
pub mod export;
pub mod history;
pub mod init;
pub mod load;
pub mod status;
pub mod summary;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::db::get_connection;
use crate::error::{PurseError, Result};
use crate::models::EntryType;
use crate::settings::Settings;

pub(crate) fn parse_entry_type(s: &str) -> std::result::Result<EntryType, String> {
    s.parse().map_err(|e: PurseError| e.to_string())
}

/// Open the ledger named by `settings`, refusing to create one implicitly.
pub(crate) fn open_ledger(settings: &Settings) -> Result<rusqlite::Connection> {
    let db_path = settings.db_path();
    if !db_path.exists() {
        return Err(PurseError::Settings(format!(
            "No database found at {}\nRun `purse init` to set up.",
            db_path.display()
        )));
    }
    get_connection(&db_path)
}

#[derive(Parser)]
#[command(name = "purse", version, about = "Track income and expenses and see where each month went.")]
pub struct Cli {
    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up purse: choose a data directory and initialize the database.
    Init {
        /// Path for purse data (default: ~/Documents/purse)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Switch to an existing purse data directory.
    Load {
        /// Path to data directory containing purse.db
        path: String,
    },
    /// Manage categories.
    Category {
        #[command(subcommand)]
        command: CategoryCommands,
    },
    /// Record a transaction.
    Add {
        /// Amount, e.g. 12.50
        amount: String,
        /// Entry type: expense or income
        #[arg(long = "type", value_parser = parse_entry_type, default_value = "expense")]
        entry_type: EntryType,
        /// Category name (default: first category of the type)
        #[arg(long)]
        category: Option<String>,
        /// Free-text description
        #[arg(long, short, default_value = "")]
        description: String,
        /// Record on this date (YYYY-MM-DD) instead of now
        #[arg(long)]
        date: Option<String>,
    },
    /// List transactions, newest first.
    History {
        /// Only show this entry type
        #[arg(long = "type", value_parser = parse_entry_type)]
        entry_type: Option<EntryType>,
        /// Show at most this many rows
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Monthly income, expenses and savings.
    Summary,
    /// Export all transactions to CSV.
    Export {
        /// Output path (default: <data_dir>/exports/transactions-YYYY-MM-DD.csv)
        #[arg(long)]
        output: Option<String>,
    },
    /// Back up the database.
    Backup {
        /// Output path (default: <data_dir>/backups/purse-YYYYMMDD-HHMMSS.db)
        #[arg(long)]
        output: Option<String>,
    },
    /// Show current database and summary statistics.
    Status,
    /// Load sample transactions to explore purse.
    Demo,
    /// Print shell completions.
    Completions {
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Add a category.
    Add {
        /// Category name, e.g. 'Food'
        name: String,
        /// Entry type: expense or income
        #[arg(long = "type", value_parser = parse_entry_type, default_value = "expense")]
        entry_type: EntryType,
    },
    /// List categories.
    List {
        /// Only show this entry type
        #[arg(long = "type", value_parser = parse_entry_type)]
        entry_type: Option<EntryType>,
    },
}
