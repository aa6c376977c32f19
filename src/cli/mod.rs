pub mod charts;
pub mod extracts;
pub mod init;
pub mod status;

use clap::{Parser, Subcommand};
use dialoguer::Confirm;

/// Ask a yes/no question, defaulting to no. Without a terminal the answer is
/// no unless `assume_yes` is set.
pub(crate) fn confirm(prompt: &str, assume_yes: bool) -> bool {
    if assume_yes {
        return true;
    }
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .unwrap_or(false)
}

#[derive(Parser)]
#[command(
    name = "contabil",
    about = "Import charts of accounts and bank extracts for journal entry automation."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Choose a data directory and create the catalogs.
    Init {
        /// Path for contabil data (default: ~/Documents/contabil)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Show the data directory and catalog sizes.
    Status,
    /// Manage charts of accounts.
    Charts {
        #[command(subcommand)]
        command: ChartsCommands,
    },
    /// Manage bank extracts.
    Extracts {
        #[command(subcommand)]
        command: ExtractsCommands,
    },
}

#[derive(Subcommand)]
pub enum ChartsCommands {
    /// List stored charts of accounts.
    List,
    /// Import a chart of accounts from an XLS/XLSX file.
    Import {
        /// Spreadsheet to import
        file: String,
        /// Replace an existing chart for the same company without asking
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Rebuild a stored chart from a new spreadsheet.
    Update {
        /// Entry id (shown in `contabil charts list`)
        id: String,
        /// Spreadsheet to import
        file: String,
    },
    /// Show the accounts of a stored chart.
    Show {
        /// Entry id (shown in `contabil charts list`)
        id: String,
    },
    /// Delete a stored chart.
    Delete {
        /// Entry id (shown in `contabil charts list`)
        id: String,
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ExtractsCommands {
    /// List stored extracts.
    List,
    /// Import a bank extract from an XLS/XLSX file.
    Import {
        /// Spreadsheet to import
        file: String,
        /// Replace an existing extract with the same name without asking
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Rebuild a stored extract from a new spreadsheet.
    Update {
        /// Entry id (shown in `contabil extracts list`)
        id: String,
        /// Spreadsheet to import
        file: String,
    },
    /// Show the rows of a stored extract.
    Show {
        /// Entry id (shown in `contabil extracts list`)
        id: String,
    },
    /// Delete a stored extract.
    Delete {
        /// Entry id (shown in `contabil extracts list`)
        id: String,
        #[arg(long, short = 'y')]
        yes: bool,
    },
}
