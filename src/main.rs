mod catalog;
mod chart_importer;
mod cli;
mod error;
mod extract_importer;
mod fmt;
mod importer;
mod models;
mod normalize;
mod settings;
mod sheet;

use clap::Parser;

use cli::{ChartsCommands, Cli, Commands, ExtractsCommands};

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Status => cli::status::run(),
        Commands::Charts { command } => match command {
            ChartsCommands::List => cli::charts::list(),
            ChartsCommands::Import { file, yes } => cli::charts::import(&file, yes),
            ChartsCommands::Update { id, file } => cli::charts::update(&id, &file),
            ChartsCommands::Show { id } => cli::charts::show(&id),
            ChartsCommands::Delete { id, yes } => cli::charts::delete(&id, yes),
        },
        Commands::Extracts { command } => match command {
            ExtractsCommands::List => cli::extracts::list(),
            ExtractsCommands::Import { file, yes } => cli::extracts::import(&file, yes),
            ExtractsCommands::Update { id, file } => cli::extracts::update(&id, &file),
            ExtractsCommands::Show { id } => cli::extracts::show(&id),
            ExtractsCommands::Delete { id, yes } => cli::extracts::delete(&id, yes),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
