mod cli;
mod db;
mod error;
mod fmt;
mod logging;
mod models;
mod months;
mod registry;
mod settings;
mod store;
mod summary;

use clap::{CommandFactory, Parser};

use cli::{CategoryCommands, Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose);

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Load { path } => cli::load::run(&path),
        Commands::Category { command } => match command {
            CategoryCommands::Add { name, entry_type } => cli::categories::add(&name, entry_type),
            CategoryCommands::List { entry_type } => cli::categories::list(entry_type),
        },
        Commands::Add {
            amount,
            entry_type,
            category,
            description,
            date,
        } => cli::add::run(&amount, entry_type, category.as_deref(), &description, date.as_deref()),
        Commands::History { entry_type, limit } => cli::history::run(entry_type, limit),
        Commands::Summary => cli::summary::run(),
        Commands::Export { output } => cli::export::run(output),
        Commands::Backup { output } => cli::backup::run(output),
        Commands::Status => cli::status::run(),
        Commands::Demo => cli::demo::run(),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "purse", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        tracing::debug!("command failed: {e:?}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
