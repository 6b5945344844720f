use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

mod cli_bin;

use cli_bin::args::{Cli, Commands};
use cli_bin::commands::{self, Mutation};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    match cli.command {
        Commands::Check(args) => commands::check_command(args)?,
        Commands::Get(args) => commands::get_command(args)?,
        Commands::Has(args) => commands::has_command(args)?,
        Commands::Insert(args) => commands::set_command(Mutation::Insert, args)?,
        Commands::Update(args) => commands::set_command(Mutation::Update, args)?,
        Commands::Upsert(args) => commands::set_command(Mutation::Upsert, args)?,
        Commands::Delete(args) => commands::delete_command(args)?,
    }

    Ok(())
}

/// `RUST_LOG` wins over the verbosity flags when set
fn init_logging(cli: &Cli) {
    let default_level = if cli.verbose {
        LevelFilter::Debug
    } else if cli.quiet {
        LevelFilter::Error
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .init();
}
