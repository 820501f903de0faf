//! UniReg CLI
//!
//! Interactive records manager and maintenance tools.
//!
//! # Commands
//!
//! - `menu` - Interactive menu (the default)
//! - `stats` - Print university and department statistics
//! - `seed` - Replace saved data with the sample data set
//! - `verify` - Check cross-record links in saved data

mod commands;
mod console;
mod error;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use unireg_core::{Config, DataStore};

/// University records manager.
#[derive(Parser)]
#[command(name = "unireg")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the saved records
    #[arg(global = true, short, long, default_value = "data")]
    data_dir: PathBuf,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    /// Do not write records back to disk
    #[arg(global = true, long)]
    no_save: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive menu
    Menu,

    /// Print university and department statistics
    Stats {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Replace saved data with the sample data set
    Seed,

    /// Check cross-record links in saved data
    Verify,

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging; stdout belongs to the menu
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let store = DataStore::new(Config::new().data_dir(cli.data_dir));
    let save = !cli.no_save;

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => commands::menu::run(&store, save)?,
        Commands::Stats { format } => commands::stats::run(&store, &format)?,
        Commands::Seed => commands::seed::run(&store, save)?,
        Commands::Verify => commands::verify::run(&store)?,
        Commands::Version => {
            println!("UniReg CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("UniReg Core v{}", unireg_core::VERSION);
        }
    }

    Ok(())
}
