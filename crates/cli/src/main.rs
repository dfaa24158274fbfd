//! Leaf & Co. CLI - Catalog and cart tools.
//!
//! # Usage
//!
//! ```bash
//! # Validate a catalog file (JSON or YAML)
//! leaf-cli catalog validate catalog.json
//!
//! # Show the grouped listing of the built-in catalog
//! leaf-cli catalog show
//!
//! # Export the built-in catalog as YAML
//! leaf-cli catalog export --format yaml
//!
//! # Replay cart actions and print the totals
//! leaf-cli cart simulate add:pothos add:pothos inc:pothos dec:snake
//! ```
//!
//! # Commands
//!
//! - `catalog validate` - Check a catalog file for duplicate ids, unknown
//!   categories and non-positive prices
//! - `catalog show` - Log products grouped by category
//! - `catalog export` - Write a catalog as JSON or YAML to stdout
//! - `cart simulate` - Apply `add:`/`inc:`/`dec:`/`rm:` actions to an empty cart

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

use commands::catalog::ExportFormat;

#[derive(Parser)]
#[command(name = "leaf-cli")]
#[command(author, version, about = "Leaf & Co. CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect product catalogs
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Work with carts
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Load a catalog file and report whether it is valid
    Validate {
        /// Catalog file (.json, .yaml or .yml)
        path: PathBuf,
    },
    /// Show products grouped by category
    Show {
        /// Catalog file (default: built-in catalog)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Write a catalog to stdout
    Export {
        /// Catalog file (default: built-in catalog)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: ExportFormat,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Apply actions to an empty cart and report the totals
    Simulate {
        /// Catalog file (default: built-in catalog)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Actions such as `add:pothos`, `inc:pothos`, `dec:snake`, `rm:zz`
        #[arg(required = true)]
        actions: Vec<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::Validate { path } => commands::catalog::validate(&path).await?,
            CatalogAction::Show { file } => commands::catalog::show(file.as_deref()).await?,
            CatalogAction::Export { file, format } => {
                commands::catalog::export(file.as_deref(), format).await?;
            }
        },
        Commands::Cart { action } => match action {
            CartAction::Simulate { file, actions } => {
                commands::cart::simulate(file.as_deref(), &actions).await?;
            }
        },
    }
    Ok(())
}
