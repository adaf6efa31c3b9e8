//! Order Dashboard CLI - Migrations and bulk data loading.
//!
//! # Usage
//!
//! ```bash
//! # Apply database migrations
//! od-cli migrate
//!
//! # Load users, products, orders and order_items CSVs from a directory
//! od-cli load dir --data-dir ./archive
//!
//! # Load one file into one table
//! od-cli load file ./archive/orders.csv --table orders
//!
//! # Profile the source files before loading them
//! od-cli inspect --data-dir ./archive
//!
//! # Migrate, then load the directory
//! od-cli setup --data-dir ./archive
//! ```
//!
//! # Commands
//!
//! - `migrate` - Apply database migrations
//! - `load dir` / `load file` - Append CSV data to tables
//! - `inspect` - Summarize source files
//! - `setup` - `migrate` followed by `load dir`

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use order_dashboard_ingest::{DEFAULT_CHUNK_SIZE, DryRunSink, LoadOptions, PgSink};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::CommandError;

#[derive(Parser)]
#[command(name = "od-cli")]
#[command(author, version, about = "Customer order dashboard CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply database migrations
    Migrate,
    /// Load CSV data into the database
    Load {
        #[command(subcommand)]
        target: LoadTarget,
    },
    /// Summarize the CSV files in the data directory
    Inspect {
        #[command(flatten)]
        dir: DataDirArgs,

        /// Sample rows shown per file
        #[arg(long, default_value_t = 5)]
        sample_size: usize,

        /// Print profiles as JSON
        #[arg(long)]
        json: bool,
    },
    /// Apply migrations, then load the data directory
    Setup {
        #[command(flatten)]
        dir: DataDirArgs,

        #[command(flatten)]
        load: LoadArgs,

        /// Fail before loading if any of the four source files is missing
        #[arg(long)]
        require_all: bool,
    },
}

#[derive(Subcommand)]
enum LoadTarget {
    /// Load users.csv, products.csv, orders.csv and order_items.csv
    Dir {
        #[command(flatten)]
        dir: DataDirArgs,

        #[command(flatten)]
        load: LoadArgs,

        /// Fail before loading if any of the four source files is missing
        #[arg(long)]
        require_all: bool,

        /// Read and transform everything, but write nothing
        #[arg(long)]
        dry_run: bool,
    },
    /// Load a single CSV file into a table
    File {
        /// Path to the CSV file
        path: PathBuf,

        /// Target table
        #[arg(short, long)]
        table: String,

        #[command(flatten)]
        load: LoadArgs,

        /// Read and transform everything, but write nothing
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Args)]
struct DataDirArgs {
    /// Directory holding the source CSV files
    #[arg(long, env = "ORDER_DASHBOARD_DATA_DIR", default_value = "../archive")]
    data_dir: PathBuf,
}

#[derive(Args)]
struct LoadArgs {
    /// Rows per chunk
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Skip the up-front row count (progress then shows rows processed only)
    #[arg(long)]
    no_count: bool,
}

impl LoadArgs {
    const fn options(&self) -> LoadOptions {
        LoadOptions {
            chunk_size: self.chunk_size,
            count_rows: !self.no_count,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CommandError> {
    match cli.command {
        Commands::Migrate => {
            let pool = commands::connect().await?;
            commands::migrate::run(&pool).await?;
        }
        Commands::Load { target } => match target {
            LoadTarget::Dir {
                dir,
                load,
                require_all,
                dry_run,
            } => {
                if dry_run {
                    let mut sink = DryRunSink::new();
                    commands::load::directory(&mut sink, &dir.data_dir, &load.options(), require_all)
                        .await?;
                } else {
                    let mut sink = PgSink::new(commands::connect().await?);
                    commands::load::directory(&mut sink, &dir.data_dir, &load.options(), require_all)
                        .await?;
                }
            }
            LoadTarget::File {
                path,
                table,
                load,
                dry_run,
            } => {
                if dry_run {
                    let mut sink = DryRunSink::new();
                    commands::load::file(&mut sink, &path, &table, &load.options()).await?;
                } else {
                    let mut sink = PgSink::new(commands::connect().await?);
                    commands::load::file(&mut sink, &path, &table, &load.options()).await?;
                }
            }
        },
        Commands::Inspect {
            dir,
            sample_size,
            json,
        } => commands::inspect::run(&dir.data_dir, sample_size, json)?,
        Commands::Setup {
            dir,
            load,
            require_all,
        } => {
            let pool = commands::connect().await?;
            commands::migrate::run(&pool).await?;

            let mut sink = PgSink::new(pool);
            commands::load::directory(&mut sink, &dir.data_dir, &load.options(), require_all)
                .await?;
            tracing::info!("Setup complete!");
        }
    }
    Ok(())
}
