//! WoW AI store audit
//!
//! Prints the store audit summary and writes CSV reports from local record
//! collections, falling back to the built-in sample data.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use wow_audit::config::{Config, FileConfig};
use wow_audit::constants;
use wow_audit::loader::{self, Dataset};
use wow_audit::reports::{self, AuditSummary};

#[derive(Parser, Debug)]
#[command(name = "wow-audit")]
#[command(about = "Store audit report for WoW AI storefront analytics")]
struct Args {
    /// Data directory with monthly.csv, channels.csv, regions.csv, skus.csv, slow_movers.csv
    #[arg(short, long, default_value = "./data", global = true)]
    data_dir: PathBuf,

    /// Output directory for generated CSV reports
    #[arg(short, long, default_value = "./output", global = true)]
    output_dir: PathBuf,

    /// Config file path
    #[arg(short, long, default_value = constants::CONFIG_FILE, global = true)]
    config: PathBuf,

    /// Log filter (e.g. "info", "wow_audit=debug")
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the audit summary (default)
    Summary,

    /// Write CSV reports and the JSON summary to the output directory
    Report,

    /// Write the built-in sample collections as CSV into the data directory
    ExportFixtures {
        /// Overwrite files that already exist
        #[arg(long)]
        force: bool,
    },
}

fn init_logging(args: &Args) {
    let level = if args.verbose { "debug" } else { args.log_level.as_str() };
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);

    let file_config = FileConfig::load_or_default(&args.config)?;
    let config = Config::from_file(&file_config)?;

    match args.command.unwrap_or(Command::Summary) {
        Command::Summary => {
            let data = Dataset::load(&args.data_dir)?;
            reports::print_summary(&AuditSummary::build(&data, &config));
        }
        Command::Report => {
            let data = Dataset::load(&args.data_dir)?;
            std::fs::create_dir_all(&args.output_dir)?;

            println!("Generating reports...");
            let written = reports::generate_all_reports(&args.output_dir, &data, &config)?;
            println!("\nDone! {} reports written to: {}", written.len(), args.output_dir.display());
        }
        Command::ExportFixtures { force } => {
            std::fs::create_dir_all(&args.data_dir)?;

            let written = loader::export_fixtures(&args.data_dir, force)?;
            for path in &written {
                println!("  Exported: {}", path.display());
            }
            println!("\n{} file(s) written to: {}", written.len(), args.data_dir.display());
        }
    }

    Ok(())
}
