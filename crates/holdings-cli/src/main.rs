mod commands;
mod output;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use holdings_core::config::RunConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "holdings",
    version,
    about = "Format holdings reports for a digital preservation archive"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge department format inventories and write the dated format tables
    Merge {
        /// Department format inventory file(s), CSV or XLSX
        inventories: Vec<PathBuf>,

        /// JSON run file; flags given here override its values
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Format standardization table
        #[arg(short, long, value_name = "FILE")]
        standardization: Option<PathBuf>,

        /// NARA preservation action plan table
        #[arg(short, long, value_name = "FILE")]
        nara: Option<PathBuf>,

        /// Directory for the output tables (default: current directory)
        #[arg(short = 'd', long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Date used in output file names, YYYY-MM-DD (default: today)
        #[arg(long, value_name = "DATE")]
        run_date: Option<NaiveDate>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Print the collection an AIP id belongs to
    Resolve {
        /// AIP identifier
        aip_id: String,

        /// Department code or name (see `holdings departments`)
        department: String,
    },
    /// Look up the standardized name and type of a format name
    Standardize {
        /// Format name as reported by the identification tool
        format_name: String,

        /// Format standardization table
        #[arg(short, long, value_name = "FILE")]
        standardization: PathBuf,
    },
    /// Show the NARA risk rows a format identification matches
    Match {
        /// Format name
        #[arg(long)]
        name: String,

        /// Format version
        #[arg(long)]
        version: Option<String>,

        /// Registry key, e.g. fmt/354
        #[arg(long)]
        registry_key: Option<String>,

        /// NARA preservation action plan table
        #[arg(short, long, value_name = "FILE")]
        nara: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// List department codes
    Departments,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Merge {
            inventories,
            config,
            standardization,
            nara,
            output_dir,
            run_date,
            output,
        } => {
            let overrides = RunConfig {
                standardization,
                nara,
                inventories,
                output_dir,
                run_date,
            };
            commands::merge::run(config, overrides, &output)
        }
        Commands::Resolve { aip_id, department } => commands::resolve::run(&aip_id, &department),
        Commands::Standardize {
            format_name,
            standardization,
        } => commands::standardize::run(&format_name, &standardization),
        Commands::Match {
            name,
            version,
            registry_key,
            nara,
            output,
        } => commands::matching::run(name, version, registry_key, &nara, &output),
        Commands::Departments => commands::departments::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        eprintln!("run 'holdings --help' for usage");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
