use clap::{Parser, Subcommand};
use miette::{miette, Result};
use std::path::PathBuf;

use classdep_rs::cli;

#[derive(Parser)]
#[command(name = "classdep-rs")]
#[command(about = "Rust-based package coupling metrics analyzer for JVM class files")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a directory of class artifacts and compute package metrics
    Analyze {
        /// Root directory containing compiled class artifacts
        root: PathBuf,

        /// Target package names (discovered from the artifacts if omitted)
        #[arg(short, long, value_delimiter = ',')]
        packages: Vec<String>,

        /// Output format (json, table)
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Decode artifacts sequentially instead of on the worker pool
        #[arg(long)]
        sequential: bool,
    },

    /// Decode a single class artifact and dump its structure
    Inspect {
        /// Input class file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            root,
            packages,
            format,
            sequential,
        } => {
            let args = cli::analyze::AnalyzeArgs {
                root,
                packages,
                format,
                sequential,
            };
            cli::analyze::analyze(&args).map_err(|e| miette!("{}", e))
        }
        Commands::Inspect { input } => cli::inspect::inspect(&input).map_err(|e| miette!("{}", e)),
    }
}
