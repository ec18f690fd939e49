//! Command-line interface argument parsing.
//!
//! Every flag is optional: with no arguments the tool reads `./outputs`
//! and writes its CSV files into the current directory.

use clap::Parser;
use std::path::PathBuf;

/// kraken-tally - mutation report aggregator
///
/// Reads every mutation report in the input directory and writes the
/// number of mutations per report file (and per mutation operator) to CSV.
///
/// Examples:
///   kraken-tally
///   kraken-tally --input mutant-kraken-dist/outputs --output counts.csv
///   kraken-tally --no-operator-csv
///   kraken-tally --dry-run
///   kraken-tally --init-config
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory containing the mutation reports
    ///
    /// Every entry in the directory is parsed as a report.
    /// Default: from config or `outputs`.
    #[arg(short, long, value_name = "DIR", env = "KRAKEN_TALLY_INPUT")]
    pub input: Option<PathBuf>,

    /// Output path for the per-file mutation counts
    ///
    /// Default: from config or `mutation_count_per_file.csv`.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output path for the per-operator mutation counts
    ///
    /// Default: from config or `mutation_operator_counts.csv`.
    #[arg(long, value_name = "FILE", conflicts_with = "no_operator_csv")]
    pub operator_output: Option<PathBuf>,

    /// Skip the per-operator CSV
    #[arg(long)]
    pub no_operator_csv: bool,

    /// Path to configuration file
    ///
    /// If not specified, looks for .kraken-tally.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// List the reports that would be read and exit
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a default .kraken-tally.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        let paths = [
            ("--input", &self.input),
            ("--output", &self.output),
            ("--operator-output", &self.operator_output),
        ];
        for (flag, path) in paths {
            if path.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
                return Err(format!("{} must not be empty", flag));
            }
        }

        if let (Some(output), Some(operator_output)) = (&self.output, &self.operator_output) {
            if output == operator_output {
                return Err("--output and --operator-output must be different files".to_string());
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
