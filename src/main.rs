//! kraken-tally - mutation report aggregator
//!
//! Reads the JSON mutation reports produced by a mutation-testing run and
//! writes per-file and per-operator mutation counts as CSV.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Any failure (missing input, malformed report, write error, ...)

mod analysis;
mod cli;
mod config;
mod error;
mod models;
mod report;
mod scanner;

use anyhow::{Context, Result};
use cli::Args;
use config::Config;
use std::path::Path;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        if let Err(e) = handle_init_config() {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
        return;
    }

    init_logging(&args);

    info!("kraken-tally v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(args) {
        error!("Aggregation failed: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Handle --init-config: generate a default .kraken-tally.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(config::CONFIG_FILE_NAME);

    if path.exists() {
        anyhow::bail!(
            "{} already exists. Remove it first or edit it manually.",
            config::CONFIG_FILE_NAME
        );
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", config::CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", config::CONFIG_FILE_NAME);
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level())
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Warning: a tracing subscriber was already installed");
    }
}

/// Load, aggregate and export the reports.
fn run(args: Args) -> Result<()> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let input_dir = config.input.directory.as_path();

    if args.dry_run {
        return handle_dry_run(input_dir);
    }

    info!("Reading reports from {}", input_dir.display());
    let reports = scanner::load_reports(input_dir)?;

    // Everything that can fail on bad input runs before any file is written.
    let file_counts = analysis::aggregate(&reports)?;
    if file_counts.is_empty() {
        warn!("No reports found in {}", input_dir.display());
    }
    let operator_counts = match config.output.operator_csv_path() {
        Some(_) => Some(analysis::tally_operators(&reports)?),
        None => {
            debug!("Operator table disabled");
            None
        }
    };

    report::write_csv(&file_counts, &config.output.file_counts)?;
    info!(
        "Wrote {} rows to {}",
        file_counts.len(),
        config.output.file_counts.display()
    );

    if let (Some(path), Some(operators)) =
        (config.output.operator_csv_path(), operator_counts.as_ref())
    {
        report::write_operator_csv(operators, path)?;
        info!("Wrote {} rows to {}", operators.len(), path.display());
    }

    if !args.quiet {
        println!(
            "\n📊 {}",
            report::generate_summary_text(&file_counts, operator_counts.as_ref())
        );
        println!(
            "\n✅ Counts saved to: {}",
            config.output.file_counts.display()
        );
        if let Some(path) = config.output.operator_csv_path() {
            println!("   Operator counts saved to: {}", path.display());
        }
    }

    Ok(())
}

/// Handle --dry-run: list the entries that would be parsed, exit.
fn handle_dry_run(input_dir: &Path) -> Result<()> {
    println!("\n🔍 Dry run: listing reports in {}\n", input_dir.display());

    let entries = scanner::ReportScanner::new(input_dir).scan()?;

    if entries.is_empty() {
        println!("   No reports found.");
    } else {
        for entry in &entries {
            println!("     📄 {} ({} bytes)", entry.name, entry.size);
        }
        println!("\n   Total: {} reports", entries.len());
    }

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", config::CONFIG_FILE_NAME);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {:#}", e);
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn fixtures_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/outputs")
    }

    fn args_for(input: &Path, out_dir: &Path) -> Args {
        Args {
            input: Some(input.to_path_buf()),
            output: Some(out_dir.join("mutation_count_per_file.csv")),
            operator_output: Some(out_dir.join("mutation_operator_counts.csv")),
            config: Some(Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/kraken-tally.toml")),
            quiet: true,
            ..Args::default()
        }
    }

    #[test]
    fn test_run_on_fixtures() {
        let temp = TempDir::new().unwrap();
        run(args_for(&fixtures_dir(), temp.path())).unwrap();

        let counts = fs::read_to_string(temp.path().join("mutation_count_per_file.csv")).unwrap();
        assert_eq!(
            counts,
            "File Name,Mutation Count\ncalculator.json,5\nstack.json,3\n"
        );

        let operators =
            fs::read_to_string(temp.path().join("mutation_operator_counts.csv")).unwrap();
        assert!(operators.starts_with("Mutation Operator,Count\n"));
        assert!(operators.contains("RelationalOperator,2\n"));
        assert_eq!(operators.lines().count(), 8);
    }

    #[test]
    fn test_one_row_per_input_file() {
        let input = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        for i in 0..4 {
            fs::write(
                input.path().join(format!("report-{i}.json")),
                r#"{"A.kt": {"mutations": [{"mutation_type": "UnaryOperator"}]}}"#,
            )
            .unwrap();
        }

        run(args_for(input.path(), out.path())).unwrap();

        let counts = fs::read_to_string(out.path().join("mutation_count_per_file.csv")).unwrap();
        assert_eq!(counts.lines().count(), 1 + 4);
    }

    #[test]
    fn test_empty_input_writes_header_only() {
        let input = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();

        run(args_for(input.path(), out.path())).unwrap();

        let counts = fs::read_to_string(out.path().join("mutation_count_per_file.csv")).unwrap();
        assert_eq!(counts, "File Name,Mutation Count\n");
    }

    #[test]
    fn test_rerun_is_byte_identical() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();

        run(args_for(&fixtures_dir(), first.path())).unwrap();
        run(args_for(&fixtures_dir(), second.path())).unwrap();

        for name in ["mutation_count_per_file.csv", "mutation_operator_counts.csv"] {
            let a = fs::read(first.path().join(name)).unwrap();
            let b = fs::read(second.path().join(name)).unwrap();
            assert_eq!(a, b, "{name} differs between runs");
        }
    }

    #[test]
    fn test_missing_mutations_aborts_without_output() {
        let input = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        fs::write(input.path().join("broken.json"), r#"{"A.kt": {"result": "Killed"}}"#).unwrap();

        let err = run(args_for(input.path(), out.path())).unwrap_err();
        assert!(err.to_string().contains("mutations"));
        assert!(!out.path().join("mutation_count_per_file.csv").exists());
    }

    #[test]
    fn test_missing_mutation_type_aborts_without_output() {
        let input = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        fs::write(
            input.path().join("untyped.json"),
            r#"{"A.kt": {"mutations": [{"line_number": 3}]}}"#,
        )
        .unwrap();

        let err = run(args_for(input.path(), out.path())).unwrap_err();
        assert!(err.to_string().contains("mutation_type"));
        assert!(!out.path().join("mutation_count_per_file.csv").exists());
        assert!(!out.path().join("mutation_operator_counts.csv").exists());
    }

    #[test]
    fn test_missing_input_directory_fails() {
        let out = TempDir::new().unwrap();
        let missing = out.path().join("outputs");

        assert!(run(args_for(&missing, out.path())).is_err());
    }
}
