//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.kraken-tally.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".kraken-tally.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Input settings.
    #[serde(default)]
    pub input: InputConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Where the mutation reports are read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Directory whose entries are all parsed as reports.
    #[serde(default = "default_input_dir")]
    pub directory: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            directory: default_input_dir(),
        }
    }
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("outputs")
}

/// Where the CSV tables are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Per-file mutation counts.
    #[serde(default = "default_file_counts")]
    pub file_counts: PathBuf,

    /// Per-operator mutation counts. An empty string disables this table.
    #[serde(default = "default_operator_csv")]
    pub operator_csv: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file_counts: default_file_counts(),
            operator_csv: default_operator_csv(),
        }
    }
}

fn default_file_counts() -> PathBuf {
    PathBuf::from("mutation_count_per_file.csv")
}

fn default_operator_csv() -> String {
    "mutation_operator_counts.csv".to_string()
}

impl OutputConfig {
    /// Path of the per-operator table, or `None` when it is disabled.
    pub fn operator_csv_path(&self) -> Option<&Path> {
        if self.operator_csv.is_empty() {
            None
        } else {
            Some(Path::new(&self.operator_csv))
        }
    }
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load `.kraken-tally.toml` from `dir`.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// Only arguments the user actually passed override the file.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref input) = args.input {
            self.input.directory = input.clone();
        }
        if let Some(ref output) = args.output {
            self.output.file_counts = output.clone();
        }

        if args.no_operator_csv {
            self.output.operator_csv.clear();
        } else if let Some(ref operator_output) = args.operator_output {
            self.output.operator_csv = operator_output.to_string_lossy().into_owned();
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.input.directory, PathBuf::from("outputs"));
        assert_eq!(
            config.output.file_counts,
            PathBuf::from("mutation_count_per_file.csv")
        );
        assert_eq!(
            config.output.operator_csv_path(),
            Some(Path::new("mutation_operator_counts.csv"))
        );
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[input]
directory = "mutant-kraken-dist/outputs"

[output]
operator_csv = ""
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(
            config.input.directory,
            PathBuf::from("mutant-kraken-dist/outputs")
        );
        assert_eq!(
            config.output.file_counts,
            PathBuf::from("mutation_count_per_file.csv")
        );
        assert_eq!(config.output.operator_csv_path(), None);
    }

    #[test]
    fn test_merge_with_args() {
        let mut config = Config::default();
        let args = Args {
            input: Some(PathBuf::from("reports")),
            operator_output: Some(PathBuf::from("ops.csv")),
            ..Args::default()
        };

        config.merge_with_args(&args);
        assert_eq!(config.input.directory, PathBuf::from("reports"));
        assert_eq!(
            config.output.file_counts,
            PathBuf::from("mutation_count_per_file.csv")
        );
        assert_eq!(config.output.operator_csv_path(), Some(Path::new("ops.csv")));

        let args = Args {
            no_operator_csv: true,
            ..Args::default()
        };
        config.merge_with_args(&args);
        assert_eq!(config.output.operator_csv_path(), None);
    }

    #[test]
    fn test_load_from_dir() {
        let temp = TempDir::new().unwrap();
        assert!(Config::load_from_dir(temp.path()).unwrap().is_none());

        std::fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "[output]\nfile_counts = \"counts.csv\"\n",
        )
        .unwrap();
        let config = Config::load_from_dir(temp.path()).unwrap().unwrap();
        assert_eq!(config.output.file_counts, PathBuf::from("counts.csv"));

        std::fs::write(temp.path().join(CONFIG_FILE_NAME), "[output\n").unwrap();
        assert!(Config::load_from_dir(temp.path()).is_err());
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(toml_str.contains("[input]"));
        assert!(toml_str.contains("[output]"));
        assert!(toml_str.contains("mutation_count_per_file.csv"));

        let round_trip: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(round_trip.input.directory, PathBuf::from("outputs"));
    }
}
