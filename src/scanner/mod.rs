//! Report discovery and loading.
//!
//! Every entry directly inside the input directory is treated as a report;
//! nothing is filtered by name or extension.

use crate::error::{Result, TallyError};
use crate::models::{Report, Reports};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// An entry found in the input directory.
#[derive(Debug, Clone)]
pub struct ScannedReport {
    /// File name, used as the aggregation key.
    pub name: String,
    /// Full path to the entry.
    pub path: PathBuf,
    /// Size in bytes as reported by the filesystem.
    pub size: u64,
}

/// Lists the report entries of an input directory.
pub struct ReportScanner {
    input_dir: PathBuf,
}

impl ReportScanner {
    /// Create a scanner over `input_dir`.
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
        }
    }

    /// List every entry of the input directory, sorted by file name.
    ///
    /// Fails with [`TallyError::InputDirNotFound`] when the directory is
    /// missing or is not a directory.
    pub fn scan(&self) -> Result<Vec<ScannedReport>> {
        if !self.input_dir.is_dir() {
            return Err(TallyError::InputDirNotFound(self.input_dir.clone()));
        }

        let walker = WalkDir::new(&self.input_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        let mut entries = Vec::new();
        for entry in walker {
            let entry = entry?;
            let size = entry.metadata()?.len();
            // Lossy names could collide and drop a report from the counts.
            let name = entry
                .file_name()
                .to_str()
                .ok_or_else(|| TallyError::NonUtf8FileName(entry.path().to_path_buf()))?
                .to_string();
            entries.push(ScannedReport {
                name,
                path: entry.into_path(),
                size,
            });
        }

        debug!(
            "Found {} entries in {}",
            entries.len(),
            self.input_dir.display()
        );
        Ok(entries)
    }

    /// Read and parse every entry of the input directory.
    pub fn load(&self) -> Result<Reports> {
        let mut reports = Reports::new();

        for entry in self.scan()? {
            let report = read_report(&entry.path)?;
            debug!("Loaded {} ({} records)", entry.name, report.records.len());
            reports.insert(entry.name, report);
        }

        Ok(reports)
    }
}

/// Load all reports from `directory`, keyed by file name.
pub fn load_reports(directory: &Path) -> Result<Reports> {
    ReportScanner::new(directory).load()
}

/// Read and parse a single report file.
pub fn read_report(path: &Path) -> Result<Report> {
    let content = fs::read(path).map_err(|source| TallyError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_slice(&content).map_err(|source| TallyError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
