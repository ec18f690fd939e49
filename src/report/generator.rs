//! CSV export and console summaries.
//!
//! Both CSV files share one layout: a two-column header followed by one row
//! per key in ascending order, `\n` line endings, and RFC 4180 quoting only
//! where a field needs it.

use crate::error::{Result, TallyError};
use crate::models::{FileCounts, OperatorCounts};
use std::io::Write;
use std::path::Path;

/// Header of the per-file count table.
pub const FILE_COUNTS_HEADER: [&str; 2] = ["File Name", "Mutation Count"];

/// Header of the per-operator count table.
pub const OPERATOR_COUNTS_HEADER: [&str; 2] = ["Mutation Operator", "Count"];

/// Write per-file counts to `path`, replacing any existing file.
pub fn write_csv(counts: &FileCounts, path: &Path) -> Result<()> {
    write_table_to_path(path, FILE_COUNTS_HEADER, counts.iter())
}

/// Write per-operator counts to `path`, replacing any existing file.
pub fn write_operator_csv(counts: &OperatorCounts, path: &Path) -> Result<()> {
    write_table_to_path(path, OPERATOR_COUNTS_HEADER, counts.iter())
}

fn write_table_to_path<'a>(
    path: &Path,
    header: [&str; 2],
    rows: impl Iterator<Item = (&'a str, usize)>,
) -> Result<()> {
    let to_error = |source: csv::Error| TallyError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let file = std::fs::File::create(path).map_err(|e| to_error(e.into()))?;
    write_table(file, header, rows).map_err(to_error)
}

fn write_table<'a, W: Write>(
    sink: W,
    header: [&str; 2],
    rows: impl Iterator<Item = (&'a str, usize)>,
) -> std::result::Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(sink);

    writer.write_record(header)?;
    for (name, count) in rows {
        writer.write_record([name, count.to_string().as_str()])?;
    }

    writer.flush()?;
    Ok(())
}

/// Generate the end-of-run summary printed to stdout.
pub fn generate_summary_text(files: &FileCounts, operators: Option<&OperatorCounts>) -> String {
    let mut lines = Vec::new();

    lines.push(format!("Reports read: {}", files.len()));
    lines.push(format!("Total mutations: {}", files.total()));

    if let Some(operators) = operators {
        if !operators.is_empty() {
            lines.push(String::new());
            lines.push("By Operator:".to_string());

            for (operator, count) in operators.ranked() {
                lines.push(format!("- {}: {}", operator, count));
            }
        }
    }

    lines.join("\n")
}
