//! Mutation aggregation.
//!
//! Turns loaded reports into per-file and per-operator counts.

use crate::error::{Result, TallyError};
use crate::models::{FileCounts, MutationEntry, OperatorCounts, Report, Reports};

/// Count the mutations of every report, one total per file.
///
/// A record without a `mutations` list aborts the aggregation instead of
/// counting as zero.
pub fn aggregate(reports: &Reports) -> Result<FileCounts> {
    let mut counts = FileCounts::default();

    for (file_name, report) in reports {
        counts.insert(file_name.as_str(), count_mutations(file_name, report)?);
    }

    Ok(counts)
}

/// Sum the lengths of all `mutations` lists in one report.
pub fn count_mutations(file_name: &str, report: &Report) -> Result<usize> {
    let mut total = 0;

    for (_, mutations) in record_mutations(file_name, report) {
        total += mutations?.len();
    }

    Ok(total)
}

/// Count mutations by their `mutation_type` across all reports.
pub fn tally_operators(reports: &Reports) -> Result<OperatorCounts> {
    let mut counts = OperatorCounts::default();

    for (file_name, report) in reports {
        for (key, mutations) in record_mutations(file_name, report) {
            for (index, entry) in mutations?.iter().enumerate() {
                let operator = entry
                    .mutation_type()
                    .ok_or_else(|| TallyError::MissingMutationType {
                        file: file_name.clone(),
                        key: key.to_string(),
                        index,
                    })?;
                counts.record(operator);
            }
        }
    }

    Ok(counts)
}

/// Yield each record key with its mutation list, or the error for a record
/// that has none.
fn record_mutations<'a>(
    file_name: &'a str,
    report: &'a Report,
) -> impl Iterator<Item = (&'a str, Result<&'a [MutationEntry]>)> + 'a {
    report.records.iter().map(move |(key, record)| {
        let mutations = record
            .mutations
            .as_deref()
            .ok_or_else(|| TallyError::MissingMutations {
                file: file_name.to_string(),
                key: key.clone(),
            });
        (key.as_str(), mutations)
    })
}
