//! Data models for mutation reports and their aggregates.
//!
//! A report file is the `mutations.json` written by a mutation-testing run:
//! a JSON object keyed by mutated source path, each value holding the list
//! of mutations generated for that source.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A single recorded mutation.
///
/// Any JSON value is accepted and counted; only `mutation_type` is ever
/// interpreted, and only by the operator tally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MutationEntry(pub Value);

impl MutationEntry {
    /// Returns the mutation operator name, if the entry is an object with a
    /// string `mutation_type`.
    pub fn mutation_type(&self) -> Option<&str> {
        self.0.get("mutation_type").and_then(Value::as_str)
    }
}

/// One keyed record inside a report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportRecord {
    /// `None` when the field is absent or `null`; aggregation rejects that.
    #[serde(default)]
    pub mutations: Option<Vec<MutationEntry>>,
}

/// Parsed content of one report file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Report {
    pub records: BTreeMap<String, ReportRecord>,
}

/// Reports keyed by the file name they were loaded from.
pub type Reports = BTreeMap<String, Report>;

/// Total mutation count per report file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileCounts {
    counts: BTreeMap<String, usize>,
}

impl FileCounts {
    /// Records the count for a file, replacing any previous value.
    pub fn insert(&mut self, file_name: impl Into<String>, count: usize) {
        self.counts.insert(file_name.into(), count);
    }

    #[cfg(test)]
    pub fn get(&self, file_name: &str) -> Option<usize> {
        self.counts.get(file_name).copied()
    }

    /// Number of files in the result.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all per-file counts.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Iterates in ascending file-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(name, count)| (name.as_str(), *count))
    }
}

/// Number of mutations per operator across all reports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperatorCounts {
    counts: BTreeMap<String, usize>,
}

impl OperatorCounts {
    /// Adds one occurrence of `operator`.
    pub fn record(&mut self, operator: &str) {
        *self.counts.entry(operator.to_string()).or_insert(0) += 1;
    }

    #[cfg(test)]
    pub fn get(&self, operator: &str) -> Option<usize> {
        self.counts.get(operator).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    #[cfg(test)]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Iterates in ascending operator-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(name, count)| (name.as_str(), *count))
    }

    /// Operators sorted by count (highest first), ties broken by name.
    pub fn ranked(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}
