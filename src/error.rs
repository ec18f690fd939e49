//! Error types for report loading and aggregation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, aggregating or exporting mutation reports.
///
/// None of these are recovered from: the first one aborts the run.
#[derive(Debug, Error)]
pub enum TallyError {
    #[error("Input directory not found: {}", .0.display())]
    InputDirNotFound(PathBuf),

    #[error("Report file name is not valid UTF-8: {}", .0.display())]
    NonUtf8FileName(PathBuf),

    #[error("Failed to read report {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse report {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Record '{key}' in {file} has no 'mutations' field")]
    MissingMutations { file: String, key: String },

    #[error("Mutation #{index} of record '{key}' in {file} has no 'mutation_type'")]
    MissingMutationType {
        file: String,
        key: String,
        index: usize,
    },

    #[error("Directory traversal error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Failed to write {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

pub type Result<T> = std::result::Result<T, TallyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_mutations_message_names_file_and_key() {
        let err = TallyError::MissingMutations {
            file: "mutations.json".to_string(),
            key: "src/Stack.kt".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("mutations.json"));
        assert!(message.contains("src/Stack.kt"));
    }

    #[test]
    fn test_input_dir_not_found_message() {
        let err = TallyError::InputDirNotFound(PathBuf::from("outputs"));
        assert_eq!(err.to_string(), "Input directory not found: outputs");
    }
}
