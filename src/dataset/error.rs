//! Dataset loading error types
//!
//! Any of these is fatal at startup: the dashboard has nothing to show
//! without its two source tables.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the source tables
#[derive(Error, Debug)]
pub enum DatasetError {
    /// File missing, unreadable, or a record failed to deserialize
    #[error("Failed to read {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A required column is absent after header normalization
    #[error("Missing column '{column}' in {path:?}")]
    MissingColumn { path: PathBuf, column: String },
}

impl DatasetError {
    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        DatasetError::Csv {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DatasetError::MissingColumn {
            path: PathBuf::from("merged.csv"),
            column: "suicide_rate".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Missing column 'suicide_rate' in \"merged.csv\""
        );
    }

    #[test]
    fn test_missing_file_is_csv_error() {
        let source = match csv::Reader::from_path("/definitely/not/here.csv") {
            Err(e) => e,
            Ok(_) => panic!("file should not exist"),
        };
        let err = DatasetError::csv("/definitely/not/here.csv", source);
        assert!(matches!(err, DatasetError::Csv { .. }));
        assert!(err.to_string().starts_with("Failed to read"));
    }
}
