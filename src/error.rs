//! Error taxonomy for the grading pipeline.

use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

/// Every failure is fatal for the whole run; nothing is skipped.
///
/// `Open`, `Header` and `MissingHeader` are file access failures.
/// Row indexes are zero-based over the data rows, header excluded.
#[derive(Debug, Error)]
pub enum GradeError {
    #[error("error opening grades csv file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error reading student data title in grades csv file {path}: {source}")]
    Header {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("grades csv file {path} has no header line")]
    MissingHeader { path: PathBuf },

    #[error(
        "error in row {row}: invalid number of fields in student data count; wanted: {expected}, got: {found}: [data: {fields:?}]"
    )]
    FieldCount {
        row: usize,
        expected: usize,
        found: usize,
        fields: Vec<String>,
    },

    #[error("error in row {row}: error parsing test score {value:?} in column {column}: {source}")]
    ScoreParse {
        row: usize,
        column: usize,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("error in row {row}: {source}")]
    Read {
        row: usize,
        #[source]
        source: csv::Error,
    },
}

impl GradeError {
    /// The data row that caused the failure, if the failure is row-scoped.
    pub fn row(&self) -> Option<usize> {
        match self {
            GradeError::FieldCount { row, .. }
            | GradeError::ScoreParse { row, .. }
            | GradeError::Read { row, .. } => Some(*row),
            GradeError::Open { .. } | GradeError::Header { .. } | GradeError::MissingHeader { .. } => {
                None
            }
        }
    }

    pub fn is_file_access(&self) -> bool {
        matches!(
            self,
            GradeError::Open { .. } | GradeError::Header { .. } | GradeError::MissingHeader { .. }
        )
    }
}
