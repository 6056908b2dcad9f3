//! Error types for nn4md.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A dataset or model file could not be opened, read or written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A field of a dataset record is not a number.
    #[error("line {line}, field {field}: '{value}' is not a number")]
    Parse {
        line: usize,
        field: usize,
        value: String,
    },

    /// A dataset record has the wrong number of tab-separated fields.
    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// The dataset ends before the expected number of records.
    #[error("{}: expected {expected} records, found {found}", path.display())]
    ShortDataset {
        path: PathBuf,
        expected: usize,
        found: usize,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A model document does not describe an input/hidden/output network.
    #[error("invalid model: {0}")]
    InvalidModel(String),

    /// Training hit its epoch cap before the validation error dropped below
    /// the threshold.
    #[error("no convergence after {epochs} epochs (validation MSE {validation_mse:.5})")]
    MaxEpochsExceeded { epochs: usize, validation_mse: f64 },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
