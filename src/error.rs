use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("Failed to load data from {path}: {reason}")]
    DataLoad { path: String, reason: String },

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Invalid year column: {0}")]
    InvalidYearColumn(String),

    #[error("Unknown element '{0}' (expected Production, Area harvested or Yield)")]
    InvalidElement(String),

    #[error("Unknown locale '{0}' (expected en or es)")]
    InvalidLocale(String),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(feature = "python")]
impl From<ExplorerError> for pyo3::PyErr {
    fn from(err: ExplorerError) -> pyo3::PyErr {
        use pyo3::exceptions::{PyRuntimeError, PyValueError};

        match err {
            ExplorerError::InvalidElement(_) | ExplorerError::InvalidLocale(_) => {
                PyValueError::new_err(err.to_string())
            }
            other => PyRuntimeError::new_err(other.to_string()),
        }
    }
}
