//! Error types for the glance exploration library.

use thiserror::Error;

/// Result type for exploration operations.
pub type Result<T> = std::result::Result<T, ExploreError>;

/// Errors that can occur while loading or analyzing a dataset.
///
/// Every variant is local and recoverable: a failed upload leaves the session
/// without a dataset, and a failed analysis leaves the session's dataset
/// untouched. Nothing here is fatal to the session.
#[derive(Error, Debug)]
pub enum ExploreError {
    /// The selected column does not exist in the dataset.
    #[error("Column '{column}' does not exist in the dataset")]
    InvalidColumn {
        /// The column name that was requested.
        column: String,
    },

    /// The requested analysis needs data that the dataset does not have.
    #[error("Insufficient data for analysis: {0}")]
    InsufficientData(String),

    /// No dataset has been loaded into the session yet.
    #[error("No dataset loaded; upload a file first")]
    NoDataset,

    /// The uploaded file has an extension we do not know how to load.
    #[error("Unsupported file format: '{extension}' (expected .csv or .xlsx)")]
    UnsupportedFormat {
        /// The offending extension, without the leading dot.
        extension: String,
    },

    /// The underlying loader failed; its message is preserved verbatim.
    #[error("Failed to load dataset: {0}")]
    Source(String),

    /// DataFusion query execution error.
    #[error("Query execution failed: {0}")]
    Query(#[from] datafusion::error::DataFusionError),

    /// Arrow computation error.
    #[error("Arrow computation failed: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// A column name could not be used safely as a SQL identifier.
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Invalid configuration or parameters.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Data came back in a shape the analyzer did not expect.
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl ExploreError {
    /// Creates an invalid-column error for the given column name.
    pub fn invalid_column(column: impl Into<String>) -> Self {
        Self::InvalidColumn {
            column: column.into(),
        }
    }

    /// Creates an insufficient-data error with the given reason.
    pub fn insufficient_data(msg: impl Into<String>) -> Self {
        Self::InsufficientData(msg.into())
    }

    /// Creates a source error, preserving the loader's message verbatim.
    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }

    /// Creates an invalid-data error with the given message.
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }

    /// Creates an invalid-configuration error with the given message.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Returns true if this error means the analysis was impossible rather
    /// than broken (missing column, missing data, empty session).
    pub fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidColumn { .. }
                | Self::InsufficientData(_)
                | Self::NoDataset
                | Self::UnsupportedFormat { .. }
                | Self::Source(_)
        )
    }
}
