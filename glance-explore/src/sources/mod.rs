//! Data sources for uploaded tabular files.
//!
//! A source knows how to register one uploaded file as a table in the
//! session's DataFusion context. Format selection is extension-driven:
//! `.csv` goes through DataFusion's CSV reader (with schema inference, which
//! is where automatic date-column detection comes from), `.xlsx` through a
//! `calamine` workbook read materialized as an in-memory table.

use async_trait::async_trait;
use datafusion::prelude::SessionContext;
use std::fmt::Debug;
use std::path::Path;

use crate::error::{ExploreError, Result};

mod csv;
mod excel;

pub use csv::{CsvOptions, CsvSource};
pub use excel::ExcelSource;

/// A data source that can be registered with a DataFusion context.
#[async_trait]
pub trait DataSource: Debug + Send + Sync {
    /// Registers this source's table under the given name.
    ///
    /// Loader failures are reported as [`ExploreError::Source`] with the
    /// underlying message preserved verbatim.
    async fn register(&self, ctx: &SessionContext, table_name: &str) -> Result<()>;

    /// Human-readable description of this source.
    fn description(&self) -> String;
}

/// Supported upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Comma-separated values.
    Csv,
    /// Excel workbook (xlsx).
    Excel,
}

impl SourceFormat {
    /// Determines the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match extension.as_str() {
            "csv" => Ok(SourceFormat::Csv),
            "xlsx" => Ok(SourceFormat::Excel),
            other => Err(ExploreError::UnsupportedFormat {
                extension: other.to_string(),
            }),
        }
    }

    /// Builds the matching source for an uploaded file path.
    pub fn source_for_path(path: &Path) -> Result<Box<dyn DataSource>> {
        match Self::from_path(path)? {
            SourceFormat::Csv => Ok(Box::new(CsvSource::new(path))),
            SourceFormat::Excel => Ok(Box::new(ExcelSource::new(path))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn format_from_extension() {
        assert_eq!(
            SourceFormat::from_path(&PathBuf::from("sales.csv")).unwrap(),
            SourceFormat::Csv
        );
        assert_eq!(
            SourceFormat::from_path(&PathBuf::from("Sales.XLSX")).unwrap(),
            SourceFormat::Excel
        );
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let err = SourceFormat::from_path(&PathBuf::from("notes.txt")).unwrap_err();
        assert!(matches!(
            err,
            ExploreError::UnsupportedFormat { ref extension } if extension == "txt"
        ));

        let err = SourceFormat::from_path(&PathBuf::from("no_extension")).unwrap_err();
        assert!(matches!(err, ExploreError::UnsupportedFormat { .. }));
    }
}
