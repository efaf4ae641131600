//! CSV data source backed by DataFusion's CSV reader.

use async_trait::async_trait;
use datafusion::prelude::{CsvReadOptions, SessionContext};
use std::path::{Path, PathBuf};
use tracing::instrument;

use super::DataSource;
use crate::error::{ExploreError, Result};

/// Options for reading a CSV upload.
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field delimiter (default `,`).
    pub delimiter: u8,
    /// Whether the first row is a header (default true).
    pub has_header: bool,
    /// Rows sampled for schema inference (default 1000). Inference is what
    /// turns ISO-formatted columns into date/timestamp types.
    pub schema_infer_max_records: usize,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_header: true,
            schema_infer_max_records: 1000,
        }
    }
}

impl CsvOptions {
    /// Sets the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether the first row is a header.
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Sets the schema inference sample size.
    pub fn with_schema_infer_max_records(mut self, records: usize) -> Self {
        self.schema_infer_max_records = records;
        self
    }
}

/// A CSV file on disk.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
    options: CsvOptions,
}

impl CsvSource {
    /// Creates a source for the given path with default options.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            options: CsvOptions::default(),
        }
    }

    /// Creates a source with explicit options.
    pub fn with_options(path: impl AsRef<Path>, options: CsvOptions) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            options,
        }
    }

    /// The file path this source reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DataSource for CsvSource {
    #[instrument(skip(self, ctx), fields(path = %self.path.display()))]
    async fn register(&self, ctx: &SessionContext, table_name: &str) -> Result<()> {
        let path = self.path.to_str().ok_or_else(|| {
            ExploreError::source(format!("path is not valid UTF-8: {}", self.path.display()))
        })?;

        // Accept any extension on disk; the format decision was already made.
        let extension = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"))
            .unwrap_or_default();

        let read_options = CsvReadOptions::new()
            .has_header(self.options.has_header)
            .delimiter(self.options.delimiter)
            .schema_infer_max_records(self.options.schema_infer_max_records)
            .file_extension(&extension);

        ctx.register_csv(table_name, path, read_options)
            .await
            .map_err(|e| ExploreError::source(e.to_string()))
    }

    fn description(&self) -> String {
        format!("CSV file: {}", self.path.display())
    }
}
