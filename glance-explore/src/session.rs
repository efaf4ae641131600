//! Explicit session state: one context, at most one dataset.
//!
//! The session owns a DataFusion `SessionContext` and the currently uploaded
//! table, registered under a fixed name. A new upload replaces the table
//! wholesale; a failed upload leaves the session with no table at all, so
//! there is never a half-loaded dataset to analyze.

use std::path::Path;

use arrow::record_batch::RecordBatch;
use datafusion::prelude::SessionContext;
use tracing::{info, instrument, warn};

use crate::analyzers::exec::{collect_single_row, collect_sql, u64_at};
use crate::analyzers::overview::{DatasetOverview, OverviewAnalyzer};
use crate::error::{ExploreError, Result};
use crate::schema::DatasetSchema;
use crate::sources::{DataSource, SourceFormat};

/// Name the current dataset is registered under in the session context.
pub const DATASET_TABLE: &str = "data";

/// A single user's exploration session.
pub struct ExploreSession {
    ctx: SessionContext,
    dataset: Option<DatasetState>,
}

#[derive(Debug, Clone)]
struct DatasetState {
    schema: DatasetSchema,
    description: String,
}

impl ExploreSession {
    /// Creates an empty session with a fresh DataFusion context.
    pub fn new() -> Self {
        Self {
            ctx: SessionContext::new(),
            dataset: None,
        }
    }

    /// The underlying DataFusion context.
    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }

    /// True once a dataset has been loaded successfully.
    pub fn has_dataset(&self) -> bool {
        self.dataset.is_some()
    }

    /// Human-readable description of the loaded source.
    pub fn dataset_description(&self) -> Option<&str> {
        self.dataset.as_ref().map(|d| d.description.as_str())
    }

    /// Semantic schema of the loaded dataset.
    pub fn schema(&self) -> Result<&DatasetSchema> {
        self.dataset
            .as_ref()
            .map(|d| &d.schema)
            .ok_or(ExploreError::NoDataset)
    }

    /// Loads an uploaded file, picking the source from its extension.
    #[instrument(skip(self), fields(path = %path.as_ref().display()))]
    pub async fn load_path(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let source = SourceFormat::source_for_path(path.as_ref())?;
        self.load_source(source.as_ref()).await
    }

    /// Replaces the session's dataset with the given source's table.
    ///
    /// The previous registration is dropped before the new one is attempted,
    /// so a load failure leaves the session with no dataset rather than a
    /// stale one.
    pub async fn load_source(&mut self, source: &dyn DataSource) -> Result<()> {
        self.clear();

        if let Err(err) = source.register(&self.ctx, DATASET_TABLE).await {
            warn!(error = %err, "dataset load failed; session has no dataset");
            return Err(err);
        }

        let provider = self.ctx.table_provider(DATASET_TABLE).await?;
        let schema = DatasetSchema::from_arrow(provider.schema().as_ref());
        info!(
            columns = schema.column_count(),
            source = %source.description(),
            "dataset loaded"
        );
        self.dataset = Some(DatasetState {
            schema,
            description: source.description(),
        });
        Ok(())
    }

    /// Drops the current dataset, if any.
    pub fn clear(&mut self) {
        if self.dataset.take().is_some() || self.ctx.table_exist(DATASET_TABLE).unwrap_or(false) {
            let _ = self.ctx.deregister_table(DATASET_TABLE);
        }
    }

    /// Number of rows in the loaded dataset.
    pub async fn row_count(&self) -> Result<u64> {
        self.schema()?;
        let batch =
            collect_single_row(&self.ctx, &format!("SELECT COUNT(*) FROM {DATASET_TABLE}")).await?;
        Ok(u64_at(batch.column(0), 0)?.unwrap_or(0))
    }

    /// First `n` rows of the dataset, for the preview pane.
    pub async fn preview(&self, n: usize) -> Result<Vec<RecordBatch>> {
        self.schema()?;
        collect_sql(&self.ctx, &format!("SELECT * FROM {DATASET_TABLE} LIMIT {n}")).await
    }

    /// Dataset-level overview: shape, null counts, numeric summaries.
    pub async fn overview(&self) -> Result<DatasetOverview> {
        let schema = self.schema()?.clone();
        OverviewAnalyzer::new().compute(&self.ctx, &schema).await
    }
}

impl Default for ExploreSession {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ExploreSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExploreSession")
            .field("has_dataset", &self.has_dataset())
            .field(
                "description",
                &self.dataset_description().unwrap_or("<none>"),
            )
            .finish()
    }
}
