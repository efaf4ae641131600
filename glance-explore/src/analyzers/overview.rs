//! Dataset-level overview: shape, null counts, and numeric summaries.
//!
//! This is the "grasp the whole picture first" pass a dashboard shows before
//! any column is selected. Unlike column analysis, an overview of an empty
//! dataset is valid; it simply reports zero rows.

use datafusion::prelude::SessionContext;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::analyzers::exec::{collect_single_row, f64_at, u64_at};
use crate::error::{ExploreError, Result};
use crate::ident::escape_identifier;
use crate::schema::{ColumnSchema, DatasetSchema};
use crate::session::DATASET_TABLE;

/// One column's place in the overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnOverview {
    /// Name, physical type, and semantic type.
    pub schema: ColumnSchema,
    /// Number of null entries in the column.
    pub null_count: u64,
}

/// Compact statistics for one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    /// The summarized column.
    pub column: String,
    /// Count of non-null values.
    pub count: u64,
    /// Mean, absent when the column is all null.
    pub mean: Option<f64>,
    /// Sample standard deviation, absent below two values.
    pub std_dev: Option<f64>,
    /// Minimum, absent when the column is all null.
    pub min: Option<f64>,
    /// Maximum, absent when the column is all null.
    pub max: Option<f64>,
}

/// The dataset-level overview a dashboard renders on upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetOverview {
    /// Total row count.
    pub row_count: u64,
    /// Total column count.
    pub column_count: usize,
    /// Per-column schema and null counts, in dataset order.
    pub columns: Vec<ColumnOverview>,
    /// Per-numeric-column summaries, in dataset order.
    pub numeric_summary: Vec<NumericSummary>,
}

/// Computes the dataset overview.
#[derive(Debug, Clone)]
pub struct OverviewAnalyzer;

impl OverviewAnalyzer {
    /// Creates the overview analyzer.
    pub fn new() -> Self {
        Self
    }

    #[instrument(skip(self, ctx, schema), fields(analyzer = "overview"))]
    pub async fn compute(
        &self,
        ctx: &SessionContext,
        schema: &DatasetSchema,
    ) -> Result<DatasetOverview> {
        // One pass over the table for total rows plus non-null counts.
        let mut projections = vec!["COUNT(*) AS total".to_string()];
        for (idx, column) in schema.columns().iter().enumerate() {
            let col = escape_identifier(&column.name)?;
            projections.push(format!("COUNT({col}) AS c{idx}"));
        }
        let sql = format!("SELECT {} FROM {DATASET_TABLE}", projections.join(", "));
        let batch = collect_single_row(ctx, &sql).await?;

        let row_count = u64_at(batch.column(0), 0)?.unwrap_or(0);

        let mut columns = Vec::with_capacity(schema.column_count());
        for (idx, column) in schema.columns().iter().enumerate() {
            let non_null = u64_at(batch.column(idx + 1), 0)?.unwrap_or(0);
            columns.push(ColumnOverview {
                schema: column.clone(),
                null_count: row_count.saturating_sub(non_null),
            });
        }

        let mut numeric_summary = Vec::new();
        for name in schema.numeric_columns() {
            numeric_summary.push(self.numeric_summary(ctx, name).await?);
        }

        Ok(DatasetOverview {
            row_count,
            column_count: schema.column_count(),
            columns,
            numeric_summary,
        })
    }

    async fn numeric_summary(&self, ctx: &SessionContext, column: &str) -> Result<NumericSummary> {
        let col = escape_identifier(column)?;
        let sql = format!(
            "SELECT COUNT({col}) AS cnt, \
                    AVG(CAST({col} AS DOUBLE)) AS mean, \
                    STDDEV(CAST({col} AS DOUBLE)) AS std_dev, \
                    MIN(CAST({col} AS DOUBLE)) AS min_val, \
                    MAX(CAST({col} AS DOUBLE)) AS max_val \
             FROM {DATASET_TABLE} WHERE {col} IS NOT NULL"
        );
        let batch = collect_single_row(ctx, &sql).await?;

        Ok(NumericSummary {
            column: column.to_string(),
            count: u64_at(batch.column(0), 0)?.unwrap_or(0),
            mean: f64_at(batch.column(1), 0)?,
            std_dev: f64_at(batch.column(2), 0)?,
            min: f64_at(batch.column(3), 0)?,
            max: f64_at(batch.column(4), 0)?,
        })
    }
}

impl Default for OverviewAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetOverview {
    /// Looks up one column's overview entry.
    pub fn column(&self, name: &str) -> Result<&ColumnOverview> {
        self.columns
            .iter()
            .find(|c| c.schema.name == name)
            .ok_or_else(|| ExploreError::invalid_column(name))
    }
}
