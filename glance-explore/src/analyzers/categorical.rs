//! Frequency analysis for categorical columns.

use datafusion::prelude::SessionContext;
use tracing::instrument;

use crate::analyzers::exec::{collect_single_row, collect_sql, string_at, u64_at};
use crate::analyzers::types::{AnalysisResult, CategoryCount};
use crate::error::{ExploreError, Result};
use crate::ident::escape_identifier;
use crate::session::DATASET_TABLE;

/// Computes per-category row counts, descending by count.
///
/// When the column's cardinality exceeds the configured threshold the result
/// is cut to the top-K most frequent categories and flagged as truncated.
/// Ties are broken by category name ascending so output order is stable.
#[derive(Debug, Clone)]
pub struct CategoryCountsAnalyzer {
    column: String,
    max_categories: usize,
}

impl CategoryCountsAnalyzer {
    /// Creates an analyzer for the given column and cardinality threshold.
    pub fn new(column: impl Into<String>, max_categories: usize) -> Self {
        Self {
            column: column.into(),
            max_categories: max_categories.max(1),
        }
    }

    /// Returns the column being analyzed.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Returns the cardinality threshold.
    pub fn max_categories(&self) -> usize {
        self.max_categories
    }

    #[instrument(skip(ctx), fields(analyzer = "category_counts", column = %self.column))]
    pub async fn compute(&self, ctx: &SessionContext) -> Result<AnalysisResult> {
        let col = escape_identifier(&self.column)?;

        let distinct_sql = format!(
            "SELECT COUNT(DISTINCT {col}) AS distinct_cnt \
             FROM {DATASET_TABLE} WHERE {col} IS NOT NULL"
        );
        let batch = collect_single_row(ctx, &distinct_sql).await?;
        let distinct = u64_at(batch.column(0), 0)?.unwrap_or(0);

        if distinct == 0 {
            return Err(ExploreError::insufficient_data(format!(
                "column '{}' has no non-null values",
                self.column
            )));
        }

        let truncated = distinct > self.max_categories as u64;

        let counts_sql = format!(
            "SELECT category, COUNT(*) AS cnt \
             FROM (SELECT CAST({col} AS VARCHAR) AS category \
                   FROM {DATASET_TABLE} WHERE {col} IS NOT NULL) AS t \
             GROUP BY category \
             ORDER BY cnt DESC, category ASC \
             LIMIT {}",
            self.max_categories
        );
        let batches = collect_sql(ctx, &counts_sql).await?;

        let mut counts = Vec::new();
        for batch in &batches {
            for row in 0..batch.num_rows() {
                let category = string_at(batch.column(0), row)?
                    .ok_or_else(|| ExploreError::invalid_data("null category after filter"))?;
                let count = u64_at(batch.column(1), row)?.unwrap_or(0);
                counts.push(CategoryCount::new(category, count));
            }
        }

        Ok(AnalysisResult::CategoryCounts {
            column: self.column.clone(),
            counts,
            distinct,
            truncated,
        })
    }
}
