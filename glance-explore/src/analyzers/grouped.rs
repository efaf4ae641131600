//! Grouped distribution: a numeric column partitioned by a categorical one.

use datafusion::prelude::SessionContext;
use tracing::instrument;

use crate::analyzers::exec::{collect_single_row, collect_sql, f64_at, string_at, u64_at};
use crate::analyzers::types::{AnalysisResult, GroupStats};
use crate::error::{ExploreError, Result};
use crate::ident::escape_identifier;
use crate::session::DATASET_TABLE;

/// Computes per-category distribution statistics for a numeric column.
///
/// Subject to the same cardinality truncation rule as the plain categorical
/// breakdown: when the partitioning column has more distinct values than the
/// threshold, only the largest groups are kept and the result is flagged.
#[derive(Debug, Clone)]
pub struct GroupedDistributionAnalyzer {
    category_column: String,
    value_column: String,
    max_categories: usize,
}

impl GroupedDistributionAnalyzer {
    /// Creates an analyzer partitioning `value_column` by `category_column`.
    pub fn new(
        category_column: impl Into<String>,
        value_column: impl Into<String>,
        max_categories: usize,
    ) -> Self {
        Self {
            category_column: category_column.into(),
            value_column: value_column.into(),
            max_categories: max_categories.max(1),
        }
    }

    /// Returns the partitioning column.
    pub fn category_column(&self) -> &str {
        &self.category_column
    }

    /// Returns the summarized numeric column.
    pub fn value_column(&self) -> &str {
        &self.value_column
    }

    #[instrument(skip(ctx), fields(
        analyzer = "grouped_distribution",
        category_column = %self.category_column,
        value_column = %self.value_column
    ))]
    pub async fn compute(&self, ctx: &SessionContext) -> Result<AnalysisResult> {
        let cat = escape_identifier(&self.category_column)?;
        let val = escape_identifier(&self.value_column)?;

        let distinct_sql = format!(
            "SELECT COUNT(DISTINCT {cat}) AS distinct_cnt \
             FROM {DATASET_TABLE} WHERE {cat} IS NOT NULL AND {val} IS NOT NULL"
        );
        let batch = collect_single_row(ctx, &distinct_sql).await?;
        let distinct = u64_at(batch.column(0), 0)?.unwrap_or(0);

        if distinct == 0 {
            return Err(ExploreError::insufficient_data(format!(
                "no rows have both '{}' and '{}' set",
                self.category_column, self.value_column
            )));
        }

        let truncated = distinct > self.max_categories as u64;

        let sql = format!(
            "SELECT category, COUNT(v) AS cnt, AVG(v) AS mean, STDDEV(v) AS std_dev, \
                    MIN(v) AS min_val, approx_percentile_cont(v, 0.5) AS median, \
                    MAX(v) AS max_val \
             FROM (SELECT CAST({cat} AS VARCHAR) AS category, CAST({val} AS DOUBLE) AS v \
                   FROM {DATASET_TABLE} \
                   WHERE {cat} IS NOT NULL AND {val} IS NOT NULL) AS t \
             GROUP BY category \
             ORDER BY cnt DESC, category ASC \
             LIMIT {}",
            self.max_categories
        );
        let batches = collect_sql(ctx, &sql).await?;

        let mut groups = Vec::new();
        for batch in &batches {
            for row in 0..batch.num_rows() {
                let category = string_at(batch.column(0), row)?
                    .ok_or_else(|| ExploreError::invalid_data("null category after filter"))?;
                let count = u64_at(batch.column(1), row)?.unwrap_or(0);
                let mean = f64_at(batch.column(2), row)?
                    .ok_or_else(|| ExploreError::invalid_data("mean missing for group"))?;
                let std_dev = f64_at(batch.column(3), row)?;
                let min = f64_at(batch.column(4), row)?
                    .ok_or_else(|| ExploreError::invalid_data("min missing for group"))?;
                let median = f64_at(batch.column(5), row)?;
                let max = f64_at(batch.column(6), row)?
                    .ok_or_else(|| ExploreError::invalid_data("max missing for group"))?;
                groups.push(GroupStats {
                    category,
                    count,
                    mean,
                    std_dev,
                    min,
                    median,
                    max,
                });
            }
        }

        Ok(AnalysisResult::GroupedDistribution {
            category_column: self.category_column.clone(),
            value_column: self.value_column.clone(),
            groups,
            truncated,
        })
    }
}
