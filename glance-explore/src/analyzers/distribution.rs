//! Distribution analysis for numeric columns: descriptive statistics and
//! histogram buckets.

use datafusion::prelude::SessionContext;
use tracing::instrument;

use crate::analyzers::exec::{collect_single_row, collect_sql, f64_at, u64_at};
use crate::analyzers::types::{AnalysisResult, DescriptiveStats, HistogramBucket};
use crate::error::{ExploreError, Result};
use crate::ident::escape_identifier;
use crate::session::DATASET_TABLE;

/// Computes a numeric column's five-number summary and histogram.
///
/// Quartiles use exact linear interpolation over order statistics rather
/// than sketch-based approximation, so results are deterministic for any
/// input size.
#[derive(Debug, Clone)]
pub struct DistributionAnalyzer {
    column: String,
    bins: usize,
}

impl DistributionAnalyzer {
    /// Creates an analyzer for the given column with the given bin count
    /// (clamped between 1 and 1000).
    pub fn new(column: impl Into<String>, bins: usize) -> Self {
        Self {
            column: column.into(),
            bins: bins.clamp(1, 1000),
        }
    }

    /// Returns the column being analyzed.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Returns the configured number of histogram bins.
    pub fn bins(&self) -> usize {
        self.bins
    }

    #[instrument(skip(ctx), fields(analyzer = "distribution", column = %self.column))]
    pub async fn compute(&self, ctx: &SessionContext) -> Result<AnalysisResult> {
        let col = escape_identifier(&self.column)?;

        let stats_sql = format!(
            "SELECT COUNT({col}) AS cnt, \
                    AVG(CAST({col} AS DOUBLE)) AS mean, \
                    STDDEV(CAST({col} AS DOUBLE)) AS std_dev, \
                    MIN(CAST({col} AS DOUBLE)) AS min_val, \
                    MAX(CAST({col} AS DOUBLE)) AS max_val \
             FROM {DATASET_TABLE} WHERE {col} IS NOT NULL"
        );
        let batch = collect_single_row(ctx, &stats_sql).await?;

        let count = u64_at(batch.column(0), 0)?.unwrap_or(0);
        if count == 0 {
            return Err(ExploreError::insufficient_data(format!(
                "column '{}' has no non-null values",
                self.column
            )));
        }

        let mean = f64_at(batch.column(1), 0)?
            .ok_or_else(|| ExploreError::invalid_data("mean missing for non-empty column"))?;
        let std_dev = f64_at(batch.column(2), 0)?;
        let min = f64_at(batch.column(3), 0)?
            .ok_or_else(|| ExploreError::invalid_data("min missing for non-empty column"))?;
        let max = f64_at(batch.column(4), 0)?
            .ok_or_else(|| ExploreError::invalid_data("max missing for non-empty column"))?;

        let q1 = self.percentile(ctx, &col, count, 0.25).await?;
        let median = self.percentile(ctx, &col, count, 0.5).await?;
        let q3 = self.percentile(ctx, &col, count, 0.75).await?;

        let stats = DescriptiveStats {
            count,
            mean,
            std_dev,
            min,
            q1: Some(q1),
            median: Some(median),
            q3: Some(q3),
            max,
        };

        let histogram = self.histogram(ctx, &col, count, min, max).await?;

        Ok(AnalysisResult::Distribution {
            column: self.column.clone(),
            stats,
            histogram,
        })
    }

    /// Exact percentile by linear interpolation between order statistics.
    async fn percentile(
        &self,
        ctx: &SessionContext,
        col: &str,
        count: u64,
        q: f64,
    ) -> Result<f64> {
        let position = q * (count - 1) as f64;
        let lower_index = position.floor() as u64;
        let upper_index = position.ceil() as u64;
        let fraction = position - position.floor();

        let lower = self.sorted_value_at(ctx, col, lower_index).await?;
        if lower_index == upper_index {
            return Ok(lower);
        }
        let upper = self.sorted_value_at(ctx, col, upper_index).await?;
        Ok(lower + (upper - lower) * fraction)
    }

    /// Fetches the k-th smallest non-null value of the column.
    async fn sorted_value_at(&self, ctx: &SessionContext, col: &str, index: u64) -> Result<f64> {
        let sql = format!(
            "SELECT CAST({col} AS DOUBLE) AS v FROM {DATASET_TABLE} \
             WHERE {col} IS NOT NULL ORDER BY v ASC LIMIT 1 OFFSET {index}"
        );
        let batch = collect_single_row(ctx, &sql).await?;
        f64_at(batch.column(0), 0)?
            .ok_or_else(|| ExploreError::invalid_data("order statistic came back null"))
    }

    /// Fixed-width bucketing via a CASE projection. The final bucket is
    /// closed on the right so the maximum lands inside it.
    async fn histogram(
        &self,
        ctx: &SessionContext,
        col: &str,
        count: u64,
        min: f64,
        max: f64,
    ) -> Result<Vec<HistogramBucket>> {
        let range = max - min;
        if range <= 0.0 || self.bins == 1 {
            // Degenerate distribution: everything in one bucket.
            return Ok(vec![HistogramBucket::new(min, max, count)]);
        }

        let width = range / self.bins as f64;
        let mut case_clauses = Vec::with_capacity(self.bins);
        for i in 0..self.bins {
            let lower = min + i as f64 * width;
            if i == self.bins - 1 {
                case_clauses.push(format!(
                    "WHEN CAST({col} AS DOUBLE) >= {lower} AND CAST({col} AS DOUBLE) <= {max} THEN {i}"
                ));
            } else {
                let upper = min + (i + 1) as f64 * width;
                case_clauses.push(format!(
                    "WHEN CAST({col} AS DOUBLE) >= {lower} AND CAST({col} AS DOUBLE) < {upper} THEN {i}"
                ));
            }
        }

        let sql = format!(
            "SELECT CASE {} ELSE {} END AS bucket_num, COUNT(*) AS cnt \
             FROM {DATASET_TABLE} WHERE {col} IS NOT NULL \
             GROUP BY bucket_num ORDER BY bucket_num",
            case_clauses.join(" "),
            self.bins
        );
        let batches = collect_sql(ctx, &sql).await?;

        let mut buckets: Vec<HistogramBucket> = (0..self.bins)
            .map(|i| {
                let lower = min + i as f64 * width;
                let upper = if i == self.bins - 1 {
                    max
                } else {
                    min + (i + 1) as f64 * width
                };
                HistogramBucket::new(lower, upper, 0)
            })
            .collect();

        for batch in &batches {
            for row in 0..batch.num_rows() {
                let bucket_idx = u64_at(batch.column(0), row)?.unwrap_or(self.bins as u64);
                let bucket_count = u64_at(batch.column(1), row)?.unwrap_or(0);
                if let Some(bucket) = buckets.get_mut(bucket_idx as usize) {
                    bucket.count = bucket_count;
                }
            }
        }

        Ok(buckets)
    }
}
