//! Time-series pairing of a datetime column with a numeric column.

use datafusion::prelude::SessionContext;
use tracing::instrument;

use crate::analyzers::exec::{collect_sql, datetime_at, f64_at};
use crate::analyzers::types::{AnalysisResult, TimePoint};
use crate::error::{ExploreError, Result};
use crate::ident::escape_identifier;
use crate::session::DATASET_TABLE;

/// Pairs (time, value) rows sorted ascending by time.
///
/// Rows where either side is null are dropped; the pairing can therefore be
/// empty without being an error (the dispatcher has already ruled out an
/// empty table).
#[derive(Debug, Clone)]
pub struct TimeSeriesAnalyzer {
    time_column: String,
    value_column: String,
    point_limit: usize,
}

impl TimeSeriesAnalyzer {
    /// Creates an analyzer pairing `time_column` with `value_column`.
    pub fn new(
        time_column: impl Into<String>,
        value_column: impl Into<String>,
        point_limit: usize,
    ) -> Self {
        Self {
            time_column: time_column.into(),
            value_column: value_column.into(),
            point_limit: point_limit.max(1),
        }
    }

    /// Returns the datetime column.
    pub fn time_column(&self) -> &str {
        &self.time_column
    }

    /// Returns the numeric value column.
    pub fn value_column(&self) -> &str {
        &self.value_column
    }

    #[instrument(skip(ctx), fields(
        analyzer = "timeseries",
        time_column = %self.time_column,
        value_column = %self.value_column
    ))]
    pub async fn compute(&self, ctx: &SessionContext) -> Result<AnalysisResult> {
        let t = escape_identifier(&self.time_column)?;
        let v = escape_identifier(&self.value_column)?;

        let sql = format!(
            "SELECT {t} AS ts, CAST({v} AS DOUBLE) AS val \
             FROM {DATASET_TABLE} \
             WHERE {t} IS NOT NULL AND {v} IS NOT NULL \
             ORDER BY ts ASC \
             LIMIT {}",
            self.point_limit
        );
        let batches = collect_sql(ctx, &sql).await?;

        let mut points = Vec::new();
        for batch in &batches {
            for row in 0..batch.num_rows() {
                let timestamp = datetime_at(batch.column(0), row)?
                    .ok_or_else(|| ExploreError::invalid_data("null timestamp after filter"))?;
                let value = f64_at(batch.column(1), row)?
                    .ok_or_else(|| ExploreError::invalid_data("null value after filter"))?;
                points.push(TimePoint { timestamp, value });
            }
        }

        Ok(AnalysisResult::TimeSeries {
            time_column: self.time_column.clone(),
            value_column: self.value_column.clone(),
            points,
        })
    }
}
