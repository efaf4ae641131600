//! Paired observations of two numeric columns.

use datafusion::prelude::SessionContext;
use tracing::instrument;

use crate::analyzers::exec::{collect_sql, f64_at};
use crate::analyzers::types::AnalysisResult;
use crate::error::{ExploreError, Result};
use crate::ident::escape_identifier;
use crate::session::DATASET_TABLE;

/// Collects (x, y) pairs for a scatter relationship between two numeric
/// columns, capped at a point limit so huge tables stay renderable.
#[derive(Debug, Clone)]
pub struct ScatterAnalyzer {
    x_column: String,
    y_column: String,
    point_limit: usize,
}

impl ScatterAnalyzer {
    /// Creates an analyzer pairing `x_column` with `y_column`.
    pub fn new(
        x_column: impl Into<String>,
        y_column: impl Into<String>,
        point_limit: usize,
    ) -> Self {
        Self {
            x_column: x_column.into(),
            y_column: y_column.into(),
            point_limit: point_limit.max(1),
        }
    }

    /// Returns the x-axis column.
    pub fn x_column(&self) -> &str {
        &self.x_column
    }

    /// Returns the y-axis column.
    pub fn y_column(&self) -> &str {
        &self.y_column
    }

    #[instrument(skip(ctx), fields(
        analyzer = "scatter",
        x_column = %self.x_column,
        y_column = %self.y_column
    ))]
    pub async fn compute(&self, ctx: &SessionContext) -> Result<AnalysisResult> {
        let x = escape_identifier(&self.x_column)?;
        let y = escape_identifier(&self.y_column)?;

        let sql = format!(
            "SELECT CAST({x} AS DOUBLE) AS xv, CAST({y} AS DOUBLE) AS yv \
             FROM {DATASET_TABLE} \
             WHERE {x} IS NOT NULL AND {y} IS NOT NULL \
             LIMIT {}",
            self.point_limit
        );
        let batches = collect_sql(ctx, &sql).await?;

        let mut points = Vec::new();
        for batch in &batches {
            for row in 0..batch.num_rows() {
                let xv = f64_at(batch.column(0), row)?
                    .ok_or_else(|| ExploreError::invalid_data("null x after filter"))?;
                let yv = f64_at(batch.column(1), row)?
                    .ok_or_else(|| ExploreError::invalid_data("null y after filter"))?;
                points.push((xv, yv));
            }
        }

        Ok(AnalysisResult::Scatter {
            x_column: self.x_column.clone(),
            y_column: self.y_column.clone(),
            points,
        })
    }
}
