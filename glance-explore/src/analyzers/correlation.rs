//! Pearson correlation matrix over the dataset's numeric columns.

use datafusion::prelude::SessionContext;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::analyzers::exec::{collect_single_row, f64_at, u64_at};
use crate::analyzers::types::AnalysisResult;
use crate::error::{ExploreError, Result};
use crate::ident::escape_identifier;
use crate::session::DATASET_TABLE;

/// Running sums for one column pair, enough to derive Pearson r.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairSums {
    /// Rows where both columns are non-null.
    pub n: u64,
    /// Sum of x.
    pub sum_x: f64,
    /// Sum of y.
    pub sum_y: f64,
    /// Sum of x squared.
    pub sum_x2: f64,
    /// Sum of y squared.
    pub sum_y2: f64,
    /// Sum of x times y.
    pub sum_xy: f64,
}

impl PairSums {
    /// Pearson correlation coefficient; NaN when either side has zero
    /// variance or fewer than two paired observations exist.
    pub fn pearson(&self) -> f64 {
        if self.n < 2 {
            return f64::NAN;
        }
        let n = self.n as f64;
        let cov = self.sum_xy - self.sum_x * self.sum_y / n;
        let var_x = self.sum_x2 - self.sum_x * self.sum_x / n;
        let var_y = self.sum_y2 - self.sum_y * self.sum_y / n;
        let denom = (var_x * var_y).sqrt();
        if denom == 0.0 {
            f64::NAN
        } else {
            cov / denom
        }
    }
}

/// Builds the full correlation matrix across the given numeric columns.
///
/// The matrix is square and symmetric with 1.0 pinned on the diagonal; each
/// off-diagonal cell is computed once from a single aggregate query and
/// mirrored.
#[derive(Debug, Clone)]
pub struct CorrelationMatrixAnalyzer {
    columns: Vec<String>,
}

impl CorrelationMatrixAnalyzer {
    /// Creates an analyzer over the given numeric columns.
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    /// Returns the columns the matrix covers.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[instrument(skip(ctx), fields(analyzer = "correlation", columns = self.columns.len()))]
    pub async fn compute(&self, ctx: &SessionContext) -> Result<AnalysisResult> {
        if self.columns.len() < 2 {
            return Err(ExploreError::insufficient_data(
                "correlation needs at least two numeric columns",
            ));
        }

        let k = self.columns.len();
        let mut values = vec![vec![0.0_f64; k]; k];
        for (i, row) in values.iter_mut().enumerate() {
            row[i] = 1.0;
        }

        for i in 0..k {
            for j in (i + 1)..k {
                let sums = self
                    .pair_sums(ctx, &self.columns[i], &self.columns[j])
                    .await?;
                let r = sums.pearson();
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        Ok(AnalysisResult::CorrelationMatrix {
            columns: self.columns.clone(),
            values,
        })
    }

    async fn pair_sums(&self, ctx: &SessionContext, x: &str, y: &str) -> Result<PairSums> {
        let cx = escape_identifier(x)?;
        let cy = escape_identifier(y)?;

        let sql = format!(
            "SELECT COUNT(*) AS n, \
                    SUM(CAST({cx} AS DOUBLE)) AS sum_x, \
                    SUM(CAST({cy} AS DOUBLE)) AS sum_y, \
                    SUM(CAST({cx} AS DOUBLE) * CAST({cx} AS DOUBLE)) AS sum_x2, \
                    SUM(CAST({cy} AS DOUBLE) * CAST({cy} AS DOUBLE)) AS sum_y2, \
                    SUM(CAST({cx} AS DOUBLE) * CAST({cy} AS DOUBLE)) AS sum_xy \
             FROM {DATASET_TABLE} \
             WHERE {cx} IS NOT NULL AND {cy} IS NOT NULL"
        );
        let batch = collect_single_row(ctx, &sql).await?;

        let n = u64_at(batch.column(0), 0)?.unwrap_or(0);
        if n == 0 {
            return Ok(PairSums {
                n: 0,
                sum_x: 0.0,
                sum_y: 0.0,
                sum_x2: 0.0,
                sum_y2: 0.0,
                sum_xy: 0.0,
            });
        }

        Ok(PairSums {
            n,
            sum_x: f64_at(batch.column(1), 0)?.unwrap_or(0.0),
            sum_y: f64_at(batch.column(2), 0)?.unwrap_or(0.0),
            sum_x2: f64_at(batch.column(3), 0)?.unwrap_or(0.0),
            sum_y2: f64_at(batch.column(4), 0)?.unwrap_or(0.0),
            sum_xy: f64_at(batch.column(5), 0)?.unwrap_or(0.0),
        })
    }
}
