//! Column-type-driven analysis dispatch.
//!
//! This is the decision core of the library: given the session's table and a
//! selected column, pick the analysis branches from the column's semantic
//! type and the optional comparison column, and run them.

use tracing::{debug, instrument};

use crate::analyzers::categorical::CategoryCountsAnalyzer;
use crate::analyzers::correlation::CorrelationMatrixAnalyzer;
use crate::analyzers::distribution::DistributionAnalyzer;
use crate::analyzers::grouped::GroupedDistributionAnalyzer;
use crate::analyzers::scatter::ScatterAnalyzer;
use crate::analyzers::timeseries::TimeSeriesAnalyzer;
use crate::analyzers::types::{AnalysisNote, AnalysisResult, ColumnReport};
use crate::error::{ExploreError, Result};
use crate::schema::SemanticType;
use crate::session::ExploreSession;

/// Tuning knobs for the dispatcher and the analyzers it drives.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Cardinality threshold above which categorical output is truncated.
    pub max_categories: usize,
    /// Number of histogram bins for numeric distributions.
    pub histogram_bins: usize,
    /// Cap on scatter and time-series points fetched per chart.
    pub point_limit: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            max_categories: 30,
            histogram_bins: 10,
            point_limit: 10_000,
        }
    }
}

impl AnalyzerConfig {
    /// Sets the categorical truncation threshold.
    pub fn with_max_categories(mut self, max: usize) -> Self {
        self.max_categories = max;
        self
    }

    /// Sets the histogram bin count.
    pub fn with_histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = bins;
        self
    }

    /// Sets the per-chart point cap.
    pub fn with_point_limit(mut self, limit: usize) -> Self {
        self.point_limit = limit;
        self
    }
}

/// The column analyzer/dispatcher.
///
/// A pure function of (table, column, optional comparison column): it holds
/// no session state and can be reused across selections and sessions.
#[derive(Debug, Clone, Default)]
pub struct ColumnAnalyzer {
    config: AnalyzerConfig,
}

impl ColumnAnalyzer {
    /// Creates a dispatcher with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a dispatcher with the given configuration.
    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyzes one selected column, optionally against a comparison column.
    ///
    /// Branches on the column's semantic type:
    ///
    /// - numeric: distribution statistics and histogram, plus a scatter,
    ///   grouped box, or time series when a comparison column is given
    /// - categorical: frequency counts (truncated to top-K over the
    ///   cardinality threshold), plus a grouped distribution for a numeric
    ///   comparison
    /// - datetime: one time series per numeric column (or only the
    ///   comparison column when given)
    ///
    /// Fails with [`ExploreError::InvalidColumn`] for unknown columns and
    /// with [`ExploreError::InsufficientData`] when the table is empty or a
    /// requested cross-analysis has no compatible partner column.
    #[instrument(skip(self, session), fields(column = %column, compare = compare.unwrap_or("")))]
    pub async fn analyze(
        &self,
        session: &ExploreSession,
        column: &str,
        compare: Option<&str>,
    ) -> Result<ColumnReport> {
        let schema = session.schema()?;
        let ctx = session.context();

        let semantic = schema.semantic_type(column)?;
        let compare_type = match compare {
            Some(name) => {
                if name == column {
                    return Err(ExploreError::invalid_config(
                        "comparison column must differ from the selected column",
                    ));
                }
                Some(schema.semantic_type(name)?)
            }
            None => None,
        };

        if session.row_count().await? == 0 {
            return Err(ExploreError::insufficient_data("dataset has no rows"));
        }

        debug!(%semantic, "dispatching column analysis");

        let mut results: Vec<AnalysisResult> = Vec::new();
        let mut notes: Vec<AnalysisNote> = Vec::new();

        match semantic {
            SemanticType::Numeric => {
                results.push(
                    DistributionAnalyzer::new(column, self.config.histogram_bins)
                        .compute(ctx)
                        .await?,
                );

                match (compare, compare_type) {
                    (Some(other), Some(SemanticType::Numeric)) => {
                        results.push(
                            ScatterAnalyzer::new(column, other, self.config.point_limit)
                                .compute(ctx)
                                .await?,
                        );
                    }
                    (Some(other), Some(SemanticType::Categorical)) => {
                        let grouped = GroupedDistributionAnalyzer::new(
                            other,
                            column,
                            self.config.max_categories,
                        )
                        .compute(ctx)
                        .await?;
                        self.note_truncation(&grouped, other, &mut notes);
                        results.push(grouped);
                    }
                    (Some(other), Some(SemanticType::Datetime)) => {
                        results.push(
                            TimeSeriesAnalyzer::new(other, column, self.config.point_limit)
                                .compute(ctx)
                                .await?,
                        );
                    }
                    _ => {
                        let partners: Vec<&str> = schema
                            .numeric_columns()
                            .into_iter()
                            .filter(|c| *c != column)
                            .collect();
                        if partners.is_empty() {
                            notes.push(AnalysisNote::info(
                                "no other numeric column is available for a scatter comparison",
                            ));
                        } else {
                            notes.push(AnalysisNote::info(format!(
                                "scatter comparison available against: {}",
                                partners.join(", ")
                            )));
                        }
                    }
                }
            }

            SemanticType::Categorical => {
                let counts = CategoryCountsAnalyzer::new(column, self.config.max_categories)
                    .compute(ctx)
                    .await?;
                self.note_truncation(&counts, column, &mut notes);
                results.push(counts);

                match (compare, compare_type) {
                    (Some(other), Some(SemanticType::Numeric)) => {
                        let grouped = GroupedDistributionAnalyzer::new(
                            column,
                            other,
                            self.config.max_categories,
                        )
                        .compute(ctx)
                        .await?;
                        self.note_truncation(&grouped, column, &mut notes);
                        results.push(grouped);
                    }
                    (Some(other), Some(_)) => {
                        return Err(ExploreError::insufficient_data(format!(
                            "grouped comparison of '{column}' needs a numeric column, \
                             but '{other}' is not numeric"
                        )));
                    }
                    _ => {
                        if schema.numeric_columns().is_empty() {
                            notes.push(AnalysisNote::info(
                                "no numeric column is available for a grouped comparison",
                            ));
                        }
                    }
                }
            }

            SemanticType::Datetime => {
                let value_columns: Vec<String> = match (compare, compare_type) {
                    (Some(other), Some(SemanticType::Numeric)) => vec![other.to_string()],
                    (Some(other), Some(_)) => {
                        return Err(ExploreError::insufficient_data(format!(
                            "time series over '{column}' needs a numeric column, \
                             but '{other}' is not numeric"
                        )));
                    }
                    _ => schema
                        .numeric_columns()
                        .into_iter()
                        .map(String::from)
                        .collect(),
                };

                if value_columns.is_empty() {
                    return Err(ExploreError::insufficient_data(
                        "no numeric columns to plot against the time axis",
                    ));
                }

                for value_column in value_columns {
                    results.push(
                        TimeSeriesAnalyzer::new(column, &value_column, self.config.point_limit)
                            .compute(ctx)
                            .await?,
                    );
                }
            }
        }

        Ok(ColumnReport {
            column: column.to_string(),
            semantic_type: semantic,
            results,
            notes,
        })
    }

    /// Computes the Pearson correlation matrix over all numeric columns.
    ///
    /// Fails with [`ExploreError::InsufficientData`] when fewer than two
    /// numeric columns exist; a heatmap of one column is not a heatmap.
    #[instrument(skip(self, session))]
    pub async fn correlation_matrix(&self, session: &ExploreSession) -> Result<AnalysisResult> {
        let schema = session.schema()?;
        let numeric: Vec<String> = schema.numeric_columns().into_iter().map(String::from).collect();
        CorrelationMatrixAnalyzer::new(numeric)
            .compute(session.context())
            .await
    }

    fn note_truncation(
        &self,
        result: &AnalysisResult,
        column: &str,
        notes: &mut Vec<AnalysisNote>,
    ) {
        let (truncated, distinct) = match result {
            AnalysisResult::CategoryCounts {
                truncated, distinct, ..
            } => (*truncated, Some(*distinct)),
            AnalysisResult::GroupedDistribution { truncated, .. } => (*truncated, None),
            _ => (false, None),
        };
        if truncated {
            let detail = match distinct {
                Some(d) => format!("{d} distinct values"),
                None => "high cardinality".to_string(),
            };
            notes.push(AnalysisNote::warning(format!(
                "column '{column}' has {detail}; showing the top {} categories only",
                self.config.max_categories
            )));
        }
    }
}
