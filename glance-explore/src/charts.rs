//! Chart specifications derived from analysis results.
//!
//! Rasterization is a renderer concern; this module only describes what a
//! renderer should draw and what the downloadable file should be called.
//! Filenames follow `{chart_kind}_{column}[_vs_{column2}].png`.

use serde::{Deserialize, Serialize};

use crate::analyzers::types::AnalysisResult;

/// The chart family a renderer should draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Histogram and box plot pair for a numeric column.
    Distribution,
    /// Horizontal count bars per category.
    CountPlot,
    /// Scatter of two numeric columns.
    Scatter,
    /// Line chart of values over time.
    TimeSeries,
    /// Per-category box plots of a numeric column.
    BoxPlot,
    /// Correlation heatmap over numeric columns.
    Heatmap,
}

impl ChartKind {
    /// The filename prefix for this chart family.
    pub fn file_stem(&self) -> &'static str {
        match self {
            ChartKind::Distribution => "distribution",
            ChartKind::CountPlot => "countplot",
            ChartKind::Scatter => "scatter",
            ChartKind::TimeSeries => "timeseries",
            ChartKind::BoxPlot => "boxplot",
            ChartKind::Heatmap => "heatmap",
        }
    }
}

/// What a renderer needs to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    /// Chart family.
    pub kind: ChartKind,
    /// Chart title.
    pub title: String,
    /// Primary column (x axis or the distributed column), when applicable.
    pub x: Option<String>,
    /// Secondary column (y axis or the value column), when applicable.
    pub y: Option<String>,
}

impl ChartSpec {
    /// Derives the chart specs a renderer would draw for one result.
    pub fn for_result(result: &AnalysisResult) -> Vec<ChartSpec> {
        match result {
            AnalysisResult::Distribution { column, .. } => vec![ChartSpec {
                kind: ChartKind::Distribution,
                title: format!("Distribution of {column}"),
                x: Some(column.clone()),
                y: None,
            }],
            AnalysisResult::CategoryCounts { column, .. } => vec![ChartSpec {
                kind: ChartKind::CountPlot,
                title: format!("Counts per category of {column}"),
                x: Some(column.clone()),
                y: None,
            }],
            AnalysisResult::Scatter {
                x_column, y_column, ..
            } => vec![ChartSpec {
                kind: ChartKind::Scatter,
                title: format!("{x_column} vs {y_column}"),
                x: Some(x_column.clone()),
                y: Some(y_column.clone()),
            }],
            AnalysisResult::TimeSeries {
                time_column,
                value_column,
                ..
            } => vec![ChartSpec {
                kind: ChartKind::TimeSeries,
                title: format!("{value_column} over {time_column}"),
                x: Some(time_column.clone()),
                y: Some(value_column.clone()),
            }],
            AnalysisResult::GroupedDistribution {
                category_column,
                value_column,
                ..
            } => vec![ChartSpec {
                kind: ChartKind::BoxPlot,
                title: format!("{value_column} by {category_column}"),
                x: Some(category_column.clone()),
                y: Some(value_column.clone()),
            }],
            AnalysisResult::CorrelationMatrix { .. } => vec![ChartSpec {
                kind: ChartKind::Heatmap,
                title: "Correlation heatmap".to_string(),
                x: None,
                y: None,
            }],
        }
    }

    /// Download filename, `{chart_kind}_{column}[_vs_{column2}].png`.
    pub fn download_filename(&self) -> String {
        let stem = self.kind.file_stem();
        match (&self.x, &self.y) {
            (Some(x), Some(y)) => {
                format!("{stem}_{}_vs_{}.png", sanitize(x), sanitize(y))
            }
            (Some(x), None) => format!("{stem}_{}.png", sanitize(x)),
            _ => format!("{stem}_correlation.png"),
        }
    }
}

/// Keeps filenames portable: anything outside `[A-Za-z0-9_-]` becomes `_`.
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::types::{CategoryCount, DescriptiveStats};

    fn stats() -> DescriptiveStats {
        DescriptiveStats {
            count: 3,
            mean: 30.0,
            std_dev: Some(10.0),
            min: 20.0,
            q1: Some(25.0),
            median: Some(30.0),
            q3: Some(35.0),
            max: 40.0,
        }
    }

    #[test]
    fn distribution_filename() {
        let result = AnalysisResult::Distribution {
            column: "age".to_string(),
            stats: stats(),
            histogram: vec![],
        };
        let specs = ChartSpec::for_result(&result);
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].download_filename(), "distribution_age.png");
    }

    #[test]
    fn scatter_filename_uses_vs() {
        let result = AnalysisResult::Scatter {
            x_column: "age".to_string(),
            y_column: "income".to_string(),
            points: vec![],
        };
        let specs = ChartSpec::for_result(&result);
        assert_eq!(specs[0].download_filename(), "scatter_age_vs_income.png");
    }

    #[test]
    fn timeseries_filename_matches_pattern() {
        let result = AnalysisResult::TimeSeries {
            time_column: "date".to_string(),
            value_column: "sales".to_string(),
            points: vec![],
        };
        let specs = ChartSpec::for_result(&result);
        assert_eq!(specs[0].download_filename(), "timeseries_date_vs_sales.png");
    }

    #[test]
    fn odd_column_names_are_sanitized() {
        let result = AnalysisResult::CategoryCounts {
            column: "order status".to_string(),
            counts: vec![CategoryCount::new("open", 1)],
            distinct: 1,
            truncated: false,
        };
        let specs = ChartSpec::for_result(&result);
        assert_eq!(specs[0].download_filename(), "countplot_order_status.png");
    }
}
