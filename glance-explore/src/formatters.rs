//! Rendering of reports for the dashboard's text panes.
//!
//! Two formatters: a human-readable one for terminal/demo output and a JSON
//! one for frontends that render their own widgets.

use std::fmt::Write;

use crate::analyzers::overview::DatasetOverview;
use crate::analyzers::types::{AnalysisResult, ColumnReport};
use crate::charts::ChartSpec;
use crate::error::{ExploreError, Result};

/// Configuration options for report formatting.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Include advisory notes in output.
    pub include_notes: bool,
    /// Include the derived chart specs and download filenames.
    pub include_charts: bool,
    /// Maximum list rows (categories, groups, buckets) to print.
    pub max_rows: usize,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            include_notes: true,
            include_charts: true,
            max_rows: 30,
        }
    }
}

impl FormatterConfig {
    /// Compact output: no notes, no chart specs, short lists.
    pub fn minimal() -> Self {
        Self {
            include_notes: false,
            include_charts: false,
            max_rows: 10,
        }
    }
}

/// Formats analysis output for human or machine consumption.
pub trait ReportFormatter {
    /// Renders a column report.
    fn format_report(&self, report: &ColumnReport) -> Result<String>;

    /// Renders a dataset overview.
    fn format_overview(&self, overview: &DatasetOverview) -> Result<String>;
}

/// Plain-text formatter for terminals and logs.
#[derive(Debug, Clone, Default)]
pub struct HumanFormatter {
    config: FormatterConfig,
}

impl HumanFormatter {
    /// Creates a formatter with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a formatter with the given configuration.
    pub fn with_config(config: FormatterConfig) -> Self {
        Self { config }
    }

    fn format_result(&self, out: &mut String, result: &AnalysisResult) {
        match result {
            AnalysisResult::Distribution {
                column,
                stats,
                histogram,
            } => {
                let _ = writeln!(out, "  Distribution of '{column}'");
                let _ = writeln!(
                    out,
                    "    count={} mean={:.4} std={} min={:.4} max={:.4}",
                    stats.count,
                    stats.mean,
                    stats
                        .std_dev
                        .map(|s| format!("{s:.4}"))
                        .unwrap_or_else(|| "n/a".to_string()),
                    stats.min,
                    stats.max
                );
                if let (Some(q1), Some(median), Some(q3)) = (stats.q1, stats.median, stats.q3) {
                    let _ = writeln!(
                        out,
                        "    quartiles: q1={q1:.4} median={median:.4} q3={q3:.4}"
                    );
                }
                for bucket in histogram.iter().take(self.config.max_rows) {
                    let _ = writeln!(
                        out,
                        "    [{:.4}, {:.4}): {}",
                        bucket.lower_bound, bucket.upper_bound, bucket.count
                    );
                }
            }
            AnalysisResult::CategoryCounts {
                column,
                counts,
                distinct,
                truncated,
            } => {
                let _ = writeln!(
                    out,
                    "  Category counts for '{column}' ({distinct} distinct{})",
                    if *truncated { ", truncated" } else { "" }
                );
                for entry in counts.iter().take(self.config.max_rows) {
                    let _ = writeln!(out, "    {}: {}", entry.category, entry.count);
                }
            }
            AnalysisResult::TimeSeries {
                time_column,
                value_column,
                points,
            } => {
                let _ = writeln!(
                    out,
                    "  Time series '{value_column}' over '{time_column}' ({} points)",
                    points.len()
                );
                if let (Some(first), Some(last)) = (points.first(), points.last()) {
                    let _ = writeln!(
                        out,
                        "    from {} to {}",
                        first.timestamp, last.timestamp
                    );
                }
            }
            AnalysisResult::Scatter {
                x_column,
                y_column,
                points,
            } => {
                let _ = writeln!(
                    out,
                    "  Scatter '{x_column}' vs '{y_column}' ({} points)",
                    points.len()
                );
            }
            AnalysisResult::GroupedDistribution {
                category_column,
                value_column,
                groups,
                truncated,
            } => {
                let _ = writeln!(
                    out,
                    "  '{value_column}' grouped by '{category_column}'{}",
                    if *truncated { " (truncated)" } else { "" }
                );
                for group in groups.iter().take(self.config.max_rows) {
                    let _ = writeln!(
                        out,
                        "    {}: count={} mean={:.4} min={:.4} max={:.4}",
                        group.category, group.count, group.mean, group.min, group.max
                    );
                }
            }
            AnalysisResult::CorrelationMatrix { columns, values } => {
                let _ = writeln!(out, "  Correlation matrix ({} columns)", columns.len());
                for (name, row) in columns.iter().zip(values.iter()) {
                    let cells: Vec<String> = row.iter().map(|v| format!("{v:+.3}")).collect();
                    let _ = writeln!(out, "    {name}: {}", cells.join(" "));
                }
            }
        }
    }
}

impl ReportFormatter for HumanFormatter {
    fn format_report(&self, report: &ColumnReport) -> Result<String> {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Column '{}' ({})",
            report.column, report.semantic_type
        );
        for result in &report.results {
            self.format_result(&mut out, result);
            if self.config.include_charts {
                for spec in ChartSpec::for_result(result) {
                    let _ = writeln!(out, "    chart: {}", spec.download_filename());
                }
            }
        }
        if self.config.include_notes {
            for note in &report.notes {
                let _ = writeln!(out, "  {note}");
            }
        }
        Ok(out)
    }

    fn format_overview(&self, overview: &DatasetOverview) -> Result<String> {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Dataset: {} rows x {} columns",
            overview.row_count, overview.column_count
        );
        for column in &overview.columns {
            let _ = writeln!(
                out,
                "  {} ({}, {}): {} nulls",
                column.schema.name,
                column.schema.physical_type,
                column.schema.semantic_type,
                column.null_count
            );
        }
        for summary in &overview.numeric_summary {
            let _ = writeln!(
                out,
                "  stats {}: count={} mean={} min={} max={}",
                summary.column,
                summary.count,
                fmt_opt(summary.mean),
                fmt_opt(summary.min),
                fmt_opt(summary.max)
            );
        }
        Ok(out)
    }
}

fn fmt_opt(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.4}"))
        .unwrap_or_else(|| "n/a".to_string())
}

/// JSON formatter for machine consumption.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a compact JSON formatter.
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Enables pretty-printing.
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    fn serialize<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        rendered.map_err(|e| ExploreError::invalid_data(e.to_string()))
    }
}

impl ReportFormatter for JsonFormatter {
    fn format_report(&self, report: &ColumnReport) -> Result<String> {
        self.serialize(report)
    }

    fn format_overview(&self, overview: &DatasetOverview) -> Result<String> {
        self.serialize(overview)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::types::CategoryCount;
    use crate::schema::SemanticType;

    fn sample_report() -> ColumnReport {
        ColumnReport {
            column: "city".to_string(),
            semantic_type: SemanticType::Categorical,
            results: vec![AnalysisResult::CategoryCounts {
                column: "city".to_string(),
                counts: vec![CategoryCount::new("A", 2), CategoryCount::new("B", 1)],
                distinct: 2,
                truncated: false,
            }],
            notes: vec![],
        }
    }

    #[test]
    fn human_formatter_mentions_counts() {
        let rendered = HumanFormatter::new()
            .format_report(&sample_report())
            .unwrap();
        assert!(rendered.contains("Category counts for 'city'"));
        assert!(rendered.contains("A: 2"));
        assert!(rendered.contains("countplot_city.png"));
    }

    #[test]
    fn json_formatter_round_trips() {
        let rendered = JsonFormatter::new().format_report(&sample_report()).unwrap();
        let parsed: ColumnReport = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, sample_report());
    }
}
