//! Result types produced by the column analyzers.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::schema::SemanticType;

/// Descriptive statistics for a numeric column, the five-number summary plus
/// count, mean, and standard deviation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    /// Count of non-null values.
    pub count: u64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample standard deviation; `None` when fewer than two values.
    pub std_dev: Option<f64>,
    /// Minimum value.
    pub min: f64,
    /// First quartile (linear interpolation).
    pub q1: Option<f64>,
    /// Median (linear interpolation).
    pub median: Option<f64>,
    /// Third quartile (linear interpolation).
    pub q3: Option<f64>,
    /// Maximum value.
    pub max: f64,
}

/// A single histogram bucket over a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBucket {
    /// Lower bound of the bucket (inclusive).
    pub lower_bound: f64,
    /// Upper bound of the bucket (exclusive; the last bucket is closed).
    pub upper_bound: f64,
    /// Count of values in this bucket.
    pub count: u64,
}

impl HistogramBucket {
    /// Creates a new histogram bucket.
    pub fn new(lower_bound: f64, upper_bound: f64, count: u64) -> Self {
        Self {
            lower_bound,
            upper_bound,
            count,
        }
    }

    /// Returns the width of the bucket.
    pub fn width(&self) -> f64 {
        self.upper_bound - self.lower_bound
    }

    /// Returns the midpoint of the bucket.
    pub fn midpoint(&self) -> f64 {
        (self.lower_bound + self.upper_bound) / 2.0
    }
}

/// One (category, count) pair from a categorical breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    /// The category label, rendered as text.
    pub category: String,
    /// Number of rows carrying this label.
    pub count: u64,
}

impl CategoryCount {
    /// Creates a new (category, count) pair.
    pub fn new(category: impl Into<String>, count: u64) -> Self {
        Self {
            category: category.into(),
            count,
        }
    }
}

/// One observation in a time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    /// Observation timestamp.
    pub timestamp: NaiveDateTime,
    /// Observed value.
    pub value: f64,
}

/// Per-category distribution statistics for a grouped breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupStats {
    /// The category this group covers.
    pub category: String,
    /// Count of non-null numeric values in the group.
    pub count: u64,
    /// Group mean.
    pub mean: f64,
    /// Group sample standard deviation; `None` for singleton groups.
    pub std_dev: Option<f64>,
    /// Group minimum.
    pub min: f64,
    /// Approximate group median.
    pub median: Option<f64>,
    /// Group maximum.
    pub max: f64,
}

/// A tagged analysis outcome, one variant per chart family.
///
/// Produced per column selection, consumed once by a renderer, not persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisResult {
    /// Numeric column: summary statistics plus histogram buckets.
    Distribution {
        /// The analyzed column.
        column: String,
        /// Five-number summary statistics.
        stats: DescriptiveStats,
        /// Histogram bucket edges and counts.
        histogram: Vec<HistogramBucket>,
    },

    /// Categorical column: frequency counts, possibly truncated to top-K.
    CategoryCounts {
        /// The analyzed column.
        column: String,
        /// (category, count) pairs, descending by count.
        counts: Vec<CategoryCount>,
        /// Total distinct categories before truncation.
        distinct: u64,
        /// Whether the list was cut to the configured top-K.
        truncated: bool,
    },

    /// Datetime column paired with one numeric column.
    TimeSeries {
        /// The datetime column supplying timestamps.
        time_column: String,
        /// The numeric column supplying values.
        value_column: String,
        /// Observations sorted ascending by timestamp.
        points: Vec<TimePoint>,
    },

    /// Two numeric columns as paired observations.
    Scatter {
        /// Column on the x axis.
        x_column: String,
        /// Column on the y axis.
        y_column: String,
        /// Paired (x, y) observations.
        points: Vec<(f64, f64)>,
    },

    /// Distribution of a numeric column partitioned by a categorical column.
    GroupedDistribution {
        /// The partitioning column.
        category_column: String,
        /// The numeric column being summarized.
        value_column: String,
        /// Per-category statistics, descending by group size.
        groups: Vec<GroupStats>,
        /// Whether low-frequency categories were cut off.
        truncated: bool,
    },

    /// Pearson correlation matrix over all numeric columns.
    CorrelationMatrix {
        /// Column names, one per matrix row/column.
        columns: Vec<String>,
        /// Row-major correlation values; square and symmetric, 1.0 diagonal.
        values: Vec<Vec<f64>>,
    },
}

impl AnalysisResult {
    /// A short tag naming the variant, used in logs and filenames.
    pub fn kind_name(&self) -> &'static str {
        match self {
            AnalysisResult::Distribution { .. } => "distribution",
            AnalysisResult::CategoryCounts { .. } => "category_counts",
            AnalysisResult::TimeSeries { .. } => "timeseries",
            AnalysisResult::Scatter { .. } => "scatter",
            AnalysisResult::GroupedDistribution { .. } => "grouped_distribution",
            AnalysisResult::CorrelationMatrix { .. } => "correlation",
        }
    }
}

/// Severity of an advisory note attached to a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteLevel {
    /// Informational: an optional accompaniment was unavailable.
    Info,
    /// Warning: analysis degraded (e.g. truncation) but still ran.
    Warning,
}

/// Advisory note attached to a column report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisNote {
    /// Severity of the note.
    pub level: NoteLevel,
    /// Human-readable message for the dashboard to surface.
    pub message: String,
}

impl AnalysisNote {
    /// Creates an informational note.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoteLevel::Info,
            message: message.into(),
        }
    }

    /// Creates a warning note.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoteLevel::Warning,
            message: message.into(),
        }
    }
}

impl fmt::Display for AnalysisNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.level {
            NoteLevel::Info => "info",
            NoteLevel::Warning => "warning",
        };
        write!(f, "[{tag}] {}", self.message)
    }
}

/// Everything the dispatcher produced for one column selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnReport {
    /// The selected column.
    pub column: String,
    /// Its semantic type.
    pub semantic_type: SemanticType,
    /// Analysis results, in render order.
    pub results: Vec<AnalysisResult>,
    /// Advisory notes (truncation warnings, missing optional comparisons).
    pub notes: Vec<AnalysisNote>,
}

impl ColumnReport {
    /// Returns true if any note is a warning.
    pub fn has_warnings(&self) -> bool {
        self.notes.iter().any(|n| n.level == NoteLevel::Warning)
    }
}
