//! Column analysis framework.
//!
//! The dispatcher ([`ColumnAnalyzer`]) decides which analysis branches to run
//! from a column's semantic type; the per-branch analyzers each compute one
//! summary via SQL over the session's DataFusion context.
//!
//! ## Available analyzers
//!
//! - [`DistributionAnalyzer`] — descriptive statistics + histogram for a
//!   numeric column
//! - [`CategoryCountsAnalyzer`] — frequency counts for a categorical column,
//!   truncated to top-K over the cardinality threshold
//! - [`TimeSeriesAnalyzer`] — (time, value) pairing sorted by time
//! - [`ScatterAnalyzer`] — paired observations of two numeric columns
//! - [`GroupedDistributionAnalyzer`] — numeric distribution partitioned by
//!   category
//! - [`CorrelationMatrixAnalyzer`] — Pearson matrix over numeric columns
//! - [`OverviewAnalyzer`] — dataset shape, null counts, numeric summaries

pub mod categorical;
pub mod correlation;
pub mod dispatch;
pub(crate) mod exec;
pub mod distribution;
pub mod grouped;
pub mod overview;
pub mod scatter;
pub mod timeseries;
pub mod types;

pub use categorical::CategoryCountsAnalyzer;
pub use correlation::{CorrelationMatrixAnalyzer, PairSums};
pub use dispatch::{AnalyzerConfig, ColumnAnalyzer};
pub use distribution::DistributionAnalyzer;
pub use grouped::GroupedDistributionAnalyzer;
pub use overview::{ColumnOverview, DatasetOverview, NumericSummary, OverviewAnalyzer};
pub use scatter::ScatterAnalyzer;
pub use timeseries::TimeSeriesAnalyzer;
pub use types::{
    AnalysisNote, AnalysisResult, CategoryCount, ColumnReport, DescriptiveStats, GroupStats,
    HistogramBucket, NoteLevel, TimePoint,
};
