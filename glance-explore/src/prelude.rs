//! Prelude for commonly used types in glance-explore.

pub use crate::analyzers::{
    AnalysisNote, AnalysisResult, AnalyzerConfig, ColumnAnalyzer, ColumnReport, DatasetOverview,
    NoteLevel,
};
pub use crate::charts::{ChartKind, ChartSpec};
pub use crate::error::{ExploreError, Result};
pub use crate::formatters::{FormatterConfig, HumanFormatter, JsonFormatter, ReportFormatter};
pub use crate::logging::LogConfig;
pub use crate::schema::{ColumnSchema, DatasetSchema, SemanticType};
pub use crate::session::{ExploreSession, DATASET_TABLE};
pub use crate::sources::{CsvOptions, CsvSource, DataSource, ExcelSource, SourceFormat};
