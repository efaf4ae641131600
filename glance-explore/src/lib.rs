//! # glance-explore — column-driven exploratory data analysis
//!
//! glance powers small data-exploration dashboards: a user uploads a tabular
//! file (CSV or Excel), and the dashboard renders summary statistics,
//! distribution plots, correlation heatmaps, and simple time-series charts
//! for columns the user selects. Parsing and query execution are delegated
//! to Arrow and DataFusion; widget shells and chart rasterization live in the
//! host application.
//!
//! The decision core is the [`analyzers::ColumnAnalyzer`]: given the
//! session's table and a selected column, it branches on the column's
//! semantic type (numeric, categorical, datetime) and produces tagged
//! analysis results plus the chart specifications a renderer needs.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use glance_explore::prelude::*;
//!
//! # async fn example() -> glance_explore::error::Result<()> {
//! // One session per user; a new upload replaces the table wholesale.
//! let mut session = ExploreSession::new();
//! session.load_path("sales.csv").await?;
//!
//! // Dataset overview: shape, null counts, numeric summaries.
//! let overview = session.overview().await?;
//! println!("{} rows x {} columns", overview.row_count, overview.column_count);
//!
//! // Column analysis dispatches on the column's semantic type.
//! let analyzer = ColumnAnalyzer::new();
//! let report = analyzer.analyze(&session, "age", None).await?;
//! for result in &report.results {
//!     for chart in ChartSpec::for_result(result) {
//!         println!("would render {}", chart.download_filename());
//!     }
//! }
//! for note in &report.notes {
//!     println!("{note}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **`session`**: explicit per-user state; owns the DataFusion context and
//!   the registered dataset, with replace-on-new-upload semantics
//! - **`sources`**: CSV and Excel loaders behind the `DataSource` trait
//! - **`schema`**: Arrow type → semantic type derivation
//! - **`analyzers`**: the dispatcher and the per-branch analyzers
//! - **`charts`**: chart specifications and download filenames
//! - **`formatters`**: human-readable and JSON report rendering
//! - **`error`**: typed, recoverable errors
//!
//! Every analysis is a pure function of (table, column, optional comparison
//! column); nothing is cached or persisted across selections.

pub mod analyzers;
pub mod charts;
pub mod error;
pub mod formatters;
pub mod ident;
pub mod logging;
pub mod prelude;
pub mod schema;
pub mod session;
pub mod sources;
