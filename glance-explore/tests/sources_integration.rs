//! Loading behavior: CSV inference, session replacement, failure handling.

mod common;

use std::io::Write;

use glance_explore::analyzers::{AnalysisResult, ColumnAnalyzer};
use glance_explore::error::ExploreError;
use glance_explore::schema::SemanticType;
use glance_explore::session::ExploreSession;
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

const SALES_CSV: &str = "\
date,age,income,city
2024-01-01,20,100.5,A
2024-01-02,30,250.0,B
2024-01-03,40,175.25,A
";

#[tokio::test]
async fn csv_inference_detects_dates_and_numbers() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "sales.csv", SALES_CSV);

    let mut session = ExploreSession::new();
    session.load_path(&path).await.unwrap();

    let schema = session.schema().unwrap();
    assert_eq!(schema.semantic_type("date").unwrap(), SemanticType::Datetime);
    assert_eq!(schema.semantic_type("age").unwrap(), SemanticType::Numeric);
    assert_eq!(
        schema.semantic_type("income").unwrap(),
        SemanticType::Numeric
    );
    assert_eq!(
        schema.semantic_type("city").unwrap(),
        SemanticType::Categorical
    );
    assert_eq!(session.row_count().await.unwrap(), 3);
}

#[tokio::test]
async fn csv_date_column_drives_time_series() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "sales.csv", SALES_CSV);

    let mut session = ExploreSession::new();
    session.load_path(&path).await.unwrap();

    let report = ColumnAnalyzer::new()
        .analyze(&session, "date", Some("income"))
        .await
        .unwrap();

    match &report.results[0] {
        AnalysisResult::TimeSeries { points, .. } => {
            assert_eq!(points.len(), 3);
            assert!((points[0].value - 100.5).abs() < 1e-9);
            assert_eq!(points[0].timestamp.date().to_string(), "2024-01-01");
        }
        other => panic!("expected a time series, got {other:?}"),
    }
}

#[tokio::test]
async fn overview_reports_shape_and_nulls() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "gaps.csv",
        "score,grade\n1.5,x\n,y\n3.5,\n",
    );

    let mut session = ExploreSession::new();
    session.load_path(&path).await.unwrap();

    let overview = session.overview().await.unwrap();
    assert_eq!(overview.row_count, 3);
    assert_eq!(overview.column_count, 2);
    assert_eq!(overview.column("score").unwrap().null_count, 1);
    assert_eq!(overview.column("grade").unwrap().null_count, 1);

    let score = &overview.numeric_summary[0];
    assert_eq!(score.column, "score");
    assert_eq!(score.count, 2);
    assert!((score.mean.unwrap() - 2.5).abs() < 1e-9);

    let preview = session.preview(2).await.unwrap();
    let rows: usize = preview.iter().map(|b| b.num_rows()).sum();
    assert_eq!(rows, 2);
}

#[tokio::test]
async fn new_upload_replaces_the_table_wholesale() {
    let dir = TempDir::new().unwrap();
    let first = write_file(&dir, "first.csv", SALES_CSV);
    let second = write_file(&dir, "second.csv", "label,total\na,1\nb,2\n");

    let mut session = ExploreSession::new();
    session.load_path(&first).await.unwrap();
    assert!(session.schema().unwrap().column("date").is_ok());

    session.load_path(&second).await.unwrap();
    let schema = session.schema().unwrap();
    assert!(schema.column("date").is_err());
    assert!(schema.column("label").is_ok());
    assert_eq!(session.row_count().await.unwrap(), 2);
}

#[tokio::test]
async fn failed_load_leaves_the_session_without_a_dataset() {
    let dir = TempDir::new().unwrap();
    let good = write_file(&dir, "good.csv", SALES_CSV);

    let mut session = ExploreSession::new();
    session.load_path(&good).await.unwrap();
    assert!(session.has_dataset());

    let missing = dir.path().join("missing.csv");
    let err = session.load_path(&missing).await.unwrap_err();
    assert!(matches!(err, ExploreError::Source(_)));

    // The previous dataset is gone too: nothing half-loaded to analyze.
    assert!(!session.has_dataset());
    assert!(matches!(
        session.schema().unwrap_err(),
        ExploreError::NoDataset
    ));
}

#[tokio::test]
async fn unknown_extension_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "notes.txt", "hello");

    let mut session = ExploreSession::new();
    let err = session.load_path(&path).await.unwrap_err();
    assert!(matches!(err, ExploreError::UnsupportedFormat { .. }));
}
