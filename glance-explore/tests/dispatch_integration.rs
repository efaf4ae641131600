//! End-to-end dispatch behavior: branch selection, comparisons, and the
//! error contract.

mod common;

use glance_explore::analyzers::{AnalysisResult, ColumnAnalyzer, NoteLevel};
use glance_explore::error::ExploreError;
use glance_explore::schema::SemanticType;

#[tokio::test]
async fn numeric_selection_produces_distribution() {
    let session = common::people_session().await;
    let report = ColumnAnalyzer::new()
        .analyze(&session, "age", None)
        .await
        .unwrap();

    assert_eq!(report.semantic_type, SemanticType::Numeric);
    assert_eq!(report.results.len(), 1);
    match &report.results[0] {
        AnalysisResult::Distribution { column, stats, histogram } => {
            assert_eq!(column, "age");
            assert_eq!(stats.count, 3);
            assert!((stats.mean - 30.0).abs() < 1e-9);
            assert!((stats.min - 20.0).abs() < 1e-9);
            assert!((stats.max - 40.0).abs() < 1e-9);
            assert!((stats.q1.unwrap() - 25.0).abs() < 1e-9);
            assert!((stats.median.unwrap() - 30.0).abs() < 1e-9);
            assert!((stats.q3.unwrap() - 35.0).abs() < 1e-9);
            // Sample standard deviation of 20, 30, 40 is 10.
            assert!((stats.std_dev.unwrap() - 10.0).abs() < 1e-9);
            let binned: u64 = histogram.iter().map(|b| b.count).sum();
            assert_eq!(binned, 3);
        }
        other => panic!("expected a distribution, got {other:?}"),
    }

    // No comparison requested; the report should point at the available one.
    assert!(report
        .notes
        .iter()
        .any(|n| n.level == NoteLevel::Info && n.message.contains("income")));
}

#[tokio::test]
async fn numeric_with_numeric_compare_adds_scatter() {
    let session = common::people_session().await;
    let report = ColumnAnalyzer::new()
        .analyze(&session, "age", Some("income"))
        .await
        .unwrap();

    assert_eq!(report.results.len(), 2);
    match &report.results[1] {
        AnalysisResult::Scatter { x_column, y_column, points } => {
            assert_eq!(x_column, "age");
            assert_eq!(y_column, "income");
            assert_eq!(points.len(), 3);
        }
        other => panic!("expected a scatter, got {other:?}"),
    }
}

#[tokio::test]
async fn numeric_with_categorical_compare_adds_grouped_distribution() {
    let session = common::people_session().await;
    let report = ColumnAnalyzer::new()
        .analyze(&session, "age", Some("city"))
        .await
        .unwrap();

    match &report.results[1] {
        AnalysisResult::GroupedDistribution {
            category_column,
            value_column,
            groups,
            truncated,
        } => {
            assert_eq!(category_column, "city");
            assert_eq!(value_column, "age");
            assert!(!truncated);
            assert_eq!(groups.len(), 2);
            // "A" covers ages 20 and 40; it is the bigger group.
            assert_eq!(groups[0].category, "A");
            assert_eq!(groups[0].count, 2);
            assert!((groups[0].mean - 30.0).abs() < 1e-9);
            assert_eq!(groups[1].category, "B");
            assert_eq!(groups[1].count, 1);
        }
        other => panic!("expected a grouped distribution, got {other:?}"),
    }
}

#[tokio::test]
async fn categorical_selection_counts_categories() {
    let session = common::people_session().await;
    let report = ColumnAnalyzer::new()
        .analyze(&session, "city", None)
        .await
        .unwrap();

    assert_eq!(report.semantic_type, SemanticType::Categorical);
    match &report.results[0] {
        AnalysisResult::CategoryCounts { counts, distinct, truncated, .. } => {
            assert_eq!(*distinct, 2);
            assert!(!truncated);
            assert_eq!(counts.len(), 2);
            assert_eq!((counts[0].category.as_str(), counts[0].count), ("A", 2));
            assert_eq!((counts[1].category.as_str(), counts[1].count), ("B", 1));
        }
        other => panic!("expected category counts, got {other:?}"),
    }
}

#[tokio::test]
async fn categorical_with_numeric_compare_partitions_values() {
    let session = common::people_session().await;
    let report = ColumnAnalyzer::new()
        .analyze(&session, "city", Some("income"))
        .await
        .unwrap();

    assert_eq!(report.results.len(), 2);
    assert!(matches!(
        report.results[1],
        AnalysisResult::GroupedDistribution { .. }
    ));
}

#[tokio::test]
async fn categorical_with_categorical_compare_is_insufficient() {
    // A real but non-numeric comparison is reported, not silently skipped.
    let session = common::sales_session().await;
    let err = ColumnAnalyzer::new()
        .analyze(&session, "region", Some("channel"))
        .await
        .unwrap_err();
    assert!(matches!(err, ExploreError::InsufficientData(_)));
}

#[tokio::test]
async fn unknown_column_is_invalid() {
    let session = common::people_session().await;
    let err = ColumnAnalyzer::new()
        .analyze(&session, "salary", None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ExploreError::InvalidColumn { ref column } if column == "salary"
    ));
}

#[tokio::test]
async fn compare_must_differ_from_selection() {
    let session = common::people_session().await;
    let err = ColumnAnalyzer::new()
        .analyze(&session, "age", Some("age"))
        .await
        .unwrap_err();
    assert!(matches!(err, ExploreError::InvalidConfiguration(_)));
}

#[tokio::test]
async fn empty_table_is_insufficient_for_any_selection() {
    let session = common::empty_session().await;
    let analyzer = ColumnAnalyzer::new();

    for column in ["age", "city"] {
        let err = analyzer.analyze(&session, column, None).await.unwrap_err();
        assert!(
            matches!(err, ExploreError::InsufficientData(_)),
            "expected InsufficientData for '{column}'"
        );
    }
}
