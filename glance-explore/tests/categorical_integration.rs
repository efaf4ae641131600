//! Categorical breakdowns: count sums, ordering, and top-K truncation.

mod common;

use glance_explore::analyzers::{AnalysisResult, AnalyzerConfig, ColumnAnalyzer};

#[tokio::test]
async fn counts_sum_to_non_null_rows() {
    let session = common::nullable_session().await;
    let report = ColumnAnalyzer::new()
        .analyze(&session, "grade", None)
        .await
        .unwrap();

    match &report.results[0] {
        AnalysisResult::CategoryCounts { counts, distinct, truncated, .. } => {
            assert_eq!(*distinct, 2);
            assert!(!truncated);
            // 5 rows, 1 null: the counts cover exactly the non-null rows.
            let total: u64 = counts.iter().map(|c| c.count).sum();
            assert_eq!(total, 4);
            assert_eq!((counts[0].category.as_str(), counts[0].count), ("x", 3));
            assert_eq!((counts[1].category.as_str(), counts[1].count), ("y", 1));
        }
        other => panic!("expected category counts, got {other:?}"),
    }
}

#[tokio::test]
async fn high_cardinality_truncates_to_top_30() {
    let session = common::wide_categories_session().await;
    let report = ColumnAnalyzer::new()
        .analyze(&session, "code", None)
        .await
        .unwrap();

    match &report.results[0] {
        AnalysisResult::CategoryCounts { counts, distinct, truncated, .. } => {
            assert_eq!(*distinct, 36);
            assert!(truncated);
            assert_eq!(counts.len(), 30);
            // Most frequent first, then count ties in category order.
            assert_eq!((counts[0].category.as_str(), counts[0].count), ("hot", 3));
            assert_eq!(counts[1].category, "cat_00");
            assert_eq!(counts[29].category, "cat_28");
            assert!(counts.windows(2).all(|w| w[0].count >= w[1].count));
        }
        other => panic!("expected category counts, got {other:?}"),
    }

    assert!(report.has_warnings());
    assert!(report
        .notes
        .iter()
        .any(|n| n.message.contains("36 distinct values")));
}

#[tokio::test]
async fn threshold_is_configurable() {
    let session = common::people_session().await;
    let analyzer = ColumnAnalyzer::with_config(AnalyzerConfig::default().with_max_categories(1));
    let report = analyzer.analyze(&session, "city", None).await.unwrap();

    match &report.results[0] {
        AnalysisResult::CategoryCounts { counts, distinct, truncated, .. } => {
            assert_eq!(*distinct, 2);
            assert!(truncated);
            assert_eq!(counts.len(), 1);
            assert_eq!(counts[0].category, "A");
        }
        other => panic!("expected category counts, got {other:?}"),
    }
}
