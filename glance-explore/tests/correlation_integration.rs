//! Correlation matrix shape and value checks.

mod common;

use glance_explore::analyzers::{AnalysisResult, ColumnAnalyzer};
use glance_explore::error::ExploreError;

#[tokio::test]
async fn matrix_is_square_symmetric_with_unit_diagonal() {
    let session = common::sales_session().await;
    let result = ColumnAnalyzer::new()
        .correlation_matrix(&session)
        .await
        .unwrap();

    match &result {
        AnalysisResult::CorrelationMatrix { columns, values } => {
            assert_eq!(columns, &vec!["sales".to_string(), "visitors".to_string()]);
            assert_eq!(values.len(), 2);
            for (i, row) in values.iter().enumerate() {
                assert_eq!(row.len(), 2);
                assert!((row[i] - 1.0).abs() < 1e-12);
            }
            assert!((values[0][1] - values[1][0]).abs() < 1e-12);
            // visitors is exactly 10x sales in the fixture.
            assert!((values[0][1] - 1.0).abs() < 1e-9);
        }
        other => panic!("expected a correlation matrix, got {other:?}"),
    }
}

#[tokio::test]
async fn fewer_than_two_numeric_columns_is_insufficient() {
    let session = common::wide_categories_session().await;
    let err = ColumnAnalyzer::new()
        .correlation_matrix(&session)
        .await
        .unwrap_err();
    assert!(matches!(err, ExploreError::InsufficientData(_)));

    let session = common::dates_only_session().await;
    let err = ColumnAnalyzer::new()
        .correlation_matrix(&session)
        .await
        .unwrap_err();
    assert!(matches!(err, ExploreError::InsufficientData(_)));
}

#[tokio::test]
async fn datetime_with_no_numeric_columns_is_insufficient() {
    let session = common::dates_only_session().await;
    let err = ColumnAnalyzer::new()
        .analyze(&session, "date", None)
        .await
        .unwrap_err();
    assert!(matches!(err, ExploreError::InsufficientData(_)));
}
