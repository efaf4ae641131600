//! Shared fixtures for integration tests: in-memory datasets registered
//! through the same `DataSource` trait the real loaders use.

// Not every test binary uses every fixture.
#![allow(dead_code)]

use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray, TimestampMillisecondArray};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use async_trait::async_trait;
use chrono::NaiveDate;
use datafusion::datasource::MemTable;
use datafusion::prelude::SessionContext;
use glance_explore::error::Result;
use glance_explore::session::ExploreSession;
use glance_explore::sources::DataSource;

/// A pre-built record batch acting as an uploaded dataset.
#[derive(Debug, Clone)]
pub struct BatchSource {
    batch: RecordBatch,
    label: String,
}

impl BatchSource {
    pub fn new(batch: RecordBatch, label: impl Into<String>) -> Self {
        Self {
            batch,
            label: label.into(),
        }
    }
}

#[async_trait]
impl DataSource for BatchSource {
    async fn register(&self, ctx: &SessionContext, table_name: &str) -> Result<()> {
        let table = MemTable::try_new(self.batch.schema(), vec![vec![self.batch.clone()]])?;
        ctx.register_table(table_name, Arc::new(table))?;
        Ok(())
    }

    fn description(&self) -> String {
        format!("test batch: {}", self.label)
    }
}

/// Milliseconds since epoch for midnight on the given date.
pub fn ts_ms(year: i32, month: u32, day: u32) -> i64 {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
        .timestamp_millis()
}

async fn session_from(batch: RecordBatch, label: &str) -> ExploreSession {
    let mut session = ExploreSession::new();
    session
        .load_source(&BatchSource::new(batch, label))
        .await
        .unwrap();
    session
}

/// age (20, 30, 40), income (100.0, 250.0, 175.0), city ("A", "B", "A").
pub async fn people_session() -> ExploreSession {
    let schema = Arc::new(Schema::new(vec![
        Field::new("age", DataType::Int64, true),
        Field::new("income", DataType::Float64, true),
        Field::new("city", DataType::Utf8, true),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int64Array::from(vec![20, 30, 40])) as ArrayRef,
            Arc::new(Float64Array::from(vec![100.0, 250.0, 175.0])),
            Arc::new(StringArray::from(vec!["A", "B", "A"])),
        ],
    )
    .unwrap();
    session_from(batch, "people").await
}

/// One categorical column with 35 distinct single-occurrence values
/// (cat_00 .. cat_34) plus one value ("hot") appearing three times.
pub async fn wide_categories_session() -> ExploreSession {
    let mut values: Vec<String> = (0..35).map(|i| format!("cat_{i:02}")).collect();
    values.extend(["hot".to_string(), "hot".to_string(), "hot".to_string()]);
    let schema = Arc::new(Schema::new(vec![Field::new("code", DataType::Utf8, true)]));
    let batch = RecordBatch::try_new(
        schema,
        vec![Arc::new(StringArray::from(
            values.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
        )) as ArrayRef],
    )
    .unwrap();
    session_from(batch, "wide_categories").await
}

/// Timestamps deliberately out of order, with two numeric columns and one
/// categorical column alongside.
pub async fn sales_session() -> ExploreSession {
    let schema = Arc::new(Schema::new(vec![
        Field::new(
            "date",
            DataType::Timestamp(TimeUnit::Millisecond, None),
            true,
        ),
        Field::new("sales", DataType::Float64, true),
        Field::new("visitors", DataType::Int64, true),
        Field::new("region", DataType::Utf8, true),
        Field::new("channel", DataType::Utf8, true),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(TimestampMillisecondArray::from(vec![
                ts_ms(2024, 3, 2),
                ts_ms(2024, 3, 1),
                ts_ms(2024, 3, 4),
                ts_ms(2024, 3, 3),
            ])) as ArrayRef,
            Arc::new(Float64Array::from(vec![20.0, 10.0, 40.0, 30.0])),
            Arc::new(Int64Array::from(vec![200, 100, 400, 300])),
            Arc::new(StringArray::from(vec!["east", "east", "west", "west"])),
            Arc::new(StringArray::from(vec!["web", "store", "web", "store"])),
        ],
    )
    .unwrap();
    session_from(batch, "sales").await
}

/// A datetime column with only a categorical column alongside it.
pub async fn dates_only_session() -> ExploreSession {
    let schema = Arc::new(Schema::new(vec![
        Field::new(
            "date",
            DataType::Timestamp(TimeUnit::Millisecond, None),
            true,
        ),
        Field::new("note", DataType::Utf8, true),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(TimestampMillisecondArray::from(vec![
                ts_ms(2024, 1, 1),
                ts_ms(2024, 1, 2),
            ])) as ArrayRef,
            Arc::new(StringArray::from(vec!["a", "b"])),
        ],
    )
    .unwrap();
    session_from(batch, "dates_only").await
}

/// A table with columns but zero rows.
pub async fn empty_session() -> ExploreSession {
    let schema = Arc::new(Schema::new(vec![
        Field::new("age", DataType::Int64, true),
        Field::new("city", DataType::Utf8, true),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int64Array::from(Vec::<i64>::new())) as ArrayRef,
            Arc::new(StringArray::from(Vec::<&str>::new())),
        ],
    )
    .unwrap();
    session_from(batch, "empty").await
}

/// Nullable values for overview and count-sum checks:
/// score (1.0, null, 3.0, null, 5.0), grade ("x", "y", null, "x", "x").
pub async fn nullable_session() -> ExploreSession {
    let schema = Arc::new(Schema::new(vec![
        Field::new("score", DataType::Float64, true),
        Field::new("grade", DataType::Utf8, true),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Float64Array::from(vec![
                Some(1.0),
                None,
                Some(3.0),
                None,
                Some(5.0),
            ])) as ArrayRef,
            Arc::new(StringArray::from(vec![
                Some("x"),
                Some("y"),
                None,
                Some("x"),
                Some("x"),
            ])),
        ],
    )
    .unwrap();
    session_from(batch, "nullable").await
}
