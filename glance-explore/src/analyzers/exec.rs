//! Shared helpers for executing SQL and extracting scalars from the
//! resulting Arrow batches.
//!
//! DataFusion is free to hand back different concrete array types for the
//! same logical type (e.g. `Utf8` vs `Utf8View` for a VARCHAR cast), so the
//! extractors try every representation we can receive.

use arrow::array::{
    Array, ArrayRef, Date32Array, Date64Array, Float32Array, Float64Array, Int32Array, Int64Array,
    LargeStringArray, StringArray, StringViewArray, TimestampMicrosecondArray,
    TimestampMillisecondArray, TimestampNanosecondArray, TimestampSecondArray, UInt32Array,
    UInt64Array,
};
use arrow::record_batch::RecordBatch;
use arrow::temporal_conversions;
use chrono::NaiveDateTime;
use datafusion::prelude::SessionContext;

use crate::error::{ExploreError, Result};

/// Runs a SQL statement and collects all result batches.
pub(crate) async fn collect_sql(ctx: &SessionContext, sql: &str) -> Result<Vec<RecordBatch>> {
    let df = ctx.sql(sql).await?;
    Ok(df.collect().await?)
}

/// Runs a SQL statement expected to yield exactly one row and returns it.
pub(crate) async fn collect_single_row(ctx: &SessionContext, sql: &str) -> Result<RecordBatch> {
    let batches = collect_sql(ctx, sql).await?;
    batches
        .into_iter()
        .find(|b| b.num_rows() > 0)
        .ok_or_else(|| ExploreError::invalid_data("aggregate query returned no rows"))
}

/// Extracts a float from any numeric array representation, `None` on null.
pub(crate) fn f64_at(column: &ArrayRef, row: usize) -> Result<Option<f64>> {
    if column.is_null(row) {
        return Ok(None);
    }
    let value = if let Some(arr) = column.as_any().downcast_ref::<Float64Array>() {
        arr.value(row)
    } else if let Some(arr) = column.as_any().downcast_ref::<Float32Array>() {
        arr.value(row) as f64
    } else if let Some(arr) = column.as_any().downcast_ref::<Int64Array>() {
        arr.value(row) as f64
    } else if let Some(arr) = column.as_any().downcast_ref::<Int32Array>() {
        arr.value(row) as f64
    } else if let Some(arr) = column.as_any().downcast_ref::<UInt64Array>() {
        arr.value(row) as f64
    } else if let Some(arr) = column.as_any().downcast_ref::<UInt32Array>() {
        arr.value(row) as f64
    } else {
        return Err(ExploreError::invalid_data(format!(
            "expected a numeric array, got {}",
            column.data_type()
        )));
    };
    Ok(Some(value))
}

/// Extracts a count-style integer, `None` on null.
pub(crate) fn u64_at(column: &ArrayRef, row: usize) -> Result<Option<u64>> {
    if column.is_null(row) {
        return Ok(None);
    }
    let value = if let Some(arr) = column.as_any().downcast_ref::<Int64Array>() {
        let v = arr.value(row);
        if v < 0 {
            return Err(ExploreError::invalid_data("negative count"));
        }
        v as u64
    } else if let Some(arr) = column.as_any().downcast_ref::<UInt64Array>() {
        arr.value(row)
    } else if let Some(arr) = column.as_any().downcast_ref::<Int32Array>() {
        let v = arr.value(row);
        if v < 0 {
            return Err(ExploreError::invalid_data("negative count"));
        }
        v as u64
    } else {
        return Err(ExploreError::invalid_data(format!(
            "expected an integer array, got {}",
            column.data_type()
        )));
    };
    Ok(Some(value))
}

/// Extracts a string from any Utf8 representation, `None` on null.
pub(crate) fn string_at(column: &ArrayRef, row: usize) -> Result<Option<String>> {
    if column.is_null(row) {
        return Ok(None);
    }
    let value = if let Some(arr) = column.as_any().downcast_ref::<StringArray>() {
        arr.value(row).to_string()
    } else if let Some(arr) = column.as_any().downcast_ref::<LargeStringArray>() {
        arr.value(row).to_string()
    } else if let Some(arr) = column.as_any().downcast_ref::<StringViewArray>() {
        arr.value(row).to_string()
    } else {
        return Err(ExploreError::invalid_data(format!(
            "expected a string array, got {}",
            column.data_type()
        )));
    };
    Ok(Some(value))
}

/// Extracts a timestamp from any date/timestamp representation, `None` on
/// null. The source column's physical type decides the conversion.
pub(crate) fn datetime_at(column: &ArrayRef, row: usize) -> Result<Option<NaiveDateTime>> {
    if column.is_null(row) {
        return Ok(None);
    }
    let converted = if let Some(arr) = column.as_any().downcast_ref::<Date32Array>() {
        temporal_conversions::date32_to_datetime(arr.value(row))
    } else if let Some(arr) = column.as_any().downcast_ref::<Date64Array>() {
        temporal_conversions::date64_to_datetime(arr.value(row))
    } else if let Some(arr) = column.as_any().downcast_ref::<TimestampSecondArray>() {
        temporal_conversions::timestamp_s_to_datetime(arr.value(row))
    } else if let Some(arr) = column.as_any().downcast_ref::<TimestampMillisecondArray>() {
        temporal_conversions::timestamp_ms_to_datetime(arr.value(row))
    } else if let Some(arr) = column.as_any().downcast_ref::<TimestampMicrosecondArray>() {
        temporal_conversions::timestamp_us_to_datetime(arr.value(row))
    } else if let Some(arr) = column.as_any().downcast_ref::<TimestampNanosecondArray>() {
        temporal_conversions::timestamp_ns_to_datetime(arr.value(row))
    } else {
        return Err(ExploreError::invalid_data(format!(
            "expected a date or timestamp array, got {}",
            column.data_type()
        )));
    };

    converted
        .map(Some)
        .ok_or_else(|| ExploreError::invalid_data("timestamp out of representable range"))
}
