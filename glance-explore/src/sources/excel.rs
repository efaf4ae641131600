//! Excel (xlsx) data source backed by `calamine`.
//!
//! The workbook is read eagerly into one Arrow `RecordBatch` and registered
//! as an in-memory table. Column types are resolved per column: all-numeric
//! cells become `Float64`, all-datetime cells become millisecond timestamps,
//! all-boolean cells become `Boolean`, and anything mixed falls back to text.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray, Float64Array, StringArray, TimestampMillisecondArray};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use async_trait::async_trait;
use calamine::{open_workbook, Data, Reader, Xlsx};
use chrono::{NaiveDate, NaiveDateTime};
use datafusion::datasource::MemTable;
use datafusion::prelude::SessionContext;
use tracing::instrument;

use super::DataSource;
use crate::error::{ExploreError, Result};

/// An Excel workbook on disk.
#[derive(Debug, Clone)]
pub struct ExcelSource {
    path: PathBuf,
    sheet: Option<String>,
}

impl ExcelSource {
    /// Creates a source reading the workbook's first worksheet.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            sheet: None,
        }
    }

    /// Selects a worksheet by name instead of the first one.
    pub fn with_sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = Some(sheet.into());
        self
    }

    /// The file path this source reads.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_batch(&self) -> Result<RecordBatch> {
        let mut workbook: Xlsx<_> =
            open_workbook(&self.path).map_err(|e: calamine::XlsxError| ExploreError::source(e.to_string()))?;

        let sheet = match &self.sheet {
            Some(name) => name.clone(),
            None => workbook
                .sheet_names()
                .first()
                .cloned()
                .ok_or_else(|| ExploreError::source("workbook has no worksheets"))?,
        };

        let range = workbook
            .worksheet_range(&sheet)
            .map_err(|e| ExploreError::source(e.to_string()))?;

        let mut rows = range.rows();
        let header = rows
            .next()
            .ok_or_else(|| ExploreError::source(format!("worksheet '{sheet}' is empty")))?;
        let names = header_names(header);
        let data_rows: Vec<&[Data]> = rows.collect();

        let mut fields = Vec::with_capacity(names.len());
        let mut arrays: Vec<ArrayRef> = Vec::with_capacity(names.len());
        for (j, name) in names.iter().enumerate() {
            let kind = classify_column(&data_rows, j);
            let (field, array) = build_column(name, kind, &data_rows, j);
            fields.push(field);
            arrays.push(array);
        }

        let schema = Arc::new(Schema::new(fields));
        RecordBatch::try_new(schema, arrays).map_err(ExploreError::from)
    }
}

#[async_trait]
impl DataSource for ExcelSource {
    #[instrument(skip(self, ctx), fields(path = %self.path.display()))]
    async fn register(&self, ctx: &SessionContext, table_name: &str) -> Result<()> {
        let batch = self.read_batch()?;
        let schema = batch.schema();
        let table = MemTable::try_new(schema, vec![vec![batch]])?;
        ctx.register_table(table_name, Arc::new(table))?;
        Ok(())
    }

    fn description(&self) -> String {
        match &self.sheet {
            Some(sheet) => format!("Excel file: {} (sheet '{sheet}')", self.path.display()),
            None => format!("Excel file: {}", self.path.display()),
        }
    }
}

/// Resolved Arrow type for one worksheet column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Numeric,
    Boolean,
    Datetime,
    Text,
}

fn header_names(header: &[Data]) -> Vec<String> {
    let mut names = Vec::with_capacity(header.len());
    for (i, cell) in header.iter().enumerate() {
        let base = match cell {
            Data::String(s) if !s.trim().is_empty() => s.trim().to_string(),
            Data::Empty => format!("column_{}", i + 1),
            other => other.to_string(),
        };
        // Worksheets can repeat header labels; suffix duplicates.
        let mut name = base.clone();
        let mut n = 1;
        while names.contains(&name) {
            n += 1;
            name = format!("{base}_{n}");
        }
        names.push(name);
    }
    names
}

fn classify_column(rows: &[&[Data]], j: usize) -> ColumnKind {
    let mut kind: Option<ColumnKind> = None;
    for row in rows {
        let cell = row.get(j).unwrap_or(&Data::Empty);
        let cell_kind = match cell {
            Data::Empty => continue,
            Data::Int(_) | Data::Float(_) => ColumnKind::Numeric,
            Data::Bool(_) => ColumnKind::Boolean,
            Data::DateTime(_) | Data::DateTimeIso(_) => ColumnKind::Datetime,
            _ => ColumnKind::Text,
        };
        match kind {
            None => kind = Some(cell_kind),
            Some(k) if k == cell_kind => {}
            Some(_) => return ColumnKind::Text,
        }
    }
    kind.unwrap_or(ColumnKind::Text)
}

fn build_column(name: &str, kind: ColumnKind, rows: &[&[Data]], j: usize) -> (Field, ArrayRef) {
    match kind {
        ColumnKind::Numeric => {
            let values: Vec<Option<f64>> = rows
                .iter()
                .map(|row| match row.get(j).unwrap_or(&Data::Empty) {
                    Data::Int(v) => Some(*v as f64),
                    Data::Float(v) => Some(*v),
                    _ => None,
                })
                .collect();
            (
                Field::new(name, DataType::Float64, true),
                Arc::new(Float64Array::from(values)) as ArrayRef,
            )
        }
        ColumnKind::Boolean => {
            let values: Vec<Option<bool>> = rows
                .iter()
                .map(|row| match row.get(j).unwrap_or(&Data::Empty) {
                    Data::Bool(v) => Some(*v),
                    _ => None,
                })
                .collect();
            (
                Field::new(name, DataType::Boolean, true),
                Arc::new(BooleanArray::from(values)) as ArrayRef,
            )
        }
        ColumnKind::Datetime => {
            let values: Vec<Option<i64>> = rows
                .iter()
                .map(|row| match row.get(j).unwrap_or(&Data::Empty) {
                    Data::DateTime(v) => v.as_datetime().map(|dt| dt.and_utc().timestamp_millis()),
                    Data::DateTimeIso(s) => {
                        parse_iso_datetime(s).map(|dt| dt.and_utc().timestamp_millis())
                    }
                    _ => None,
                })
                .collect();
            (
                Field::new(name, DataType::Timestamp(TimeUnit::Millisecond, None), true),
                Arc::new(TimestampMillisecondArray::from(values)) as ArrayRef,
            )
        }
        ColumnKind::Text => {
            let values: Vec<Option<String>> = rows
                .iter()
                .map(|row| match row.get(j).unwrap_or(&Data::Empty) {
                    Data::Empty => None,
                    Data::String(s) => Some(s.clone()),
                    other => Some(other.to_string()),
                })
                .collect();
            (
                Field::new(name, DataType::Utf8, true),
                Arc::new(StringArray::from(values)) as ArrayRef,
            )
        }
    }
}

fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = s.parse::<NaiveDateTime>() {
        return Some(dt);
    }
    s.parse::<NaiveDate>()
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_names_fill_and_dedupe() {
        let header = vec![
            Data::String("age".to_string()),
            Data::Empty,
            Data::String("age".to_string()),
        ];
        assert_eq!(header_names(&header), vec!["age", "column_2", "age_2"]);
    }

    #[test]
    fn mixed_cells_fall_back_to_text() {
        let r1 = vec![Data::Int(1)];
        let r2 = vec![Data::String("x".to_string())];
        let rows: Vec<&[Data]> = vec![&r1, &r2];
        assert_eq!(classify_column(&rows, 0), ColumnKind::Text);
    }

    #[test]
    fn numeric_cells_classify_as_numeric() {
        let r1 = vec![Data::Int(1)];
        let r2 = vec![Data::Empty];
        let r3 = vec![Data::Float(2.5)];
        let rows: Vec<&[Data]> = vec![&r1, &r2, &r3];
        assert_eq!(classify_column(&rows, 0), ColumnKind::Numeric);
    }

    #[test]
    fn iso_date_fallback_parses_dates() {
        let dt = parse_iso_datetime("2024-03-01").unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert!(parse_iso_datetime("not a date").is_none());
    }
}
