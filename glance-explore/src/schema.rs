//! Semantic column typing derived from the Arrow schema.
//!
//! Analysis branching works over a three-way semantic type rather than the
//! full Arrow type lattice. The mapping is a total function of the Arrow
//! `DataType`, so the same input bytes and loader configuration always yield
//! the same semantic schema.

use arrow::datatypes::{DataType, Schema};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ExploreError, Result};

/// Semantic type of a column, driving analysis dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SemanticType {
    /// Integer, floating-point, or decimal values.
    Numeric,
    /// Strings, booleans, and anything else treated as discrete labels.
    Categorical,
    /// Dates and timestamps.
    Datetime,
}

impl SemanticType {
    /// Derives the semantic type from an Arrow physical type.
    pub fn from_arrow(data_type: &DataType) -> Self {
        match data_type {
            DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float16
            | DataType::Float32
            | DataType::Float64
            | DataType::Decimal128(_, _)
            | DataType::Decimal256(_, _) => SemanticType::Numeric,
            DataType::Date32
            | DataType::Date64
            | DataType::Timestamp(_, _) => SemanticType::Datetime,
            _ => SemanticType::Categorical,
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SemanticType::Numeric => "numeric",
            SemanticType::Categorical => "categorical",
            SemanticType::Datetime => "datetime",
        };
        write!(f, "{name}")
    }
}

/// A single column's name, physical type, and derived semantic type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSchema {
    /// Column name as it appears in the dataset.
    pub name: String,
    /// Arrow type rendered as text (e.g. `Float64`, `Utf8`).
    pub physical_type: String,
    /// Derived semantic type.
    pub semantic_type: SemanticType,
    /// Whether the column may contain nulls.
    pub nullable: bool,
}

/// Semantic view over a dataset's Arrow schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSchema {
    columns: Vec<ColumnSchema>,
}

impl DatasetSchema {
    /// Builds the semantic schema from an Arrow schema.
    pub fn from_arrow(schema: &Schema) -> Self {
        let columns = schema
            .fields()
            .iter()
            .map(|field| ColumnSchema {
                name: field.name().clone(),
                physical_type: format!("{}", field.data_type()),
                semantic_type: SemanticType::from_arrow(field.data_type()),
                nullable: field.is_nullable(),
            })
            .collect();
        Self { columns }
    }

    /// All columns in dataset order.
    pub fn columns(&self) -> &[ColumnSchema] {
        &self.columns
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Looks up a column, failing with `InvalidColumn` if absent.
    pub fn column(&self, name: &str) -> Result<&ColumnSchema> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| ExploreError::invalid_column(name))
    }

    /// Resolves the semantic type of a column.
    pub fn semantic_type(&self, name: &str) -> Result<SemanticType> {
        Ok(self.column(name)?.semantic_type)
    }

    /// Names of all columns with the given semantic type, in dataset order.
    pub fn columns_of_type(&self, semantic: SemanticType) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.semantic_type == semantic)
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Names of all numeric columns, in dataset order.
    pub fn numeric_columns(&self) -> Vec<&str> {
        self.columns_of_type(SemanticType::Numeric)
    }
}
