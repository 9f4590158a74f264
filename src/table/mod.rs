//! In-memory rectangular data.
//!
//! A `Table` is an ordered list of named, typed columns of equal length.
//! Missing values are `None`. The row index is implicit and always runs
//! `0..n_rows`, so stacking or filtering never carries source positions along.
//!
//! # Examples
//! ```rust
//! use tabfit::{Column, ColumnType, Table};
//!
//! let table = Table::new(vec![
//!     Column::numeric("price", vec![Some(10.0), None, Some(12.5)]),
//!     Column::categorical("city", vec![Some("Oslo".into()), Some("Bergen".into()), None]),
//! ]).unwrap();
//!
//! assert_eq!(table.shape(), (3, 2));
//! assert_eq!(table.column("price").unwrap().missing_count(), 1);
//! assert_eq!(table.schema()[1].1, ColumnType::Categorical);
//! ```

mod concat;
mod summary;

pub use concat::concat;
pub use summary::TableSummary;

use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar type shared by every value of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Numeric,
    Categorical,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Numeric => write!(f, "numeric"),
            ColumnType::Categorical => write!(f, "categorical"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "values", rename_all = "snake_case")]
pub enum ColumnData {
    Numeric(Vec<Option<f64>>),
    Categorical(Vec<Option<String>>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(values) => values.len(),
            ColumnData::Categorical(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn column_type(&self) -> ColumnType {
        match self {
            ColumnData::Numeric(_) => ColumnType::Numeric,
            ColumnData::Categorical(_) => ColumnType::Categorical,
        }
    }

    fn empty(column_type: ColumnType) -> Self {
        match column_type {
            ColumnType::Numeric => ColumnData::Numeric(Vec::new()),
            ColumnType::Categorical => ColumnData::Categorical(Vec::new()),
        }
    }

    fn extend_missing(&mut self, n: usize) {
        match self {
            ColumnData::Numeric(values) => values.resize(values.len() + n, None),
            ColumnData::Categorical(values) => values.resize(values.len() + n, None),
        }
    }

    /// Appends `other` in place. Both sides must have the same type.
    fn extend_from(&mut self, other: &ColumnData) -> bool {
        match (self, other) {
            (ColumnData::Numeric(dst), ColumnData::Numeric(src)) => {
                dst.extend_from_slice(src);
                true
            }
            (ColumnData::Categorical(dst), ColumnData::Categorical(src)) => {
                dst.extend_from_slice(src);
                true
            }
            _ => false,
        }
    }

    fn head(&self, n: usize) -> Self {
        match self {
            ColumnData::Numeric(values) => {
                ColumnData::Numeric(values.iter().take(n).copied().collect())
            }
            ColumnData::Categorical(values) => {
                ColumnData::Categorical(values.iter().take(n).cloned().collect())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    pub fn numeric(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self::new(name, ColumnData::Numeric(values))
    }

    pub fn categorical(name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Self::new(name, ColumnData::Categorical(values))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn column_type(&self) -> ColumnType {
        self.data.column_type()
    }

    pub fn missing_count(&self) -> usize {
        match &self.data {
            ColumnData::Numeric(values) => values.iter().filter(|v| v.is_none()).count(),
            ColumnData::Categorical(values) => values.iter().filter(|v| v.is_none()).count(),
        }
    }

    /// True when no value is observed, including a zero-length column.
    /// Such a column carries no evidence for its type.
    pub fn is_all_missing(&self) -> bool {
        self.missing_count() == self.len()
    }

    /// Share of missing rows. NaN for an empty column.
    pub fn missing_fraction(&self) -> f64 {
        self.missing_count() as f64 / self.len() as f64
    }

    /// Mean over the observed values of a numeric column, summed in row order.
    ///
    /// `None` for categorical columns and for numeric columns with nothing observed.
    pub fn mean(&self) -> Option<f64> {
        let ColumnData::Numeric(values) = &self.data else {
            return None;
        };
        let mut sum = 0.0;
        let mut count = 0usize;
        for value in values.iter().flatten() {
            sum += value;
            count += 1;
        }
        if count == 0 {
            None
        } else {
            Some(sum / count as f64)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let n_rows = columns.first().map(Column::len).unwrap_or(0);
        if let Some(bad) = columns.iter().find(|c| c.len() != n_rows) {
            return Err(PipelineError::invalid_table(format!(
                "column '{}' has {} rows, expected {}",
                bad.name,
                bad.len(),
                n_rows
            )));
        }
        Ok(Self { columns, n_rows })
    }

    /// Zero-row table with the given schema.
    pub fn with_schema(schema: &[(String, ColumnType)]) -> Self {
        let columns = schema
            .iter()
            .map(|(name, column_type)| Column::new(name.clone(), ColumnData::empty(*column_type)))
            .collect();
        Self { columns, n_rows: 0 }
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.columns.len())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn schema(&self) -> Vec<(String, ColumnType)> {
        self.columns
            .iter()
            .map(|c| (c.name.clone(), c.column_type()))
            .collect()
    }

    pub fn missing_counts(&self) -> Vec<usize> {
        self.columns.iter().map(Column::missing_count).collect()
    }

    /// First `n` rows.
    pub fn head(&self, n: usize) -> Self {
        let columns = self
            .columns
            .iter()
            .map(|c| Column::new(c.name.clone(), c.data.head(n)))
            .collect();
        Self {
            columns,
            n_rows: n.min(self.n_rows),
        }
    }

    pub fn summary(&self) -> TableSummary {
        TableSummary::from_table(self)
    }

    /// Appends the rows of `other`. Callers check the schema first; an
    /// all-missing column of `other` is appended as missing values whatever
    /// its own type.
    pub(crate) fn append(&mut self, other: &Table) -> bool {
        for (dst, src) in self.columns.iter_mut().zip(other.columns.iter()) {
            if src.is_all_missing() {
                dst.data.extend_missing(src.len());
            } else if !dst.data.extend_from(&src.data) {
                return false;
            }
        }
        self.n_rows += other.n_rows;
        true
    }
}

pub(crate) fn format_schema(schema: &[(String, ColumnType)]) -> String {
    schema
        .iter()
        .map(|(name, ty)| format!("{}: {}", name, ty))
        .collect::<Vec<_>>()
        .join(", ")
}
