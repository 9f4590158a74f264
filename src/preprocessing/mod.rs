//! Missing-value repair.
//!
//! Two interchangeable strategies are provided:
//! - `drop`: remove columns whose share of missing values exceeds a threshold
//! - `impute`: fill numeric gaps with the column mean
//!
//! # Examples
//! ```rust
//! use tabfit::{Cleaner, CleaningStrategy, Column, Table};
//!
//! let table = Table::new(vec![
//!     Column::numeric("y", vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)]),
//!     Column::numeric("sparse", vec![None, None, Some(1.0), Some(2.0)]),
//! ]).unwrap();
//!
//! let strategy: CleaningStrategy = "drop".parse().unwrap();
//! let dropped = Cleaner::new(strategy).threshold(0.2).transform(&table).unwrap();
//! assert_eq!(dropped.column_names(), vec!["y"]);
//!
//! let imputed = Cleaner::new(CleaningStrategy::Impute).transform(&table).unwrap();
//! assert_eq!(imputed.column("sparse").unwrap().missing_count(), 0);
//! ```

mod drop_missing;
mod impute;

pub use drop_missing::drop_columns_with_missing_values;
pub use impute::impute_columns_with_mean;

use crate::error::{PipelineError, Result};
use crate::table::Table;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Share of missing rows above which `drop` removes a column.
pub const DEFAULT_MISSING_THRESHOLD: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleaningStrategy {
    Drop,
    Impute,
}

impl CleaningStrategy {
    pub const ALL: [CleaningStrategy; 2] = [CleaningStrategy::Drop, CleaningStrategy::Impute];

    pub fn as_str(&self) -> &'static str {
        match self {
            CleaningStrategy::Drop => "drop",
            CleaningStrategy::Impute => "impute",
        }
    }
}

impl fmt::Display for CleaningStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CleaningStrategy {
    type Err = PipelineError;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "drop" => Ok(CleaningStrategy::Drop),
            "impute" => Ok(CleaningStrategy::Impute),
            other => Err(PipelineError::UnsupportedStrategy {
                value: other.to_string(),
            }),
        }
    }
}

/// Applies one strategy. `threshold` is only read by `drop`.
pub fn clean(table: &Table, strategy: CleaningStrategy, threshold: f64) -> Result<Table> {
    let cleaned = match strategy {
        CleaningStrategy::Drop => drop_columns_with_missing_values(table, threshold)?,
        CleaningStrategy::Impute => impute_columns_with_mean(table)?,
    };
    tracing::info!(
        %strategy,
        rows = cleaned.n_rows(),
        columns_before = table.n_columns(),
        columns_after = cleaned.n_columns(),
        "cleaned table"
    );
    Ok(cleaned)
}

#[derive(Debug, Clone)]
pub struct Cleaner {
    strategy: CleaningStrategy,
    threshold: f64,
}

impl Cleaner {
    pub fn new(strategy: CleaningStrategy) -> Self {
        Self {
            strategy,
            threshold: DEFAULT_MISSING_THRESHOLD,
        }
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn strategy(&self) -> CleaningStrategy {
        self.strategy
    }

    pub fn transform(&self, table: &Table) -> Result<Table> {
        clean(table, self.strategy, self.threshold)
    }
}
