//! Ingest spreadsheets, stack them, repair missing values and fit an
//! ordinary least-squares model.
//!
//! Every stage is a plain function over in-memory data so any scheduler (or
//! none) can drive it:
//!
//! ```rust
//! use tabfit::{clean, concat, fit_linear_model, CleaningStrategy, Column, Table};
//!
//! let a = Table::new(vec![
//!     Column::numeric("y", vec![Some(3.0), Some(5.0)]),
//!     Column::numeric("x", vec![Some(1.0), Some(2.0)]),
//! ]).unwrap();
//! let b = Table::new(vec![
//!     Column::numeric("y", vec![Some(7.0), None]),
//!     Column::numeric("x", vec![Some(3.0), Some(4.0)]),
//! ]).unwrap();
//!
//! let stacked = concat(&[a, b]).unwrap();
//! let cleaned = clean(&stacked, CleaningStrategy::Impute, 0.2).unwrap();
//! let (model, quality) = fit_linear_model(&cleaned).unwrap();
//! assert_eq!(model.coefficients.len(), 1);
//! assert!(quality.r2 <= 1.0);
//! ```

pub use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

pub mod config;
pub mod dataset;
pub mod error;
pub mod io;
pub mod linear_model;
pub mod metrics;
pub mod pipeline;
pub mod preprocessing;
pub mod table;

pub use config::PipelineConfig;
pub use dataset::Dataset;
pub use error::{PipelineError, Result};
pub use io::{discover_inputs, read_spreadsheet};
pub use linear_model::{FitQuality, FittedModel, LinearRegression, fit_linear_model};
pub use pipeline::{BranchOutput, BranchReport, RunReport, run, run_branch, run_branches};
pub use preprocessing::{Cleaner, CleaningStrategy, DEFAULT_MISSING_THRESHOLD, clean};
pub use table::{Column, ColumnData, ColumnType, Table, TableSummary, concat};

pub type Vector = Array1<f64>;
pub type Matrix = Array2<f64>;
