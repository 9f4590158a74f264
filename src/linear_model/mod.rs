//! Ordinary least-squares regression.
//!
//! This module provides:
//! - `LinearRegression`: the estimator, solved by pivoted Householder QR
//! - `FittedModel`: immutable coefficients + intercept, serializable as a blob
//! - `fit_linear_model`: first table column as target, adjusted R² alongside
//!
//! # Examples
//! ```rust
//! use tabfit::LinearRegression;
//! use ndarray::array;
//!
//! let x = array![[1.0], [2.0], [3.0]];
//! let y = array![2.0, 4.0, 6.0];
//!
//! let model = LinearRegression::new().fit(&x, &y).unwrap();
//! let predictions = model.predict(&x).unwrap();
//! assert!((predictions[2] - 6.0).abs() < 1e-10);
//! ```

mod linear_regression;

pub use linear_regression::{FitQuality, FittedModel, LinearRegression, fit_linear_model};
