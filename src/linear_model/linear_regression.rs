use crate::dataset::Dataset;
use crate::error::{PipelineError, Result};
use crate::metrics::{adjusted_r2_score, mean_squared_error, r2_score};
use crate::table::Table;
use crate::{Matrix, Vector};
use ndarray::s;
use serde::{Deserialize, Serialize};

/// Columns whose remaining norm falls below this share of the leading
/// column's norm are treated as linearly dependent on the columns before them.
const RANK_TOLERANCE: f64 = 1e-10;

#[derive(Clone, Debug)]
pub struct LinearRegression {
    fit_intercept: bool,
}

/// Coefficients and intercept learned by `LinearRegression`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FittedModel {
    pub coefficients: Vector,
    pub intercept: f64,
    pub feature_names: Vec<String>,
    pub target_name: String,
}

/// Goodness of fit on the training data.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FitQuality {
    pub r2: f64,
    pub adjusted_r2: f64,
    pub mse: f64,
    pub n_samples: usize,
    pub n_features: usize,
}

impl LinearRegression {
    pub fn new() -> Self {
        Self {
            fit_intercept: true,
        }
    }

    pub fn with_intercept(fit_intercept: bool) -> Self {
        Self { fit_intercept }
    }

    pub fn fit(&self, x: &Matrix, y: &Vector) -> Result<FittedModel> {
        let dataset = Dataset::new(x.clone(), y.clone())?;
        self.fit_dataset(&dataset)
    }

    pub fn fit_dataset(&self, dataset: &Dataset) -> Result<FittedModel> {
        let x = &dataset.features;
        let y = &dataset.labels;
        if x.nrows() == 0 {
            return Err(PipelineError::InvalidTrainingData {
                rows: 0,
                columns: x.ncols() + 1,
                reason: "X must have at least one sample".to_string(),
            });
        }

        if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
            return Err(PipelineError::FitFailed {
                rows: x.nrows(),
                features: x.ncols(),
                reason: "training data contains non-finite values".to_string(),
            });
        }

        let (coefficients, intercept) = if self.fit_intercept {
            self.fit_with_intercept(x, y)
        } else {
            (self.fit_without_intercept(x, y), 0.0)
        };

        if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err(PipelineError::FitFailed {
                rows: x.nrows(),
                features: x.ncols(),
                reason: "solution is not finite".to_string(),
            });
        }

        Ok(FittedModel::new(
            coefficients,
            intercept,
            dataset.feature_names.clone(),
            dataset.target_name.clone(),
        ))
    }

    fn fit_with_intercept(&self, x: &Matrix, y: &Vector) -> (Vector, f64) {
        let n = x.nrows() as f64;
        let y_mean = y.sum() / n;
        let x_means = x.sum_axis(ndarray::Axis(0)) / n;

        let mut x_centered = x.clone();
        for mut row in x_centered.axis_iter_mut(ndarray::Axis(0)) {
            row -= &x_means;
        }

        let y_centered = y - y_mean;

        let coeffs = solve_least_squares(&x_centered, &y_centered);
        let intercept = y_mean - coeffs.dot(&x_means);

        (coeffs, intercept)
    }

    fn fit_without_intercept(&self, x: &Matrix, y: &Vector) -> Vector {
        solve_least_squares(x, y)
    }
}

impl Default for LinearRegression {
    fn default() -> Self {
        Self::new()
    }
}

/// Least-squares solution of `X b ≈ y` by Householder QR with column pivoting.
///
/// `X` is factorised directly, so conditioning is not squared the way it is
/// with the normal equations. Pivoting moves the column with the largest
/// remaining norm forward at each step; once that norm drops below
/// `RANK_TOLERANCE` times the leading one, the remaining columns are
/// dependent and get a zero coefficient. The result is still a least-squares
/// solution.
fn solve_least_squares(x: &Matrix, y: &Vector) -> Vector {
    let (n, p) = x.dim();
    let mut a = x.clone();
    let mut b = y.clone();
    let mut order: Vec<usize> = (0..p).collect();
    let mut leading = 0.0;
    let mut rank = 0;

    for k in 0..n.min(p) {
        let (pivot, norm) = (k..p)
            .map(|j| {
                let tail = a.slice(s![k.., j]);
                (j, tail.dot(&tail).sqrt())
            })
            .fold((k, -1.0), |best, cur| if cur.1 > best.1 { cur } else { best });

        if k == 0 {
            leading = norm;
        }
        if norm <= RANK_TOLERANCE * leading || norm == 0.0 {
            break;
        }

        if pivot != k {
            for i in 0..n {
                a.swap((i, k), (i, pivot));
            }
            order.swap(k, pivot);
        }

        let alpha = if a[(k, k)] >= 0.0 { -norm } else { norm };
        let mut v = a.slice(s![k.., k]).to_owned();
        v[0] -= alpha;
        let v_norm_sq = v.dot(&v);

        for j in k..p {
            let mut column = a.slice_mut(s![k.., j]);
            let factor = 2.0 * v.dot(&column) / v_norm_sq;
            column.scaled_add(-factor, &v);
        }
        let mut rhs = b.slice_mut(s![k..]);
        let factor = 2.0 * v.dot(&rhs) / v_norm_sq;
        rhs.scaled_add(-factor, &v);

        rank += 1;
    }

    for &feature in &order[rank..] {
        tracing::debug!(feature, "feature is collinear, coefficient set to zero");
    }

    let mut solution = Vector::zeros(rank);
    for i in (0..rank).rev() {
        let mut acc = b[i];
        for j in (i + 1)..rank {
            acc -= a[(i, j)] * solution[j];
        }
        solution[i] = acc / a[(i, i)];
    }

    let mut coeffs = Vector::zeros(p);
    for (k, &feature) in order.iter().take(rank).enumerate() {
        coeffs[feature] = solution[k];
    }
    coeffs
}

impl FittedModel {
    pub fn new(
        coefficients: Vector,
        intercept: f64,
        feature_names: Vec<String>,
        target_name: String,
    ) -> Self {
        Self {
            coefficients,
            intercept,
            feature_names,
            target_name,
        }
    }

    pub fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    pub fn predict(&self, x: &Matrix) -> Result<Vector> {
        if x.ncols() != self.coefficients.len() {
            return Err(PipelineError::InvalidTrainingData {
                rows: x.nrows(),
                columns: x.ncols(),
                reason: format!(
                    "number of features in X ({}) doesn't match training data ({})",
                    x.ncols(),
                    self.coefficients.len()
                ),
            });
        }

        Ok(x.dot(&self.coefficients) + self.intercept)
    }

    pub fn score(&self, x: &Matrix, y: &Vector) -> Result<f64> {
        let y_pred = self.predict(x)?;
        r2_score(y, &y_pred)
    }

    /// Opaque binary form of the model.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

impl FitQuality {
    pub fn evaluate(model: &FittedModel, dataset: &Dataset) -> Result<Self> {
        let y_pred = model.predict(&dataset.features)?;
        let r2 = r2_score(&dataset.labels, &y_pred)?;
        let mse = mean_squared_error(&dataset.labels, &y_pred)?;
        let n_samples = dataset.n_samples();
        let n_features = dataset.n_features();
        let adjusted_r2 = adjusted_r2_score(r2, n_samples, n_features);

        if n_samples <= n_features + 1 {
            tracing::warn!(
                n_samples,
                n_features,
                adjusted_r2,
                "adjusted R2 is undefined for n - p - 1 <= 0"
            );
        }

        Ok(Self {
            r2,
            adjusted_r2,
            mse,
            n_samples,
            n_features,
        })
    }
}

/// Fits y (first column) on every other column of a cleaned table.
///
/// R² is measured on the same rows the model was fitted on.
pub fn fit_linear_model(table: &Table) -> Result<(FittedModel, FitQuality)> {
    let dataset = Dataset::from_table(table)?;
    let model = LinearRegression::new().fit_dataset(&dataset)?;
    let quality = FitQuality::evaluate(&model, &dataset)?;

    tracing::info!(
        target_column = %model.target_name,
        rows = quality.n_samples,
        features = quality.n_features,
        r2 = quality.r2,
        adjusted_r2 = quality.adjusted_r2,
        "fitted linear model"
    );
    Ok((model, quality))
}
