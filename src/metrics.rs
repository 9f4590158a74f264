use crate::Vector;
use crate::error::{PipelineError, Result};

fn check_lengths(y_true: &Vector, y_pred: &Vector) -> Result<()> {
    if y_true.len() != y_pred.len() {
        return Err(PipelineError::InvalidTrainingData {
            rows: y_true.len(),
            columns: 1,
            reason: format!(
                "y_true has {} values but y_pred has {}",
                y_true.len(),
                y_pred.len()
            ),
        });
    }
    if y_true.is_empty() {
        return Err(PipelineError::InvalidTrainingData {
            rows: 0,
            columns: 1,
            reason: "cannot score an empty target".to_string(),
        });
    }
    Ok(())
}

pub fn mean_squared_error(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    check_lengths(y_true, y_pred)?;

    let diff = y_true - y_pred;
    Ok(diff.mapv(|x| x * x).sum() / y_true.len() as f64)
}

/// Coefficient of determination.
///
/// A constant target has no variance to explain: the score is 1.0 when the
/// predictions are exact and 0.0 otherwise.
pub fn r2_score(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    check_lengths(y_true, y_pred)?;

    let y_mean = y_true.sum() / y_true.len() as f64;
    let ss_res = (y_true - y_pred).mapv(|x| x * x).sum();
    let ss_tot = y_true.mapv(|x| (x - y_mean) * (x - y_mean)).sum();

    if ss_tot == 0.0 {
        return Ok(if ss_res == 0.0 { 1.0 } else { 0.0 });
    }

    Ok(1.0 - ss_res / ss_tot)
}

/// R² corrected for the number of predictors:
/// `1 - (1 - r2) * (n - 1) / (n - p - 1)`.
///
/// `n` is the number of samples and `p` the number of features. There is no
/// guard for `n - p - 1 <= 0`: the value is whatever f64 arithmetic yields
/// (infinite, NaN, or a flipped sign), so check the shape before trusting it.
pub fn adjusted_r2_score(r2: f64, n: usize, p: usize) -> f64 {
    let n = n as f64;
    let p = p as f64;
    1.0 - (1.0 - r2) * (n - 1.0) / (n - p - 1.0)
}
