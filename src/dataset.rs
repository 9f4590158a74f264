use crate::error::{PipelineError, Result};
use crate::table::{ColumnData, Table};
use crate::{Matrix, Vector};

/// Numeric training data: the first column of a table as target, the rest as features.
#[derive(Clone, Debug)]
pub struct Dataset {
    pub features: Matrix,
    pub labels: Vector,
    pub feature_names: Vec<String>,
    pub target_name: String,
}

impl Dataset {
    pub fn new(features: Matrix, labels: Vector) -> Result<Self> {
        if features.nrows() != labels.len() {
            return Err(PipelineError::InvalidTrainingData {
                rows: labels.len(),
                columns: features.ncols() + 1,
                reason: format!(
                    "features have {} rows but target has {}",
                    features.nrows(),
                    labels.len()
                ),
            });
        }

        let feature_names = (0..features.ncols()).map(|j| format!("x{}", j)).collect();
        Ok(Self {
            features,
            labels,
            feature_names,
            target_name: "y".to_string(),
        })
    }

    /// Splits a cleaned table into target and features.
    ///
    /// Every column must be numeric and fully observed, there must be at least
    /// one row and one feature column.
    pub fn from_table(table: &Table) -> Result<Self> {
        let (rows, columns) = table.shape();
        let invalid = |reason: String| PipelineError::InvalidTrainingData {
            rows,
            columns,
            reason,
        };

        if rows == 0 {
            return Err(invalid("table has no rows".to_string()));
        }
        if columns < 2 {
            return Err(invalid(
                "need a target column and at least one feature column".to_string(),
            ));
        }

        let mut data = Matrix::zeros((rows, columns));
        for (j, column) in table.columns().iter().enumerate() {
            let ColumnData::Numeric(values) = &column.data else {
                return Err(invalid(format!("column '{}' is categorical", column.name)));
            };
            for (i, value) in values.iter().enumerate() {
                data[(i, j)] = value.ok_or_else(|| {
                    invalid(format!(
                        "column '{}' has {} missing values",
                        column.name,
                        column.missing_count()
                    ))
                })?;
            }
        }

        let labels = data.column(0).to_owned();
        let features = data.slice(ndarray::s![.., 1..]).to_owned();
        let names = table.column_names();

        Ok(Self {
            features,
            labels,
            feature_names: names[1..].iter().map(|s| s.to_string()).collect(),
            target_name: names[0].to_string(),
        })
    }

    pub fn n_samples(&self) -> usize {
        self.features.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }
}
