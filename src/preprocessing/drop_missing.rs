use crate::error::{PipelineError, Result};
use crate::table::Table;

/// Removes every column whose missing fraction is strictly above `threshold`.
///
/// A zero-row table has an undefined (NaN) fraction and keeps all columns.
/// Fails with `EmptyResult` when nothing is left.
pub fn drop_columns_with_missing_values(table: &Table, threshold: f64) -> Result<Table> {
    let (dropped, kept): (Vec<_>, Vec<_>) = table
        .columns()
        .iter()
        .partition(|c| c.missing_fraction() > threshold);

    if !dropped.is_empty() {
        let names: Vec<&str> = dropped.iter().map(|c| c.name.as_str()).collect();
        tracing::warn!(threshold, columns = ?names, "dropping columns with missing values");
    }

    if kept.is_empty() {
        return Err(PipelineError::EmptyResult {
            strategy: "drop".to_string(),
            threshold,
            rows: table.n_rows(),
            columns: table.n_columns(),
        });
    }

    Table::new(kept.into_iter().cloned().collect())
}
