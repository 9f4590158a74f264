use crate::error::Result;
use crate::table::{Column, ColumnData, Table};

/// Fills the gaps of every numeric column with the mean of its observed values.
///
/// Categorical columns are copied unchanged. A numeric column with no
/// observed value has no mean and stays entirely missing.
pub fn impute_columns_with_mean(table: &Table) -> Result<Table> {
    let columns: Vec<Column> = table
        .columns()
        .iter()
        .map(|column| match (&column.data, column.mean()) {
            (ColumnData::Numeric(values), Some(mean)) => {
                let filled = values.iter().map(|v| Some(v.unwrap_or(mean))).collect();
                tracing::debug!(column = %column.name, mean, "imputing missing values");
                Column::numeric(column.name.clone(), filled)
            }
            _ => column.clone(),
        })
        .collect();

    Table::new(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    #[test]
    fn test_fill_with_mean() {
        let table = Table::new(vec![
            Column::numeric("x", vec![Some(1.0), None, Some(5.0)]),
            Column::categorical("tag", vec![None, Some("a".into()), Some("b".into())]),
        ])
        .unwrap();

        let result = impute_columns_with_mean(&table).unwrap();
        assert_eq!(
            result.columns()[0].data,
            ColumnData::Numeric(vec![Some(1.0), Some(3.0), Some(5.0)])
        );
        assert_eq!(result.columns()[1], table.columns()[1]);
    }

    #[test]
    fn test_all_missing_numeric_column_stays_missing() {
        let table = Table::new(vec![Column::numeric("x", vec![None, None])]).unwrap();
        let result = impute_columns_with_mean(&table).unwrap();
        assert_eq!(result.columns()[0].missing_count(), 2);
    }

    #[test]
    fn test_complete_table_unchanged() {
        let table = Table::new(vec![Column::numeric("x", vec![Some(1.0), Some(2.0)])]).unwrap();
        assert_eq!(impute_columns_with_mean(&table).unwrap(), table);
    }

    #[test]
    fn test_no_numeric_gaps_and_categorical_counts_kept() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..25 {
            let rows = rng.gen_range(1..30);
            let numeric: Vec<Option<f64>> = (0..rows)
                .map(|i| {
                    // first row always observed so the column has a mean
                    if i > 0 && rng.gen_bool(0.4) {
                        None
                    } else {
                        Some(rng.gen_range(-10.0..10.0))
                    }
                })
                .collect();
            let categorical: Vec<Option<String>> = (0..rows)
                .map(|i| if rng.gen_bool(0.4) { None } else { Some(format!("k{}", i % 3)) })
                .collect();
            let table = Table::new(vec![
                Column::numeric("n", numeric),
                Column::categorical("c", categorical),
            ])
            .unwrap();

            let result = impute_columns_with_mean(&table).unwrap();
            assert_eq!(result.columns()[0].missing_count(), 0);
            assert_eq!(
                result.columns()[1].missing_count(),
                table.columns()[1].missing_count()
            );
        }
    }
}
