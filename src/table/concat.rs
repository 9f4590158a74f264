use super::{ColumnType, Table, format_schema};
use crate::error::{PipelineError, Result};

/// Stacks tables that share one schema, rows in input order.
///
/// The result has a fresh contiguous row index. Fails with `NoInputs` on an
/// empty slice and `SchemaMismatch` when any table's column names, order or
/// types differ from the first table. A column with no observed value in one
/// table has no type of its own there: it takes the type the column has in
/// the other tables and contributes missing values.
pub fn concat(tables: &[Table]) -> Result<Table> {
    if tables.is_empty() {
        return Err(PipelineError::NoInputs {
            context: "no tables to concatenate".to_string(),
        });
    }
    let schema = resolve_schema(tables)?;

    let mut result = Table::with_schema(&schema);
    for table in tables {
        if !result.append(table) {
            // unreachable after the schema check
            return Err(PipelineError::invalid_table("column types changed while stacking"));
        }
    }

    tracing::debug!(
        tables = tables.len(),
        rows = result.n_rows(),
        columns = result.n_columns(),
        "concatenated tables"
    );
    Ok(result)
}

/// Schema of the stacked table. Types come from the first table in which a
/// column has an observed value, else from the first table.
fn resolve_schema(tables: &[Table]) -> Result<Vec<(String, ColumnType)>> {
    let first = &tables[0];
    let mut schema = first.schema();
    let mut typed: Vec<bool> = first.columns().iter().map(|c| !c.is_all_missing()).collect();

    for (index, table) in tables.iter().enumerate().skip(1) {
        if table.n_columns() != schema.len() {
            return Err(mismatch(index, &schema, table));
        }
        for (j, column) in table.columns().iter().enumerate() {
            if column.name != schema[j].0 {
                return Err(mismatch(index, &schema, table));
            }
            if column.is_all_missing() {
                continue;
            }
            if !typed[j] {
                schema[j].1 = column.column_type();
                typed[j] = true;
            } else if schema[j].1 != column.column_type() {
                return Err(mismatch(index, &schema, table));
            }
        }
    }
    Ok(schema)
}

fn mismatch(index: usize, expected: &[(String, ColumnType)], table: &Table) -> PipelineError {
    PipelineError::SchemaMismatch {
        index,
        expected: format_schema(expected),
        found: format_schema(&table.schema()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Column, ColumnType};
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn table(y: Vec<Option<f64>>, label: Vec<Option<&str>>) -> Table {
        Table::new(vec![
            Column::numeric("y", y),
            Column::categorical("label", label.into_iter().map(|s| s.map(String::from)).collect()),
        ])
        .unwrap()
    }

    #[test]
    fn test_concat_preserves_order() {
        let a = table(vec![Some(1.0), Some(2.0)], vec![Some("a"), None]);
        let b = table(vec![None], vec![Some("c")]);
        let result = concat(&[a, b]).unwrap();

        assert_eq!(result.n_rows(), 3);
        assert_eq!(
            result.columns()[0].data,
            crate::table::ColumnData::Numeric(vec![Some(1.0), Some(2.0), None])
        );
        assert_eq!(result.columns()[1].missing_count(), 1);
    }

    #[test]
    fn test_concat_single_table_is_identity() {
        let a = table(vec![Some(1.0), None, Some(3.0)], vec![None, Some("b"), Some("c")]);
        let result = concat(std::slice::from_ref(&a)).unwrap();
        assert_eq!(result, a);
    }

    #[test]
    fn test_concat_empty_input() {
        let result = concat(&[]);
        assert!(matches!(result, Err(PipelineError::NoInputs { .. })));
    }

    #[test]
    fn test_concat_type_mismatch() {
        let a = table(vec![Some(1.0)], vec![Some("a")]);
        let b = Table::new(vec![
            Column::numeric("y", vec![Some(2.0)]),
            Column::numeric("label", vec![Some(3.0)]),
        ])
        .unwrap();

        match concat(&[a, b]) {
            Err(PipelineError::SchemaMismatch { index, expected, found }) => {
                assert_eq!(index, 1);
                assert!(expected.contains("label: categorical"));
                assert!(found.contains("label: numeric"));
            }
            other => panic!("expected SchemaMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_concat_all_missing_column_takes_observed_type() {
        let jan = table(vec![Some(1.0)], vec![Some("Oslo")]);
        let feb = Table::new(vec![
            Column::numeric("y", vec![Some(2.0), Some(3.0)]),
            Column::numeric("label", vec![None, None]),
        ])
        .unwrap();

        let result = concat(&[feb.clone(), jan.clone(), feb]).unwrap();
        assert_eq!(result.n_rows(), 5);
        assert_eq!(
            result.columns()[1].data,
            crate::table::ColumnData::Categorical(vec![None, None, Some("Oslo".into()), None, None])
        );

        let header_only = Table::new(vec![
            Column::numeric("y", Vec::new()),
            Column::numeric("label", Vec::new()),
        ])
        .unwrap();
        let result = concat(&[jan, header_only]).unwrap();
        assert_eq!(result.schema()[1].1, ColumnType::Categorical);
    }

    #[test]
    fn test_concat_all_missing_everywhere_stays_numeric() {
        let a = Table::new(vec![Column::numeric("v", vec![None])]).unwrap();
        let b = Table::new(vec![Column::numeric("v", vec![None, None])]).unwrap();
        let result = concat(&[a, b]).unwrap();
        assert_eq!(result.columns()[0].data, crate::table::ColumnData::Numeric(vec![None; 3]));
    }

    #[test]
    fn test_concat_observed_types_still_conflict() {
        let a = table(vec![Some(1.0)], vec![None]);
        let b = table(vec![Some(2.0)], vec![Some("x")]);
        let c = Table::new(vec![
            Column::numeric("y", vec![Some(3.0)]),
            Column::numeric("label", vec![Some(4.0)]),
        ])
        .unwrap();

        match concat(&[a, b, c]) {
            Err(PipelineError::SchemaMismatch { index, expected, .. }) => {
                assert_eq!(index, 2);
                assert!(expected.contains("label: categorical"));
            }
            other => panic!("expected SchemaMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_concat_column_count_mismatch() {
        let a = table(vec![Some(1.0)], vec![Some("a")]);
        let b = Table::new(vec![Column::numeric("y", vec![Some(2.0)])]).unwrap();
        assert!(matches!(
            concat(&[a, b]),
            Err(PipelineError::SchemaMismatch { index: 1, .. })
        ));
    }

    #[test]
    fn test_concat_column_order_mismatch() {
        let a = Table::new(vec![
            Column::numeric("x", vec![Some(1.0)]),
            Column::numeric("y", vec![Some(2.0)]),
        ])
        .unwrap();
        let b = Table::new(vec![
            Column::numeric("y", vec![Some(2.0)]),
            Column::numeric("x", vec![Some(1.0)]),
        ])
        .unwrap();
        assert!(matches!(
            concat(&[a, b]),
            Err(PipelineError::SchemaMismatch { index: 1, .. })
        ));
    }

    #[test]
    fn test_concat_row_count_is_sum() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let n_tables = rng.gen_range(1..6);
            let tables: Vec<Table> = (0..n_tables)
                .map(|_| {
                    let rows = rng.gen_range(0..15);
                    let values = (0..rows)
                        .map(|_| {
                            if rng.gen_bool(0.3) {
                                None
                            } else {
                                Some(rng.gen_range(-5.0..5.0))
                            }
                        })
                        .collect();
                    Table::new(vec![Column::numeric("v", values)]).unwrap()
                })
                .collect();

            let expected: usize = tables.iter().map(Table::n_rows).sum();
            let result = concat(&tables).unwrap();
            assert_eq!(result.n_rows(), expected);
            assert_eq!(result.schema(), vec![("v".to_string(), ColumnType::Numeric)]);
        }
    }
}
