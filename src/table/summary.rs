use super::{ColumnData, ColumnType, Table};
use serde::{Deserialize, Serialize};

const PREVIEW_ROWS: usize = 5;

/// Shape, schema and a short preview of a table, for reports and logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSummary {
    pub columns: Vec<ColumnSummary>,
    pub row_count: usize,
    pub column_count: usize,
    /// Markdown table of the first rows.
    pub preview: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub name: String,
    pub column_type: ColumnType,
    pub missing: usize,
}

impl TableSummary {
    pub fn from_table(table: &Table) -> Self {
        let columns = table
            .columns()
            .iter()
            .map(|c| ColumnSummary {
                name: c.name.clone(),
                column_type: c.column_type(),
                missing: c.missing_count(),
            })
            .collect();

        Self {
            columns,
            row_count: table.n_rows(),
            column_count: table.n_columns(),
            preview: markdown_preview(table, PREVIEW_ROWS),
        }
    }
}

fn markdown_preview(table: &Table, rows: usize) -> String {
    let head = table.head(rows);
    let mut out = String::new();

    out.push_str("|    |");
    for name in head.column_names() {
        out.push_str(&format!(" {} |", name));
    }
    out.push_str("\n|---:|");
    for column in head.columns() {
        match column.column_type() {
            ColumnType::Numeric => out.push_str("---:|"),
            ColumnType::Categorical => out.push_str(":---|"),
        }
    }

    for row in 0..head.n_rows() {
        out.push_str(&format!("\n| {} |", row));
        for column in head.columns() {
            out.push_str(&format!(" {} |", cell(&column.data, row)));
        }
    }
    out
}

fn cell(data: &ColumnData, row: usize) -> String {
    match data {
        ColumnData::Numeric(values) => match values[row] {
            Some(v) => format!("{}", v),
            None => "nan".to_string(),
        },
        ColumnData::Categorical(values) => match &values[row] {
            Some(s) => s.clone(),
            None => "nan".to_string(),
        },
    }
}
