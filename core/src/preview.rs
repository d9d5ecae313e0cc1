//! Bounded, human-readable rendering of a [`Value`].
//!
//! Previews are for display only; nothing compares or parses them.
//! [`TableData`] is the truncated form a results panel lays out as a table.

use serde::Serialize;

use crate::values::{Shape, Value};

/// Longest sequence rendered in full.
pub const MAX_FULL_ITEMS: usize = 6;

/// Leading items kept when a sequence is elided.
const HEAD_ITEMS: usize = 3;

/// Render `value` for display.
///
/// Scalars get 4 decimals. Sequences of up to 6 items are rendered in full
/// with 2 decimals, longer ones as the first 3 items, `...` and the last item.
/// Matrices render one row per line with the same rule applied to each row
/// and to the list of rows.
pub fn format_preview(value: &Value) -> String {
    match value {
        Value::Scalar(x) => format!("{:.4}", x),
        Value::Vector(items) => format_row(items),
        Value::Matrix(rows) if rows.is_empty() => format_row(&[]),
        Value::Matrix(rows) => format_rows(rows),
    }
}

fn format_row(items: &[f64]) -> String {
    match items.split_last() {
        Some((last, _)) if items.len() > MAX_FULL_ITEMS => {
            format!("[{}, ..., {:.2}]", join(&items[..HEAD_ITEMS]), last)
        }
        _ => format!("[{}]", join(items)),
    }
}

fn format_rows(rows: &[Vec<f64>]) -> String {
    let rendered: Vec<String> = match rows.split_last() {
        Some((last, _)) if rows.len() > MAX_FULL_ITEMS => rows[..HEAD_ITEMS]
            .iter()
            .map(|row| format_row(row))
            .chain([String::from("..."), format_row(last)])
            .collect(),
        _ => rows.iter().map(|row| format_row(row)).collect(),
    };
    rendered.join("\n")
}

fn join(items: &[f64]) -> String {
    items
        .iter()
        .map(|x| format!("{:.2}", x))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Vector items kept for a table.
pub const TABLE_MAX_ITEMS: usize = 100;

/// Matrix rows kept for a table.
pub const TABLE_MAX_ROWS: usize = 50;

/// Matrix columns kept for a table.
pub const TABLE_MAX_COLS: usize = 20;

/// A result cut down for tabular display. `has_more` is set when anything
/// was left out.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TableData {
    Scalar {
        value: f64,
    },
    Vector {
        data: Vec<f64>,
        #[serde(rename = "hasMore")]
        has_more: bool,
    },
    Matrix {
        data: Vec<Vec<f64>>,
        /// Shape of the full matrix.
        shape: Shape,
        #[serde(rename = "hasMore")]
        has_more: bool,
    },
}

impl TableData {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Scalar(x) => TableData::Scalar { value: *x },
            Value::Vector(items) => TableData::Vector {
                data: items.iter().take(TABLE_MAX_ITEMS).copied().collect(),
                has_more: items.len() > TABLE_MAX_ITEMS,
            },
            Value::Matrix(rows) if rows.is_empty() => TableData::Vector {
                data: Vec::new(),
                has_more: false,
            },
            Value::Matrix(rows) => TableData::Matrix {
                data: rows
                    .iter()
                    .take(TABLE_MAX_ROWS)
                    .map(|row| row.iter().take(TABLE_MAX_COLS).copied().collect())
                    .collect(),
                shape: value.shape(),
                has_more: rows.len() > TABLE_MAX_ROWS
                    || rows.iter().any(|row| row.len() > TABLE_MAX_COLS),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scalar_four_decimals() {
        assert_eq!(format_preview(&Value::Scalar(3.0)), "3.0000");
        assert_eq!(format_preview(&Value::Scalar(2.0_f64.sqrt())), "1.4142");
    }

    #[test]
    fn test_short_vector_in_full() {
        let value = Value::Vector(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(
            format_preview(&value),
            "[1.00, 2.00, 3.00, 4.00, 5.00, 6.00]"
        );
        assert_eq!(format_preview(&Value::Vector(vec![])), "[]");
    }

    #[test]
    fn test_long_vector_elided() {
        let value = Value::Vector((1..=10).map(f64::from).collect());
        let preview = format_preview(&value);
        assert_eq!(preview, "[1.00, 2.00, 3.00, ..., 10.00]");
        assert!(!preview.contains("4.00"));
    }

    #[test]
    fn test_matrix_rows_on_lines() {
        let value = Value::Matrix(vec![vec![1.0, 3.0], vec![2.0, 4.0]]);
        assert_eq!(format_preview(&value), "[1.00, 3.00]\n[2.00, 4.00]");
    }

    #[test]
    fn test_matrix_long_rows_elided() {
        let value = Value::filled(1, 8, 1.0);
        assert_eq!(format_preview(&value), "[1.00, 1.00, 1.00, ..., 1.00]");
    }

    #[test]
    fn test_matrix_many_rows_elided() {
        let rows = (0..9).map(|i| vec![f64::from(i)]).collect();
        let preview = format_preview(&Value::Matrix(rows));
        assert_eq!(preview, "[0.00]\n[1.00]\n[2.00]\n...\n[8.00]");
    }

    #[test]
    fn test_empty_matrix_reads_as_flat() {
        assert_eq!(format_preview(&Value::Matrix(vec![])), "[]");
    }

    #[test]
    fn test_table_scalar_and_vector() {
        assert_eq!(
            TableData::of(&Value::Scalar(2.5)),
            TableData::Scalar { value: 2.5 }
        );

        let short = TableData::of(&Value::Vector(vec![1.0, 2.0]));
        assert_eq!(
            short,
            TableData::Vector {
                data: vec![1.0, 2.0],
                has_more: false
            }
        );

        let long = Value::Vector((0..150).map(f64::from).collect());
        let TableData::Vector { data, has_more } = TableData::of(&long) else {
            panic!("expected a vector table");
        };
        assert_eq!(data.len(), TABLE_MAX_ITEMS);
        assert_eq!(data[99], 99.0);
        assert!(has_more);
    }

    #[test]
    fn test_table_matrix_truncated() {
        let TableData::Matrix {
            data,
            shape,
            has_more,
        } = TableData::of(&Value::filled(60, 30, 1.0))
        else {
            panic!("expected a matrix table");
        };
        assert_eq!(data.len(), TABLE_MAX_ROWS);
        assert!(data.iter().all(|row| row.len() == TABLE_MAX_COLS));
        assert_eq!(shape.as_slice(), &[60, 30]);
        assert!(has_more);

        let small = TableData::of(&Value::filled(2, 3, 0.0));
        assert!(matches!(small, TableData::Matrix { has_more: false, .. }));
        assert!(matches!(
            TableData::of(&Value::Matrix(vec![])),
            TableData::Vector { has_more: false, .. }
        ));
    }

    #[test]
    fn test_table_json() {
        let table = TableData::of(&Value::Matrix(vec![vec![1.0, 2.0]]));
        assert_eq!(
            serde_json::to_value(&table).unwrap(),
            serde_json::json!({
                "type": "matrix",
                "data": [[1.0, 2.0]],
                "shape": [1, 2],
                "hasMore": false
            })
        );
        assert_eq!(
            serde_json::to_value(TableData::of(&Value::Scalar(3.0))).unwrap(),
            serde_json::json!({"type": "scalar", "value": 3.0})
        );
    }
}
