use chrono::NaiveDate;

use crate::data::Table;
use crate::error::ChartError;
use crate::scale::parse_date;

/// Declared type for a column, supplied by the caller as a column-type map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Number,
    Date,
}

/// A typed cell value. Produced once by the coercion pass and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }
}

/// A table whose cells have been coerced to their declared types.
#[derive(Debug, Clone)]
pub struct Dataset {
    headers: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Dataset {
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn column_index(&self, name: &str) -> Result<usize, ChartError> {
        self.headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| ChartError::MissingColumn(name.to_string()))
    }
}

/// Coerce a text table into typed values per the caller-supplied
/// column-type map. Columns absent from the map stay text. Runs exactly
/// once per load; every schema column must exist and every cell must
/// coerce, otherwise the whole pass fails.
pub fn apply_schema(
    table: &Table,
    schema: &[(String, ColumnType)],
    date_format: &str,
) -> Result<Dataset, ChartError> {
    // Resolve the declared type of each physical column up front.
    let mut column_types = vec![ColumnType::Text; table.headers.len()];
    for (name, ty) in schema {
        let idx = table
            .headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| ChartError::MissingColumn(name.clone()))?;
        column_types[idx] = *ty;
    }

    let mut rows = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let mut typed = Vec::with_capacity(row.len());
        for (idx, cell) in row.iter().enumerate() {
            let value = match column_types.get(idx).copied().unwrap_or(ColumnType::Text) {
                ColumnType::Text => Value::Text(cell.clone()),
                ColumnType::Number => {
                    let n = cell.parse::<f64>().map_err(|_| ChartError::InvalidNumber {
                        column: table.headers[idx].clone(),
                        value: cell.clone(),
                    })?;
                    Value::Number(n)
                }
                ColumnType::Date => Value::Date(parse_date(cell, date_format)?),
            };
            typed.push(value);
        }
        rows.push(typed);
    }

    Ok(Dataset {
        headers: table.headers.clone(),
        rows,
    })
}

/// Text content of a cell that the schema left as a category column.
pub fn text_at<'a>(row: &'a [Value], idx: usize, column: &str) -> Result<&'a str, ChartError> {
    row[idx].as_text().ok_or_else(|| ChartError::TypeMismatch {
        column: column.to_string(),
        expected: "text",
    })
}

pub fn number_at(row: &[Value], idx: usize, column: &str) -> Result<f64, ChartError> {
    row[idx]
        .as_number()
        .ok_or_else(|| ChartError::TypeMismatch {
            column: column.to_string(),
            expected: "number",
        })
}

pub fn date_at(row: &[Value], idx: usize, column: &str) -> Result<NaiveDate, ChartError> {
    row[idx].as_date().ok_or_else(|| ChartError::TypeMismatch {
        column: column.to_string(),
        expected: "date",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::DATE_FORMAT;

    fn table() -> Table {
        Table::new(
            vec!["Platform".into(), "Likes".into(), "Date".into()],
            vec![
                vec!["TikTok".into(), "120".into(), "3/1/2024 (Friday)".into()],
                vec!["Twitter".into(), "45.5".into(), "3/2/2024 (Saturday)".into()],
            ],
        )
    }

    fn schema() -> Vec<(String, ColumnType)> {
        vec![
            ("Likes".to_string(), ColumnType::Number),
            ("Date".to_string(), ColumnType::Date),
        ]
    }

    #[test]
    fn test_apply_schema_coerces() {
        let data = apply_schema(&table(), &schema(), DATE_FORMAT).unwrap();

        assert_eq!(data.rows[0][0], Value::Text("TikTok".to_string()));
        assert_eq!(data.rows[0][1].as_number(), Some(120.0));
        assert_eq!(data.rows[1][1].as_number(), Some(45.5));
        assert_eq!(
            data.rows[0][2].as_date(),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
    }

    #[test]
    fn test_apply_schema_case_insensitive_lookup() {
        let data = apply_schema(
            &table(),
            &[("likes".to_string(), ColumnType::Number)],
            DATE_FORMAT,
        )
        .unwrap();
        assert_eq!(data.column_index("LIKES").unwrap(), 1);
        assert_eq!(data.rows[0][1].as_number(), Some(120.0));
    }

    #[test]
    fn test_apply_schema_missing_column() {
        let err = apply_schema(
            &table(),
            &[("Shares".to_string(), ColumnType::Number)],
            DATE_FORMAT,
        )
        .unwrap_err();
        assert_eq!(err, ChartError::MissingColumn("Shares".to_string()));
    }

    #[test]
    fn test_apply_schema_bad_number() {
        let mut t = table();
        t.rows[0][1] = "lots".to_string();
        let err = apply_schema(&t, &schema(), DATE_FORMAT).unwrap_err();
        assert!(matches!(err, ChartError::InvalidNumber { .. }));
    }

    #[test]
    fn test_apply_schema_bad_date() {
        let mut t = table();
        t.rows[1][2] = "13/40/2024 (Friday)".to_string();
        let err = apply_schema(&t, &schema(), DATE_FORMAT).unwrap_err();
        assert!(matches!(err, ChartError::DateParse { .. }));
    }

    #[test]
    fn test_accessor_type_mismatch() {
        let data = apply_schema(&table(), &schema(), DATE_FORMAT).unwrap();
        assert!(number_at(&data.rows[0], 0, "Platform").is_err());
        assert!(text_at(&data.rows[0], 1, "Likes").is_err());
    }
}
