use anyhow::{anyhow, Result};
use serde_json::Value;

/// Untyped tabular input: a header row plus text rows in source order.
#[derive(Debug, Clone)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Create a Table from a JSON array of objects.
    pub fn from_json(value: &Value) -> Result<Self> {
        let array = value
            .as_array()
            .ok_or_else(|| anyhow!("Input data must be a JSON array of objects"))?;

        if array.is_empty() {
            return Err(anyhow!("Input data array is empty"));
        }

        // Extract headers from the first object
        let first_obj = array[0]
            .as_object()
            .ok_or_else(|| anyhow!("Items in array must be objects"))?;

        let headers: Vec<String> = first_obj.keys().cloned().collect();

        let mut rows = Vec::new();
        for item in array {
            let obj = item
                .as_object()
                .ok_or_else(|| anyhow!("Items in array must be objects"))?;

            let mut row = Vec::new();
            for header in &headers {
                let val_str = match obj.get(header) {
                    Some(Value::String(s)) => s.clone(),
                    Some(Value::Number(n)) => n.to_string(),
                    Some(Value::Bool(b)) => b.to_string(),
                    Some(Value::Null) | None => "".to_string(),
                    _ => return Err(anyhow!("Unsupported value type for field '{}'", header)),
                };
                row.push(val_str);
            }
            rows.push(row);
        }

        Ok(Self { headers, rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_objects() {
        let value = json!([
            {"Platform": "TikTok", "Likes": 120},
            {"Platform": "Twitter", "Likes": 45},
        ]);
        let table = Table::from_json(&value).unwrap();

        assert_eq!(table.rows.len(), 2);
        assert!(table.headers.contains(&"Platform".to_string()));
        let likes_idx = table.headers.iter().position(|h| h == "Likes").unwrap();
        assert_eq!(table.rows[0][likes_idx], "120");
    }

    #[test]
    fn test_from_json_rejects_empty() {
        assert!(Table::from_json(&json!([])).is_err());
        assert!(Table::from_json(&json!({"not": "an array"})).is_err());
    }
}
