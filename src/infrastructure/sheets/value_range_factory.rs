use google_sheets4::api::ValueRange;
use serde_json::Value;

pub trait ValueRangeFactory {
    fn from_rows(rows: &[Vec<String>]) -> Self;
}

impl ValueRangeFactory for ValueRange {
    fn from_rows(rows: &[Vec<String>]) -> Self {
        let values = rows
            .iter()
            .map(|row| row.iter().map(|cell| Value::String(cell.clone())).collect())
            .collect();

        Self {
            major_dimension: Some("ROWS".to_string()),
            range: None,
            values: Some(values),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_shape() {
        let rows = vec![
            vec!["a".to_owned(), "b".to_owned()],
            vec!["c".to_owned(), "d".to_owned()],
        ];
        let value_range = ValueRange::from_rows(&rows);

        assert_eq!(value_range.major_dimension.as_deref(), Some("ROWS"));
        let values = value_range.values.unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values[0], vec![Value::String("a".into()), Value::String("b".into())]);
        assert_eq!(values[1], vec![Value::String("c".into()), Value::String("d".into())]);
    }

    #[test]
    fn test_from_rows_empty() {
        let value_range = ValueRange::from_rows(&[]);
        assert_eq!(value_range.values, Some(vec![]));
    }
}
