use tracing::instrument;

use super::spreadsheet_manager::{SpreadsheetManager, SpreadsheetManagerError};

pub trait SpreadsheetRead {
    /// Reads every populated row of a tab as plain strings.
    async fn read_rows(
        &self,
        sheet_title: &str,
    ) -> error_stack::Result<Vec<Vec<String>>, SpreadsheetManagerError>;
}

impl SpreadsheetRead for SpreadsheetManager {
    #[instrument(skip(self))]
    async fn read_rows(
        &self,
        sheet_title: &str,
    ) -> error_stack::Result<Vec<Vec<String>>, SpreadsheetManagerError> {
        let value_range = self.read_range(&format!("'{}'", sheet_title)).await?;

        Ok(value_range
            .values
            .unwrap_or_default()
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect())
    }
}

fn cell_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }
}
