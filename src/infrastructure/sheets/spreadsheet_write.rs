use google_sheets4::api::ValueRange;
use tracing::instrument;

use crate::domain::sheets::{
    a1_notation::ToA1Notation, cell_position::CellPosition, cell_range::CellRange,
};

use super::spreadsheet_manager::{SpreadsheetManager, SpreadsheetManagerError};
use super::value_range_factory::ValueRangeFactory;

pub trait SpreadsheetWrite {
    /// Writes a grid of rows with A1 as the top-left corner.
    async fn write_rows_at_origin(
        &self,
        sheet_title: &str,
        rows: &[Vec<String>],
    ) -> error_stack::Result<(), SpreadsheetManagerError>;

    async fn clear_sheet(&self, sheet_title: &str)
        -> error_stack::Result<(), SpreadsheetManagerError>;

    /// Clear-then-write: blanks the whole tab first so rows from a previous,
    /// larger result set cannot survive a rerun.
    async fn replace_rows(
        &self,
        sheet_title: &str,
        rows: &[Vec<String>],
    ) -> error_stack::Result<(), SpreadsheetManagerError>;
}

impl SpreadsheetWrite for SpreadsheetManager {
    #[instrument(skip(self, rows))]
    async fn write_rows_at_origin(
        &self,
        sheet_title: &str,
        rows: &[Vec<String>],
    ) -> error_stack::Result<(), SpreadsheetManagerError> {
        if rows.is_empty() {
            return Ok(());
        }

        let column_count = rows.iter().map(Vec::len).max().unwrap_or(1) as u32;
        let range = CellRange::spanning(CellPosition::origin(), rows.len() as u32, column_count);
        let value_range = ValueRange::from_rows(rows);

        self.write_range(
            range.to_a1_notation(Some(sheet_title)).as_ref(),
            value_range,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn clear_sheet(
        &self,
        sheet_title: &str,
    ) -> error_stack::Result<(), SpreadsheetManagerError> {
        self.clear_range(&format!("'{}'", sheet_title)).await
    }

    #[instrument(skip(self, rows))]
    async fn replace_rows(
        &self,
        sheet_title: &str,
        rows: &[Vec<String>],
    ) -> error_stack::Result<(), SpreadsheetManagerError> {
        self.clear_sheet(sheet_title).await?;
        self.write_rows_at_origin(sheet_title, rows).await
    }
}
