use std::sync::Arc;

use error_stack::{report, ResultExt};
use thiserror::Error;
use tracing::instrument;

use crate::domain::mapping::RunSummary;
use crate::domain::objective::ObjectiveRecord;
use crate::infrastructure::sheets::spreadsheet_manager::SpreadsheetManager;
use crate::infrastructure::sheets::spreadsheet_read::SpreadsheetRead;
use crate::infrastructure::sheets::spreadsheet_write::SpreadsheetWrite;

pub const COL_LEARNING_OBJECTIVE: &str = "Learning Objective";
pub const COL_SUBSTANDARDS: &str = "Substandards";
pub const COL_KEY_PHRASES: &str = "Key Phrases";

/// Fixed column layout of the Outputs tab (and of the local CSV mirror). The
/// downstream "Format Mappings" macro reads exactly this layout.
pub const OUTPUT_HEADERS: [&str; 8] = [
    "Learning Objective",
    "Substandards",
    "Key Phrases",
    "Thinking",
    "Substandards to Key Phrases Mapping",
    "Number of Key Phrases",
    "Total Key Phrases Mapped",
    "All Key Phrases Mapped Unique?",
];

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Input sheet has no header row")]
    MissingHeaderRow,
    #[error("Input sheet is missing the '{0}' header")]
    MissingHeader(&'static str),
    #[error("Failed to read the input sheet")]
    ReadFailed,
    #[error("Failed to write the output sheet")]
    WriteFailed,
}

pub struct ObjectiveRepository {
    spreadsheet_manager: Arc<SpreadsheetManager>,
}

impl ObjectiveRepository {
    pub fn new(spreadsheet_manager: Arc<SpreadsheetManager>) -> Self {
        ObjectiveRepository {
            spreadsheet_manager,
        }
    }

    /// Reads every record from the input tab. Rows that fail to parse are
    /// logged and skipped; a malformed sheet layout is an error.
    #[instrument(skip(self))]
    pub async fn load_records(&self) -> error_stack::Result<Vec<ObjectiveRecord>, RepositoryError> {
        let rows = self
            .spreadsheet_manager
            .read_rows(&self.spreadsheet_manager.config.input_sheet_title)
            .await
            .change_context(RepositoryError::ReadFailed)?;

        parse_records(rows)
    }

    /// Replaces the whole Outputs tab with the header row plus `rows`
    /// (clear-then-write, so nothing stale survives a rerun).
    #[instrument(skip(self, rows))]
    pub async fn replace_output_rows(
        &self,
        rows: &[Vec<String>],
    ) -> error_stack::Result<(), RepositoryError> {
        let mut all_rows = Vec::with_capacity(rows.len() + 1);
        all_rows.push(OUTPUT_HEADERS.iter().map(|h| (*h).to_owned()).collect());
        all_rows.extend_from_slice(rows);

        self.spreadsheet_manager
            .replace_rows(
                &self.spreadsheet_manager.config.output_sheet_title,
                &all_rows,
            )
            .await
            .change_context(RepositoryError::WriteFailed)
    }
}

fn parse_records(
    rows: Vec<Vec<String>>,
) -> error_stack::Result<Vec<ObjectiveRecord>, RepositoryError> {
    let mut iter = rows.into_iter();
    let header = iter
        .next()
        .ok_or_else(|| report!(RepositoryError::MissingHeaderRow))?;

    let objective_idx = column_index(&header, COL_LEARNING_OBJECTIVE)?;
    let substandards_idx = column_index(&header, COL_SUBSTANDARDS)?;
    let key_phrases_idx = column_index(&header, COL_KEY_PHRASES)?;

    let mut records = Vec::new();
    for (offset, row) in iter.enumerate() {
        let parsed = ObjectiveRecord::parse(
            cell(&row, objective_idx),
            cell(&row, substandards_idx),
            cell(&row, key_phrases_idx),
        );
        match parsed {
            Ok(record) => records.push(record),
            Err(parse_report) => {
                // Sheet rows are 1-indexed and row 1 is the header.
                tracing::warn!("Skipping input row {}: {:?}", offset + 2, parse_report);
            }
        }
    }
    Ok(records)
}

fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}

fn column_index(
    header: &[String],
    name: &'static str,
) -> error_stack::Result<usize, RepositoryError> {
    header
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| report!(RepositoryError::MissingHeader(name)))
}

/// Serializes one run summary into the fixed Outputs row layout.
pub fn output_row(record: &ObjectiveRecord, summary: &RunSummary) -> Vec<String> {
    vec![
        record.learning_objective.clone(),
        serde_json::to_string(&record.substandards).expect("substandards are plain data"),
        serde_json::to_string(&record.key_phrases).expect("key phrases are plain data"),
        summary.reasoning_text.clone(),
        serde_json::to_string(summary.mapping.as_map()).expect("mapping is plain data"),
        summary.total_key_phrases.to_string(),
        summary.mapped_key_phrases.to_string(),
        if summary.all_mapped_unique { "Yes" } else { "No" }.to_owned(),
    ]
}
