use error_stack::ResultExt;
use tracing::instrument;

use crate::domain::mapping::{MappingResult, RunSummary};
use crate::domain::objective::ObjectiveRecord;
use crate::domain::routine::{Routine, RoutineError};
use crate::infrastructure::anthropic::client::AnthropicClient;
use crate::infrastructure::report::csv_report::CsvReport;

use super::objective_repository::{output_row, ObjectiveRepository, OUTPUT_HEADERS};
use super::prompt::render_user_prompt;

/// The Mapper Job: reads objective records from the input tab, asks the model
/// for one mapping per record, and persists the summaries to the Outputs tab
/// plus a local CSV report. Records are processed one at a time; any external
/// failure aborts the run before anything is written.
pub struct MappingRoutine {
    anthropic: AnthropicClient,
    repository: ObjectiveRepository,
    report: CsvReport,
}

impl MappingRoutine {
    pub fn new(
        anthropic: AnthropicClient,
        repository: ObjectiveRepository,
        report: CsvReport,
    ) -> Self {
        MappingRoutine {
            anthropic,
            repository,
            report,
        }
    }

    async fn map_record(
        &self,
        record: &ObjectiveRecord,
    ) -> error_stack::Result<RunSummary, RoutineError> {
        let user_prompt = render_user_prompt(record);
        let tool_output = self
            .anthropic
            .request_mapping(&user_prompt)
            .await
            .change_context(RoutineError::routine_failure(
                "Mapping request to the model failed",
            ))?;

        let (mapping, dropped) = MappingResult::from_assignments(
            tool_output.substandards,
            &record.substandards,
            &record.key_phrases,
        )
        .change_context(RoutineError::routine_failure(
            "Model response violated the mapping contract",
        ))?;
        if !dropped.is_empty() {
            tracing::warn!(
                "{}: dropped {} mapped phrases not present in the input: {:?}",
                self.name(),
                dropped.len(),
                dropped
            );
        }

        Ok(RunSummary::new(
            tool_output.scratchpad,
            mapping,
            &record.key_phrases,
        ))
    }
}

#[async_trait::async_trait]
impl Routine for MappingRoutine {
    fn name(&self) -> &str {
        "Key Phrase Mapping"
    }

    #[instrument(skip(self), name = "MappingRoutine::run")]
    async fn run(&self) -> error_stack::Result<(), RoutineError> {
        tracing::trace!("{}: 📋 Loading objective records from the input sheet", self.name());
        let records = self
            .repository
            .load_records()
            .await
            .change_context(RoutineError::routine_failure(
                "Failed to load objective records",
            ))?;

        if records.is_empty() {
            tracing::warn!("{}: no objective records to process", self.name());
            return Ok(());
        }

        let mut rows = Vec::with_capacity(records.len());
        for record in &records {
            tracing::info!(
                "{}: ☁️  Requesting mapping for '{}'",
                self.name(),
                record.learning_objective
            );
            let summary = self.map_record(record).await?;
            tracing::info!(
                "{}: 🧮 {}/{} key phrases mapped, unique: {}",
                self.name(),
                summary.mapped_key_phrases,
                summary.total_key_phrases,
                summary.all_mapped_unique
            );
            rows.push(output_row(record, &summary));
        }

        tracing::trace!(
            "{}: 📝 Writing {} summary rows to the output sheet",
            self.name(),
            rows.len()
        );
        self.repository
            .replace_output_rows(&rows)
            .await
            .change_context(RoutineError::routine_failure(
                "Failed to write summaries to the output sheet",
            ))?;

        let report_path = self
            .report
            .write(&OUTPUT_HEADERS, &rows)
            .change_context(RoutineError::routine_failure(
                "Failed to write the local CSV report",
            ))?;
        tracing::info!(
            "{}: ✅ Wrote {} summaries; local report at {}",
            self.name(),
            rows.len(),
            report_path.display()
        );

        Ok(())
    }
}
