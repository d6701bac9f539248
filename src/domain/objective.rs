use std::collections::HashSet;

use error_stack::{report, ResultExt};
use thiserror::Error;

use super::mapping::Substandard;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Record is missing the '{0}' column")]
    MissingColumn(&'static str),
    #[error("Invalid JSON in the '{0}' column")]
    InvalidJson(&'static str),
    #[error("Empty learning objective")]
    EmptyLearningObjective,
    #[error("Duplicate substandard id: {0}")]
    DuplicateSubstandardId(String),
    #[error("Record has no key phrases")]
    NoKeyPhrases,
}

/// One row of the input tab: a learning objective with its substandards and
/// the key phrases to be mapped onto them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectiveRecord {
    pub learning_objective: String,
    pub substandards: Vec<Substandard>,
    pub key_phrases: Vec<String>,
}

impl ObjectiveRecord {
    /// Parses one record from its raw cell contents. The substandards and key
    /// phrases cells hold JSON, as produced by the upstream sheet template.
    pub fn parse(
        learning_objective: &str,
        substandards_json: &str,
        key_phrases_json: &str,
    ) -> error_stack::Result<Self, RecordError> {
        let learning_objective = learning_objective.trim();
        if learning_objective.is_empty() {
            return Err(report!(RecordError::EmptyLearningObjective));
        }

        let substandards: Vec<Substandard> = serde_json::from_str(substandards_json)
            .change_context(RecordError::InvalidJson("Substandards"))
            .attach_printable_lazy(|| format!("cell contents: {substandards_json}"))?;

        let mut seen = HashSet::new();
        for substandard in &substandards {
            if !seen.insert(substandard.id.as_str()) {
                return Err(report!(RecordError::DuplicateSubstandardId(
                    substandard.id.clone()
                )));
            }
        }

        let key_phrases: Vec<String> = serde_json::from_str(key_phrases_json)
            .change_context(RecordError::InvalidJson("Key Phrases"))
            .attach_printable_lazy(|| format!("cell contents: {key_phrases_json}"))?;
        if key_phrases.is_empty() {
            return Err(report!(RecordError::NoKeyPhrases));
        }

        Ok(ObjectiveRecord {
            learning_objective: learning_objective.to_owned(),
            substandards,
            key_phrases,
        })
    }
}
