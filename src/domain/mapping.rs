use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A granular standard under a learning objective. Ids are unique within a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substandard {
    pub id: String,
    pub description: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MappingError {
    #[error("Model mapped phrases to an unknown substandard id: {0}")]
    UnknownSubstandardId(String),
}

/// Assignment of key phrases to substandards, at most one substandard per
/// phrase occurrence. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MappingResult {
    assignments: BTreeMap<String, Vec<String>>,
}

impl MappingResult {
    /// Builds a mapping from raw model assignments, checking that every key is
    /// one of the given substandards. Substandards absent from `assignments`
    /// end up with an empty phrase list. Phrases that do not occur in the
    /// input are dropped and returned so the caller can log them.
    pub fn from_assignments(
        assignments: BTreeMap<String, Vec<String>>,
        substandards: &[Substandard],
        key_phrases: &[String],
    ) -> Result<(Self, Vec<String>), MappingError> {
        if let Some(unknown) = assignments
            .keys()
            .find(|id| !substandards.iter().any(|s| &s.id == *id))
        {
            return Err(MappingError::UnknownSubstandardId(unknown.clone()));
        }

        let mut remaining = phrase_counts(key_phrases.iter());
        let mut dropped = Vec::new();
        let mut result: BTreeMap<String, Vec<String>> = substandards
            .iter()
            .map(|s| (s.id.clone(), Vec::new()))
            .collect();

        for (id, phrases) in assignments {
            let kept = result.get_mut(&id).expect("id checked above");
            for phrase in phrases {
                match remaining.get_mut(phrase.as_str()) {
                    Some(count) if *count > 0 => {
                        *count -= 1;
                        kept.push(phrase);
                    }
                    // Not in the input (or already used up more times than the
                    // input contains it): the model invented or over-assigned it.
                    _ => dropped.push(phrase),
                }
            }
        }

        Ok((MappingResult { assignments: result }, dropped))
    }

    pub fn phrases_for(&self, substandard_id: &str) -> Option<&[String]> {
        self.assignments.get(substandard_id).map(Vec::as_slice)
    }

    /// Every mapped phrase occurrence, across all substandards.
    pub fn mapped_occurrences(&self) -> impl Iterator<Item = &str> {
        self.assignments
            .values()
            .flat_map(|phrases| phrases.iter().map(String::as_str))
    }

    pub fn as_map(&self) -> &BTreeMap<String, Vec<String>> {
        &self.assignments
    }
}

/// The outcome of one mapping run for one objective record. Never mutated
/// after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub reasoning_text: String,
    pub mapping: MappingResult,
    pub total_key_phrases: usize,
    pub mapped_key_phrases: usize,
    pub all_mapped_unique: bool,
}

impl RunSummary {
    /// Computes the statistics over `mapping`, counting raw phrase
    /// occurrences: `total` is the input list length, `mapped` caps each
    /// phrase's mapped occurrences at its input occurrences, and uniqueness
    /// holds iff no phrase text occurs twice across all mapped lists.
    pub fn new(reasoning_text: String, mapping: MappingResult, key_phrases: &[String]) -> Self {
        let input_counts = phrase_counts(key_phrases.iter());
        let mapped_counts = phrase_counts(mapping.mapped_occurrences());

        let mapped_key_phrases = mapped_counts
            .iter()
            .map(|(phrase, count)| (*count).min(input_counts.get(phrase).copied().unwrap_or(0)))
            .sum();
        let all_mapped_unique = mapped_counts.values().all(|count| *count <= 1);

        RunSummary {
            reasoning_text,
            mapping,
            total_key_phrases: key_phrases.len(),
            mapped_key_phrases,
            all_mapped_unique,
        }
    }
}

fn phrase_counts<I, S>(phrases: I) -> HashMap<String, usize>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts = HashMap::new();
    for phrase in phrases {
        *counts.entry(phrase.as_ref().to_owned()).or_insert(0) += 1;
    }
    counts
}
