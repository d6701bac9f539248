use crate::domain::objective::ObjectiveRecord;

const USER_PROMPT_TEMPLATE: &str = "\
You are mapping key phrases to the substandards of a learning objective.

The learning objective:
<learning_objective>
{LEARNING_OBJECTIVE}
</learning_objective>

You will be provided with two lists:

1. Substandards:
<substandards>
{SUBSTANDARDS}
</substandards>

2. Key Phrases:
<key_phrases>
{KEY_PHRASES}
</key_phrases>

Your task is to map each key phrase to the most relevant substandard, ensuring that all key phrases are used and each is mapped only once.

Follow these steps:

1. Carefully read and understand each substandard.
2. Examine each key phrase and determine which substandard it aligns with most closely.
3. Assign each key phrase to one substandard based on the highest relevance.
4. Ensure that each substandard receives at least one key phrase if possible.
5. If a substandard does not have any appropriate key phrases, pair it with an empty list.

Use the scratchpad to think through your mapping process before producing the assignment. Consider the following:
- How each key phrase relates to the substandards
- Any challenges in mapping certain phrases
- Your reasoning for assigning phrases to specific substandards

Remember:
- Each key phrase should be used only once.
- All key phrases MUST be mapped.
- Refer to each substandard by its id exactly as given.
- If a substandard has no relevant key phrases, it should have an empty list as its value.

Begin your mapping process now.";

pub fn render_user_prompt(record: &ObjectiveRecord) -> String {
    let substandards = record
        .substandards
        .iter()
        .map(|s| format!("{}: {}", s.id, s.description))
        .collect::<Vec<_>>()
        .join("\n");
    let key_phrases = record
        .key_phrases
        .iter()
        .map(|phrase| format!("- {phrase}"))
        .collect::<Vec<_>>()
        .join("\n");

    USER_PROMPT_TEMPLATE
        .replace("{LEARNING_OBJECTIVE}", &record.learning_objective)
        .replace("{SUBSTANDARDS}", &substandards)
        .replace("{KEY_PHRASES}", &key_phrases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::mapping::Substandard;

    fn record() -> ObjectiveRecord {
        ObjectiveRecord {
            learning_objective: "Identify theme".to_owned(),
            substandards: vec![
                Substandard {
                    id: "S1".to_owned(),
                    description: "Identify the central theme".to_owned(),
                },
                Substandard {
                    id: "S2".to_owned(),
                    description: "Cite supporting evidence".to_owned(),
                },
            ],
            key_phrases: vec!["phrase A".to_owned(), "phrase B".to_owned()],
        }
    }

    #[test]
    fn test_prompt_contains_all_inputs() {
        let prompt = render_user_prompt(&record());

        assert!(prompt.contains("Identify theme"));
        assert!(prompt.contains("S1: Identify the central theme"));
        assert!(prompt.contains("S2: Cite supporting evidence"));
        assert!(prompt.contains("- phrase A"));
        assert!(prompt.contains("- phrase B"));
    }

    #[test]
    fn test_prompt_sections_are_tagged() {
        let prompt = render_user_prompt(&record());

        assert!(prompt.contains("<learning_objective>"));
        assert!(prompt.contains("<substandards>"));
        assert!(prompt.contains("<key_phrases>"));
    }

    #[test]
    fn test_no_placeholders_left() {
        let prompt = render_user_prompt(&record());
        assert!(!prompt.contains('{'));
        assert!(!prompt.contains('}'));
    }
}
