use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const MAPPING_TOOL_NAME: &str = "getSubstandardKeyPhrases";

#[derive(Debug, Clone, Serialize)]
pub struct Tool {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// The tool the model is forced to call. Its input carries the reasoning
/// scratchpad plus the substandard-to-key-phrase assignment.
pub fn mapping_tool() -> Tool {
    Tool {
        name: MAPPING_TOOL_NAME.to_owned(),
        description: "Map key phrases to substandards and return the mapping".to_owned(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "scratchpad": {
                    "type": "string",
                    "description": "An area to note initial thoughts and the mapping process for each substandard"
                },
                "substandards": {
                    "type": "object",
                    "description": "A mapping of each substandard id to its associated key phrases",
                    "additionalProperties": {
                        "type": "array",
                        "items": {
                            "type": "string",
                            "description": "A key phrase associated with the substandard"
                        },
                        "description": "An array of key phrases for the substandard"
                    }
                }
            },
            "required": ["scratchpad", "substandards"]
        }),
    }
}

/// Structured input of the forced tool call, as returned by the model.
#[derive(Debug, Clone, Deserialize)]
pub struct MappingToolOutput {
    pub scratchpad: String,
    pub substandards: BTreeMap<String, Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_tool_requires_both_fields() {
        let tool = mapping_tool();
        assert_eq!(tool.name, MAPPING_TOOL_NAME);
        assert_eq!(
            tool.input_schema["required"],
            json!(["scratchpad", "substandards"])
        );
    }

    #[test]
    fn test_tool_output_deserializes() {
        let output: MappingToolOutput = serde_json::from_value(json!({
            "scratchpad": "thinking...",
            "substandards": {
                "S1": ["phrase A"],
                "S2": []
            }
        }))
        .unwrap();

        assert_eq!(output.scratchpad, "thinking...");
        assert_eq!(output.substandards["S1"], vec!["phrase A"]);
        assert!(output.substandards["S2"].is_empty());
    }

    #[test]
    fn test_tool_output_rejects_wrong_shape() {
        let result = serde_json::from_value::<MappingToolOutput>(json!({
            "scratchpad": "thinking...",
            "substandards": ["not", "an", "object"]
        }));
        assert!(result.is_err());
    }
}
