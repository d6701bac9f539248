use std::time::Duration;

use error_stack::{report, ResultExt};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::instrument;

use crate::config::anthropic_config::AnthropicConfig;

use super::schema::{mapping_tool, MappingToolOutput, Tool, MAPPING_TOOL_NAME};

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum AnthropicError {
    #[error("Failed to build the HTTP client")]
    ClientBuild,
    #[error("Messages API request failed")]
    RequestFailed,
    #[error("Invalid API key")]
    Unauthorized,
    #[error("Rate limit or quota exceeded")]
    RateLimited,
    #[error("Messages API returned status {0}")]
    UnexpectedStatus(u16),
    #[error("Failed to parse the Messages API response body")]
    MalformedResponse,
    #[error("No mapping tool_use block in the model response")]
    MissingToolUse,
    #[error("Tool input did not match the mapping schema")]
    MalformedToolInput,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<Message<'a>>,
    tools: Vec<Tool>,
    tool_choice: Value,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    ToolUse { name: String, input: Value },
    // Text, thinking and any future block kinds carry nothing we consume.
    #[serde(other)]
    Other,
}

pub struct AnthropicClient {
    client: Client,
    config: AnthropicConfig,
}

impl AnthropicClient {
    pub fn new(config: AnthropicConfig) -> error_stack::Result<Self, AnthropicError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .change_context(AnthropicError::ClientBuild)?;

        Ok(AnthropicClient { client, config })
    }

    /// Issues exactly one Messages API request with a forced tool choice and
    /// returns the structured tool input. No retry: a failed or malformed
    /// response is terminal for the caller.
    #[instrument(skip(self, user_message))]
    pub async fn request_mapping(
        &self,
        user_message: &str,
    ) -> error_stack::Result<MappingToolOutput, AnthropicError> {
        let request = MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            messages: vec![Message {
                role: "user",
                content: user_message,
            }],
            tools: vec![mapping_tool()],
            tool_choice: json!({ "type": "tool", "name": MAPPING_TOOL_NAME }),
        };

        let response = self
            .client
            .post(MESSAGES_URL)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .change_context(AnthropicError::RequestFailed)?;

        match response.status() {
            StatusCode::OK => {
                let body: MessagesResponse = response
                    .json()
                    .await
                    .change_context(AnthropicError::MalformedResponse)?;
                extract_tool_output(body)
            }
            StatusCode::UNAUTHORIZED => Err(report!(AnthropicError::Unauthorized)),
            StatusCode::TOO_MANY_REQUESTS => Err(report!(AnthropicError::RateLimited)),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(report!(AnthropicError::UnexpectedStatus(status.as_u16())))
                    .attach_printable(body)
            }
        }
    }
}

fn extract_tool_output(
    response: MessagesResponse,
) -> error_stack::Result<MappingToolOutput, AnthropicError> {
    let input = response
        .content
        .into_iter()
        .find_map(|block| match block {
            ContentBlock::ToolUse { name, input } if name == MAPPING_TOOL_NAME => Some(input),
            _ => None,
        })
        .ok_or_else(|| report!(AnthropicError::MissingToolUse))?;

    serde_json::from_value(input).change_context(AnthropicError::MalformedToolInput)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_from(body: Value) -> MessagesResponse {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_extract_tool_output() {
        let response = response_from(json!({
            "content": [
                { "type": "text", "text": "Mapping the phrases now." },
                {
                    "type": "tool_use",
                    "id": "toolu_01",
                    "name": "getSubstandardKeyPhrases",
                    "input": {
                        "scratchpad": "phrase A fits S1 best",
                        "substandards": { "S1": ["phrase A"] }
                    }
                }
            ]
        }));

        let output = extract_tool_output(response).unwrap();
        assert_eq!(output.scratchpad, "phrase A fits S1 best");
        assert_eq!(output.substandards["S1"], vec!["phrase A"]);
    }

    #[test]
    fn test_missing_tool_use_is_an_error() {
        let response = response_from(json!({
            "content": [{ "type": "text", "text": "I refuse to call tools." }]
        }));

        let err = extract_tool_output(response).unwrap_err();
        assert!(matches!(
            err.current_context(),
            AnthropicError::MissingToolUse
        ));
    }

    #[test]
    fn test_wrong_tool_name_is_ignored() {
        let response = response_from(json!({
            "content": [{
                "type": "tool_use",
                "id": "toolu_02",
                "name": "someOtherTool",
                "input": {}
            }]
        }));

        let err = extract_tool_output(response).unwrap_err();
        assert!(matches!(
            err.current_context(),
            AnthropicError::MissingToolUse
        ));
    }

    #[test]
    fn test_malformed_tool_input_is_an_error() {
        let response = response_from(json!({
            "content": [{
                "type": "tool_use",
                "id": "toolu_03",
                "name": "getSubstandardKeyPhrases",
                "input": { "substandards": "not an object" }
            }]
        }));

        let err = extract_tool_output(response).unwrap_err();
        assert!(matches!(
            err.current_context(),
            AnthropicError::MalformedToolInput
        ));
    }

    #[test]
    fn test_unknown_content_blocks_are_tolerated() {
        let response = response_from(json!({
            "content": [
                { "type": "thinking", "thinking": "..." },
                {
                    "type": "tool_use",
                    "id": "toolu_04",
                    "name": "getSubstandardKeyPhrases",
                    "input": { "scratchpad": "", "substandards": {} }
                }
            ]
        }));

        assert!(extract_tool_output(response).is_ok());
    }
}
