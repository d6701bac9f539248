fn default_model() -> String {
    "claude-3-5-sonnet-20241022".to_owned()
}

fn default_max_tokens() -> u32 {
    8000
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct AnthropicConfig {
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Deterministic by default; the mapping should not vary across reruns.
    #[serde(default)]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}
