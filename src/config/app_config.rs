use config::Config;
use error_stack::{report, ResultExt};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to read configuration sources")]
    ReadFailed,
    #[error("Configuration did not match the expected shape")]
    InvalidShape,
    #[error("Missing or empty configuration field: {0}")]
    MissingField(&'static str),
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub anthropic: super::anthropic_config::AnthropicConfig,
    pub sheets: super::sheets_config::SpreadsheetConfig,
    #[serde(default)]
    pub report: super::report_config::ReportConfig,
}

impl AppConfig {
    /// Loads and validates the configuration from `Config.toml` merged with
    /// `KPM_`-prefixed environment variables (e.g. `KPM_ANTHROPIC__API_KEY`).
    pub fn load() -> error_stack::Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(config::File::with_name("Config").required(false))
            .add_source(config::Environment::with_prefix("KPM").separator("__"))
            .build()
            .change_context(ConfigError::ReadFailed)?;

        let app_config: AppConfig = config
            .try_deserialize()
            .change_context(ConfigError::InvalidShape)?;
        app_config.validate()?;
        Ok(app_config)
    }

    fn validate(&self) -> error_stack::Result<(), ConfigError> {
        if self.anthropic.api_key.trim().is_empty() {
            return Err(report!(ConfigError::MissingField("anthropic.api_key")));
        }
        if self.sheets.priv_key.trim().is_empty() {
            return Err(report!(ConfigError::MissingField("sheets.priv_key")));
        }
        if self.sheets.spreadsheet_id.trim().is_empty() {
            return Err(report!(ConfigError::MissingField("sheets.spreadsheet_id")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        anthropic_config::AnthropicConfig, report_config::ReportConfig,
        sheets_config::SpreadsheetConfig,
    };

    fn valid_config() -> AppConfig {
        AppConfig {
            anthropic: AnthropicConfig {
                api_key: "sk-test".to_owned(),
                model: "claude-3-5-sonnet-20241022".to_owned(),
                temperature: 0.0,
                max_tokens: 8000,
            },
            sheets: SpreadsheetConfig {
                priv_key: "credentials.json".into(),
                spreadsheet_id: "spreadsheet-id".into(),
                input_sheet_title: "Inputs".to_owned(),
                output_sheet_title: "Outputs".to_owned(),
            },
            report: ReportConfig::default(),
        }
    }

    #[test]
    fn test_valid_config_passes_validation() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_empty_api_key_is_rejected() {
        let mut config = valid_config();
        config.anthropic.api_key = "  ".to_owned();
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.current_context(),
            &ConfigError::MissingField("anthropic.api_key")
        );
    }

    #[test]
    fn test_empty_priv_key_is_rejected() {
        let mut config = valid_config();
        config.sheets.priv_key = "".into();
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.current_context(),
            &ConfigError::MissingField("sheets.priv_key")
        );
    }

    #[test]
    fn test_empty_spreadsheet_id_is_rejected() {
        let mut config = valid_config();
        config.sheets.spreadsheet_id = "".into();
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.current_context(),
            &ConfigError::MissingField("sheets.spreadsheet_id")
        );
    }
}
