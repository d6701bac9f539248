fn default_output_dir() -> String {
    "outputs".to_owned()
}

/// Where the local CSV mirror of the Outputs tab is written.
#[derive(serde::Deserialize, Debug, Clone)]
pub struct ReportConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            output_dir: default_output_dir(),
        }
    }
}
