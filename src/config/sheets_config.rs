fn default_input_sheet_title() -> String {
    "Inputs".to_owned()
}

fn default_output_sheet_title() -> String {
    "Outputs".to_owned()
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct SpreadsheetConfig {
    /// Path to the service account credentials JSON file.
    pub priv_key: Box<str>,
    pub spreadsheet_id: Box<str>,
    #[serde(default = "default_input_sheet_title")]
    pub input_sheet_title: String,
    #[serde(default = "default_output_sheet_title")]
    pub output_sheet_title: String,
}
