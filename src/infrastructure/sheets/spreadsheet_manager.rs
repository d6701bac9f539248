use error_stack::{Context, Result, ResultExt};
use google_sheets4::{
    api::{ClearValuesRequest, ValueRange},
    Sheets,
};

use crate::config::sheets_config::SpreadsheetConfig;

use super::{auth, http_client};

pub struct SpreadsheetManager {
    pub config: SpreadsheetConfig,
    hub: Sheets<
        google_sheets4::hyper_rustls::HttpsConnector<google_sheets4::hyper::client::HttpConnector>,
    >,
}

#[derive(Debug)]
pub enum SpreadsheetManagerError {
    FailedToAuthenticate,
    FailedToFetchRange,
    FailedToWriteRange,
    FailedToClearRange,
}

impl std::fmt::Display for SpreadsheetManagerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Context for SpreadsheetManagerError {}

impl SpreadsheetManager {
    pub async fn new(config: SpreadsheetConfig) -> Result<Self, SpreadsheetManagerError> {
        let client = http_client::http_client();
        let auth = auth::auth(&config, client.clone()).await?;
        let hub = Sheets::new(client, auth);

        Ok(SpreadsheetManager { config, hub })
    }

    pub async fn read_range(&self, range: &str) -> Result<ValueRange, SpreadsheetManagerError> {
        let response = self
            .hub
            .spreadsheets()
            .values_get(&self.config.spreadsheet_id, range)
            .doit()
            .await
            .change_context(SpreadsheetManagerError::FailedToFetchRange)
            .attach_printable_lazy(|| format!("range: {range}"))?;

        let value_range = response.1;
        Ok(value_range)
    }

    pub async fn write_range(
        &self,
        range: &str,
        value_range: ValueRange,
    ) -> Result<(), SpreadsheetManagerError> {
        self.hub
            .spreadsheets()
            .values_update(value_range, &self.config.spreadsheet_id, range)
            .value_input_option("USER_ENTERED")
            .doit()
            .await
            .map(|_| ())
            .change_context(SpreadsheetManagerError::FailedToWriteRange)
            .attach_printable_lazy(|| format!("range: {range}"))
    }

    pub async fn clear_range(&self, range: &str) -> Result<(), SpreadsheetManagerError> {
        self.hub
            .spreadsheets()
            .values_clear(ClearValuesRequest::default(), &self.config.spreadsheet_id, range)
            .doit()
            .await
            .map(|_| ())
            .change_context(SpreadsheetManagerError::FailedToClearRange)
            .attach_printable_lazy(|| format!("range: {range}"))
    }
}
