mod application;
mod config;
mod domain;
mod infrastructure;

use std::sync::Arc;

use application::mapper::mapping_routine::MappingRoutine;
use application::mapper::objective_repository::ObjectiveRepository;
use config::app_config::AppConfig;
use domain::routine::Routine;
use infrastructure::anthropic::client::AnthropicClient;
use infrastructure::report::csv_report::CsvReport;
use infrastructure::sheets::spreadsheet_manager::SpreadsheetManager;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Registry};

async fn run_routines(config: &AppConfig) -> bool {
    let spreadsheet_manager = match SpreadsheetManager::new(config.sheets.clone()).await {
        Ok(manager) => Arc::new(manager),
        Err(report) => {
            tracing::error!("Failed to set up the spreadsheet client: {:?}", report);
            return false;
        }
    };
    let anthropic = match AnthropicClient::new(config.anthropic.clone()) {
        Ok(client) => client,
        Err(report) => {
            tracing::error!("Failed to set up the Anthropic client: {:?}", report);
            return false;
        }
    };

    let routines_to_run: Vec<Box<dyn Routine>> = vec![Box::new(MappingRoutine::new(
        anthropic,
        ObjectiveRepository::new(Arc::clone(&spreadsheet_manager)),
        CsvReport::new(&config.report),
    ))];

    let mut all_ok = true;
    for routine in &routines_to_run {
        match routine.run().await {
            Ok(()) => {
                tracing::info!("✅ {}: OK", routine.name());
            }
            Err(report) => {
                all_ok = false;
                tracing::error!("❌ {}: {:?}", routine.name(), report);
            }
        }
    }
    all_ok
}

#[tokio::main]
async fn main() {
    let stdout_layer = tracing_subscriber::fmt::layer();
    let log_file_layer = tracing_subscriber::fmt::layer()
        .with_writer(
            std::fs::File::create("key_phrase_mapper.log").expect("Failed to create log file"),
        )
        .with_ansi(false);

    Registry::default()
        .with(
            tracing_subscriber::filter::Targets::new()
                .with_target("key_phrase_mapper", tracing::Level::TRACE),
        )
        .with(log_file_layer)
        .with(stdout_layer)
        .init();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(report) => {
            tracing::error!("Invalid configuration: {:?}", report);
            std::process::exit(1);
        }
    };

    if !run_routines(&config).await {
        std::process::exit(1);
    }
}
