use osm_fetch::cli::Cli;
use osm_fetch::commands::{render, run};
use osm_fetch::error::OsmFetchError;
use osm_fetch::logger::{initialize as LoggerInitialize, level_for};

use common::ErrorLocation;
use osm_client::OsmClient;
use osm_client::config::default_config_dir;

use std::env::temp_dir;
use std::fs::create_dir_all;
use std::panic::Location;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

const APP_DIR_NAME: &str = "osm-fetch";

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is the normal case
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match execute(cli).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            match serde_json::to_string(&e) {
                Ok(json) => eprintln!("{json}"),
                Err(_) => eprintln!("{e}"),
            }
            ExitCode::from(e.exit_code())
        }
    }
}

async fn execute(cli: Cli) -> Result<String, OsmFetchError> {
    let log_dir = cli.log_dir.clone().unwrap_or_else(default_log_dir);

    create_dir_all(&log_dir).map_err(|e| OsmFetchError::OsmFetch {
        message: format!("Failed to create log directory {}: {e}", log_dir.display()),
        location: ErrorLocation::from(Location::caller()),
    })?;

    // Initialize logger FIRST
    LoggerInitialize(&log_dir, level_for(cli.verbose))?;

    info!("osm-fetch starting");
    info!("Log directory: {}", log_dir.display());

    let config_dir = cli
        .config_dir
        .clone()
        .or_else(default_config_dir)
        .ok_or_else(|| OsmFetchError::Config {
            message: String::from("No config directory available, pass --config-dir"),
            location: ErrorLocation::from(Location::caller()),
        })?;

    let client = OsmClient::from_config_dir(&config_dir)?;
    let value = run(&client, &cli.command).await?;

    render(&value, cli.pretty)
}

fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(temp_dir)
        .join(APP_DIR_NAME)
        .join("logs")
}
