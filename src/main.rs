// src/main.rs
mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod display;
mod error;
mod logging;
mod sheets;
mod slideshow;

use clap::Parser;
use cli::Args;
use config::Config;
use error::AppError;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    commands::validate_args(&args)?;

    let config_path = commands::config_path(&args);
    let config = Config::load(Some(config_path.as_str())).await?;

    // The guard must be kept alive for the duration of the program
    let (log_file_path, _guard) = logging::setup_logging(&args, &config).await?;
    tracing::info!("Logs are being written to: {log_file_path}");

    if args.list_config {
        commands::handle_list_config_command(&config, &config_path);
        return Ok(());
    }

    if args.write_config {
        return commands::handle_write_config_command(&config, &config_path).await;
    }

    if args.once || args.json {
        return commands::handle_once_command(&config, args.json).await;
    }

    app::run_interactive(&config).await
}
