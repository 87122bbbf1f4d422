use crate::cli::Args;
use crate::config::Config;
use crate::display::{write_json, write_plain};
use crate::error::AppError;
use crate::sheets::api::HttpSheetSource;
use crate::sheets::cache::SheetCache;
use crate::sheets::loader::refresh_all;
use crate::sheets::models::Dataset;
use std::io::{Write, stdout};

/// Validates command line argument combinations.
///
/// Returns an error if incompatible arguments are used together.
pub fn validate_args(args: &Args) -> Result<(), AppError> {
    if args.json && (args.list_config || args.write_config) {
        return Err(AppError::config_error(
            "--json only applies to --once output",
        ));
    }
    Ok(())
}

/// Path of the config file in use: `--config`, else the default location.
pub fn config_path(args: &Args) -> String {
    args.config.clone().unwrap_or_else(Config::get_config_path)
}

/// Handles the --list-config command.
pub fn handle_list_config_command(config: &Config, path: &str) {
    config.display(path);
}

/// Handles the --write-config command.
///
/// Writes the effective configuration, so a fresh install gets a file with
/// every setting spelled out.
pub async fn handle_write_config_command(config: &Config, path: &str) -> Result<(), AppError> {
    config.save_to_path(path).await?;
    println!("Configuration written to {path}");
    tracing::info!("Configuration written to {path}");
    Ok(())
}

/// Handles the --once command.
///
/// Fetches every sheet once and prints the results, as text or JSON.
/// Sheets that fail are listed; their slides fall back to defaults.
pub async fn handle_once_command(config: &Config, json: bool) -> Result<(), AppError> {
    let source = HttpSheetSource::with_timeout(config.endpoints.clone(), config.http_timeout_seconds)?;
    let cache = SheetCache::new();

    let loaded = refresh_all(&source, &cache).await;
    if loaded < Dataset::ALL.len() {
        tracing::warn!(
            "Only {loaded} of {} sheets could be loaded",
            Dataset::ALL.len()
        );
    }

    let snapshot = cache.snapshot().await;
    let mut out = stdout().lock();
    if json {
        write_json(&mut out, &snapshot, config.flash_news_fallback())?;
    } else {
        write_plain(&mut out, &snapshot, config.flash_news_fallback())?;
    }
    out.flush()?;
    Ok(())
}
