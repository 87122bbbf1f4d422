use std::path::Path;

use crate::error::AppError;
use crate::sheets::api::SheetEndpoints;
use crate::sheets::scheduler::RefreshIntervals;

/// Validates one dataset endpoint URL.
fn validate_endpoint(dataset: &str, url: &str) -> Result<(), AppError> {
    if url.trim().is_empty() {
        return Err(AppError::config_error(format!(
            "Endpoint for '{dataset}' cannot be empty"
        )));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(AppError::config_error(format!(
            "Endpoint for '{dataset}' must start with http:// or https://"
        )));
    }
    Ok(())
}

/// Validates the configuration settings
///
/// # Validation Rules
/// - Every endpoint is a non-empty http(s) URL
/// - Every refresh interval and the HTTP timeout are greater than zero
/// - If log file path is provided, it cannot be empty
/// - Log file path parent directory must exist or be creatable
pub fn validate_config(
    endpoints: &SheetEndpoints,
    refresh: &RefreshIntervals,
    http_timeout_seconds: u64,
    log_file_path: &Option<String>,
) -> Result<(), AppError> {
    for (dataset, url) in endpoints.iter() {
        validate_endpoint(dataset.key(), url)?;
    }

    for (name, seconds) in [
        ("category_seconds", refresh.category_seconds),
        ("scoreboard_seconds", refresh.scoreboard_seconds),
        ("general_seconds", refresh.general_seconds),
    ] {
        if seconds == 0 {
            return Err(AppError::config_error(format!(
                "Refresh interval '{name}' must be greater than zero"
            )));
        }
    }

    if http_timeout_seconds == 0 {
        return Err(AppError::config_error("HTTP timeout must be greater than zero"));
    }

    if let Some(log_path) = log_file_path {
        if log_path.is_empty() {
            return Err(AppError::config_error("Log file path cannot be empty"));
        }

        if let Some(parent) = Path::new(log_path).parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::config_error(format!(
                    "Cannot create log directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}
