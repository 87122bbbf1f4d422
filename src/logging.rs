use crate::cli::Args;
use crate::config::Config;
use crate::constants::APP_NAME;
use crate::error::AppError;
use std::io::stdout;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn default_log_file_name() -> String {
    format!("{APP_NAME}.log")
}

/// Splits the chosen log location into `(directory, file name)`.
///
/// The `--log-file` flag wins over the config file; without either the
/// log goes to the default log directory.
pub fn resolve_log_location(cli_path: Option<&str>, config_path: Option<&str>) -> (String, String) {
    match cli_path.or(config_path) {
        Some(custom_path) => {
            let path = Path::new(custom_path);
            let parent = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .map(str::to_string)
                .unwrap_or_else(default_log_file_name);
            (parent.to_string_lossy().to_string(), file_name)
        }
        None => (Config::get_log_dir_path(), default_log_file_name()),
    }
}

fn env_filter() -> Result<EnvFilter, AppError> {
    let directive = format!("{APP_NAME}=info")
        .parse::<Directive>()
        .map_err(|e| AppError::log_setup_error(format!("Invalid log directive: {e}")))?;
    Ok(EnvFilter::from_default_env().add_directive(directive))
}

/// Sets up logging configuration for the application.
///
/// Configures logging based on the provided arguments and config:
/// - Slideshow: logs only to file (the terminal belongs to the display)
/// - Once mode without debug: logs only to file
/// - Other non-interactive modes: logs to both stdout and file
/// - Creates log directory if it doesn't exist
/// - Uses daily rolling file appender
///
/// Returns the path to the log file and the guard that must be kept alive
/// for the duration of the program to ensure proper log flushing.
pub async fn setup_logging(args: &Args, config: &Config) -> Result<(String, WorkerGuard), AppError> {
    let (log_dir, log_file_name) =
        resolve_log_location(args.log_file.as_deref(), config.log_file_path.as_deref());

    if !Path::new(&log_dir).exists() {
        tokio::fs::create_dir_all(&log_dir).await.map_err(|e| {
            AppError::log_setup_error(format!("Failed to create log directory: {e}"))
        })?;
    }

    // New log file each day
    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, &log_file_name);

    // The guard must outlive the program's logging
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let registry = tracing_subscriber::registry();
    let log_to_stdout =
        crate::cli::is_noninteractive_mode(args) && !((args.once || args.json) && !args.debug);

    if log_to_stdout {
        registry
            .with(
                fmt::Layer::new()
                    .with_writer(stdout)
                    .with_ansi(true)
                    .with_filter(env_filter()?),
            )
            .with(
                fmt::Layer::new()
                    .with_writer(non_blocking)
                    .with_ansi(false)
                    .with_filter(env_filter()?),
            )
            .try_init()
            .map_err(|e| AppError::log_setup_error(e.to_string()))?;
    } else {
        registry
            .with(
                fmt::Layer::new()
                    .with_writer(non_blocking)
                    .with_ansi(false)
                    .with_filter(env_filter()?),
            )
            .try_init()
            .map_err(|e| AppError::log_setup_error(e.to_string()))?;
    }

    let log_file_path = format!("{log_dir}/{log_file_name}");
    Ok((log_file_path, guard))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_log_path_wins() {
        let (dir, file) = resolve_log_location(Some("/var/log/stage.log"), Some("/tmp/other.log"));
        assert_eq!(dir, "/var/log");
        assert_eq!(file, "stage.log");
    }

    #[test]
    fn test_config_log_path_used_without_cli() {
        let (dir, file) = resolve_log_location(None, Some("/tmp/festival/display.log"));
        assert_eq!(dir, "/tmp/festival");
        assert_eq!(file, "display.log");
    }

    #[test]
    fn test_bare_file_name_logs_to_current_dir() {
        let (dir, file) = resolve_log_location(Some("display.log"), None);
        assert_eq!(dir, ".");
        assert_eq!(file, "display.log");
    }

    #[test]
    fn test_default_location() {
        let (dir, file) = resolve_log_location(None, None);
        assert_eq!(dir, Config::get_log_dir_path());
        assert_eq!(file, "festival_display.log");
    }
}
