use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Determines if the application should run in non-interactive mode
/// Non-interactive mode is used when any of these conditions are met:
/// - --once flag is set (fetch once, print and exit)
/// - config operations are requested
pub fn is_noninteractive_mode(args: &Args) -> bool {
    args.once || args.json || args.list_config || args.write_config
}

/// Festival scoreboard display
///
/// Shows live festival results on a big screen: an intro, flash news, the
/// overall championship and one results table per age category, rotating
/// forever while the published sheets are polled in the background.
///
/// While the slideshow runs:
/// - Press 'r' to refresh every sheet immediately
/// - Press 'q' or Esc to quit
#[derive(Parser, Debug, Default)]
#[command(about, version, long_about = None)]
#[command(styles = get_styles())]
pub struct Args {
    /// Fetch every sheet once, print the results and exit.
    #[arg(short, long)]
    pub once: bool,

    /// With --once, print the results as JSON instead of text.
    #[arg(long, help_heading = "Display Options")]
    pub json: bool,

    /// Read configuration from this file instead of the default location.
    #[arg(long = "config", value_name = "PATH", help_heading = "Configuration")]
    pub config: Option<String>,

    /// List current configuration settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Write the effective configuration to the config file, creating it if needed.
    #[arg(long = "write-config", help_heading = "Configuration")]
    pub write_config: bool,

    /// Also log to stdout in --once mode.
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", help_heading = "Debug")]
    pub log_file: Option<String>,
}
