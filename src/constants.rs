//! Application-wide constants and configuration values
//!
//! This module centralizes the published sheet endpoints, timing values and
//! display fallbacks so that the rest of the codebase never hardcodes them.

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of idle connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 8;

/// Name used for the config directory, log files and log filter directive
pub const APP_NAME: &str = "festival_display";

/// Festival title shown in the header bar and on the intro slide
pub const FESTIVAL_TITLE: &str = "SARGAMELA 2025";

/// Published CSV exports of the festival workbook, one sheet per dataset
pub mod endpoints {
    macro_rules! sheet_url {
        ($gid:literal) => {
            concat!(
                "https://docs.google.com/spreadsheets/d/e/2PACX-1vTXKJR8zkkpDIZB-nCATMaN0ZMcXTGlkrSiC4_9lcCvYXD6h25tl2fiuIVFGNLz9bPO9ofueJRmIR7f/pub",
                "?gid=",
                $gid,
                "&single=true&output=csv"
            )
        };
    }

    pub const KIDS: &str = sheet_url!("973603992");
    pub const CHILDREN: &str = sheet_url!("474251060");
    pub const SUB_JUNIORS: &str = sheet_url!("1188574781");
    pub const JUNIORS: &str = sheet_url!("367448292");
    pub const SENIORS: &str = sheet_url!("1196536182");
    pub const SCOREBOARD: &str = sheet_url!("503046127");
    pub const GENERAL: &str = sheet_url!("1502590770");
}

/// Refresh cadences in seconds
pub mod refresh {
    /// Category pivot tables
    pub const CATEGORY_SECONDS: u64 = 30;

    /// Overall scoreboard
    pub const SCOREBOARD_SECONDS: u64 = 30;

    /// General metadata (flash news, scroll news)
    pub const GENERAL_SECONDS: u64 = 60;
}

/// Slide durations in milliseconds
pub mod slides {
    pub const INTRO_MS: u64 = 5_000;
    pub const FLASH_MS: u64 = 6_000;
    pub const SCOREBOARD_MS: u64 = 10_000;
    pub const TABLE_MS: u64 = 20_000;

    /// How long before the flash slide ends the general sheet is refetched
    pub const FLASH_REFRESH_LEAD_MS: u64 = 500;

    /// Marquee step for the bottom ticker
    pub const TICKER_STEP_MS: u64 = 250;

    /// Keyboard polling interval while the slideshow is idle
    pub const INPUT_POLL_MS: u64 = 100;
}

/// Display fallbacks used until (or whenever) the general sheet has nothing to say
pub mod fallback {
    pub const FLASH_NEWS: &str =
        "ATTENTION: Painting competition venue changed to Main Auditorium due to lighting issues.";

    pub const TICKER_NEWS: [&str; 5] = [
        "Senior category Elocution results published.",
        "Junior Watercolor competition starts at 2:00 PM at Hall B.",
        "Chaliyam maintains the lead in the overall championship.",
        "Sub-junior Quran recitation moved to Stage 3.",
        "Lunch break from 1:00 PM to 2:00 PM.",
    ];
}

/// Environment variable names
pub mod env_vars {
    /// Environment variable for log file path override
    pub const LOG_FILE: &str = "FESTIVAL_LOG_FILE";

    /// Environment variable for HTTP timeout override in seconds
    pub const HTTP_TIMEOUT: &str = "FESTIVAL_HTTP_TIMEOUT";
}
