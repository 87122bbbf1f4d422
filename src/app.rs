use crate::config::Config;
use crate::constants::FESTIVAL_TITLE;
use crate::error::AppError;
use crate::sheets::api::HttpSheetSource;
use crate::sheets::cache::SheetCache;
use crate::sheets::scheduler::RefreshScheduler;
use crate::slideshow::run_slideshow;
use crossterm::{
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
    },
};
use std::io::stdout;
use std::sync::Arc;

/// Run the big-screen slideshow.
///
/// - Starts background polling of every sheet
/// - Sets up terminal raw mode and alternate screen
/// - Runs the slideshow until the user quits
/// - Stops polling and cleans up terminal state
pub async fn run_interactive(config: &Config) -> Result<(), AppError> {
    let source = Arc::new(HttpSheetSource::with_timeout(
        config.endpoints.clone(),
        config.http_timeout_seconds,
    )?);
    let cache = Arc::new(SheetCache::new());
    let mut scheduler = RefreshScheduler::start(source, Arc::clone(&cache), config.refresh);

    enable_raw_mode()?;
    let mut out = stdout();

    execute!(out, SetTitle(FESTIVAL_TITLE))?;
    execute!(out, EnterAlternateScreen)?;

    let result = run_slideshow(cache, &scheduler, config.flash_news_fallback(), &mut out).await;

    scheduler.shutdown();

    // Clean up terminal
    execute!(out, crossterm::cursor::Show, LeaveAlternateScreen)?;
    disable_raw_mode()?;

    result
}
