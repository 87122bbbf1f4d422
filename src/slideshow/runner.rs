//! Big-screen event loop
//!
//! Ties the cache, the sequencer and the terminal together. The loop never
//! waits on a fetch: it renders whatever the cache holds and rebuilds the
//! view list whenever the cache reports a change.

use std::io::Stdout;
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal,
};
use tokio::time::{Instant, MissedTickBehavior, interval, sleep_until};
use tracing::{debug, info};

use super::sequencer::{SequencerEvent, SlideSequencer};
use super::slides::{SlideDescriptor, build_view_list, resolve_flash_text, resolve_ticker_items};
use crate::constants::slides::{INPUT_POLL_MS, TICKER_STEP_MS};
use crate::display::frame::{FrameContext, present, render_frame, render_ticker_line};
use crate::display::ticker::Ticker;
use crate::error::AppError;
use crate::sheets::cache::{CacheSnapshot, SheetCache};
use crate::sheets::models::Dataset;
use crate::sheets::scheduler::RefreshScheduler;

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    RefreshAll,
}

pub fn key_action(key: &KeyEvent) -> Option<KeyAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(KeyAction::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(KeyAction::Quit),
        KeyCode::Char('r') => Some(KeyAction::RefreshAll),
        _ => None,
    }
}

/// Slideshow state between frames.
pub struct Slideshow {
    cache: Arc<SheetCache>,
    flash_fallback: String,
    snapshot: CacheSnapshot,
    sequencer: SlideSequencer,
    ticker: Ticker,
}

impl Slideshow {
    pub fn new(cache: Arc<SheetCache>, flash_fallback: impl Into<String>) -> Self {
        Self {
            cache,
            flash_fallback: flash_fallback.into(),
            snapshot: CacheSnapshot::default(),
            sequencer: SlideSequencer::new(),
            ticker: Ticker::default(),
        }
    }

    /// Pulls the latest cache snapshot and rebuilds the view list from it.
    /// Returns whether the view list changed.
    pub async fn sync(&mut self, now: Instant) -> bool {
        self.snapshot = self.cache.snapshot().await;
        self.ticker
            .set_items(resolve_ticker_items(self.snapshot.general.as_deref()));

        let views = build_view_list(&self.snapshot, &self.flash_fallback);
        let changed = self.sequencer.set_views(views, now);
        if changed {
            debug!("View list now has {} slides", self.sequencer.views().len());
        }
        changed
    }

    pub fn tick(&mut self, now: Instant) -> Vec<SequencerEvent> {
        self.sequencer.tick(now)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.sequencer.next_deadline()
    }

    pub fn active(&self) -> Option<&SlideDescriptor> {
        self.sequencer.active()
    }

    pub fn step_ticker(&mut self) {
        self.ticker.step();
    }

    pub fn flash_text(&self) -> String {
        resolve_flash_text(self.snapshot.general.as_deref(), &self.flash_fallback)
    }

    /// Full screen for the active slide, if there is one.
    pub fn frame(&self, width: usize, height: usize) -> Option<String> {
        let slide = self.sequencer.active()?;
        let flash_text = self.flash_text();
        let ctx = FrameContext {
            snapshot: &self.snapshot,
            flash_text: &flash_text,
            position: self.sequencer.index(),
            slide_count: self.sequencer.views().len(),
            table_count: self.sequencer.table_count(),
            ticker: &self.ticker,
            now: Local::now(),
        };
        Some(render_frame(slide, &ctx, width, height))
    }

    pub fn ticker_line(&self, width: usize, height: usize) -> String {
        render_ticker_line(&self.ticker, width, height)
    }
}

fn screen_size() -> Result<(usize, usize), AppError> {
    let (width, height) = terminal::size()?;
    Ok((width as usize, height as usize))
}

#[derive(Debug, Default)]
struct PendingInput {
    quit: bool,
    redraw: bool,
}

/// Drains every queued terminal event without blocking.
fn poll_input(scheduler: &RefreshScheduler) -> Result<PendingInput, AppError> {
    let mut pending = PendingInput::default();
    while event::poll(Duration::ZERO)? {
        match event::read()? {
            Event::Key(key) => match key_action(&key) {
                Some(KeyAction::Quit) => {
                    info!("Quit requested");
                    pending.quit = true;
                }
                Some(KeyAction::RefreshAll) => {
                    info!("Manual refresh of every dataset");
                    for dataset in Dataset::ALL {
                        scheduler.request_refresh(dataset);
                    }
                }
                None => {}
            },
            Event::Resize(..) => pending.redraw = true,
            _ => {}
        }
    }
    Ok(pending)
}

/// Runs the slideshow on `stdout` until the user quits.
pub async fn run_slideshow(
    cache: Arc<SheetCache>,
    scheduler: &RefreshScheduler,
    flash_fallback: &str,
    stdout: &mut Stdout,
) -> Result<(), AppError> {
    let mut changes = cache.subscribe();
    let mut slideshow = Slideshow::new(Arc::clone(&cache), flash_fallback);
    slideshow.sync(Instant::now()).await;

    let mut marquee = interval(Duration::from_millis(TICKER_STEP_MS));
    marquee.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut input = interval(Duration::from_millis(INPUT_POLL_MS));
    input.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut needs_render = true;
    let mut ticker_moved = false;

    loop {
        let pending = poll_input(scheduler)?;
        if pending.quit {
            break;
        }
        needs_render |= pending.redraw;

        let (width, height) = screen_size()?;
        if needs_render {
            if let Some(frame) = slideshow.frame(width, height) {
                present(stdout, &frame)?;
            }
            needs_render = false;
            ticker_moved = false;
        } else if ticker_moved {
            present(stdout, &slideshow.ticker_line(width, height))?;
            ticker_moved = false;
        }

        let deadline = slideshow
            .next_deadline()
            .unwrap_or_else(|| Instant::now() + Duration::from_secs(1));

        tokio::select! {
            _ = sleep_until(deadline) => {
                for event in slideshow.tick(Instant::now()) {
                    match event {
                        SequencerEvent::RefreshGeneral => scheduler.request_refresh(Dataset::General),
                        SequencerEvent::Advanced { .. } => needs_render = true,
                    }
                }
            }
            changed = changes.changed() => {
                if changed.is_err() {
                    debug!("Cache closed, stopping slideshow");
                    break;
                }
                slideshow.sync(Instant::now()).await;
                needs_render = true;
            }
            _ = marquee.tick() => {
                slideshow.step_ticker();
                ticker_moved = true;
            }
            _ = input.tick() => {}
        }
    }

    Ok(())
}
