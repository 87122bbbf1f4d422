//! Timed rotation through the view list.
//!
//! The sequencer owns no timers of its own. Callers pass the current instant
//! to [`SlideSequencer::set_views`] and [`SlideSequencer::tick`], and sleep
//! until [`SlideSequencer::next_deadline`]. Only one advance deadline and
//! one flash-refresh deadline exist at a time, and both are replaced
//! whenever the active slide or the view list changes.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info};

use super::slides::SlideDescriptor;
use crate::constants::slides::FLASH_REFRESH_LEAD_MS;

/// Something the caller has to act on after a [`SlideSequencer::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerEvent {
    /// The flash slide is about to end: refetch the general sheet.
    RefreshGeneral,
    /// The active slide moved to `index`.
    Advanced { index: usize },
}

#[derive(Debug, Default)]
pub struct SlideSequencer {
    views: Vec<SlideDescriptor>,
    index: usize,
    advance_at: Option<Instant>,
    refresh_at: Option<Instant>,
}

impl SlideSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the view list.
    ///
    /// An unchanged list keeps the running timers. A changed list restarts
    /// the active slide's timer, and an active index that no longer fits
    /// goes back to 0. Returns whether anything changed.
    pub fn set_views(&mut self, views: Vec<SlideDescriptor>, now: Instant) -> bool {
        if views == self.views && self.advance_at.is_some() {
            return false;
        }

        if self.index >= views.len() {
            if self.index > 0 {
                debug!(
                    "Active slide {} is past the new list of {}, restarting rotation",
                    self.index,
                    views.len()
                );
            }
            self.index = 0;
        }
        self.views = views;
        self.schedule(now);
        true
    }

    /// Fires every deadline that has passed at `now`.
    pub fn tick(&mut self, now: Instant) -> Vec<SequencerEvent> {
        let mut events = Vec::new();

        if self.refresh_at.is_some_and(|at| at <= now) {
            self.refresh_at = None;
            events.push(SequencerEvent::RefreshGeneral);
        }

        if self.advance_at.is_some_and(|at| at <= now) && !self.views.is_empty() {
            self.index = (self.index + 1) % self.views.len();
            self.schedule(now);
            if let Some(active) = self.active() {
                info!("Slide {}/{}: {}", self.index + 1, self.views.len(), active.label());
            }
            events.push(SequencerEvent::Advanced { index: self.index });
        }

        events
    }

    /// Earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.advance_at, self.refresh_at) {
            (Some(advance), Some(refresh)) => Some(advance.min(refresh)),
            (advance, refresh) => advance.or(refresh),
        }
    }

    pub fn active(&self) -> Option<&SlideDescriptor> {
        self.views.get(self.index)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn views(&self) -> &[SlideDescriptor] {
        &self.views
    }

    /// Number of table slides in the current list
    pub fn table_count(&self) -> usize {
        self.views
            .iter()
            .filter(|slide| matches!(slide, SlideDescriptor::Table { .. }))
            .count()
    }

    fn schedule(&mut self, now: Instant) {
        let Some(active) = self.views.get(self.index) else {
            self.advance_at = None;
            self.refresh_at = None;
            return;
        };

        let duration = active.duration();
        let advance_at = now + duration;
        self.advance_at = Some(advance_at);
        self.refresh_at = match active {
            SlideDescriptor::Flash => {
                let lead = Duration::from_millis(FLASH_REFRESH_LEAD_MS).min(duration);
                Some(advance_at - lead)
            }
            _ => None,
        };
    }
}
