//! Slide descriptors and the view-list builder
//!
//! The view list is a pure function of the cache snapshot: it is rebuilt
//! whenever the cache changes and handed to the sequencer as a whole.

use std::sync::Arc;
use std::time::Duration;

use crate::constants::{fallback, slides};
use crate::sheets::cache::CacheSnapshot;
use crate::sheets::models::{Category, GeneralData, PivotTableData};

/// One timed, full-screen state of the rotation.
#[derive(Debug, Clone, PartialEq)]
pub enum SlideDescriptor {
    Intro,
    Flash,
    Scoreboard,
    Table {
        category: Category,
        data: Arc<PivotTableData>,
        /// 1-based position among the table slides
        page_index: usize,
    },
}

impl SlideDescriptor {
    /// How long the slide stays on screen.
    pub fn duration(&self) -> Duration {
        let millis = match self {
            SlideDescriptor::Intro => slides::INTRO_MS,
            SlideDescriptor::Flash => slides::FLASH_MS,
            SlideDescriptor::Scoreboard => slides::SCOREBOARD_MS,
            SlideDescriptor::Table { .. } => slides::TABLE_MS,
        };
        Duration::from_millis(millis)
    }

    pub fn label(&self) -> String {
        match self {
            SlideDescriptor::Intro => "intro".to_string(),
            SlideDescriptor::Flash => "flash".to_string(),
            SlideDescriptor::Scoreboard => "scoreboard".to_string(),
            SlideDescriptor::Table {
                category,
                page_index,
                ..
            } => format!("table({}, {})", category.dataset(), page_index),
        }
    }
}

/// Flash text to show: the server's, or `fallback_text` when the sheet has none.
pub fn resolve_flash_text(general: Option<&GeneralData>, fallback_text: &str) -> String {
    match general {
        Some(general) if !general.flash_news.is_empty() => general.flash_news.clone(),
        _ => fallback_text.to_string(),
    }
}

/// Ticker items to scroll: the server's scroll news, or the fixed defaults.
pub fn resolve_ticker_items(general: Option<&GeneralData>) -> Vec<String> {
    match general {
        Some(general) if !general.scroll_news.is_empty() => general.scroll_news.clone(),
        _ => fallback::TICKER_NEWS.iter().map(|s| s.to_string()).collect(),
    }
}

/// Builds the ordered slide list for `snapshot`.
///
/// Intro and Scoreboard are always present. Flash is present only when the
/// resolved flash text is non-blank. Categories that have not loaded yet are
/// left out, and the remaining tables are numbered from 1.
pub fn build_view_list(snapshot: &CacheSnapshot, flash_fallback: &str) -> Vec<SlideDescriptor> {
    let mut views = vec![SlideDescriptor::Intro];

    let flash_text = resolve_flash_text(snapshot.general.as_deref(), flash_fallback);
    if !flash_text.trim().is_empty() {
        views.push(SlideDescriptor::Flash);
    }

    views.push(SlideDescriptor::Scoreboard);

    views.extend(
        snapshot
            .categories
            .iter()
            .enumerate()
            .map(|(index, loaded)| SlideDescriptor::Table {
                category: loaded.category,
                data: Arc::clone(&loaded.table),
                page_index: index + 1,
            }),
    );

    views
}
