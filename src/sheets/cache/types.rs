//! Per-dataset cache entry state machine

use std::sync::Arc;

use chrono::{DateTime, Local};
use tracing::debug;

use crate::error::AppError;

/// Lifecycle of one dataset in the cache.
///
/// Once a value has loaded it is never dropped: a failed refetch moves the
/// entry to `Stale`, keeping the last good value next to the error.
#[derive(Debug)]
pub enum EntryState<T> {
    Idle,
    Loading,
    Ready {
        value: Arc<T>,
        fetched_at: DateTime<Local>,
    },
    Error {
        error: Arc<AppError>,
    },
    Stale {
        value: Arc<T>,
        fetched_at: DateTime<Local>,
        error: Arc<AppError>,
    },
}

impl<T> Clone for EntryState<T> {
    fn clone(&self) -> Self {
        match self {
            EntryState::Idle => EntryState::Idle,
            EntryState::Loading => EntryState::Loading,
            EntryState::Ready { value, fetched_at } => EntryState::Ready {
                value: Arc::clone(value),
                fetched_at: *fetched_at,
            },
            EntryState::Error { error } => EntryState::Error {
                error: Arc::clone(error),
            },
            EntryState::Stale {
                value,
                fetched_at,
                error,
            } => EntryState::Stale {
                value: Arc::clone(value),
                fetched_at: *fetched_at,
                error: Arc::clone(error),
            },
        }
    }
}

impl<T> Default for EntryState<T> {
    fn default() -> Self {
        EntryState::Idle
    }
}

impl<T> EntryState<T> {
    /// Marks a fetch as started. Only entries without a value show as loading.
    pub fn begin_fetch(&mut self) {
        if matches!(self, EntryState::Idle | EntryState::Error { .. }) {
            *self = EntryState::Loading;
        }
    }

    /// A successful fetch replaces whatever was there.
    pub fn succeed(&mut self, value: T) {
        *self = EntryState::Ready {
            value: Arc::new(value),
            fetched_at: Local::now(),
        };
    }

    /// A failed fetch keeps the last good value, if any.
    pub fn fail(&mut self, error: AppError) {
        let error = Arc::new(error);
        let next = match std::mem::take(self) {
            EntryState::Ready { value, fetched_at }
            | EntryState::Stale {
                value, fetched_at, ..
            } => {
                debug!("Keeping value fetched at {} after failed refresh", fetched_at);
                EntryState::Stale {
                    value,
                    fetched_at,
                    error,
                }
            }
            EntryState::Idle | EntryState::Loading | EntryState::Error { .. } => {
                EntryState::Error { error }
            }
        };
        *self = next;
    }

    /// Latest usable value (fresh or stale)
    pub fn value(&self) -> Option<&Arc<T>> {
        match self {
            EntryState::Ready { value, .. } | EntryState::Stale { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn fetched_at(&self) -> Option<DateTime<Local>> {
        match self {
            EntryState::Ready { fetched_at, .. } | EntryState::Stale { fetched_at, .. } => {
                Some(*fetched_at)
            }
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&Arc<AppError>> {
        match self {
            EntryState::Error { error } | EntryState::Stale { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, EntryState::Loading)
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, EntryState::Stale { .. })
    }

    /// Short label for logs and the footer
    pub fn label(&self) -> &'static str {
        match self {
            EntryState::Idle => "idle",
            EntryState::Loading => "loading",
            EntryState::Ready { .. } => "ready",
            EntryState::Error { .. } => "error",
            EntryState::Stale { .. } => "stale",
        }
    }
}

/// Read-side view of one dataset for the UI layer.
#[derive(Debug)]
pub struct DatasetView<T> {
    pub value: Option<Arc<T>>,
    pub is_loading: bool,
    pub is_error: bool,
    pub is_stale: bool,
    pub error: Option<String>,
    pub fetched_at: Option<DateTime<Local>>,
}

impl<T> DatasetView<T> {
    pub fn from_state(state: &EntryState<T>) -> Self {
        Self {
            value: state.value().cloned(),
            is_loading: state.is_loading(),
            is_error: state.error().is_some(),
            is_stale: state.is_stale(),
            error: state.error().map(|e| e.to_string()),
            fetched_at: state.fetched_at(),
        }
    }

    /// Same flags, value mapped through `f`
    pub fn map<U>(self, f: impl FnOnce(&T) -> U) -> DatasetView<U> {
        DatasetView {
            value: self.value.map(|v| Arc::new(f(&v))),
            is_loading: self.is_loading,
            is_error: self.is_error,
            is_stale: self.is_stale,
            error: self.error,
            fetched_at: self.fetched_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http_error() -> AppError {
        AppError::http_status(500, "Internal Server Error", "https://example.com/kids.csv")
    }

    #[test]
    fn test_first_load_transitions() {
        let mut entry: EntryState<u32> = EntryState::Idle;
        entry.begin_fetch();
        assert!(entry.is_loading());
        entry.succeed(7);
        assert_eq!(entry.value().map(|v| **v), Some(7));
        assert_eq!(entry.label(), "ready");
    }

    #[test]
    fn test_failure_without_value_is_error() {
        let mut entry: EntryState<u32> = EntryState::Idle;
        entry.begin_fetch();
        entry.fail(http_error());
        assert_eq!(entry.label(), "error");
        assert!(entry.value().is_none());
        assert!(entry.error().is_some());
    }

    #[test]
    fn test_failure_after_ready_keeps_value() {
        let mut entry: EntryState<u32> = EntryState::Idle;
        entry.succeed(3);
        let fetched_at = entry.fetched_at();

        entry.begin_fetch();
        assert_eq!(entry.label(), "ready", "refetch must not hide loaded data");

        entry.fail(http_error());
        assert!(entry.is_stale());
        assert_eq!(entry.value().map(|v| **v), Some(3));
        assert_eq!(entry.fetched_at(), fetched_at);

        entry.fail(AppError::network_timeout("https://example.com/kids.csv"));
        assert!(entry.is_stale());
        assert_eq!(entry.value().map(|v| **v), Some(3));
        assert!(entry.error().unwrap().is_network_error());
    }

    #[test]
    fn test_success_after_stale_clears_error() {
        let mut entry: EntryState<u32> = EntryState::Idle;
        entry.succeed(1);
        entry.fail(http_error());
        entry.succeed(2);
        assert_eq!(entry.label(), "ready");
        assert!(entry.error().is_none());
        assert_eq!(entry.value().map(|v| **v), Some(2));
    }

    #[test]
    fn test_view_flags() {
        let mut entry: EntryState<u32> = EntryState::Idle;
        entry.succeed(5);
        entry.fail(http_error());
        let view = DatasetView::from_state(&entry);
        assert!(view.is_stale);
        assert!(view.is_error);
        assert!(!view.is_loading);
        assert!(view.error.unwrap().contains("500"));

        let mapped = DatasetView::from_state(&entry).map(|v| v * 2);
        assert_eq!(mapped.value.map(|v| *v), Some(10));
    }
}
