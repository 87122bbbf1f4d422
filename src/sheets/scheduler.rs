//! Periodic refresh of every dataset on its own cadence, with one-shot
//! manual refresh requests.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

use super::api::SheetSource;
use super::cache::SheetCache;
use super::loader::refresh_dataset;
use super::models::Dataset;
use crate::constants::refresh;

/// Refresh cadence per dataset kind, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshIntervals {
    pub category_seconds: u64,
    pub scoreboard_seconds: u64,
    pub general_seconds: u64,
}

impl Default for RefreshIntervals {
    fn default() -> Self {
        Self {
            category_seconds: refresh::CATEGORY_SECONDS,
            scoreboard_seconds: refresh::SCOREBOARD_SECONDS,
            general_seconds: refresh::GENERAL_SECONDS,
        }
    }
}

impl RefreshIntervals {
    pub fn for_dataset(&self, dataset: Dataset) -> Duration {
        let seconds = match dataset {
            Dataset::Category(_) => self.category_seconds,
            Dataset::Scoreboard => self.scoreboard_seconds,
            Dataset::General => self.general_seconds,
        };
        Duration::from_secs(seconds.max(1))
    }
}

/// Owns one polling task per dataset.
///
/// Every task fetches immediately on start, then on its interval. A manual
/// request runs the dataset's refresh right away and restarts its interval.
/// Dropping the scheduler aborts all tasks.
pub struct RefreshScheduler {
    triggers: HashMap<Dataset, Arc<Notify>>,
    handles: Vec<JoinHandle<()>>,
}

impl RefreshScheduler {
    pub fn start<S: SheetSource>(
        source: Arc<S>,
        cache: Arc<SheetCache>,
        intervals: RefreshIntervals,
    ) -> Self {
        let mut triggers = HashMap::new();
        let mut handles = Vec::with_capacity(Dataset::ALL.len());

        for dataset in Dataset::ALL {
            let trigger = Arc::new(Notify::new());
            triggers.insert(dataset, Arc::clone(&trigger));

            let period = intervals.for_dataset(dataset);
            info!("Polling dataset {} every {:?}", dataset, period);

            handles.push(tokio::spawn(poll_dataset(
                Arc::clone(&source),
                Arc::clone(&cache),
                dataset,
                period,
                trigger,
            )));
        }

        Self { triggers, handles }
    }

    /// Requests an immediate one-shot refresh of `dataset`.
    pub fn request_refresh(&self, dataset: Dataset) {
        if let Some(trigger) = self.triggers.get(&dataset) {
            debug!("Manual refresh requested for dataset {}", dataset);
            trigger.notify_one();
        }
    }

    /// Stops every polling task.
    pub fn shutdown(&mut self) {
        for handle in self.handles.drain(..) {
            handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handles.iter().any(|handle| !handle.is_finished())
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn poll_dataset<S: SheetSource>(
    source: Arc<S>,
    cache: Arc<SheetCache>,
    dataset: Dataset,
    period: Duration,
    trigger: Arc<Notify>,
) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = trigger.notified() => {
                ticker.reset();
            }
        }
        refresh_dataset(source.as_ref(), cache.as_ref(), dataset).await;
    }
}
