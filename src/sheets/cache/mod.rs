//! Dataset cache shared by the refresh scheduler (single writer) and the
//! slideshow / display (readers).

pub mod types;

pub use types::{DatasetView, EntryState};

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{RwLock, watch};
use tracing::{info, warn};

use crate::error::AppError;
use crate::sheets::models::{Category, Dataset, GeneralData, Madrasa, PivotTableData};

/// Formatted result of one dataset fetch
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetValue {
    Table(PivotTableData),
    General(GeneralData),
}

#[derive(Debug, Default)]
struct CacheState {
    categories: HashMap<Category, EntryState<PivotTableData>>,
    scoreboard: EntryState<PivotTableData>,
    general: EntryState<GeneralData>,
}

impl CacheState {
    fn table_entry_mut(&mut self, dataset: Dataset) -> Option<&mut EntryState<PivotTableData>> {
        match dataset {
            Dataset::Category(category) => Some(self.categories.entry(category).or_default()),
            Dataset::Scoreboard => Some(&mut self.scoreboard),
            Dataset::General => None,
        }
    }

    fn label(&self, dataset: Dataset) -> &'static str {
        match dataset {
            Dataset::Category(category) => self
                .categories
                .get(&category)
                .map(EntryState::label)
                .unwrap_or("idle"),
            Dataset::Scoreboard => self.scoreboard.label(),
            Dataset::General => self.general.label(),
        }
    }
}

/// One loaded category table, in slideshow order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTable {
    pub category: Category,
    pub table: Arc<PivotTableData>,
}

/// Latest usable values of every dataset at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheSnapshot {
    pub categories: Vec<CategoryTable>,
    pub scoreboard: Option<Arc<PivotTableData>>,
    pub general: Option<Arc<GeneralData>>,
    /// Datasets currently showing an error (with or without stale data)
    #[serde(skip)]
    pub failing: Vec<Dataset>,
    /// Datasets fetching for the first time
    #[serde(skip)]
    pub loading: Vec<Dataset>,
}

impl CacheSnapshot {
    pub fn madrasas(&self) -> Vec<Madrasa> {
        self.scoreboard
            .as_deref()
            .map(Madrasa::from_scoreboard)
            .unwrap_or_default()
    }
}

/// Holds every dataset's [`EntryState`]. Entries are replaced whole under
/// the write lock, so readers never observe a partial update.
#[derive(Debug)]
pub struct SheetCache {
    state: RwLock<CacheState>,
    version: watch::Sender<u64>,
}

impl Default for SheetCache {
    fn default() -> Self {
        Self::new()
    }
}

impl SheetCache {
    pub fn new() -> Self {
        let (version, _) = watch::channel(0);
        Self {
            state: RwLock::new(CacheState::default()),
            version,
        }
    }

    /// Receiver that changes whenever any entry changes state.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.version.subscribe()
    }

    fn bump(&self) {
        self.version.send_modify(|v| *v = v.wrapping_add(1));
    }

    pub async fn begin_fetch(&self, dataset: Dataset) {
        {
            let mut state = self.state.write().await;
            match dataset {
                Dataset::General => state.general.begin_fetch(),
                _ => {
                    if let Some(entry) = state.table_entry_mut(dataset) {
                        entry.begin_fetch();
                    }
                }
            }
        }
        self.bump();
    }

    /// Applies the outcome of a fetch for `dataset`.
    pub async fn complete_fetch(&self, dataset: Dataset, outcome: Result<DatasetValue, AppError>) {
        let label = {
            let mut state = self.state.write().await;
            match (dataset, outcome) {
                (Dataset::General, Ok(DatasetValue::General(general))) => {
                    state.general.succeed(general);
                }
                (Dataset::General, Err(error)) => state.general.fail(error),
                (Dataset::Category(_) | Dataset::Scoreboard, Ok(DatasetValue::Table(table))) => {
                    if let Some(entry) = state.table_entry_mut(dataset) {
                        entry.succeed(table);
                    }
                }
                (Dataset::Category(_) | Dataset::Scoreboard, Err(error)) => {
                    if let Some(entry) = state.table_entry_mut(dataset) {
                        entry.fail(error);
                    }
                }
                (_, Ok(_)) => {
                    warn!("Ignoring value of the wrong shape for dataset {}", dataset);
                    return;
                }
            }
            state.label(dataset)
        };

        match label {
            "ready" => info!("Dataset {} refreshed", dataset),
            "stale" => warn!("Dataset {} refresh failed, keeping last good data", dataset),
            _ => warn!("Dataset {} has no data ({})", dataset, label),
        }
        self.bump();
    }

    pub async fn state_label(&self, dataset: Dataset) -> &'static str {
        self.state.read().await.label(dataset)
    }

    pub async fn category(&self, category: Category) -> DatasetView<PivotTableData> {
        let state = self.state.read().await;
        match state.categories.get(&category) {
            Some(entry) => DatasetView::from_state(entry),
            None => DatasetView::from_state(&EntryState::Idle),
        }
    }

    pub async fn scoreboard(&self) -> DatasetView<PivotTableData> {
        DatasetView::from_state(&self.state.read().await.scoreboard)
    }

    /// Scoreboard as leaderboard entries.
    pub async fn madrasas(&self) -> DatasetView<Vec<Madrasa>> {
        self.scoreboard().await.map(Madrasa::from_scoreboard)
    }

    pub async fn general(&self) -> DatasetView<GeneralData> {
        DatasetView::from_state(&self.state.read().await.general)
    }

    pub async fn snapshot(&self) -> CacheSnapshot {
        let state = self.state.read().await;

        let categories = Category::ALL
            .into_iter()
            .filter_map(|category| {
                state
                    .categories
                    .get(&category)
                    .and_then(EntryState::value)
                    .map(|table| CategoryTable {
                        category,
                        table: Arc::clone(table),
                    })
            })
            .collect();

        let failing = Dataset::ALL
            .into_iter()
            .filter(|&dataset| matches!(state.label(dataset), "error" | "stale"))
            .collect();
        let loading = Dataset::ALL
            .into_iter()
            .filter(|&dataset| state.label(dataset) == "loading")
            .collect();

        CacheSnapshot {
            categories,
            scoreboard: state.scoreboard.value().cloned(),
            general: state.general.value().cloned(),
            failing,
            loading,
        }
    }
}
