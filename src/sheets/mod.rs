//! Spreadsheet ingestion: fetching the published CSV exports, turning them
//! into typed tables and keeping the latest values cached.

pub mod api;
pub mod cache;
pub mod csv;
pub mod formatter;
pub mod loader;
pub mod models;
pub mod scheduler;

pub use api::{HttpSheetSource, SheetEndpoints, SheetSource};
pub use cache::{CacheSnapshot, CategoryTable, DatasetValue, DatasetView, EntryState, SheetCache};
pub use formatter::{format_pivot_table_data, format_scoreboard_data, parse_general_data};
pub use loader::{load_dataset, refresh_all, refresh_dataset};
pub use models::{Category, Dataset, GeneralData, Madrasa, PivotRow, PivotTableData, ProgramStatus};
pub use scheduler::{RefreshIntervals, RefreshScheduler};
