//! Fetch → format → cache pipeline for a single dataset

use futures::future::join_all;
use tracing::{debug, instrument};

use super::api::SheetSource;
use super::cache::{DatasetValue, SheetCache};
use super::formatter::{format_pivot_table_data, format_scoreboard_data, parse_general_data};
use super::models::Dataset;
use crate::error::AppError;

/// Title given to the formatted scoreboard table
pub const SCOREBOARD_TITLE: &str = "Scoreboard";

/// Fetches `dataset` and formats it into its typed value.
pub async fn load_dataset<S: SheetSource>(
    source: &S,
    dataset: Dataset,
) -> Result<DatasetValue, AppError> {
    let csv_text = source.fetch_csv(dataset).await?;
    debug!("Formatting {} bytes for dataset {}", csv_text.len(), dataset);

    Ok(match dataset {
        Dataset::Category(category) => {
            DatasetValue::Table(format_pivot_table_data(&csv_text, category.title()))
        }
        Dataset::Scoreboard => DatasetValue::Table(format_scoreboard_data(&csv_text, SCOREBOARD_TITLE)),
        Dataset::General => DatasetValue::General(parse_general_data(&csv_text)),
    })
}

/// Runs one refresh of `dataset` into `cache`. Returns whether it succeeded.
#[instrument(skip(source, cache))]
pub async fn refresh_dataset<S: SheetSource>(source: &S, cache: &SheetCache, dataset: Dataset) -> bool {
    cache.begin_fetch(dataset).await;
    let outcome = load_dataset(source, dataset).await;
    let succeeded = outcome.is_ok();
    cache.complete_fetch(dataset, outcome).await;
    succeeded
}

/// Refreshes every dataset concurrently; returns how many succeeded.
pub async fn refresh_all<S: SheetSource>(source: &S, cache: &SheetCache) -> usize {
    let results = join_all(
        Dataset::ALL
            .into_iter()
            .map(|dataset| refresh_dataset(source, cache, dataset)),
    )
    .await;
    results.into_iter().filter(|ok| *ok).count()
}
