//! Festival scoreboard display library
//!
//! Turns the festival's published spreadsheet CSV exports into typed
//! results tables, keeps them fresh in a shared cache, and drives the timed
//! big-screen slide rotation built on top of them.
//!
//! # Examples
//!
//! ```rust,no_run
//! use festival_display::sheets::{HttpSheetSource, SheetCache, SheetEndpoints, refresh_all};
//! use festival_display::slideshow::build_view_list;
//! use festival_display::error::AppError;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let source = HttpSheetSource::with_timeout(SheetEndpoints::default(), 30)?;
//!     let cache = SheetCache::new();
//!     refresh_all(&source, &cache).await;
//!
//!     let snapshot = cache.snapshot().await;
//!     for slide in build_view_list(&snapshot, "Welcome!") {
//!         println!("{}", slide.label());
//!     }
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod display;
pub mod error;
pub mod logging;
pub mod sheets;
pub mod slideshow;

// Re-export commonly used types for convenience
pub use config::Config;
pub use error::AppError;
pub use sheets::{
    CacheSnapshot, Category, Dataset, DatasetView, GeneralData, Madrasa, PivotRow, PivotTableData,
    SheetCache,
};
pub use slideshow::{SlideDescriptor, SlideSequencer};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
