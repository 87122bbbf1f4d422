//! Typed datasets produced from the published festival sheets

use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of a pivot table: a madrasa and its per-item scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotRow {
    pub category: String,
    pub values: Vec<f64>,
    pub total: f64,
}

/// A category table (or the degenerate totals-only scoreboard).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotTableData {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<PivotRow>,
}

/// Scoreboard entry as shown on the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Madrasa {
    pub id: String,
    pub name: String,
    pub score: f64,
}

impl Madrasa {
    /// Derives leaderboard entries from scoreboard rows.
    ///
    /// Ids follow row position (`m1`, `m2`, ...), so they are not stable
    /// across refetches when rows swap places.
    pub fn from_scoreboard(table: &PivotTableData) -> Vec<Madrasa> {
        table
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| Madrasa {
                id: format!("m{}", index + 1),
                name: row.category.to_uppercase(),
                score: row.total,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProgramStatus {
    Live,
    Upcoming,
    #[default]
    Completed,
}

impl ProgramStatus {
    /// Case-insensitive parse; anything unrecognised is `Completed`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "live" => ProgramStatus::Live,
            "upcoming" => ProgramStatus::Upcoming,
            _ => ProgramStatus::Completed,
        }
    }
}

impl fmt::Display for ProgramStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProgramStatus::Live => "Live",
            ProgramStatus::Upcoming => "Upcoming",
            ProgramStatus::Completed => "Completed",
        };
        f.write_str(label)
    }
}

/// Key-value metadata from the general sheet.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralData {
    pub flash_news: String,
    pub scroll_news: Vec<String>,
    pub program_status: ProgramStatus,
    pub ad_image_url: String,
}

/// Age categories, in the order their tables appear in the slideshow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Kids,
    Children,
    SubJuniors,
    Juniors,
    Seniors,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Kids,
        Category::Children,
        Category::SubJuniors,
        Category::Juniors,
        Category::Seniors,
    ];

    /// Title given to the formatted table
    pub fn title(self) -> &'static str {
        match self {
            Category::Kids => "Kids",
            Category::Children => "Children",
            Category::SubJuniors => "Sub Juniors",
            Category::Juniors => "Juniors",
            Category::Seniors => "Seniors",
        }
    }

    pub fn dataset(self) -> Dataset {
        Dataset::Category(self)
    }
}

/// Every logical dataset backed by its own published sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Category(Category),
    Scoreboard,
    General,
}

impl Dataset {
    pub const ALL: [Dataset; 7] = [
        Dataset::Category(Category::Kids),
        Dataset::Category(Category::Children),
        Dataset::Category(Category::SubJuniors),
        Dataset::Category(Category::Juniors),
        Dataset::Category(Category::Seniors),
        Dataset::Scoreboard,
        Dataset::General,
    ];

    /// Stable key used in logs and config
    pub fn key(self) -> &'static str {
        match self {
            Dataset::Category(Category::Kids) => "kids",
            Dataset::Category(Category::Children) => "children",
            Dataset::Category(Category::SubJuniors) => "subJuniors",
            Dataset::Category(Category::Juniors) => "juniors",
            Dataset::Category(Category::Seniors) => "seniors",
            Dataset::Scoreboard => "scoreboard",
            Dataset::General => "general",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
