//! Published sheet endpoints, one URL per dataset

use serde::{Deserialize, Serialize};

use crate::constants::endpoints;
use crate::sheets::models::{Category, Dataset};

/// CSV export URL of every dataset.
///
/// Serialized as the `[endpoints]` table of the config file; any key left
/// out falls back to the published festival workbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct SheetEndpoints {
    pub kids: String,
    pub children: String,
    pub sub_juniors: String,
    pub juniors: String,
    pub seniors: String,
    pub scoreboard: String,
    pub general: String,
}

impl Default for SheetEndpoints {
    fn default() -> Self {
        Self {
            kids: endpoints::KIDS.to_string(),
            children: endpoints::CHILDREN.to_string(),
            sub_juniors: endpoints::SUB_JUNIORS.to_string(),
            juniors: endpoints::JUNIORS.to_string(),
            seniors: endpoints::SENIORS.to_string(),
            scoreboard: endpoints::SCOREBOARD.to_string(),
            general: endpoints::GENERAL.to_string(),
        }
    }
}

impl SheetEndpoints {
    /// Points every dataset at `{base}/{key}.csv`. Used to aim the display
    /// at a local mirror or a mock server.
    pub fn with_base(base: &str) -> Self {
        let url = |dataset: Dataset| format!("{}/{}.csv", base.trim_end_matches('/'), dataset.key());
        Self {
            kids: url(Dataset::Category(Category::Kids)),
            children: url(Dataset::Category(Category::Children)),
            sub_juniors: url(Dataset::Category(Category::SubJuniors)),
            juniors: url(Dataset::Category(Category::Juniors)),
            seniors: url(Dataset::Category(Category::Seniors)),
            scoreboard: url(Dataset::Scoreboard),
            general: url(Dataset::General),
        }
    }

    /// URL bound to `dataset`
    pub fn url(&self, dataset: Dataset) -> &str {
        match dataset {
            Dataset::Category(Category::Kids) => &self.kids,
            Dataset::Category(Category::Children) => &self.children,
            Dataset::Category(Category::SubJuniors) => &self.sub_juniors,
            Dataset::Category(Category::Juniors) => &self.juniors,
            Dataset::Category(Category::Seniors) => &self.seniors,
            Dataset::Scoreboard => &self.scoreboard,
            Dataset::General => &self.general,
        }
    }

    /// `(dataset, url)` pairs in dataset order
    pub fn iter(&self) -> impl Iterator<Item = (Dataset, &str)> {
        Dataset::ALL.into_iter().map(move |dataset| (dataset, self.url(dataset)))
    }
}
