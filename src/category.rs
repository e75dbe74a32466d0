use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Marketplace sub-sections that can be scraped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Men's clothing
    VetementsHomme,
    /// Men's shoes
    ChaussuresHomme,
    /// Children's clothing
    VetementsEnfants,
    /// Children's shoes
    ChaussuresEnfants,
}

impl Category {
    /// Every category, in menu order
    pub const ALL: [Category; 4] = [
        Category::VetementsHomme,
        Category::ChaussuresHomme,
        Category::VetementsEnfants,
        Category::ChaussuresEnfants,
    ];

    /// Stable identifier used in file names and on the command line
    pub fn key(&self) -> &'static str {
        match self {
            Category::VetementsHomme => "vetements_homme",
            Category::ChaussuresHomme => "chaussures_homme",
            Category::VetementsEnfants => "vetements_enfants",
            Category::ChaussuresEnfants => "chaussures_enfants",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            Category::VetementsHomme => "Vêtements homme",
            Category::ChaussuresHomme => "Chaussures homme",
            Category::VetementsEnfants => "Vêtements enfants",
            Category::ChaussuresEnfants => "Chaussures enfants",
        }
    }

    /// Path of the listing section on the marketplace site
    pub fn path(&self) -> &'static str {
        match self {
            Category::VetementsHomme => "/categorie/vetements-homme",
            Category::ChaussuresHomme => "/categorie/chaussures-homme",
            Category::VetementsEnfants => "/categorie/vetements-enfants",
            Category::ChaussuresEnfants => "/categorie/chaussures-enfants",
        }
    }

    /// File name of the pre-scraped WebScraper export for this category.
    ///
    /// The shoe exports were saved with dashes, the clothing exports with
    /// underscores; the names are kept as they exist on disk.
    pub fn raw_file_name(&self) -> &'static str {
        match self {
            Category::VetementsHomme => "coinafrique_vetements_homme.csv",
            Category::ChaussuresHomme => "coinafrique_chaussures-homme.csv",
            Category::VetementsEnfants => "coinafrique_vetements_enfants.csv",
            Category::ChaussuresEnfants => "coinafrique_chaussures-enfants.csv",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Error returned when a string names no known category
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Category::ALL
            .into_iter()
            .find(|c| c.key() == normalized)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
