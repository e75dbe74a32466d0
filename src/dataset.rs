//! Read-only access to the pre-scraped WebScraper exports and the cleaned dataset.

use crate::category::Category;
use crate::config::DataPaths;
use crate::error::DatasetError;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Column holding the category in the cleaned dataset
pub const CATEGORY_COLUMN: &str = "categorie";
/// Column holding the location in the cleaned dataset
pub const ADDRESS_COLUMN: &str = "adresse";

/// A CSV file held in memory with its header row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Read a CSV file; rows may have differing lengths
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DatasetError::NotFound(path.to_path_buf()));
        }

        let mut rdr = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
        let headers = rdr.headers()?.iter().map(String::from).collect();
        let rows = rdr
            .records()
            .map(|r| r.map(|record| record.iter().map(String::from).collect()))
            .collect::<Result<Vec<Vec<String>>, csv::Error>>()?;

        ::log::debug!("Loaded {} rows from {}", rows.len(), path.display());
        Ok(Self { headers, rows })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// First `n` rows
    pub fn head(&self, n: usize) -> &[Vec<String>] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// Render back to CSV text, header first
    pub fn to_csv_string(&self) -> Result<String, csv::Error> {
        let mut buf = Vec::new();
        {
            let mut wtr = csv::WriterBuilder::new()
                .flexible(true)
                .from_writer(&mut buf);
            wtr.write_record(&self.headers)?;
            for row in &self.rows {
                wtr.write_record(row)?;
            }
            wtr.flush()?;
        }
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    fn cell(row: &[String], index: usize) -> &str {
        row.get(index).map(String::as_str).unwrap_or("")
    }
}

/// Path of the raw WebScraper export for `category`
pub fn raw_path(paths: &DataPaths, category: Category) -> PathBuf {
    paths.raw_dir.join(category.raw_file_name())
}

/// Load the raw WebScraper export for `category`
pub fn load_raw(paths: &DataPaths, category: Category) -> Result<Table, DatasetError> {
    Table::load(raw_path(paths, category))
}

/// Headline numbers of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indicators {
    pub total_ads: usize,
    /// Distinct non-empty locations; 0 when the dataset has no address column
    pub unique_locations: usize,
}

/// The cleaned, all-category dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanDataset {
    table: Table,
}

impl CleanDataset {
    pub fn new(table: Table) -> Self {
        Self { table }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        Table::load(path).map(Self::new)
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Distinct non-empty categories, sorted
    pub fn categories(&self) -> Vec<String> {
        self.distinct(CATEGORY_COLUMN).into_iter().collect()
    }

    /// Rows whose category is one of `selected`.
    ///
    /// Without a category column there is nothing to filter on and all rows are kept.
    pub fn filter_categories(&self, selected: &[String]) -> CleanDataset {
        let Some(index) = self.table.column_index(CATEGORY_COLUMN) else {
            return self.clone();
        };

        let rows = self
            .table
            .rows
            .iter()
            .filter(|row| selected.iter().any(|s| s == Table::cell(row, index)))
            .cloned()
            .collect();

        CleanDataset::new(Table {
            headers: self.table.headers.clone(),
            rows,
        })
    }

    pub fn indicators(&self) -> Indicators {
        Indicators {
            total_ads: self.table.row_count(),
            unique_locations: self.distinct(ADDRESS_COLUMN).len(),
        }
    }

    /// Occurrences of each non-empty value of `column`, most frequent first.
    ///
    /// Ties are ordered by value. `None` when the column does not exist.
    pub fn value_counts(&self, column: &str) -> Option<Vec<(String, usize)>> {
        let index = self.table.column_index(column)?;

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for row in &self.table.rows {
            let value = Table::cell(row, index);
            if !value.is_empty() {
                *counts.entry(value).or_default() += 1;
            }
        }

        let mut counts: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(value, count)| (value.to_string(), count))
            .collect();
        // stable sort keeps the BTreeMap value order for equal counts
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        Some(counts)
    }

    /// Ads per category
    pub fn ads_per_category(&self) -> Option<Vec<(String, usize)>> {
        self.value_counts(CATEGORY_COLUMN)
    }

    /// The `n` most frequent locations
    pub fn top_locations(&self, n: usize) -> Option<Vec<(String, usize)>> {
        let mut counts = self.value_counts(ADDRESS_COLUMN)?;
        counts.truncate(n);
        Some(counts)
    }

    fn distinct(&self, column: &str) -> BTreeSet<String> {
        let Some(index) = self.table.column_index(column) else {
            return BTreeSet::new();
        };
        self.table
            .rows
            .iter()
            .map(|row| Table::cell(row, index))
            .filter(|v| !v.is_empty())
            .map(String::from)
            .collect()
    }
}
