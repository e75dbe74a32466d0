use crate::category::Category;
use crate::error::ScrapeError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Placeholder stored when a card shows no price
pub const PRICE_UNAVAILABLE: &str = "Prix non disponible";

static AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d[\d\s.\x{a0}\x{202f}]*").expect("amount pattern is valid"));

/// Raw document fetched for one (category, page) pair
#[derive(Debug, Clone)]
pub struct ListingPage {
    pub category: Category,
    pub page: u32,
    /// Address the document was fetched from, used to resolve relative links
    pub url: String,
    pub body: String,
}

impl ListingPage {
    pub fn new(category: Category, page: u32, url: String, body: String) -> Self {
        Self {
            category,
            page,
            url,
            body,
        }
    }
}

/// One extracted listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdRecord {
    /// Displayed price, or [`PRICE_UNAVAILABLE`]
    #[serde(rename = "prix")]
    pub price: String,

    #[serde(rename = "description")]
    pub title_or_description: String,

    /// Location text, empty when the card has none
    #[serde(rename = "adresse")]
    pub address: String,

    /// Absolute image URL, empty when the card has none
    #[serde(rename = "image_lien")]
    pub image_url: String,
}

impl AdRecord {
    /// Column names, in export order
    pub const COLUMNS: [&'static str; 4] = ["prix", "description", "adresse", "image_lien"];

    pub fn new(price: String, title_or_description: String, address: String, image_url: String) -> Self {
        Self {
            price,
            title_or_description,
            address,
            image_url,
        }
    }

    /// Whether the card carried a price
    pub fn has_price(&self) -> bool {
        self.price != PRICE_UNAVAILABLE
    }

    /// Numeric value of the price, ignoring thousands separators and currency.
    ///
    /// CFA franc prices carry no decimals, so `.` is read as a thousands
    /// separator like spaces are: "3.500 CFA" and "3.5 CFA" give 3500 and 35.
    /// Returns `None` for textual prices such as "Prix sur demande".
    pub fn price_amount(&self) -> Option<u64> {
        let matched = AMOUNT.find(&self.price)?;
        let digits: String = matched
            .as_str()
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        digits.parse().ok()
    }
}

/// Result of attempting one page
#[derive(Debug)]
pub enum PageOutcome {
    Scraped { page: u32, records: usize },
    Skipped { page: u32, reason: ScrapeError },
}

impl PageOutcome {
    pub fn page(&self) -> u32 {
        match self {
            PageOutcome::Scraped { page, .. } | PageOutcome::Skipped { page, .. } => *page,
        }
    }
}

/// A page that contributed no records, and why
#[derive(Debug)]
pub struct SkippedPage {
    pub page: u32,
    pub reason: ScrapeError,
}

/// Accumulated result set of one scraping run
#[derive(Debug)]
pub struct RunReport {
    pub category: Category,
    pub pages_requested: u32,
    /// Records in page order, then on-page order
    pub records: Vec<AdRecord>,
    /// Pages fetched and extracted successfully
    pub succeeded: Vec<u32>,
    pub skipped: Vec<SkippedPage>,
}

impl RunReport {
    pub fn new(category: Category, pages_requested: u32) -> Self {
        Self {
            category,
            pages_requested,
            records: Vec::new(),
            succeeded: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Pages attempted before the run ended
    pub fn pages_attempted(&self) -> usize {
        self.succeeded.len() + self.skipped.len()
    }

    /// Whether every requested page was attempted
    pub fn is_complete(&self) -> bool {
        self.pages_attempted() == self.pages_requested as usize
    }

    /// One-line outcome, e.g. "2 pages succeeded, 1 pages skipped"
    pub fn summary(&self) -> String {
        format!(
            "{} pages succeeded, {} pages skipped",
            self.succeeded.len(),
            self.skipped.len()
        )
    }
}
