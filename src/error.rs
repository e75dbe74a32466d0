use crate::category::Category;
use std::path::PathBuf;

/// Failure to retrieve one listing page
#[derive(Debug, thiserror::Error)]
#[error("failed to fetch {category} page {page} ({url}): {cause}")]
pub struct FetchError {
    pub category: Category,
    pub page: u32,
    pub url: String,
    #[source]
    pub cause: FetchCause,
}

/// Underlying reason for a [`FetchError`]
#[derive(Debug, thiserror::Error)]
pub enum FetchCause {
    /// Page numbers start at 1
    #[error("page numbers start at 1")]
    InvalidPage,

    /// Transport failure, including timeouts
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-2xx status
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),
}

/// A fetched document that cannot be treated as a listing page
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("{category} page {page}: empty document")]
    EmptyDocument { category: Category, page: u32 },

    #[error("{category} page {page}: document contains no markup")]
    NotMarkup { category: Category, page: u32 },
}

/// Errors surfaced by a scraping run
///
/// `Fetch` and `Parse` only ever appear as the reason a page was skipped;
/// the remaining variants are setup failures reported before any page is attempted.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("invalid {field} selector {selector:?}: {reason}")]
    Selector {
        field: &'static str,
        selector: String,
        reason: String,
    },

    #[error("invalid base URL {url:?}: {source}")]
    BaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("page count must be between 1 and {max}, got {requested}")]
    InvalidPageCount { requested: u32, max: u32 },
}

/// Errors reading the pre-scraped and cleaned CSV files
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
