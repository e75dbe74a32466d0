// Re-export modules
pub mod category;
pub mod config;
pub mod dataset;
pub mod driver;
pub mod error;
pub mod export;
pub mod fetchers;
pub mod parsers;
pub mod results;
pub mod utils;

#[cfg(test)]
mod test_support;

// Re-export commonly used types for convenience
pub use category::Category;
pub use config::ScraperConfig;
pub use error::ScrapeError;
pub use results::{AdRecord, PageOutcome, RunReport};

use fetchers::HttpFetcher;
use parsers::ListingExtractor;
use std::ops::ControlFlow;

/// Main builder for scraping the listings of one category
pub struct Listings {
    category: Category,
    pages: u32,
    config: ScraperConfig,
}

impl Listings {
    /// Create a builder for `category`, scraping the first page with the default configuration
    pub fn new(category: Category) -> Self {
        Self {
            category,
            pages: 1,
            config: ScraperConfig::default(),
        }
    }

    /// Set the number of pages to scrape, starting at page 1
    pub fn with_pages(mut self, pages: u32) -> Self {
        self.pages = pages;
        self
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: ScraperConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the base URL of the marketplace
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.config.timeout_secs = timeout_seconds;
        self
    }

    /// Scrape every requested page and return the accumulated result set
    pub async fn collect(self) -> Result<RunReport, ScrapeError> {
        self.collect_with(|_| ControlFlow::Continue(())).await
    }

    /// Like [`Listings::collect`], reporting each page outcome to `observer`
    /// and stopping early when it returns `ControlFlow::Break`.
    ///
    /// Errors are only returned for invalid setup; failing pages are skipped.
    pub async fn collect_with<O>(self, observer: O) -> Result<RunReport, ScrapeError>
    where
        O: FnMut(&PageOutcome) -> ControlFlow<()>,
    {
        if self.pages == 0 || self.pages > self.config.max_pages {
            return Err(ScrapeError::InvalidPageCount {
                requested: self.pages,
                max: self.config.max_pages,
            });
        }

        let extractor = ListingExtractor::new(&self.config.selectors)?;
        let fetcher = HttpFetcher::new(&self.config)?;

        Ok(driver::run(&fetcher, &extractor, self.category, self.pages, observer).await)
    }
}
