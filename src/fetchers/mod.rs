pub mod http;

pub use http::HttpFetcher;

use crate::category::Category;
use crate::error::FetchError;
use crate::results::ListingPage;
use std::future::Future;

/// Source of listing pages
///
/// One call retrieves one page; implementations neither retry nor cache.
/// Retry and skip policy belongs to the driver.
pub trait PageFetcher {
    /// Retrieve page `page` (starting at 1) of `category`
    fn fetch(
        &self,
        category: Category,
        page: u32,
    ) -> impl Future<Output = Result<ListingPage, FetchError>> + Send;
}
