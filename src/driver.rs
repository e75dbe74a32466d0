use crate::category::Category;
use crate::error::ScrapeError;
use crate::fetchers::PageFetcher;
use crate::parsers::ListingExtractor;
use crate::results::{AdRecord, PageOutcome, RunReport, SkippedPage};
use std::ops::ControlFlow;

/// Scrape pages `1..=pages` of `category`, one page at a time.
///
/// A page that fails to fetch or parse is recorded as skipped and the run
/// continues with the next page. `observer` sees each page outcome as soon as
/// it is known; returning `ControlFlow::Break` ends the run before the next page.
pub async fn run<F, O>(
    fetcher: &F,
    extractor: &ListingExtractor,
    category: Category,
    pages: u32,
    mut observer: O,
) -> RunReport
where
    F: PageFetcher,
    O: FnMut(&PageOutcome) -> ControlFlow<()>,
{
    ::log::info!("Scraping {} page(s) of {}", pages, category);

    let mut report = RunReport::new(category, pages);

    for page in 1..=pages {
        let outcome = match scrape_page(fetcher, extractor, category, page).await {
            Ok(records) => {
                let count = records.len();
                report.records.extend(records);
                report.succeeded.push(page);
                PageOutcome::Scraped {
                    page,
                    records: count,
                }
            }
            Err(reason) => {
                ::log::warn!("Skipping {} page {}: {}", category, page, reason);
                PageOutcome::Skipped { page, reason }
            }
        };

        let flow = observer(&outcome);

        if let PageOutcome::Skipped { page, reason } = outcome {
            report.skipped.push(SkippedPage { page, reason });
        }

        if flow.is_break() {
            ::log::info!("Run of {} stopped by caller after page {}", category, page);
            break;
        }
    }

    ::log::info!(
        "Finished {}: {} ads, {}",
        category,
        report.records.len(),
        report.summary()
    );

    report
}

/// Scrape every requested page without observing progress
pub async fn run_all<F: PageFetcher>(
    fetcher: &F,
    extractor: &ListingExtractor,
    category: Category,
    pages: u32,
) -> RunReport {
    run(fetcher, extractor, category, pages, |_| ControlFlow::Continue(())).await
}

async fn scrape_page<F: PageFetcher>(
    fetcher: &F,
    extractor: &ListingExtractor,
    category: Category,
    page: u32,
) -> Result<Vec<AdRecord>, ScrapeError> {
    let listing = fetcher.fetch(category, page).await?;
    Ok(extractor.extract(&listing)?)
}
