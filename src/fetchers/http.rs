use crate::category::Category;
use crate::config::ScraperConfig;
use crate::error::{FetchCause, FetchError, ScrapeError};
use crate::fetchers::PageFetcher;
use crate::results::ListingPage;
use std::time::Duration;
use url::Url;

/// Fetches listing pages from the live marketplace over HTTP
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpFetcher {
    /// Build a fetcher with the configured base URL, User-Agent and timeout
    pub fn new(config: &ScraperConfig) -> Result<Self, ScrapeError> {
        let base_url = Url::parse(&config.base_url).map_err(|source| ScrapeError::BaseUrl {
            url: config.base_url.clone(),
            source,
        })?;

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ScrapeError::Client)?;

        Ok(Self { client, base_url })
    }

    /// Address of `page` within `category`
    pub fn page_url(&self, category: Category, page: u32) -> Url {
        page_url(&self.base_url, category, page)
    }
}

/// Join the category path onto `base` and set the `page` query parameter
pub fn page_url(base: &Url, category: Category, page: u32) -> Url {
    let mut url = base.clone();
    url.set_path(category.path());
    url.set_query(None);
    url.query_pairs_mut().append_pair("page", &page.to_string());
    url
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, category: Category, page: u32) -> Result<ListingPage, FetchError> {
        let url = self.page_url(category, page);
        let fail = |cause: FetchCause| FetchError {
            category,
            page,
            url: url.to_string(),
            cause,
        };

        if page == 0 {
            return Err(fail(FetchCause::InvalidPage));
        }

        ::log::debug!("Fetching {} page {}: {}", category, page, url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| fail(e.into()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fail(FetchCause::Status(status)));
        }

        let body = response.text().await.map_err(|e| fail(e.into()))?;
        ::log::trace!("{} page {} returned {} bytes", category, page, body.len());

        Ok(ListingPage::new(category, page, url.to_string(), body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    fn config_for(base_url: String) -> ScraperConfig {
        ScraperConfig {
            base_url,
            timeout_secs: 1,
            ..ScraperConfig::default()
        }
    }

    #[test]
    fn test_page_url() {
        let base = Url::parse("https://sn.coinafrique.com").unwrap();
        assert_eq!(
            page_url(&base, Category::VetementsHomme, 3).as_str(),
            "https://sn.coinafrique.com/categorie/vetements-homme?page=3"
        );

        let base = Url::parse("http://127.0.0.1:8080/ignored?page=9").unwrap();
        assert_eq!(
            page_url(&base, Category::ChaussuresEnfants, 1).as_str(),
            "http://127.0.0.1:8080/categorie/chaussures-enfants?page=1"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = HttpFetcher::new(&config_for("not a url".to_string())).unwrap_err();
        assert!(matches!(err, ScrapeError::BaseUrl { .. }));
    }

    #[tokio::test]
    async fn test_fetch_success_sends_user_agent() {
        let base = test_support::serve(|request| {
            let agent = request
                .lines()
                .find_map(|l| l.strip_prefix("user-agent: ").or_else(|| l.strip_prefix("User-Agent: ")))
                .unwrap_or("")
                .to_string();
            (200, format!("<html><body><p>{}</p></body></html>", agent))
        })
        .await;

        let config = ScraperConfig {
            user_agent: "yield-ads-test/1.0".to_string(),
            ..config_for(base)
        };
        let fetcher = HttpFetcher::new(&config).unwrap();
        let page = fetcher.fetch(Category::ChaussuresHomme, 2).await.unwrap();

        assert_eq!(page.category, Category::ChaussuresHomme);
        assert_eq!(page.page, 2);
        assert!(page.url.ends_with("/categorie/chaussures-homme?page=2"));
        assert!(page.body.contains("yield-ads-test/1.0"));
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let base = test_support::serve(|_| (503, "busy".to_string())).await;
        let fetcher = HttpFetcher::new(&config_for(base)).unwrap();

        let err = fetcher.fetch(Category::VetementsHomme, 4).await.unwrap_err();
        assert_eq!(err.category, Category::VetementsHomme);
        assert_eq!(err.page, 4);
        assert!(matches!(
            err.cause,
            FetchCause::Status(status) if status.as_u16() == 503
        ));
    }

    #[tokio::test]
    async fn test_fetch_timeout() {
        let base = test_support::serve_silent().await;
        let fetcher = HttpFetcher::new(&config_for(base)).unwrap();

        let err = fetcher.fetch(Category::VetementsEnfants, 1).await.unwrap_err();
        match err.cause {
            FetchCause::Request(e) => assert!(e.is_timeout()),
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_page_zero_is_rejected_without_request() {
        let fetcher = HttpFetcher::new(&config_for("http://127.0.0.1:9".to_string())).unwrap();
        let err = fetcher.fetch(Category::VetementsHomme, 0).await.unwrap_err();
        assert!(matches!(err.cause, FetchCause::InvalidPage));
    }
}
