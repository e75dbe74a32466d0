use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Configuration for a scraping run against the marketplace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Root of the marketplace site; category paths are joined onto it
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Upper bound for the number of pages in one run
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,

    /// Markup selectors for ad cards and their fields
    #[serde(default)]
    pub selectors: SelectorConfig,

    /// Locations of the pre-scraped and cleaned datasets
    #[serde(default)]
    pub data: DataPaths,
}

/// CSS selectors describing the site's ad card markup.
///
/// The marketplace changes its markup from time to time; only this table
/// should need to change when it does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Container of one ad
    #[serde(default = "default_card_selector")]
    pub card: String,

    #[serde(default = "default_price_selector")]
    pub price: String,

    #[serde(default = "default_description_selector")]
    pub description: String,

    #[serde(default = "default_address_selector")]
    pub address: String,

    /// Element holding the location, read when `address` matches nothing
    #[serde(default = "default_address_container_selector")]
    pub address_container: String,

    /// Icon elements inside the location container whose text is ignored
    #[serde(default = "default_address_icon_selector")]
    pub address_icon: String,

    #[serde(default = "default_image_selector")]
    pub image: String,

    /// Image attributes tried in order (lazy-loaded images use `data-src`)
    #[serde(default = "default_image_attrs")]
    pub image_attrs: Vec<String>,
}

/// Paths of the read-only datasets shipped next to the scraper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataPaths {
    /// Directory holding the raw WebScraper exports, one file per category
    #[serde(default = "default_raw_dir")]
    pub raw_dir: PathBuf,

    /// Cleaned dataset covering all categories
    #[serde(default = "default_clean_path")]
    pub clean_path: PathBuf,
}

fn default_base_url() -> String {
    "https://sn.coinafrique.com".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/124.0 Safari/537.36"
        .to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_pages() -> u32 {
    50
}

fn default_card_selector() -> String {
    "div.col.s6.m4.l3".to_string()
}

fn default_price_selector() -> String {
    "p.ad__card-price".to_string()
}

fn default_description_selector() -> String {
    "p.ad__card-description".to_string()
}

fn default_address_selector() -> String {
    "p.ad__card-location > span:not(.material-icons)".to_string()
}

fn default_address_container_selector() -> String {
    "p.ad__card-location".to_string()
}

fn default_address_icon_selector() -> String {
    ".material-icons".to_string()
}

fn default_image_selector() -> String {
    "img.ad__card-img".to_string()
}

fn default_image_attrs() -> Vec<String> {
    vec!["src".to_string(), "data-src".to_string()]
}

fn default_raw_dir() -> PathBuf {
    Path::new("data").join("brut").join("webscraper")
}

fn default_clean_path() -> PathBuf {
    Path::new("data")
        .join("nettoye")
        .join("coinafrique_all_clean.csv")
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            max_pages: default_max_pages(),
            selectors: SelectorConfig::default(),
            data: DataPaths::default(),
        }
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            card: default_card_selector(),
            price: default_price_selector(),
            description: default_description_selector(),
            address: default_address_selector(),
            address_container: default_address_container_selector(),
            address_icon: default_address_icon_selector(),
            image: default_image_selector(),
            image_attrs: default_image_attrs(),
        }
    }
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            raw_dir: default_raw_dir(),
            clean_path: default_clean_path(),
        }
    }
}

impl ScraperConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string; absent keys take their defaults
    pub fn from_json(json: &str) -> Result<Self, Box<dyn Error>> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }
}
