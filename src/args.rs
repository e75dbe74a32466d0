use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use yield_ads::Category;

#[derive(Parser, Debug)]
#[command(name = "yield-ads")]
#[command(about = "Collects CoinAfrique classified ads and summarizes the cleaned dataset")]
#[command(version)]
pub struct Args {
    /// JSON configuration file (selectors, base URL, data paths)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scrape listing pages of one category and export them as CSV
    Scrape {
        /// Category to scrape
        #[arg(short = 'k', long, value_enum)]
        category: CategoryArg,

        /// Number of pages to scrape, starting at page 1 (bounded by `max_pages` in the configuration)
        #[arg(short, long, default_value_t = 2)]
        pages: u32,

        /// CSV output path (defaults to coinafrique_bs4_<category>_pages_<n>.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Override the marketplace base URL
        #[arg(long)]
        base_url: Option<String>,

        /// Override the per-request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Preview or copy a pre-scraped WebScraper export
    Raw {
        #[arg(short = 'k', long, value_enum)]
        category: CategoryArg,

        /// Number of rows to preview
        #[arg(long, default_value_t = 50)]
        head: usize,

        /// Copy the file to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Indicators and rankings over the cleaned dataset
    Dashboard {
        /// Keep only these categories (repeatable; all when omitted)
        #[arg(short = 'k', long)]
        category: Vec<String>,

        /// Number of locations in the ranking
        #[arg(long, default_value_t = 10)]
        top: usize,

        /// Number of rows to preview
        #[arg(long, default_value_t = 50)]
        head: usize,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    VetementsHomme,
    ChaussuresHomme,
    VetementsEnfants,
    ChaussuresEnfants,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::VetementsHomme => Category::VetementsHomme,
            CategoryArg::ChaussuresHomme => Category::ChaussuresHomme,
            CategoryArg::VetementsEnfants => Category::VetementsEnfants,
            CategoryArg::ChaussuresEnfants => Category::ChaussuresEnfants,
        }
    }
}
