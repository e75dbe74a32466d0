use clap::Parser;
use std::error::Error;
use std::ops::ControlFlow;
use std::path::PathBuf;
use yield_ads::dataset::{self, CleanDataset, Table};
use yield_ads::results::AdRecord;
use yield_ads::{Category, Listings, PageOutcome, ScraperConfig, export, utils};

mod args;
use args::{Args, Command};

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match ScraperConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                ::log::error!("Failed to load configuration {}: {}", path.display(), e);
                std::process::exit(2);
            }
        },
        None => ScraperConfig::default(),
    };

    let result = match args.command {
        Command::Scrape {
            category,
            pages,
            output,
            base_url,
            timeout,
        } => scrape(config, category.into(), pages, output, base_url, timeout).await,
        Command::Raw {
            category,
            head,
            output,
        } => raw(&config, category.into(), head, output),
        Command::Dashboard {
            category,
            top,
            head,
        } => dashboard(&config, &category, top, head),
    };

    if let Err(e) = result {
        ::log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn scrape(
    config: ScraperConfig,
    category: Category,
    pages: u32,
    output: Option<PathBuf>,
    base_url: Option<String>,
    timeout: Option<u64>,
) -> Result<(), Box<dyn Error>> {
    let mut listings = Listings::new(category)
        .with_config(config)
        .with_pages(pages);
    if let Some(base_url) = base_url {
        listings = listings.with_base_url(base_url);
    }
    if let Some(timeout) = timeout {
        listings = listings.with_timeout(timeout);
    }

    println!("Scraping {} ({} page(s))...", category.label(), pages);

    let report = listings
        .collect_with(|outcome| {
            match outcome {
                PageOutcome::Scraped { page, records } => {
                    println!("  page {}/{}: {} ads", page, pages, records)
                }
                PageOutcome::Skipped { page, reason } => {
                    println!("  page {}/{}: skipped ({})", page, pages, reason)
                }
            }
            ControlFlow::Continue(())
        })
        .await?;

    println!("Scraping finished. Rows collected: {}", report.records.len());
    println!("{}", report.summary());
    print_records(&report.records, 50);

    let path = output.unwrap_or_else(|| PathBuf::from(utils::export_file_name(category, pages)));
    export::write_csv(&path, &report.records)?;
    println!("CSV written to {}", path.display());

    Ok(())
}

fn raw(
    config: &ScraperConfig,
    category: Category,
    head: usize,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn Error>> {
    let table = dataset::load_raw(&config.data, category)?;

    println!("File: {}", category.raw_file_name());
    println!(
        "Rows: {} | Columns: {}",
        table.row_count(),
        table.column_count()
    );
    print_table(&table, head);

    if let Some(path) = output {
        std::fs::write(&path, table.to_csv_string()?)?;
        println!("CSV written to {}", path.display());
    }

    Ok(())
}

fn dashboard(
    config: &ScraperConfig,
    selected: &[String],
    top: usize,
    head: usize,
) -> Result<(), Box<dyn Error>> {
    let data = CleanDataset::load(&config.data.clean_path)?;

    let data = if selected.is_empty() {
        data
    } else {
        data.filter_categories(selected)
    };

    println!("Categories: {}", data.categories().join(", "));

    let indicators = data.indicators();
    println!();
    println!("Ads:       {}", indicators.total_ads);
    println!("Locations: {}", indicators.unique_locations);

    println!();
    println!("Ads per category");
    match data.ads_per_category() {
        Some(counts) => print_counts(&counts),
        None => println!("  column {} not found", dataset::CATEGORY_COLUMN),
    }

    println!();
    println!("Top {} locations", top);
    match data.top_locations(top) {
        Some(counts) => print_counts(&counts),
        None => println!("  column {} not found", dataset::ADDRESS_COLUMN),
    }

    println!();
    print_table(data.table(), head);

    Ok(())
}

fn print_counts(counts: &[(String, usize)]) {
    let width = counts.iter().map(|(v, _)| v.chars().count()).max().unwrap_or(0);
    let max = counts.iter().map(|(_, c)| *c).max().unwrap_or(0).max(1);
    for (value, count) in counts {
        let bar = "#".repeat((count * 40).div_ceil(max));
        println!("  {:<width$}  {:>6}  {}", value, count, bar, width = width);
    }
}

fn print_records(records: &[AdRecord], limit: usize) {
    for record in records.iter().take(limit) {
        println!(
            "  {} | {} | {} | {}",
            record.price, record.title_or_description, record.address, record.image_url
        );
    }
    if records.len() > limit {
        println!("  ... {} more", records.len() - limit);
    }
}

fn print_table(table: &Table, head: usize) {
    println!("{}", table.headers.join(" | "));
    for row in table.head(head) {
        println!("{}", row.join(" | "));
    }
}
