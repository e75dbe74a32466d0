use crate::config::SelectorConfig;
use crate::error::{ParseError, ScrapeError};
use crate::results::{AdRecord, ListingPage, PRICE_UNAVAILABLE};
use crate::utils::normalize_text;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Extracts ad records from listing page markup
///
/// Extraction is permissive: every card matching the card selector produces
/// a record, and a missing field never drops the card.
#[derive(Debug, Clone)]
pub struct ListingExtractor {
    card: Selector,
    price: Selector,
    description: Selector,
    address: Selector,
    address_container: Selector,
    address_icon: Selector,
    image: Selector,
    image_attrs: Vec<String>,
}

impl ListingExtractor {
    /// Compile the selector table
    pub fn new(config: &SelectorConfig) -> Result<Self, ScrapeError> {
        Ok(Self {
            card: compile("card", &config.card)?,
            price: compile("price", &config.price)?,
            description: compile("description", &config.description)?,
            address: compile("address", &config.address)?,
            address_container: compile("address_container", &config.address_container)?,
            address_icon: compile("address_icon", &config.address_icon)?,
            image: compile("image", &config.image)?,
            image_attrs: config.image_attrs.clone(),
        })
    }

    /// Extract every ad card of `page`, in document order
    pub fn extract(&self, page: &ListingPage) -> Result<Vec<AdRecord>, ParseError> {
        if page.body.trim().is_empty() {
            return Err(ParseError::EmptyDocument {
                category: page.category,
                page: page.page,
            });
        }
        if !page.body.contains('<') {
            return Err(ParseError::NotMarkup {
                category: page.category,
                page: page.page,
            });
        }

        let doc = Html::parse_document(&page.body);
        let base = Url::parse(&page.url).ok();

        let records: Vec<AdRecord> = doc
            .select(&self.card)
            .map(|card| self.extract_card(card, base.as_ref()))
            .collect();

        ::log::debug!(
            "{} page {}: extracted {} ads",
            page.category,
            page.page,
            records.len()
        );

        Ok(records)
    }

    /// Extract the four fields of one card, substituting placeholders for missing ones
    pub fn extract_card(&self, card: ElementRef<'_>, base: Option<&Url>) -> AdRecord {
        let price = first_text(card, &self.price).unwrap_or_else(|| PRICE_UNAVAILABLE.to_string());
        let description = first_text(card, &self.description).unwrap_or_default();
        let address = first_text(card, &self.address)
            .or_else(|| self.container_address(card))
            .unwrap_or_default();
        let image_url = self.image_url(card, base).unwrap_or_default();

        AdRecord::new(price, description, address, image_url)
    }

    /// Location written directly in the container, without the icon ligature
    fn container_address(&self, card: ElementRef<'_>) -> Option<String> {
        let container = card.select(&self.address_container).next()?;
        let parts = container.descendants().filter_map(|node| {
            let text: &str = node.value().as_text()?;
            let in_icon = node
                .ancestors()
                .filter_map(ElementRef::wrap)
                .take_while(|el| el.id() != container.id())
                .any(|el| self.address_icon.matches(&el));
            if in_icon { None } else { Some(text) }
        });
        let text = normalize_text(parts);
        if text.is_empty() { None } else { Some(text) }
    }

    /// First usable image attribute; inline `data:` placeholders are skipped
    fn image_url(&self, card: ElementRef<'_>, base: Option<&Url>) -> Option<String> {
        let img = card.select(&self.image).next()?;
        let src = self
            .image_attrs
            .iter()
            .filter_map(|attr| img.value().attr(attr))
            .map(str::trim)
            .find(|v| !v.is_empty() && !v.starts_with("data:"))?;

        match base.and_then(|b| b.join(src).ok()) {
            Some(absolute) => Some(absolute.to_string()),
            None => Some(src.to_string()),
        }
    }
}

fn compile(field: &'static str, selector: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(selector).map_err(|e| ScrapeError::Selector {
        field,
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

/// Normalized text of the first node matching `selector`, if non-empty
fn first_text(card: ElementRef<'_>, selector: &Selector) -> Option<String> {
    let node = card.select(selector).next()?;
    let text = normalize_text(node.text());
    if text.is_empty() { None } else { Some(text) }
}
