use super::fixtures::{FULL_PAGE, NO_CARDS_PAGE, PARTIAL_PAGE};
use crate::category::Category;
use crate::config::SelectorConfig;
use crate::error::{ParseError, ScrapeError};
use crate::parsers::ListingExtractor;
use crate::results::{AdRecord, ListingPage, PRICE_UNAVAILABLE};

const PAGE_URL: &str = "https://sn.coinafrique.com/categorie/vetements-homme?page=1";

fn extractor() -> ListingExtractor {
    ListingExtractor::new(&SelectorConfig::default()).unwrap()
}

fn page(body: &str) -> ListingPage {
    ListingPage::new(
        Category::VetementsHomme,
        1,
        PAGE_URL.to_string(),
        body.to_string(),
    )
}

fn ad(price: &str, description: &str, address: &str, image_url: &str) -> AdRecord {
    AdRecord::new(
        price.to_string(),
        description.to_string(),
        address.to_string(),
        image_url.to_string(),
    )
}

#[cfg(test)]
mod extraction_tests {
    use super::*;

    #[test]
    fn test_full_page_in_document_order() {
        let records = extractor().extract(&page(FULL_PAGE)).unwrap();
        assert_eq!(
            records,
            vec![
                ad(
                    "12 000 CFA",
                    "Chemise wax manches longues",
                    "Dakar, Sénégal",
                    "https://images.coinafrique.com/4455_1.jpg",
                ),
                ad(
                    "8 500 CFA",
                    "Jean slim noir",
                    "Thiès, Sénégal",
                    "https://sn.coinafrique.com/static/ads/4456_1.jpg",
                ),
                ad(
                    "Prix sur demande",
                    "Costume trois pièces",
                    "Pikine, Sénégal",
                    "https://images.coinafrique.com/4457_1.jpg",
                ),
            ]
        );
    }

    #[test]
    fn test_missing_price_uses_placeholder() {
        let records = extractor().extract(&page(PARTIAL_PAGE)).unwrap();
        assert_eq!(records[0].price, PRICE_UNAVAILABLE);
        assert_eq!(records[0].title_or_description, "Baskets enfant taille 30");
        assert_eq!(records[0].address, "Rufisque, Sénégal");
        assert_eq!(records[0].image_url, "");
    }

    #[test]
    fn test_missing_address_keeps_price() {
        let records = extractor().extract(&page(PARTIAL_PAGE)).unwrap();
        assert_eq!(records[1].address, "");
        assert_eq!(records[1].price, "15 000 CFA");
        assert!(records[1].has_price());
        assert_eq!(records[1].price_amount(), Some(15000));
    }

    #[test]
    fn test_empty_card_is_still_emitted() {
        let records = extractor().extract(&page(PARTIAL_PAGE)).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[2], ad(PRICE_UNAVAILABLE, "", "", ""));
    }

    #[test]
    fn test_no_cards_yields_empty() {
        let records = extractor().extract(&page(NO_CARDS_PAGE)).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_extraction_is_repeatable() {
        let extractor = extractor();
        let listing = page(FULL_PAGE);
        let first = extractor.extract(&listing).unwrap();
        let second = extractor.extract(&listing).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_relative_image_kept_when_page_url_unparsable() {
        let mut listing = page(FULL_PAGE);
        listing.url = "not a url".to_string();
        let records = extractor().extract(&listing).unwrap();
        assert_eq!(records[1].image_url, "/static/ads/4456_1.jpg");
    }

    #[test]
    fn test_lazy_image_skips_inline_placeholder() {
        let html = r#"<div class="col s6 m4 l3">
            <img class="ad__card-img" src="data:image/gif;base64,R0lG" data-src="/real.jpg">
            <p class="ad__card-price">6 000 CFA</p></div>"#;
        let records = extractor().extract(&page(html)).unwrap();
        assert_eq!(records[0].image_url, "https://sn.coinafrique.com/real.jpg");
    }

    #[test]
    fn test_placeholder_only_image_is_empty() {
        let html = r#"<div class="col s6 m4 l3">
            <img class="ad__card-img" src="data:image/gif;base64,R0lG"></div>"#;
        let records = extractor().extract(&page(html)).unwrap();
        assert_eq!(records[0].image_url, "");
    }

    #[test]
    fn test_bare_location_text() {
        let html = r#"<div class="col s6 m4 l3">
            <p class="ad__card-location">Dakar</p></div>
            <div class="col s6 m4 l3">
            <p class="ad__card-location"><span class="material-icons">location_on</span> Guédiawaye, Sénégal</p></div>
            <div class="col s6 m4 l3">
            <p class="ad__card-location"><span class="material-icons">location_on</span></p></div>"#;
        let records = extractor().extract(&page(html)).unwrap();
        assert_eq!(records[0].address, "Dakar");
        assert_eq!(records[1].address, "Guédiawaye, Sénégal");
        assert_eq!(records[2].address, "");
    }
}

#[cfg(test)]
mod document_errors {
    use super::*;

    #[test]
    fn test_blank_document() {
        let err = extractor().extract(&page("  \n\t ")).unwrap_err();
        assert_eq!(
            err,
            ParseError::EmptyDocument {
                category: Category::VetementsHomme,
                page: 1
            }
        );
    }

    #[test]
    fn test_document_without_markup() {
        let err = extractor()
            .extract(&page("upstream connect error or disconnect/reset before headers"))
            .unwrap_err();
        assert!(matches!(err, ParseError::NotMarkup { page: 1, .. }));
    }
}

#[cfg(test)]
mod selector_config {
    use super::*;

    #[test]
    fn test_swapped_selectors() {
        let config = SelectorConfig {
            card: "li.listing".to_string(),
            price: ".amount".to_string(),
            description: "h3".to_string(),
            address: ".where".to_string(),
            image: "img".to_string(),
            image_attrs: vec!["data-lazy".to_string()],
            ..SelectorConfig::default()
        };
        let html = r#"<ul>
            <li class="listing"><h3>Boubou</h3><span class="amount">20 000 CFA</span>
                <span class="where">Mbour</span><img data-lazy="/i/1.jpg"></li>
        </ul>"#;

        let records = ListingExtractor::new(&config)
            .unwrap()
            .extract(&page(html))
            .unwrap();
        assert_eq!(
            records,
            vec![ad(
                "20 000 CFA",
                "Boubou",
                "Mbour",
                "https://sn.coinafrique.com/i/1.jpg"
            )]
        );
    }

    #[test]
    fn test_invalid_selector_is_reported() {
        let config = SelectorConfig {
            price: "p[".to_string(),
            ..SelectorConfig::default()
        };
        let err = ListingExtractor::new(&config).unwrap_err();
        assert!(matches!(err, ScrapeError::Selector { field: "price", .. }));
    }
}
