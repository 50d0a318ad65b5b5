use pretty_assertions::assert_eq;
use std::collections::HashSet;
use std::fs;

use crate::config::Config;
use crate::extractor::cards::NO_CARDS_MESSAGE;
use crate::extractor::{ExtractError, Extractor, ListRecord, Outcome};

const PORTAL_URL: &str = "https://portal.example.com/updates/";
const SHOP_URL: &str = "https://shop.example.com/espresso";

fn portal() -> Extractor {
    let html = fs::read_to_string("src/extractor/tests/fixtures/results_portal.html")
        .expect("Failed to read test fixture");
    Extractor::parse(&html, PORTAL_URL).unwrap()
}

fn shop() -> Extractor {
    let html = fs::read_to_string("src/extractor/tests/fixtures/shop.html")
        .expect("Failed to read test fixture");
    Extractor::parse(&html, SHOP_URL).unwrap()
}

fn titles(outcome: &Outcome<ListRecord>) -> Vec<&str> {
    outcome.items().iter().map(|r| r.title.as_str()).collect()
}

#[test]
fn test_named_result_section() {
    let outcome = portal().extract_list_records(Some("Results"), None).unwrap();
    let records = outcome.items();

    assert_eq!(records.len(), 10);
    assert_eq!(
        records[0],
        ListRecord {
            index: 1,
            title: "SSC CGL Tier 1 Result 2024 - Out".to_string(),
            text: "SSC CGL Tier 1 Result 2024 - Out".to_string(),
            link: "https://portal.example.com/results/ssc-cgl".to_string(),
            status: "Out".to_string(),
        }
    );
    assert_eq!(records[1].status, "Final");
    assert_eq!(records[2].link, "https://results.example.org/bank/ibps");
    assert_eq!(records[3].link, "");
    assert_eq!(records[3].status, "Reminder");
    assert_eq!(records[8].status, "Final Result");
    assert_eq!(records[9].title, "Result schedule to be announced soon");
    assert_eq!(records[9].link, "");
}

#[test]
fn test_named_section_with_statuses() {
    let outcome = portal().extract_list_records(Some("latest jobs"), None).unwrap();
    let statuses: Vec<_> = outcome.items().iter().map(|r| r.status.as_str()).collect();
    assert_eq!(statuses, vec!["Last Date", "Start", ""]);
}

#[test]
fn test_explicit_pattern() {
    let outcome = portal().extract_list_records(None, Some("#admit li")).unwrap();
    let links: Vec<_> = outcome.items().iter().map(|r| r.link.as_str()).collect();
    assert_eq!(
        links,
        vec![
            "https://portal.example.com/updates/admit/upsc-cse",
            "https://cdn.example.net/admit/nda.pdf",
            "https://portal.example.com/updates/#admit-help",
        ]
    );
    let statuses: Vec<_> = outcome.items().iter().map(|r| r.status.as_str()).collect();
    assert_eq!(statuses, vec!["Released", "Out", ""]);
}

#[test]
fn test_empty_pattern_falls_through_to_section() {
    let extractor = portal();
    let via_pattern = extractor
        .extract_list_records(Some("Admit Card"), Some(".nothing li"))
        .unwrap();
    let via_section = extractor.extract_list_records(Some("Admit Card"), None).unwrap();
    assert_eq!(via_pattern, via_section);
    assert_eq!(via_pattern.len(), 3);
}

#[test]
fn test_unknown_section_falls_back_to_scoring() {
    let extractor = portal();
    let scored = extractor.extract_list_records(None, None).unwrap();
    assert_eq!(scored.len(), 10);
    assert_eq!(titles(&scored)[0], "SSC CGL Tier 1 Result 2024 - Out");

    let unknown = extractor.extract_list_records(Some("Scholarships"), None).unwrap();
    assert_eq!(unknown, scored);
}

#[test]
fn test_strict_scoring_uses_result_heading_scan() {
    let extractor = portal().with_config(Config::new(7, 3, 50, 10));
    assert_eq!(extractor.config().min_list_score(), 7);
    let outcome = extractor.extract_list_records(None, None).unwrap();
    assert_eq!(
        titles(&outcome),
        vec![
            "SSC GD Constable Online Form 2024 - Last Date",
            "RRB ALP Recruitment 2024 - Start",
            "IBPS PO Notification 2024",
        ]
    );
}

#[test]
fn test_list_records_are_dense_absolute_and_stable() {
    let extractor = portal();
    for section in [Some("Results"), Some("Admit Card"), Some("Latest Jobs"), None] {
        let first = extractor.extract_list_records(section, None).unwrap();
        let second = extractor.extract_list_records(section, None).unwrap();
        assert_eq!(first, second);

        for (idx, record) in first.items().iter().enumerate() {
            assert_eq!(record.index, idx + 1);
            assert!(record.link.is_empty() || record.link.starts_with("http"));
            assert!(!record.title.is_empty() || !record.text.is_empty());
        }
    }
}

#[test]
fn test_section_text() {
    let extractor = portal();
    assert_eq!(
        extractor.extract_section("about"),
        Outcome::Single("We publish government exam updates every day for candidates.".to_string())
    );
    assert_eq!(
        extractor.extract_section("Pricing"),
        Outcome::NotFound("Not found - No heading containing 'Pricing' was found".to_string())
    );
}

#[test]
fn test_text_search_skips_scripts_and_duplicates() {
    let extractor = portal();
    assert!(!extractor.find_text("should never appear", false).is_found());

    let outcome = extractor.find_text("admit card", false);
    let texts = outcome.items();
    assert!(texts.contains(&"How to download your admit card".to_string()));
    assert_eq!(texts.iter().collect::<HashSet<_>>().len(), texts.len());

    let alt = extractor.find_text("team photo", false);
    assert_eq!(alt, Outcome::Single("[Image Alt Text] Portal team photo".to_string()));
    assert!(!extractor.find_text("TEAM PHOTO", true).is_found());
}

#[test]
fn test_link_search() {
    assert_eq!(
        portal().find_links_by_keyword("admit"),
        Outcome::Many(vec![
            "https://portal.example.com/admit-card".to_string(),
            "https://portal.example.com/updates/admit/upsc-cse".to_string(),
            "https://cdn.example.net/admit/nda.pdf".to_string(),
            "https://portal.example.com/updates/#admit-help".to_string(),
        ])
    );
}

#[test]
fn test_portal_has_no_cards() {
    assert_eq!(
        portal().extract_card_records(None).unwrap(),
        Outcome::Info(NO_CARDS_MESSAGE.to_string())
    );
}

#[test]
fn test_shop_cards() {
    let outcome = shop().extract_card_records(None).unwrap();
    let cards = outcome.items();

    assert_eq!(cards.len(), 3);
    assert_eq!(
        cards.iter().map(|c| (c.index, c.title.as_str())).collect::<Vec<_>>(),
        vec![(1, "Blue Kettle"), (2, "Burr Grinder"), (3, "Stoneware Mug")]
    );
    assert_eq!(cards[0].image, "https://cdn.shop.example/kettle.jpg");
    assert_eq!(cards[0].link, "https://shop.example.com/p/kettle");
    assert_eq!(cards[0].description, "Boils a full litre in under three minutes.");
    assert_eq!(cards[1].image, "https://cdn.shop.example/grinder.jpg");
    assert_eq!(cards[2].image, "");
    assert_eq!(cards[2].description, "Stoneware Mug Holds 350ml and keeps coffee warm.");
}

#[test]
fn test_card_description_words_from_config() {
    let extractor = shop().with_config(Config::new(3, 3, 3, 10));
    let outcome = extractor.extract_card_records(None).unwrap();
    let mug = &outcome.items()[2];
    assert_eq!(mug.description, "Stoneware Mug Holds");
    assert_eq!(mug.text, "Stoneware Mug Holds 350ml and keeps coffee warm.");
}

#[test]
fn test_shop_images() {
    let extractor = shop();
    assert_eq!(
        extractor.list_images(),
        vec![
            "https://shop.example.com/static/logo.svg",
            "https://shop.example.com/images/espresso-large.jpg",
            "https://cdn.shop.example/kettle.jpg",
            "https://cdn.shop.example/grinder.jpg",
            "https://shop.example.com/images/placeholder.png",
        ]
    );
    assert_eq!(
        extractor.find_images_by_keyword("kettle"),
        vec!["https://cdn.shop.example/kettle.jpg"]
    );
    assert!(extractor.find_images_by_keyword("toaster").is_empty());
}

#[test]
fn test_shop_selector_fallbacks() {
    let extractor = shop();
    assert_eq!(
        extractor.texts_by_pattern(None).unwrap(),
        Outcome::Single("Espresso Machine Deluxe".to_string())
    );
    assert_eq!(
        extractor.images_by_pattern(None).unwrap(),
        Outcome::Single("https://shop.example.com/images/espresso-large.jpg".to_string())
    );
    assert_eq!(
        extractor.links_by_pattern(None).unwrap(),
        Outcome::Single("https://shop.example.com/cart/add?sku=ESP-1".to_string())
    );
    assert_eq!(extractor.images_by_pattern(Some(".grid img")).unwrap().len(), 3);
}

#[test]
fn test_malformed_input() {
    assert!(matches!(
        Extractor::parse("<p>hi</p>", "not a url"),
        Err(ExtractError::InvalidBaseUrl(_))
    ));

    let extractor = shop();
    assert!(matches!(
        extractor.extract_card_records(Some("div[")),
        Err(ExtractError::InvalidPattern { .. })
    ));
    assert!(matches!(
        extractor.extract_list_records(None, Some("li[")),
        Err(ExtractError::InvalidPattern { .. })
    ));
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_locators_never_panic(
            html in ".*",
            keyword in "[a-zA-Z ]{0,12}",
        ) {
            let extractor = Extractor::parse(&html, "https://example.com/").unwrap();
            let _ = extractor.find_text(&keyword, false);
            let _ = extractor.list_images();
            let _ = extractor.find_images_by_keyword(&keyword);
            let _ = extractor.find_links_by_keyword(&keyword);
            let _ = extractor.extract_section(&keyword);
            let _ = extractor.extract_list_records(Some(&keyword), None);
            let _ = extractor.extract_card_records(None);
        }

        #[test]
        fn test_records_are_idempotent_and_dense(
            items in proptest::collection::vec("[a-z0-9 ()-]{0,24}", 0..12),
        ) {
            let html = format!(
                "<ul>{}</ul>",
                items
                    .iter()
                    .enumerate()
                    .map(|(idx, text)| format!("<li><a href=\"/r/{idx}\">{text}</a></li>"))
                    .collect::<String>()
            );
            let extractor = Extractor::parse(&html, "https://example.com/").unwrap();
            let first = extractor.extract_list_records(None, Some("li")).unwrap();
            let second = extractor.extract_list_records(None, Some("li")).unwrap();
            prop_assert_eq!(&first, &second);
            for (idx, record) in first.items().iter().enumerate() {
                prop_assert_eq!(record.index, idx + 1);
                prop_assert!(record.link.starts_with("https://example.com/r/"));
            }
        }
    }
}
