//! Result-card extraction from rendered search pages
//!
//! Cards are located by their `data-testid` attributes; a few fields only carry
//! generated MUI class names, which are matched with anchored patterns against
//! either the normalized `class` attribute or a single class token.
//!
//! The publisher link is an `<a>` nested inside the card's `<a>`. HTML5 tree
//! building would close the card there and re-open copies of it around the
//! remaining content, so org links are rewritten to `<span>` before parsing.

use crate::error::{CollectorError, Result};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use std::sync::LazyLock;

pub const RESULT_CARD_SELECTOR: &str = r#"a[data-testid="imageSearchResult"]"#;

pub const NOT_AVAILABLE: &str = "N/A";
pub const ZERO_COUNT: &str = "0";

pub const CSV_HEADER: [&str; 8] = [
    "Image Name",
    "Description",
    "Pulls",
    "Stars Count",
    "Tags",
    "By",
    "Last Updated",
    "Official Status",
];

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static CSS selector is valid")
}

fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("static class pattern is valid")
}

static CARD: LazyLock<Selector> = LazyLock::new(|| selector(RESULT_CARD_SELECTOR));
static TITLE: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"strong[data-testid="product-title"]"#));
static BADGES: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"div[data-testid="product-badges-and-data-count"]"#));
static ORG_LINK: LazyLock<Selector> = LazyLock::new(|| selector(r#"[data-testid="org-link"]"#));
static CHIP: LazyLock<Selector> = LazyLock::new(|| selector(r#"div[data-testid="productChip"]"#));
static OFFICIAL_ICON: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"svg[data-testid="official-icon"]"#));
static DIV: LazyLock<Selector> = LazyLock::new(|| selector("div"));
static P: LazyLock<Selector> = LazyLock::new(|| selector("p"));
static SPAN: LazyLock<Selector> = LazyLock::new(|| selector("span"));
static STRONG: LazyLock<Selector> = LazyLock::new(|| selector("strong"));

static DESCRIPTION_CLASS: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"^MuiTypography-root.*css-mysnhd$"));
static PULLS_CLASS: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"^MuiTypography-root.*css-1xp8ea0$"));
static STARS_CLASS: LazyLock<Regex> = LazyLock::new(|| pattern(r"^MuiStack-root css-tehqbb$"));
static UPDATED_CLASS: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"^MuiTypography-root.*css-m5mzoi$"));

static NESTED_ORG_LINK: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r#"(?is)<a\b([^>]*\bdata-testid\s*=\s*["']org-link["'][^>]*)>(.*?)</a\s*>"#)
});

/// One search result as rendered on the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrapedImage {
    pub name: String,
    pub description: String,
    pub pulls: String,
    pub stars: String,
    pub tags: Vec<String>,
    pub publisher: String,
    pub last_updated: String,
    pub official: bool,
}

impl ScrapedImage {
    pub fn official_status(&self) -> &'static str {
        if self.official { "Official" } else { "Not Official" }
    }

    /// Row in [`CSV_HEADER`] order
    pub fn csv_record(&self) -> [String; 8] {
        [
            self.name.clone(),
            self.description.clone(),
            self.pulls.clone(),
            self.stars.clone(),
            self.tags.join(", "),
            self.publisher.clone(),
            self.last_updated.clone(),
            self.official_status().to_string(),
        ]
    }

    /// Labelled lines for console output
    pub fn display_lines(&self) -> Vec<String> {
        let tags = if self.tags.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            self.tags.join(", ")
        };
        vec![
            format!("Image Name: {}", self.name),
            format!("Description: {}", self.description),
            format!("Pulls: {}", self.pulls),
            format!("Stars Count: {}", self.stars),
            format!("Tags: {}", tags),
            format!("By: {}", self.publisher),
            format!("Last Updated: {}", self.last_updated),
            format!("Official Status: {}", self.official_status()),
        ]
    }
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn class_matches(element: &ElementRef<'_>, re: &Regex) -> bool {
    match element.value().attr("class") {
        Some(class) => {
            let normalized = class.split_whitespace().collect::<Vec<_>>().join(" ");
            re.is_match(&normalized) || class.split_whitespace().any(|c| re.is_match(c))
        }
        None => false,
    }
}

fn first_with_class<'a>(
    scope: ElementRef<'a>,
    tag: &Selector,
    re: &Regex,
) -> Option<ElementRef<'a>> {
    scope.select(tag).find(|el| class_matches(el, re))
}

/// Turn nested org-link anchors into spans so each card stays one element
pub fn flatten_org_links(html: &str) -> String {
    NESTED_ORG_LINK
        .replace_all(html, "<span${1}>${2}</span>")
        .into_owned()
}

fn text_or(element: Option<ElementRef<'_>>, fallback: &str) -> String {
    element
        .map(text_of)
        .unwrap_or_else(|| fallback.to_string())
}

/// Extract every field of a single result card
pub fn parse_card(card: ElementRef<'_>) -> Result<ScrapedImage> {
    let name = text_or(card.select(&TITLE).next(), NOT_AVAILABLE);
    let description = text_or(first_with_class(card, &DIV, &DESCRIPTION_CLASS), NOT_AVAILABLE);

    let pulls = text_or(
        card.select(&BADGES)
            .next()
            .and_then(|badges| first_with_class(badges, &P, &PULLS_CLASS)),
        ZERO_COUNT,
    );

    let stars = text_or(
        first_with_class(card, &DIV, &STARS_CLASS)
            .and_then(|stack| stack.select(&STRONG).next()),
        ZERO_COUNT,
    );

    let publisher = text_or(card.select(&ORG_LINK).next(), NOT_AVAILABLE);

    let last_updated = first_with_class(card, &SPAN, &UPDATED_CLASS)
        .map(text_of)
        .filter(|text| text.contains("Updated"))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let tags = card
        .select(&CHIP)
        .map(|chip| {
            chip.select(&SPAN).next().map(text_of).ok_or_else(|| {
                CollectorError::Extraction(format!("tag chip without label on card '{}'", name))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let official = card.select(&OFFICIAL_ICON).next().is_some();

    Ok(ScrapedImage {
        name,
        description,
        pulls,
        stars,
        tags,
        publisher,
        last_updated,
        official,
    })
}

/// Extract all result cards of a page; failures are reported per card
pub fn parse_page(html: &str) -> Vec<Result<ScrapedImage>> {
    let document = Html::parse_document(&flatten_org_links(html));
    document.select(&CARD).map(parse_card).collect()
}
