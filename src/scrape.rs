use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use reqwest::header::{CACHE_CONTROL, EXPIRES, PRAGMA};
use reqwest::{Client, Url};
use scraper::{Html, Selector};
use tracing::{debug, warn};

use crate::error::AppError;
use crate::profile::{self, RestaurantProfile};

static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("link selector is valid"));

static LINK_PATTERNS: LazyLock<Vec<(&'static RestaurantProfile, Regex)>> = LazyLock::new(|| {
    profile::all()
        .iter()
        .filter_map(|profile| match Regex::new(profile.link_pattern) {
            Ok(re) => Some((profile, re)),
            Err(err) => {
                warn!(restaurant = profile.id, error = %err, "invalid link pattern");
                None
            }
        })
        .collect()
});

pub fn build_client() -> Result<Client, AppError> {
    let client = Client::builder()
        // Avoid macOS system proxy lookup that can panic in sandboxed contexts.
        .no_proxy()
        .user_agent("mensa-menu-api/0.1")
        .build()?;
    Ok(client)
}

/// Downloads the menu page and returns the current PDF URL per restaurant id.
pub async fn fetch_pdf_links(
    client: &Client,
    page_url: &str,
    base_url: &str,
) -> Result<BTreeMap<String, String>, AppError> {
    let html = client
        .get(page_url)
        .header(CACHE_CONTROL, "no-cache, no-store, must-revalidate")
        .header(PRAGMA, "no-cache")
        .header(EXPIRES, "0")
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    find_pdf_links(&html, base_url)
}

/// Matches every link of `html` against the restaurants' link patterns. When
/// several links match, the last one on the page wins.
pub fn find_pdf_links(html: &str, base_url: &str) -> Result<BTreeMap<String, String>, AppError> {
    let base = Url::parse(base_url)?;
    let doc = Html::parse_document(html);

    let mut links = BTreeMap::new();
    for element in doc.select(&LINK_SELECTOR) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        for (profile, pattern) in LINK_PATTERNS.iter() {
            if !pattern.is_match(href) {
                continue;
            }
            match base.join(href) {
                Ok(link) => {
                    debug!(restaurant = profile.id, %link, "found pdf link");
                    links.insert(profile.id.to_string(), link.to_string());
                }
                Err(err) => warn!(href, error = %err, "skipping unparsable link"),
            }
        }
    }

    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <a href="/media/abc123/menueplan_six-htp_kw15.pdf">HTP alt</a>
          <a href="/media/k5dnh0sd/landingpage_menueplan_htp_kw16.pdf">HTP</a>
          <a href="https://www.betriebsrestaurants-migros.ch/media/x4vjg4pd/menueplan_six-ht201.pdf">HT201</a>
          <a href="/media/zz/speiseplan.docx">Word</a>
          <a>no href</a>
        </body></html>
    "#;

    #[test]
    fn test_find_pdf_links() {
        let links = find_pdf_links(PAGE, "https://www.betriebsrestaurants-migros.ch").unwrap();
        assert_eq!(links.len(), 2);
        assert_eq!(
            links["htp"],
            "https://www.betriebsrestaurants-migros.ch/media/k5dnh0sd/landingpage_menueplan_htp_kw16.pdf"
        );
        assert_eq!(
            links["ht201"],
            "https://www.betriebsrestaurants-migros.ch/media/x4vjg4pd/menueplan_six-ht201.pdf"
        );
    }

    #[test]
    fn test_page_without_menus() {
        let links = find_pdf_links("<a href=\"/kontakt\">Kontakt</a>", "https://example.org").unwrap();
        assert!(links.is_empty());
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(find_pdf_links(PAGE, "not a url"), Err(AppError::Url(_))));
    }
}
