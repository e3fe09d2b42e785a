use anyhow::{Result, anyhow};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use url::Url;

use super::config::CrawlerConfig;

/// Email-shaped text: letters/digits/`._%+-` local part, dotted domain,
/// alphabetic top-level segment of two or more characters. Deliberately loose;
/// it will match version-string lookalikes and miss addresses broken up by
/// markup.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap());

static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

/// If `href` is a full URL, returns it as-is. Otherwise resolves it against
/// `base`, the page it appeared on. Fragments are stripped so the same page
/// reached through different anchors collapses to one target.
pub fn resolve_url(href: &str, base: &Url) -> Result<Url, url::ParseError> {
    let mut url = match Url::parse(href) {
        Ok(parsed) if parsed.host().is_some() => parsed,
        _ => base.join(href)?,
    };
    url.set_fragment(None);
    Ok(url)
}

/// Fetch a page body. Any non-2xx status is an error, as is running past the
/// configured timeout.
pub async fn fetch_page(url: &Url, client: &Client, config: &CrawlerConfig) -> Result<String> {
    let response = client
        .get(url.clone())
        .timeout(Duration::from_secs(config.request_timeout_sec))
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(anyhow!("server returned {}", response.status()));
    }

    Ok(response.text().await?)
}

/// Every email-shaped match in the document's rendered text, in document
/// order. Duplicates are kept; the caller owns dedup.
pub fn extract_emails(document: &Html) -> Vec<String> {
    let text = document.root_element().text().collect::<Vec<_>>().join(" ");
    EMAIL_RE
        .find_iter(&text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Every href attribute present in the document, unresolved. Admission policy
/// (domain scope, scheme, revisit) is applied later by the frontier.
pub fn extract_links(document: &Html) -> Vec<String> {
    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}
