use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use log2::*;
use reqwest::Client;
use scraper::Html;
use tokio::time::{Duration, sleep};
use url::Url;

use super::config::CrawlerConfigRef;
use super::scrape::{extract_emails, extract_links, fetch_page};
use super::sink::{ResultSink, StatusSink};
use super::state::ScrapeSession;

/// Cloneable handle for asking a running scrape to stop. The flag is read
/// once per loop iteration: a cancel that races the check lets at most one
/// more page fetch complete before the loop exits.
#[derive(Clone)]
pub struct StopHandle {
    stop: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn cancel(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }
}

/// Turn user input into an absolute seed URL, assuming https when the scheme
/// is missing, so `example.com` becomes `https://example.com`.
pub fn normalize_seed(input: &str) -> Result<Url> {
    let input = input.trim();
    let with_scheme = if input.starts_with("http://") || input.starts_with("https://") {
        input.to_string()
    } else {
        format!("https://{input}")
    };
    Url::parse(&with_scheme).with_context(|| format!("invalid seed URL: {input}"))
}

/// Single-domain email scraper. Crawls same-host pages breadth-first from the
/// seed, reporting progress through the status sink and the final address set
/// through the result sink.
pub struct EmailScraper {
    config: CrawlerConfigRef,
    stop: Arc<AtomicBool>,
}

impl EmailScraper {
    pub fn new(config: CrawlerConfigRef) -> Self {
        Self {
            config,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            stop: Arc::clone(&self.stop),
        }
    }

    /// Drive the crawl to completion. Runs on whatever task awaits it; spawn
    /// it when the caller has to stay responsive. Every run, including a
    /// cancelled one, ends with a "Scraping finished." status line and
    /// exactly one `complete` call. Per-page failures are reported through
    /// the status sink and never end the run; an error from this function
    /// means setup failed before the first fetch.
    pub async fn run(
        &self,
        status: Arc<dyn StatusSink>,
        results: Arc<dyn ResultSink>,
    ) -> Result<()> {
        let seed = normalize_seed(&self.config.seed)?;
        let mut session = ScrapeSession::new(seed)?;

        let client = Client::builder()
            .user_agent(self.config.user_agent.clone())
            .build()
            .context("failed to build HTTP client")?;

        info!(
            "Scraping {} with a budget of {} pages",
            session.domain, self.config.max_pages
        );

        while session.pages_crawled < self.config.max_pages && !self.stop.load(Ordering::SeqCst) {
            let Some(target) = session.frontier.next_target() else {
                break;
            };

            status.status(&format!("Visiting: {target}"));

            match fetch_page(&target, &client, &self.config).await {
                Ok(body) => harvest_page(&body, &target, &mut session, &*status),
                Err(e) => status.status(&format!("Error visiting {target}: {e}")),
            }

            session.pages_crawled += 1;
            sleep(Duration::from_millis(self.config.request_delay_ms)).await;
        }

        if self.stop.load(Ordering::SeqCst) {
            info!("Scrape of {} cancelled by caller", session.domain);
        }
        debug!(
            "Crawled {} pages, {} unique emails",
            session.pages_crawled,
            session.emails.len()
        );

        status.status("Scraping finished.");
        results.complete(session.emails);
        Ok(())
    }
}

/// Pull emails and links out of one fetched page. New addresses go to the
/// session set and the status sink; every href goes through frontier
/// admission with this page as the resolution base.
fn harvest_page(body: &str, page: &Url, session: &mut ScrapeSession, status: &dyn StatusSink) {
    let document = Html::parse_document(body);

    for email in extract_emails(&document) {
        if session.emails.insert(email.clone()) {
            status.status(&format!("Found Email: {email}"));
        }
    }

    let links = extract_links(&document);
    debug!("Found {} links on page {}", links.len(), page);
    for href in links {
        session.frontier.admit(&href, page, &session.domain);
    }
}
