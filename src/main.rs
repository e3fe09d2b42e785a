mod config;
mod crawler;

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;
use log2::*;

use crawler::{CrawlerConfig, EmailScraper, ResultSink, StatusSink};

/// Terminal consumer of the engine sinks: prints progress lines as they
/// arrive and the sorted address list once the run completes.
struct ConsoleSink;

impl StatusSink for ConsoleSink {
    fn status(&self, line: &str) {
        println!("{line}");
    }
}

impl ResultSink for ConsoleSink {
    fn complete(&self, emails: HashSet<String>) {
        if emails.is_empty() {
            println!("No emails found.");
            return;
        }

        let mut sorted: Vec<String> = emails.into_iter().collect();
        sorted.sort();
        println!("Found {} unique email(s):", sorted.len());
        for email in sorted {
            println!("  {email}");
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = config::Config::new();
    cfg.validate()?;
    let _log2 = stdout()
        .module(true) // include module name
        .module_with_line(true) // include line number from module
        .module_filter(|module| module.starts_with("mailsweep"))
        .level(cfg.log_level.to_string())
        .start();

    let crawler_config = Arc::new(
        CrawlerConfig::new(cfg.domain.clone())
            .with_max_pages(cfg.max_pages)
            .with_request_delay(cfg.request_delay),
    );

    let scraper = EmailScraper::new(crawler_config);
    let stop = scraper.stop_handle();

    // Ctrl-C requests a stop; the current page is allowed to finish.
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Stop requested, letting the current page finish");
            stop.cancel();
        }
    });

    let sink = Arc::new(ConsoleSink);
    let status: Arc<dyn StatusSink> = sink.clone();
    let results: Arc<dyn ResultSink> = sink;

    let worker = tokio::spawn(async move { scraper.run(status, results).await });

    match worker.await? {
        Ok(()) => debug!("Scrape loop exited cleanly"),
        Err(e) => error!("Scraping failed: {}", e),
    }

    Ok(())
}
