use std::sync::Arc;

/// Default per-page fetch timeout in seconds
pub const PAGE_REQUEST_TIMEOUT_SEC: u64 = 5;
/// Default number of pages fetched before a run stops
pub const PAGE_BUDGET: usize = 50;
/// Default pause between consecutive fetches in milliseconds
pub const REQUEST_DELAY_MS: u64 = 1000;

/// Configuration for one scraping run
pub struct CrawlerConfig {
    /// Seed as the user typed it; a missing scheme is filled in at run start
    pub seed: String,
    pub max_pages: usize,
    pub request_delay_ms: u64,
    pub request_timeout_sec: u64,
    pub user_agent: String,
}

impl CrawlerConfig {
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            max_pages: PAGE_BUDGET,
            request_delay_ms: REQUEST_DELAY_MS,
            request_timeout_sec: PAGE_REQUEST_TIMEOUT_SEC,
            user_agent: concat!("mailsweep/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_request_delay(mut self, delay_ms: u64) -> Self {
        self.request_delay_ms = delay_ms;
        self
    }

    pub fn with_request_timeout(mut self, timeout_sec: u64) -> Self {
        self.request_timeout_sec = timeout_sec;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

pub type CrawlerConfigRef = Arc<CrawlerConfig>;
