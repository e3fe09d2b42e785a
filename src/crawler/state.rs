use std::collections::{HashSet, VecDeque};

use anyhow::{Result, anyhow};
use url::Url;

use super::scrape::resolve_url;

/// Discovered-but-unvisited targets plus everything already handed out for
/// fetching. The pending queue is FIFO, so the crawl walks the site
/// breadth-first from the seed.
pub struct Frontier {
    pending: VecDeque<Url>,
    enqueued: HashSet<Url>,
    visited: HashSet<Url>,
}

impl Frontier {
    pub fn new(seed: Url) -> Self {
        let mut pending = VecDeque::new();
        let mut enqueued = HashSet::new();
        enqueued.insert(seed.clone());
        pending.push_back(seed);

        Self {
            pending,
            enqueued,
            visited: HashSet::new(),
        }
    }

    /// Resolve `href` against the page it was found on and queue it if it
    /// stays on `domain`, speaks http(s), and has not already been fetched.
    /// Unparsable links are dropped rather than treated as errors, and
    /// queueing a URL that is already pending is a no-op.
    pub fn admit(&mut self, href: &str, base: &Url, domain: &str) -> bool {
        let Ok(url) = resolve_url(href, base) else {
            return false;
        };
        if url.host_str() != Some(domain) {
            return false;
        }
        if url.scheme() != "http" && url.scheme() != "https" {
            return false;
        }
        if self.visited.contains(&url) {
            return false;
        }

        if self.enqueued.insert(url.clone()) {
            self.pending.push_back(url);
        }
        true
    }

    /// Pop the next target, marking it visited before any fetch can happen.
    /// A URL handed out once is never handed out again within this session.
    pub fn next_target(&mut self) -> Option<Url> {
        while let Some(url) = self.pending.pop_front() {
            if self.visited.insert(url.clone()) {
                return Some(url);
            }
        }
        None
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}

/// Per-run crawl state: owned by the running loop for its whole lifetime and
/// discarded when the run ends. Nothing here is shared or persisted.
pub struct ScrapeSession {
    pub domain: String,
    pub frontier: Frontier,
    pub emails: HashSet<String>,
    pub pages_crawled: usize,
}

impl ScrapeSession {
    pub fn new(seed: Url) -> Result<Self> {
        let domain = seed
            .host_str()
            .ok_or_else(|| anyhow!("seed URL has no host: {}", seed))?
            .to_string();

        Ok(Self {
            domain,
            frontier: Frontier::new(seed),
            emails: HashSet::new(),
            pages_crawled: 0,
        })
    }
}
