use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

/// Log levels as defined in log2 crate
#[derive(Debug, Serialize, Deserialize, Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// Program arguments for the terminal front end. Engine behaviour itself is
/// described by `crawler::CrawlerConfig`; this struct only collects what the
/// user typed.
#[derive(Parser, Debug, Serialize, Deserialize)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Domain or URL to scrape for emails (https assumed when no scheme)
    #[arg(short, long)]
    pub domain: String,
    /// Maximum number of pages to fetch in one run
    #[arg(long, default_value = "50")]
    pub max_pages: usize,
    /// Delay between requests in milliseconds
    #[arg(short, long, default_value = "1000")]
    pub request_delay: u64,
    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", value_enum)]
    pub log_level: LogLevel,
}

impl Config {
    pub fn new() -> Self {
        Self::parse()
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.domain.trim().is_empty() {
            anyhow::bail!("domain must not be empty");
        }
        if self.max_pages == 0 {
            anyhow::bail!("max_pages must be greater than 0");
        }
        Ok(())
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        write!(f, "{}", s)
    }
}
