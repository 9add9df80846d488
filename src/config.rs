//! Crawl configuration
//!
//! Every value has a built-in default matching the public HackenProof API, so a
//! plain `hpscope` run needs no configuration at all. A TOML file and CLI flags
//! can override individual values (mostly useful for pointing the crawler at a
//! mock server and disabling the inter-request delay in tests).

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default API host
pub const DEFAULT_BASE_URL: &str = "https://hackenproof.com";

/// Default prefix of the program link written to each record
pub const DEFAULT_PROGRAM_URL_BASE: &str = "https://hackenproof.com/programs";

/// Desktop browser user agent; the API rejects obvious bots.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/137.0.0.0 Safari/537.36";

/// Default `with_abilities[]` listing filter
pub const DEFAULT_ABILITY: &str = "Web";

/// Pause after each successful detail fetch
pub const DEFAULT_DELAY_MS: u64 = 500;

const LISTING_PATH: &str = "/programs-api/programs";

/// Crawler configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CrawlConfig {
    /// API host, e.g. "https://hackenproof.com"
    pub base_url: String,

    /// Prefix of the program link emitted for every in-scope target
    pub program_url_base: String,

    /// User-Agent header sent with every request
    pub user_agent: String,

    /// Ability filter applied to the program listing
    pub ability: String,

    /// Milliseconds to sleep after each successful detail fetch (0 disables)
    pub delay_ms: u64,

    /// Whole-request timeout in seconds. `None` waits indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            program_url_base: DEFAULT_PROGRAM_URL_BASE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            ability: DEFAULT_ABILITY.to_string(),
            delay_ms: DEFAULT_DELAY_MS,
            timeout_secs: None,
        }
    }
}

impl CrawlConfig {
    /// Load configuration from a TOML file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: CrawlConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// URL of one page of the program listing
    pub fn listing_url(&self, page: u32) -> String {
        format!(
            "{}{}?not_audits=true&search&page={}&order_by[published_date]=desc&with_abilities[]={}",
            self.base_url.trim_end_matches('/'),
            LISTING_PATH,
            page,
            self.ability
        )
    }

    /// URL of a program's detail document
    pub fn detail_url(&self, slug: &str) -> String {
        format!(
            "{}{}/{}",
            self.base_url.trim_end_matches('/'),
            LISTING_PATH,
            encode_url_path_segment(slug)
        )
    }

    /// Public link to a program, as written to the output records
    pub fn program_url(&self, slug: &str) -> String {
        format!("{}/{}", self.program_url_base.trim_end_matches('/'), slug)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn encode_url_path_segment(segment: &str) -> String {
    // RFC3986 unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~"
    let mut out = String::with_capacity(segment.len());
    for &b in segment.as_bytes() {
        let is_unreserved =
            matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~');
        if is_unreserved {
            out.push(b as char);
        } else {
            out.push('%');
            out.push_str(&format!("{:02X}", b));
        }
    }
    out
}
