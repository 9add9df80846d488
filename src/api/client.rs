//! Blocking HTTP client for the HackenProof programs API.

use serde::de::DeserializeOwned;

use super::types::{ProgramDetail, ProgramListing};
use super::ProgramSource;
use crate::config::CrawlConfig;
use crate::error::FetchError;

/// `ProgramSource` backed by the live API (or anything serving the same routes)
#[derive(Clone)]
pub struct HackenproofClient {
    config: CrawlConfig,
    agent: ureq::Agent,
}

impl HackenproofClient {
    pub fn new(config: &CrawlConfig) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Self {
            config: config.clone(),
            agent: builder.build(),
        }
    }

    /// GET `url` and decode the body. No retries.
    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let response = self
            .agent
            .get(url)
            .set("User-Agent", &self.config.user_agent)
            .call()?;

        let body = response.into_string()?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl ProgramSource for HackenproofClient {
    fn fetch_listing(&mut self, page: u32) -> Result<Vec<String>, FetchError> {
        let url = self.config.listing_url(page);
        let listing: ProgramListing = self.get_json(&url)?;
        Ok(listing.slugs())
    }

    fn fetch_detail(&mut self, slug: &str) -> Result<ProgramDetail, FetchError> {
        let url = self.config.detail_url(slug);
        self.get_json(&url)
    }
}
