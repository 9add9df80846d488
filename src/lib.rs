//! hpscope - HackenProof scope lister
//!
//! Walks the HackenProof program listing page by page, fetches each program's
//! scope list and prints the in-scope targets as flat comma-separated records:
//!
//! ```text
//! <target>, https://hackenproof.com/programs/<slug>, <title>, <criticality>, <reward type>, <description>
//! ```
//!
//! The crawl is sequential and blocking, with a fixed pause between program
//! fetches. See [`crawl::Crawler`] for the failure policy.

pub mod api;
pub mod config;
pub mod crawl;
pub mod error;
pub mod output;

pub use api::{HackenproofClient, ProgramDetail, ProgramSource, Scope};
pub use config::CrawlConfig;
pub use crawl::{CrawlStats, CrawlSummary, Crawler, StopReason};
pub use error::FetchError;
