//! HackenProof programs API: wire types and the HTTP client.

mod client;
mod types;

pub use client::HackenproofClient;
pub use types::{ProgramDetail, ProgramListing, ProgramSummary, Scope};

use crate::error::FetchError;

/// Where the crawler gets programs from.
///
/// Implemented by [`HackenproofClient`] for the real API; tests swap in
/// scripted sources.
pub trait ProgramSource {
    /// Slugs on one page of the program listing, in listing order.
    /// An empty page means the listing is exhausted.
    fn fetch_listing(&mut self, page: u32) -> Result<Vec<String>, FetchError>;

    /// Full scope list of one program
    fn fetch_detail(&mut self, slug: &str) -> Result<ProgramDetail, FetchError>;
}
