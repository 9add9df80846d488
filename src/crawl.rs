//! Crawl driver
//!
//! Pages through the program listing starting at page 1 and, for every program
//! on a page, fetches its detail document and writes one record per in-scope
//! target. Runs strictly sequentially on the calling thread.
//!
//! Failure handling is asymmetric:
//! - a failed listing fetch stops the whole crawl
//! - a failed detail fetch skips that one program and moves on to the next
//!   slug on the same page
//!
//! Nothing is retried.

use std::fmt;
use std::io::{self, Write};
use std::time::Duration;

use tracing::{debug, error};

use crate::api::{ProgramDetail, ProgramSource};
use crate::config::CrawlConfig;
use crate::output::ScopeRecord;

/// Driver state between two steps
#[derive(Debug, Clone, PartialEq, Eq)]
enum CrawlState {
    /// Fetch this listing page next
    Paging(u32),
    /// Fetch `slugs[index]` next; past the end moves on to `page + 1`
    FetchingDetails {
        page: u32,
        slugs: Vec<String>,
        index: usize,
    },
    Done(StopReason),
}

/// Why the crawl ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// `page` came back with no programs
    Exhausted { page: u32 },
    /// Fetching `page` failed
    ListingFailed { page: u32 },
}

/// Counters gathered during a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Listing pages that returned at least one program
    pub pages: u32,
    pub programs_fetched: usize,
    pub programs_failed: usize,
    pub records_emitted: usize,
}

/// Result of a completed crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlSummary {
    pub stats: CrawlStats,
    pub stop: StopReason,
}

impl fmt::Display for CrawlSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stop = match self.stop {
            StopReason::Exhausted { page } => format!("listing exhausted at page {}", page),
            StopReason::ListingFailed { page } => format!("listing failed at page {}", page),
        };
        write!(
            f,
            "{} ({} pages, {} programs, {} skipped, {} records)",
            stop,
            self.stats.pages,
            self.stats.programs_fetched,
            self.stats.programs_failed,
            self.stats.records_emitted
        )
    }
}

/// Sequential listing → detail → records loop over a [`ProgramSource`]
pub struct Crawler<S> {
    source: S,
    config: CrawlConfig,
}

impl<S: ProgramSource> Crawler<S> {
    pub fn new(source: S, config: &CrawlConfig) -> Self {
        Self {
            source,
            config: config.clone(),
        }
    }

    /// Run until the listing is exhausted or a listing page fails, writing
    /// records to `out`. Only a failed write to `out` is returned as an error.
    pub fn run<W: Write>(&mut self, out: &mut W) -> io::Result<CrawlSummary> {
        let mut stats = CrawlStats::default();
        let mut state = CrawlState::Paging(1);

        let stop = loop {
            state = match state {
                CrawlState::Paging(page) => self.list_page(page, &mut stats),
                CrawlState::FetchingDetails { page, slugs, index } if index < slugs.len() => {
                    self.process_program(&slugs[index], out, &mut stats)?;
                    CrawlState::FetchingDetails {
                        page,
                        slugs,
                        index: index + 1,
                    }
                }
                CrawlState::FetchingDetails { page, .. } => CrawlState::Paging(page + 1),
                CrawlState::Done(reason) => break reason,
            };
        };

        out.flush()?;
        Ok(CrawlSummary { stats, stop })
    }

    pub fn into_source(self) -> S {
        self.source
    }

    fn list_page(&mut self, page: u32, stats: &mut CrawlStats) -> CrawlState {
        match self.source.fetch_listing(page) {
            Ok(slugs) if slugs.is_empty() => {
                debug!("Listing page {} is empty", page);
                CrawlState::Done(StopReason::Exhausted { page })
            }
            Ok(slugs) => {
                debug!("Listing page {}: {} programs", page, slugs.len());
                stats.pages += 1;
                CrawlState::FetchingDetails {
                    page,
                    slugs,
                    index: 0,
                }
            }
            Err(e) => {
                error!("Error fetching program slugs on page {}: {}", page, e);
                CrawlState::Done(StopReason::ListingFailed { page })
            }
        }
    }

    fn process_program<W: Write>(
        &mut self,
        slug: &str,
        out: &mut W,
        stats: &mut CrawlStats,
    ) -> io::Result<()> {
        let detail = match self.source.fetch_detail(slug) {
            Ok(detail) => detail,
            Err(e) => {
                error!("Error fetching details for slug {}: {}", slug, e);
                stats.programs_failed += 1;
                return Ok(());
            }
        };
        stats.programs_fetched += 1;

        let emitted = self.write_records(slug, &detail, out)?;
        debug!("Program {}: {} of {} scopes in scope", slug, emitted, detail.scopes.len());
        stats.records_emitted += emitted;

        pause(self.config.delay());
        Ok(())
    }

    fn write_records<W: Write>(
        &self,
        requested_slug: &str,
        detail: &ProgramDetail,
        out: &mut W,
    ) -> io::Result<usize> {
        // Link to the slug the platform echoes back; fall back to the one we asked for.
        let slug = if detail.slug.is_empty() {
            requested_slug
        } else {
            detail.slug.as_str()
        };
        let program_url = self.config.program_url(slug);

        let mut emitted = 0;
        for scope in detail.scopes.iter().filter(|s| s.is_in_scope()) {
            writeln!(out, "{}", ScopeRecord::from_scope(scope, &program_url))?;
            emitted += 1;
        }
        Ok(emitted)
    }
}

fn pause(delay: Duration) {
    if !delay.is_zero() {
        std::thread::sleep(delay);
    }
}
