use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use hpscope::{CrawlConfig, Crawler, HackenproofClient};

#[derive(Parser)]
#[command(name = "hpscope")]
#[command(about = "List in-scope targets of HackenProof bug bounty programs")]
#[command(version)]
struct Cli {
    /// TOML file overriding the built-in defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// API host (defaults to https://hackenproof.com)
    #[arg(long)]
    base_url: Option<String>,

    /// Pause after each program fetch, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Per-request timeout in seconds (no timeout by default)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Defaults, then the config file, then flags
    fn crawl_config(&self) -> Result<CrawlConfig> {
        let mut config = match &self.config {
            Some(path) => CrawlConfig::from_file(path)?,
            None => CrawlConfig::default(),
        };

        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(delay_ms) = self.delay_ms {
            config.delay_ms = delay_ms;
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.timeout_secs = Some(timeout_secs);
        }

        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Records go to stdout, so logs must stay on stderr
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = cli.crawl_config()?;
    tracing::debug!("Crawling {} as {:?}", config.base_url, config.user_agent);

    let client = HackenproofClient::new(&config);
    let mut crawler = Crawler::new(client, &config);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let summary = crawler
        .run(&mut out)
        .context("Failed to write records to stdout")?;

    tracing::info!("Crawl finished: {}", summary);
    Ok(())
}
