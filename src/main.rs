//! Lexicrawl main entry point
//!
//! Command-line interface for the lexicrawl word-frequency crawler.

use anyhow::Context;
use clap::Parser;
use lexicrawl::config::{load_config_with_hash, Config, Implementation};
use lexicrawl::crawler::{crawl, effective_parallelism};
use lexicrawl::output::{print_report, write_report};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Lexicrawl: a bounded word-frequency web crawler
///
/// Crawls the link graph reachable from the configured start pages, within
/// a depth budget and wall-clock timeout, and reports the most popular
/// words across every page visited.
#[derive(Parser, Debug)]
#[command(name = "lexicrawl")]
#[command(version)]
#[command(about = "A bounded word-frequency web crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,

    /// Run the single-threaded reference crawler instead of the
    /// concurrent engine
    #[arg(long)]
    sequential: bool,

    /// Write the JSON report to this path, overriding the configuration
    #[arg(long, value_name = "PATH")]
    report_path: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    // Apply CLI overrides
    if cli.sequential {
        config.crawl.implementation = Implementation::Sequential;
    }
    if let Some(path) = &cli.report_path {
        config.output.report_path = Some(path.to_string_lossy().into_owned());
    }

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    // The worker-pool budget is a runtime property, so the runtime is built
    // by hand with the clamped thread count
    let workers = effective_parallelism(config.crawl.parallelism);
    tracing::info!(
        "Starting {} crawl with {} worker threads",
        match config.crawl.implementation {
            Implementation::Parallel => "parallel",
            Implementation::Sequential => "sequential",
        },
        workers
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(workers)
        .enable_all()
        .build()
        .context("failed to build async runtime")?;

    let result = runtime
        .block_on(crawl(&config))
        .context("crawl failed")?;

    if let Some(path) = &config.output.report_path {
        write_report(&result, std::path::Path::new(path))?;
    }

    print_report(&result);

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("lexicrawl=info,warn"),
            1 => EnvFilter::new("lexicrawl=debug,info"),
            2 => EnvFilter::new("lexicrawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== Lexicrawl Dry Run ===\n");

    println!("Crawl Configuration:");
    println!("  Max depth: {}", config.crawl.max_depth);
    println!("  Timeout: {}s", config.crawl.timeout_seconds);
    println!("  Popular word count: {}", config.crawl.popular_word_count);
    println!(
        "  Worker threads: {}",
        effective_parallelism(config.crawl.parallelism)
    );
    println!("  Implementation: {:?}", config.crawl.implementation);

    println!("\nStart Pages ({}):", config.crawl.start_pages.len());
    for page in &config.crawl.start_pages {
        println!("  - {}", page);
    }

    if !config.filters.ignored_urls.is_empty() {
        println!("\nIgnored URL Patterns ({}):", config.filters.ignored_urls.len());
        for pattern in &config.filters.ignored_urls {
            println!("  - {}", pattern);
        }
    }

    if !config.filters.ignored_words.is_empty() {
        println!(
            "\nIgnored Word Patterns ({}):",
            config.filters.ignored_words.len()
        );
        for pattern in &config.filters.ignored_words {
            println!("  - {}", pattern);
        }
    }

    println!("\nOutput:");
    match &config.output.report_path {
        Some(path) => println!("  Report: {}", path),
        None => println!("  Report: stdout summary only"),
    }

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would start crawling from {} start page(s)",
        config.crawl.start_pages.len()
    );
}
