//! # Inshorts News
//!
//! Builds a text corpus from Inshorts category pages. Each seed page is
//! fetched, its news cards are split into headline/body pairs, and the pairs
//! are written to a CSV file together with a normalized copy of the text and,
//! optionally, part-of-speech tags.
//!
//! ## Usage
//!
//! ```sh
//! inshorts_news scrape -o news.csv
//! inshorts_news import news.csv --renormalize --tagger universal -o news_tagged.csv
//! ```
//!
//! ## Architecture
//!
//! 1. **Scraping**: fetch each seed page in order and extract headline/body pairs
//! 2. **Assembly**: build records and the `full_text` column
//! 3. **Normalization**: lemmatize, lower-case and strip special characters
//! 4. **Tagging**: attach part-of-speech tags with the configured backend
//! 5. **Output**: write every record to one CSV file

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod assemble;
mod cli;
mod config;
mod error;
mod fetch;
mod models;
mod normalize;
mod outputs;
mod pipeline;
mod scrapers;
mod tagger;
mod utils;

use cli::{Cli, Command, ImportArgs, ScrapeArgs};
use config::PipelineConfig;
use outputs::table;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("inshorts_news starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = match config::load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            return Err(e.into());
        }
    };

    let outcome = match args.command {
        Command::Scrape(scrape) => run_scrape(config, scrape).await,
        Command::Import(import) => run_import(&config, import),
    };
    if let Err(e) = outcome {
        error!(error = %e, "Run failed; no output written");
        return Err(e.into());
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
    Ok(())
}

async fn run_scrape(mut config: PipelineConfig, args: ScrapeArgs) -> error::Result<()> {
    args.apply(&mut config);
    info!(
        seeds = config.seed_urls.len(),
        output = %config.output_path.display(),
        tagger = ?config.tagger,
        base_only = args.base_only,
        "Starting scrape"
    );

    let fetcher = fetch::http_fetcher(&config.fetch)?;
    let summary = pipeline::run_scrape(&fetcher, &config, args.base_only).await?;
    for (category, count) in &summary.per_category {
        info!(%category, count, "Category total");
    }
    Ok(())
}

fn run_import(config: &PipelineConfig, args: ImportArgs) -> error::Result<()> {
    let renormalize = args.renormalize.then_some(&config.normalize);
    let records = pipeline::import_corpus(&args.path, renormalize, args.tagger.as_deref())?;

    if let Some(output) = &args.output {
        table::write_records(output, &records, pipeline::layout_for(&records))?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        let summary = pipeline::RunSummary::of(&records);
        info!(
            path = %args.path.display(),
            records = summary.records,
            categories = ?summary.per_category,
            "Imported corpus"
        );
    }
    Ok(())
}
