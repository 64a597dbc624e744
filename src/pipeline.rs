//! End-to-end pipeline: scrape → assemble → normalize → tag → write.
//!
//! Stages run strictly one after another over the whole record set. Nothing
//! touches the output file until every stage has succeeded.

use crate::assemble;
use crate::config::{NormalizeOptions, PipelineConfig};
use crate::error::Result;
use crate::fetch::Fetch;
use crate::models::{Column, NewsRecord};
use crate::normalize;
use crate::outputs::table;
use crate::scrapers::inshorts::{self, Extractor};
use crate::tagger;
use itertools::Itertools;
use std::path::Path;
use std::time::Instant;
use tracing::{info, instrument};

/// Scrape every seed page into base records (headline, body, category) with `full_text` set.
#[instrument(level = "info", skip_all)]
pub async fn build_dataset<F: Fetch>(fetcher: &F, config: &PipelineConfig) -> Result<Vec<NewsRecord>> {
    let extractor = Extractor::new(&config.selectors, config.strict_pairing)?;
    let articles = inshorts::scrape_all(fetcher, &extractor, &config.seed_urls).await?;
    Ok(assemble::assemble(articles))
}

/// Add the derived text columns: normalized text, and tagged text when a backend is given.
///
/// Records without `full_text` get it assembled first.
#[instrument(level = "info", skip(records, options), fields(count = records.len()))]
pub fn enrich(
    records: &mut [NewsRecord],
    options: &NormalizeOptions,
    tagger_backend: Option<&str>,
) -> Result<()> {
    assemble::fill_full_text(records);

    let full_texts: Vec<&str> = records
        .iter()
        .map(|r| r.full_text.as_deref().unwrap_or_default())
        .collect();
    let normalized = normalize::normalize(&full_texts, options);

    let tagged = match tagger_backend {
        Some(id) => Some(tagger::tag_texts(&normalized, id)?),
        None => None,
    };

    for (i, (record, text)) in records.iter_mut().zip(normalized).enumerate() {
        record.normalized_text = Some(text);
        if let Some(tagged) = &tagged {
            record.tagged_text = Some(tagged[i].to_string());
        }
    }
    Ok(())
}

/// The column layout matching how far a record set has been processed.
pub fn layout(base_only: bool, tagged: bool) -> &'static [Column] {
    match (base_only, tagged) {
        (true, _) => &Column::BASE,
        (false, false) => &Column::DERIVED,
        (false, true) => &Column::TAGGED,
    }
}

/// The column layout that keeps every field a loaded record set carries.
///
/// Any `full_text` or `normalized_text` selects the derived layout, any
/// `tagged_text` the tagged one. Columns that are only partly filled are
/// written as empty fields.
pub fn layout_for(records: &[NewsRecord]) -> &'static [Column] {
    let tagged = records.iter().any(|r| r.tagged_text.is_some());
    let derived = tagged
        || records
            .iter()
            .any(|r| r.full_text.is_some() || r.normalized_text.is_some());
    layout(!derived, tagged)
}

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub records: usize,
    /// Record count per category, in first-seen order.
    pub per_category: Vec<(String, usize)>,
}

impl RunSummary {
    pub fn of(records: &[NewsRecord]) -> Self {
        let per_category = records
            .iter()
            .map(|r| r.news_category.clone())
            .dedup_with_count()
            .fold(Vec::<(String, usize)>::new(), |mut acc, (count, category)| {
                match acc.iter_mut().find(|(c, _)| *c == category) {
                    Some((_, n)) => *n += count,
                    None => acc.push((category, count)),
                }
                acc
            });
        Self {
            records: records.len(),
            per_category,
        }
    }
}

/// Run a full scrape and write the corpus to `config.output_path`.
///
/// The tagging backend is resolved before the first request, so an unknown
/// identifier fails without touching the network.
///
/// # Arguments
///
/// * `fetcher` - Page source, normally [`crate::fetch::http_fetcher`]
/// * `config` - Seeds, selectors, normalization and tagging settings
/// * `base_only` - Skip normalization and tagging and write the base layout
///
/// # Returns
///
/// A [`RunSummary`] of what was written. Any error leaves no output file.
#[instrument(level = "info", skip_all, fields(output = %config.output_path.display()))]
pub async fn run_scrape<F: Fetch>(
    fetcher: &F,
    config: &PipelineConfig,
    base_only: bool,
) -> Result<RunSummary> {
    let t0 = Instant::now();

    if let Some(id) = config.tagger.as_deref().filter(|_| !base_only) {
        tagger::backend(id)?;
    }

    let mut records = build_dataset(fetcher, config).await?;
    if !base_only {
        enrich(&mut records, &config.normalize, config.tagger.as_deref())?;
    }

    let columns = layout(base_only, !base_only && config.tagger.is_some());
    table::write_records(&config.output_path, &records, columns)?;

    let summary = RunSummary::of(&records);
    info!(
        records = summary.records,
        categories = ?summary.per_category,
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "Scrape run complete"
    );
    Ok(summary)
}

/// Load a corpus file, optionally recomputing derived columns.
///
/// # Arguments
///
/// * `path` - Corpus file to load
/// * `renormalize` - Recompute `full_text` and `normalized_text` with these options
/// * `tagger_backend` - Tag each record; without `renormalize` the existing
///   normalized text is tagged, falling back to `full_text`
///
/// # Returns
///
/// The loaded records with any requested columns filled in.
#[instrument(level = "info", skip(renormalize))]
pub fn import_corpus(
    path: &Path,
    renormalize: Option<&NormalizeOptions>,
    tagger_backend: Option<&str>,
) -> Result<Vec<NewsRecord>> {
    let mut records = table::load_records(path)?;
    if let Some(options) = renormalize {
        enrich(&mut records, options, tagger_backend)?;
    } else if let Some(id) = tagger_backend {
        let sources: Vec<String> = records
            .iter()
            .map(|r| {
                r.normalized_text
                    .clone()
                    .or_else(|| r.full_text.clone())
                    .unwrap_or_else(|| assemble::full_text(&r.news_headline, &r.news_article))
            })
            .collect();
        for (record, tagged) in records.iter_mut().zip(tagger::tag_texts(&sources, id)?) {
            record.tagged_text = Some(tagged.to_string());
        }
    }
    Ok(records)
}
