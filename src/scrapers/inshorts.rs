//! Inshorts category page scraper.
//!
//! A listing page such as `https://inshorts.com/en/read/sports` holds a
//! stack of news cards. Every card has a title box and a content box:
//!
//! ```text
//! div.news-card-title.news-right-box    > span[itemprop="headline"]
//! div.news-card-content.news-right-box  > div[itemprop="articleBody"]
//! ```
//!
//! Title boxes and content boxes are collected separately and paired by
//! position. When the two lists differ in length the extra boxes are dropped
//! (with a warning) unless strict pairing is enabled, in which case the page
//! fails.

use crate::config::SelectorConfig;
use crate::error::{NewsError, Result};
use crate::fetch::Fetch;
use crate::models::RawArticle;
use crate::utils::{collapse_whitespace, truncate_for_log};
use futures::stream::{self, StreamExt, TryStreamExt};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Compiled selectors plus the pairing mode.
#[derive(Debug)]
pub struct Extractor {
    headline_card: Selector,
    headline_text: Selector,
    body_card: Selector,
    body_text: Selector,
    strict_pairing: bool,
}

impl Extractor {
    pub fn new(selectors: &SelectorConfig, strict_pairing: bool) -> Result<Self> {
        Ok(Self {
            headline_card: parse_selector(&selectors.headline_card)?,
            headline_text: parse_selector(&selectors.headline_text)?,
            body_card: parse_selector(&selectors.body_card)?,
            body_text: parse_selector(&selectors.body_text)?,
            strict_pairing,
        })
    }

    /// Pull every headline/body pair out of a listing page.
    ///
    /// `url` is only used for diagnostics.
    pub fn extract(&self, html: &str, category: &str, url: &str) -> Result<Vec<RawArticle>> {
        let document = Html::parse_document(html);

        let headlines: Vec<Option<String>> = document
            .select(&self.headline_card)
            .map(|card| inner_text(card, &self.headline_text))
            .collect();
        let bodies: Vec<Option<String>> = document
            .select(&self.body_card)
            .map(|card| inner_text(card, &self.body_text))
            .collect();

        if headlines.len() != bodies.len() {
            if self.strict_pairing {
                return Err(NewsError::ExtractionMismatch {
                    url: url.to_string(),
                    headlines: headlines.len(),
                    bodies: bodies.len(),
                });
            }
            warn!(
                %url,
                headlines = headlines.len(),
                bodies = bodies.len(),
                dropped = headlines.len().abs_diff(bodies.len()),
                "Headline and body counts differ; truncating to the shorter list"
            );
        }

        let articles: Vec<RawArticle> = headlines
            .into_iter()
            .zip(bodies)
            .map(|(headline, body)| RawArticle {
                headline,
                body,
                category: category.to_string(),
            })
            .collect();

        let incomplete = articles
            .iter()
            .filter(|a| a.headline.is_none() || a.body.is_none())
            .count();
        if incomplete > 0 {
            warn!(%url, incomplete, "Cards without a headline or body text node");
        }

        debug!(%url, count = articles.len(), "Extracted articles");
        Ok(articles)
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| NewsError::InvalidSelector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// All descendant text of the first `selector` match inside `card`.
fn inner_text(card: ElementRef<'_>, selector: &Selector) -> Option<String> {
    card.select(selector)
        .next()
        .map(|node| collapse_whitespace(&node.text().collect::<String>()))
}

/// The category a seed page covers: the last non-empty path segment of its URL.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(category_from_url("https://inshorts.com/en/read/sports")?, "sports");
/// ```
pub fn category_from_url(url: &str) -> Result<String> {
    let parsed = Url::parse(url).map_err(|_| NewsError::InvalidSeed(url.to_string()))?;
    parsed
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .map(|s| s.to_string())
        .ok_or_else(|| NewsError::InvalidSeed(url.to_string()))
}

/// Fetch one seed page and extract its articles.
#[instrument(level = "info", skip(fetcher, extractor))]
pub async fn scrape_category<F: Fetch>(
    fetcher: &F,
    extractor: &Extractor,
    url: &str,
) -> Result<Vec<RawArticle>> {
    let category = category_from_url(url)?;
    let html = fetcher.fetch(url).await?;
    let articles = extractor.extract(&html, &category, url)?;
    if articles.is_empty() {
        warn!(
            %url,
            page_preview = %truncate_for_log(&html, 300),
            "No news cards matched; the page layout may have changed"
        );
    }
    info!(%category, count = articles.len(), "Scraped category page");
    Ok(articles)
}

/// Scrape every seed page in order and concatenate the results.
///
/// Pages are fetched sequentially; the first error stops the batch.
#[instrument(level = "info", skip_all, fields(seeds = seed_urls.len()))]
pub async fn scrape_all<F: Fetch>(
    fetcher: &F,
    extractor: &Extractor,
    seed_urls: &[String],
) -> Result<Vec<RawArticle>> {
    let pages: Vec<Vec<RawArticle>> = stream::iter(seed_urls)
        .then(|url| async move { scrape_category(fetcher, extractor, url).await })
        .try_collect()
        .await?;

    let articles: Vec<RawArticle> = pages.into_iter().flatten().collect();
    info!(count = articles.len(), "Scraped all category pages");
    Ok(articles)
}
