//! Run configuration.
//!
//! Every knob of the pipeline lives in [`PipelineConfig`]. The built-in
//! defaults reproduce the stock run (three Inshorts category pages, full
//! normalization, lexicon tagging, no retries). A YAML file can override any
//! subset of fields:
//!
//! ```yaml
//! seed_urls:
//!   - https://inshorts.com/en/read/business
//! normalize:
//!   lemmatize: false
//! fetch:
//!   retry:
//!     max_retries: 3
//! ```

use crate::error::{NewsError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, instrument};

pub const DEFAULT_SEED_URLS: [&str; 3] = [
    "https://inshorts.com/en/read/technology",
    "https://inshorts.com/en/read/sports",
    "https://inshorts.com/en/read/world",
];

pub const DEFAULT_OUTPUT_PATH: &str = "news.csv";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Category pages to scrape, in order. The last path segment names the category.
    pub seed_urls: Vec<String>,
    pub output_path: PathBuf,
    pub selectors: SelectorConfig,
    /// Fail a page whose headline and body counts differ instead of truncating.
    pub strict_pairing: bool,
    pub normalize: NormalizeOptions,
    /// Tagging backend identifier; `None` skips the tagging stage.
    pub tagger: Option<String>,
    pub fetch: FetchConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            seed_urls: DEFAULT_SEED_URLS.iter().map(|s| s.to_string()).collect(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            selectors: SelectorConfig::default(),
            strict_pairing: false,
            normalize: NormalizeOptions::pipeline_defaults(),
            tagger: Some("lexicon".to_string()),
            fetch: FetchConfig::default(),
        }
    }
}

/// CSS selectors locating headline and body text on a category page.
///
/// Cards are matched on the whole document; the text node is then looked up
/// inside each card.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub headline_card: String,
    pub headline_text: String,
    pub body_card: String,
    pub body_text: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            headline_card: "div.news-card-title.news-right-box".to_string(),
            headline_text: r#"span[itemprop="headline"]"#.to_string(),
            body_card: "div.news-card-content.news-right-box".to_string(),
            body_text: r#"div[itemprop="articleBody"]"#.to_string(),
        }
    }
}

/// Text-cleaning switches.
///
/// `Default` turns everything off, which leaves text untouched apart from
/// whitespace collapsing. Missing fields in a config file fall back to
/// [`NormalizeOptions::pipeline_defaults`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default = "NormalizeOptions::pipeline_defaults")]
pub struct NormalizeOptions {
    pub lemmatize: bool,
    pub lower_case: bool,
    pub strip_special_chars: bool,
    pub expand_contractions: bool,
    /// Drop digits along with special characters. Ignored unless
    /// `strip_special_chars` is set.
    pub remove_digits: bool,
    pub remove_stopwords: bool,
}

impl NormalizeOptions {
    /// The options a scrape run uses unless told otherwise.
    pub fn pipeline_defaults() -> Self {
        Self {
            lemmatize: true,
            lower_case: true,
            strip_special_chars: true,
            expand_contractions: false,
            remove_digits: false,
            remove_stopwords: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FetchConfig {
    pub user_agent: String,
    /// Per-request timeout. `None` waits as long as the server does.
    pub timeout_secs: Option<u64>,
    pub retry: RetryPolicy,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: None,
            retry: RetryPolicy::default(),
        }
    }
}

/// Retry policy applied at the fetch boundary.
///
/// The delay before attempt `n` (1-based) is
/// `min(base_delay * 2^(n-1), max_delay) + random(0..=jitter)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryPolicy {
    pub max_retries: usize,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
    pub jitter_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 0,
            base_delay_ms: 1_000,
            max_delay_ms: 30_000,
            jitter_ms: 250,
        }
    }
}

impl RetryPolicy {
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }
}

/// Load a YAML config file, or the built-in defaults when `path` is `None`.
#[instrument(level = "info")]
pub fn load_config(path: Option<&Path>) -> Result<PipelineConfig> {
    let config = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path).map_err(|e| {
                NewsError::Config(format!("cannot read {}: {}", path.display(), e))
            })?;
            let config: PipelineConfig = serde_yaml::from_str(&raw)?;
            info!(path = %path.display(), "Loaded configuration file");
            config
        }
        None => {
            info!("No config file given; using built-in defaults");
            PipelineConfig::default()
        }
    };

    if config.seed_urls.is_empty() {
        return Err(NewsError::Config("seed_urls must not be empty".to_string()));
    }
    Ok(config)
}
