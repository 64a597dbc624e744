//! Command-line interface definitions.
//!
//! Flags override the matching fields of the loaded [`PipelineConfig`]; the
//! config file itself can be given with `--config` or `INSHORTS_NEWS_CONFIG`.

use crate::config::PipelineConfig;
use crate::tagger;
use clap::builder::PossibleValuesParser;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for the Inshorts corpus builder.
///
/// # Examples
///
/// ```sh
/// # Scrape the default category pages into ./news.csv
/// inshorts_news scrape
///
/// # Scrape two categories without tagging
/// inshorts_news scrape --seed https://inshorts.com/en/read/business \
///     --seed https://inshorts.com/en/read/science --no-tag -o data/news.csv
///
/// # Re-import a corpus and dump it as JSON
/// inshorts_news import data/news.csv --json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to a YAML config file
    #[arg(short, long, env = "INSHORTS_NEWS_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scrape the seed pages and write the corpus file
    Scrape(ScrapeArgs),
    /// Load a corpus file, optionally re-deriving its text columns
    Import(ImportArgs),
}

#[derive(Args, Debug)]
pub struct ScrapeArgs {
    /// Output CSV path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Category page to scrape; repeat for several. Replaces the configured seeds.
    #[arg(long = "seed")]
    pub seeds: Vec<String>,

    /// Skip part-of-speech tagging
    #[arg(long)]
    pub no_tag: bool,

    /// Tagging backend
    #[arg(
        long,
        conflicts_with = "no_tag",
        ignore_case = true,
        value_parser = PossibleValuesParser::new(tagger::BACKENDS)
    )]
    pub tagger: Option<String>,

    /// Write only headline, article and category
    #[arg(long)]
    pub base_only: bool,

    /// Fail a page whose headline and body counts differ
    #[arg(long)]
    pub strict: bool,

    /// Retry transient fetch failures this many times
    #[arg(long)]
    pub retries: Option<usize>,
}

impl ScrapeArgs {
    /// Fold the flags into `config`.
    pub fn apply(&self, config: &mut PipelineConfig) {
        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        if !self.seeds.is_empty() {
            config.seed_urls = self.seeds.clone();
        }
        if self.no_tag {
            config.tagger = None;
        } else if let Some(tagger) = &self.tagger {
            config.tagger = Some(tagger.clone());
        }
        if self.strict {
            config.strict_pairing = true;
        }
        if let Some(retries) = self.retries {
            config.fetch.retry.max_retries = retries;
        }
    }
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Corpus CSV to load
    pub path: PathBuf,

    /// Recompute full_text and normalized_text with the configured options
    #[arg(long)]
    pub renormalize: bool,

    /// Tag the loaded text with this backend
    #[arg(long, ignore_case = true, value_parser = PossibleValuesParser::new(tagger::BACKENDS))]
    pub tagger: Option<String>,

    /// Write the (re-derived) corpus to this path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the records to stdout as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrape_defaults() {
        let cli = Cli::parse_from(["inshorts_news", "scrape"]);
        let Command::Scrape(args) = cli.command else {
            panic!("expected scrape");
        };
        let mut config = PipelineConfig::default();
        args.apply(&mut config);
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_scrape_flags_override_config() {
        let cli = Cli::parse_from([
            "inshorts_news",
            "scrape",
            "-o",
            "/tmp/out.csv",
            "--seed",
            "https://inshorts.com/en/read/business",
            "--seed",
            "https://inshorts.com/en/read/science",
            "--no-tag",
            "--strict",
            "--retries",
            "3",
        ]);
        let Command::Scrape(args) = cli.command else {
            panic!("expected scrape");
        };
        let mut config = PipelineConfig::default();
        args.apply(&mut config);

        assert_eq!(config.output_path, PathBuf::from("/tmp/out.csv"));
        assert_eq!(config.seed_urls.len(), 2);
        assert!(config.tagger.is_none());
        assert!(config.strict_pairing);
        assert_eq!(config.fetch.retry.max_retries, 3);
    }

    #[test]
    fn test_no_tag_conflicts_with_tagger() {
        let result = Cli::try_parse_from(["inshorts_news", "scrape", "--no-tag", "--tagger", "universal"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_tagger_rejected_at_parse_time() {
        let result = Cli::try_parse_from(["inshorts_news", "import", "news.csv", "--tagger", "nltk"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_tagger_accepts_any_case() {
        let cli = Cli::parse_from(["inshorts_news", "scrape", "--tagger", "Universal"]);
        let Command::Scrape(args) = cli.command else {
            panic!("expected scrape");
        };
        assert!(args.tagger.as_deref().is_some_and(|t| t.eq_ignore_ascii_case("universal")));
    }

    #[test]
    fn test_import_args() {
        let cli = Cli::parse_from([
            "inshorts_news",
            "--config",
            "news.yaml",
            "import",
            "news.csv",
            "--renormalize",
            "--tagger",
            "universal",
            "--json",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("news.yaml")));
        let Command::Import(args) = cli.command else {
            panic!("expected import");
        };
        assert_eq!(args.path, PathBuf::from("news.csv"));
        assert!(args.renormalize);
        assert_eq!(args.tagger.as_deref(), Some("universal"));
        assert!(args.json);
        assert!(args.output.is_none());
    }
}
