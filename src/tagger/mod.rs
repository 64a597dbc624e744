//! Part-of-speech tagging of normalized text.
//!
//! Backends implement [`TagBackend`] and are selected by name:
//!
//! | Identifier | Backend | Tagset |
//! |------------|---------|--------|
//! | `lexicon`, `default` | [`lexicon::LexiconTagger`] | Penn Treebank |
//! | `universal` | [`universal::UniversalTagger`] | Universal (coarse) |
//!
//! Tagged text is stored as `token/TAG` pairs separated by single spaces,
//! e.g. `india/NNP win/VBP series/NN`.

pub mod lexicon;
pub mod universal;

use crate::error::{NewsError, Result};
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, instrument};

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{L}\p{M}]+(?:['’][\p{L}\p{M}]+)*|\p{N}+(?:[.,:]\p{N}+)*|[^\s\p{L}\p{M}\p{N}]")
        .unwrap()
});

/// Identifiers accepted by [`backend`].
pub const BACKENDS: [&str; 3] = ["lexicon", "default", "universal"];

/// A tagged token sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaggedText(pub Vec<(String, String)>);

impl TaggedText {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(_, tag)| tag.as_str())
    }
}

impl fmt::Display for TaggedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0.iter().map(|(token, tag)| format!("{}/{}", token, tag)).join(" ")
        )
    }
}

impl FromStr for TaggedText {
    type Err = NewsError;

    fn from_str(s: &str) -> Result<Self> {
        s.split_whitespace()
            .map(|pair| {
                pair.rsplit_once('/')
                    .filter(|(token, tag)| !token.is_empty() && !tag.is_empty())
                    .map(|(token, tag)| (token.to_string(), tag.to_string()))
                    .ok_or_else(|| NewsError::Config(format!("malformed tagged token `{}`", pair)))
            })
            .collect::<Result<Vec<_>>>()
            .map(TaggedText)
    }
}

/// A part-of-speech tagging backend.
pub trait TagBackend: fmt::Debug {
    fn name(&self) -> &'static str;

    /// Tag already tokenized text.
    fn tag_tokens(&self, tokens: &[&str]) -> Vec<String>;

    fn tag(&self, text: &str) -> TaggedText {
        let tokens = tokenize(text);
        let tags = self.tag_tokens(&tokens);
        TaggedText(
            tokens
                .into_iter()
                .map(str::to_string)
                .zip(tags)
                .collect(),
        )
    }
}

/// Look up a backend by identifier.
pub fn backend(id: &str) -> Result<Box<dyn TagBackend>> {
    match id.to_ascii_lowercase().as_str() {
        "lexicon" | "default" => Ok(Box::new(lexicon::LexiconTagger::new())),
        "universal" => Ok(Box::new(universal::UniversalTagger::new())),
        _ => Err(NewsError::UnknownTagger(id.to_string())),
    }
}

/// Tag a batch of texts with the named backend. Output order matches input order.
#[instrument(level = "info", skip(texts), fields(count = texts.len()))]
pub fn tag_texts<S: AsRef<str>>(texts: &[S], backend_id: &str) -> Result<Vec<TaggedText>> {
    let tagger = backend(backend_id)?;
    let tagged: Vec<TaggedText> = texts.iter().map(|t| tagger.tag(t.as_ref())).collect();
    debug!(
        backend = tagger.name(),
        tokens = tagged.iter().map(TaggedText::len).sum::<usize>(),
        empty = tagged.iter().filter(|t| t.is_empty()).count(),
        "Tagged texts"
    );
    Ok(tagged)
}

/// Split text into words, numbers and single punctuation marks.
pub fn tokenize(text: &str) -> Vec<&str> {
    TOKEN_RE.find_iter(text).map(|m| m.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_splits_punctuation() {
        assert_eq!(
            tokenize("India's GDP grew 7.5% in Q1, report says."),
            vec!["India's", "GDP", "grew", "7.5", "%", "in", "Q", "1", ",", "report", "says", "."]
        );
    }

    #[test]
    fn test_unknown_backend_fails() {
        let err = tag_texts(&["hello world"], "nltk-perceptron").unwrap_err();
        assert!(matches!(err, NewsError::UnknownTagger(ref id) if id == "nltk-perceptron"));
    }

    #[test]
    fn test_every_listed_backend_resolves() {
        for id in BACKENDS {
            assert!(backend(id).is_ok(), "backend {}", id);
        }
        assert_eq!(backend("Lexicon").unwrap().name(), "lexicon");
    }

    #[test]
    fn test_tag_texts_preserves_length_and_order() {
        let texts = vec!["the team win".to_string(), String::new(), "stock fall".to_string()];
        let tagged = tag_texts(&texts, "lexicon").unwrap();
        assert_eq!(tagged.len(), 3);
        assert_eq!(tagged[0].0[0].0, "the");
        assert!(tagged[1].is_empty());
        assert_eq!(tagged[2].0[0].0, "stock");
    }

    #[test]
    fn test_display_and_parse() {
        let tagged = TaggedText(vec![
            ("the".into(), "DT".into()),
            ("/".into(), "SYM".into()),
            ("match".into(), "NN".into()),
        ]);
        let text = tagged.to_string();
        assert_eq!(text, "the/DT //SYM match/NN");
        assert_eq!(text.parse::<TaggedText>().unwrap(), tagged);
    }

    #[test]
    fn test_parse_rejects_untagged_token() {
        assert!("the/DT match".parse::<TaggedText>().is_err());
        assert!("".parse::<TaggedText>().unwrap().is_empty());
    }
}
