//! Text normalization.
//!
//! [`normalize`] applies the transformations enabled in a
//! [`NormalizeOptions`] to every input string, in this order:
//!
//! 1. contraction expansion (`don't` → `do not`)
//! 2. case folding
//! 3. lemmatization ([`lemmatize`])
//! 4. special-character stripping, optionally including digits
//! 5. stopword removal
//! 6. whitespace collapsing (always)
//!
//! The output always has the same length and order as the input.

pub mod contractions;
pub mod lemmatize;
pub mod stopwords;

use crate::config::NormalizeOptions;
use crate::utils::collapse_whitespace;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, instrument};

static SEPARATOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-‐–—/_]").unwrap());
static SPECIAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\p{L}\p{M}\p{N}\s]").unwrap());
static SPECIAL_AND_DIGIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\p{L}\p{M}\s]").unwrap());

/// Normalize a batch of texts.
///
/// Each text goes through [`normalize_text`] on its own; nothing is shared
/// between entries.
///
/// # Arguments
///
/// * `texts` - The texts to clean, typically the `full_text` column
/// * `options` - Which transformations to apply
///
/// # Returns
///
/// One normalized string per input, in input order. With every option off the
/// result equals the input apart from collapsed whitespace.
#[instrument(level = "info", skip_all, fields(count = texts.len(), ?options))]
pub fn normalize<S: AsRef<str>>(texts: &[S], options: &NormalizeOptions) -> Vec<String> {
    let out: Vec<String> = texts
        .iter()
        .map(|text| normalize_text(text.as_ref(), options))
        .collect();
    debug!(count = out.len(), "Normalized texts");
    out
}

/// Normalize a single text.
pub fn normalize_text(text: &str, options: &NormalizeOptions) -> String {
    let mut text = text.to_string();

    if options.expand_contractions {
        text = contractions::expand_contractions(&text);
    }
    if options.lower_case {
        text = text.to_lowercase();
    }
    if options.lemmatize {
        text = lemmatize::lemmatize_text(&text);
    }
    if options.strip_special_chars {
        text = strip_special_chars(&text, options.remove_digits);
    }
    if options.remove_stopwords {
        text = stopwords::remove_stopwords(&text);
    }

    collapse_whitespace(&text)
}

/// Remove everything that is not a letter, digit or whitespace.
///
/// Dashes, slashes and underscores become spaces so compounds split into
/// words instead of fusing. With `remove_digits` digits go too.
pub fn strip_special_chars(text: &str, remove_digits: bool) -> String {
    let spaced = SEPARATOR_RE.replace_all(text, " ");
    let re = if remove_digits {
        &SPECIAL_AND_DIGIT_RE
    } else {
        &SPECIAL_RE
    };
    re.replace_all(&spaced, "").into_owned()
}
