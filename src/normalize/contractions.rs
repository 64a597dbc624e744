//! English contraction expansion.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static CONTRACTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\p{L}+['’]\p{L}+\b").unwrap());

/// Whole-word forms that the suffix rules below would get wrong.
const WHOLE_WORDS: &[(&str, &str)] = &[
    ("can't", "cannot"),
    ("won't", "will not"),
    ("shan't", "shall not"),
    ("ain't", "is not"),
    ("let's", "let us"),
    ("y'all", "you all"),
    ("ma'am", "madam"),
    ("o'clock", "of the clock"),
];

/// `'s` is only expanded after pronouns and question words; elsewhere it is a possessive.
const IS_HOSTS: &[&str] = &[
    "it", "he", "she", "that", "what", "there", "here", "who", "where", "how", "when", "why",
];

const SUFFIXES: &[(&str, &str)] = &[
    ("n't", " not"),
    ("'re", " are"),
    ("'ve", " have"),
    ("'ll", " will"),
    ("'d", " would"),
    ("'m", " am"),
];

/// Expand contractions such as `don't` or `they're`. Possessives are left alone.
pub fn expand_contractions(text: &str) -> String {
    CONTRACTION_RE
        .replace_all(text, |caps: &Captures<'_>| {
            let word = &caps[0];
            expand_word(word).unwrap_or_else(|| word.to_string())
        })
        .into_owned()
}

fn expand_word(word: &str) -> Option<String> {
    let lower = word.replace('’', "'").to_lowercase();

    let expanded = if let Some((_, full)) = WHOLE_WORDS.iter().find(|(short, _)| *short == lower) {
        full.to_string()
    } else if let Some(host) = lower.strip_suffix("'s").filter(|h| IS_HOSTS.contains(h)) {
        format!("{} is", host)
    } else {
        let (suffix, full) = SUFFIXES.iter().find(|(suffix, _)| lower.ends_with(suffix))?;
        format!("{}{}", &lower[..lower.len() - suffix.len()], full)
    };

    Some(match_initial_case(word, expanded))
}

fn match_initial_case(original: &str, expanded: String) -> String {
    let capitalized = original.chars().next().is_some_and(char::is_uppercase);
    if !capitalized {
        return expanded;
    }
    let mut chars = expanded.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => expanded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negations() {
        assert_eq!(expand_contractions("I don't know"), "I do not know");
        assert_eq!(expand_contractions("they can't stop"), "they cannot stop");
        assert_eq!(expand_contractions("he won't go"), "he will not go");
        assert_eq!(expand_contractions("She isn't here"), "She is not here");
    }

    #[test]
    fn test_pronoun_suffixes() {
        assert_eq!(expand_contractions("we're late"), "we are late");
        assert_eq!(expand_contractions("I've seen it"), "I have seen it");
        assert_eq!(expand_contractions("you'll see"), "you will see");
        assert_eq!(expand_contractions("It's over"), "It is over");
        assert_eq!(expand_contractions("I'm in"), "I am in");
    }

    #[test]
    fn test_possessives_are_kept() {
        assert_eq!(expand_contractions("India's captain"), "India's captain");
        assert_eq!(expand_contractions("the company's shares"), "the company's shares");
    }

    #[test]
    fn test_curly_apostrophe() {
        assert_eq!(expand_contractions("Don’t panic"), "Do not panic");
    }

    #[test]
    fn test_text_without_contractions_unchanged() {
        let text = "ISRO launches a satellite on Monday.";
        assert_eq!(expand_contractions(text), text);
    }
}
