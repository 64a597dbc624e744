//! English stopword removal.
//!
//! Negations (`no`, `not`, `nor`) are deliberately absent from the list so
//! that removing stopwords does not flip the meaning of a sentence.

use once_cell::sync::Lazy;
use std::collections::HashSet;

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
        "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers",
        "herself", "it", "its", "itself", "they", "them", "their", "theirs", "themselves",
        "what", "which", "who", "whom", "this", "that", "these", "those", "am", "is", "are",
        "was", "were", "be", "been", "being", "have", "has", "had", "having", "do", "does",
        "did", "doing", "a", "an", "the", "and", "but", "if", "or", "because", "as", "until",
        "while", "of", "at", "by", "for", "with", "about", "against", "between", "into",
        "through", "during", "before", "after", "above", "below", "to", "from", "up", "down",
        "in", "out", "on", "off", "over", "under", "again", "further", "then", "once", "here",
        "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
        "most", "other", "some", "such", "only", "own", "same", "so", "than", "too", "very",
        "s", "t", "can", "will", "just", "should", "now",
    ]
    .into_iter()
    .collect()
});

/// Check a single token against the English stopword list.
///
/// The comparison ignores case. Negations (`no`, `not`, `nor`) are not in the
/// list.
///
/// # Arguments
///
/// * `word` - One token, without surrounding whitespace
///
/// # Returns
///
/// `true` when the token should be dropped by [`remove_stopwords`].
pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(word.to_lowercase().as_str())
}

/// Drop every whitespace-separated token that is a stopword.
pub fn remove_stopwords(text: &str) -> String {
    text.split_whitespace()
        .filter(|token| !is_stopword(token))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_function_words() {
        assert_eq!(
            remove_stopwords("the team won the match in the final over"),
            "team won match final"
        );
    }

    #[test]
    fn test_keeps_negations() {
        assert_eq!(remove_stopwords("this is not a drill"), "not drill");
        assert!(!is_stopword("no"));
        assert!(!is_stopword("nor"));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(is_stopword("The"));
        assert_eq!(remove_stopwords("The Prime Minister"), "Prime Minister");
    }
}
