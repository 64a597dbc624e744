//! Lexicon and suffix based Penn Treebank tagger.
//!
//! Each token gets a tag from, in order: the closed-class lexicon, number and
//! punctuation shapes, capitalization, then word suffixes (falling back to
//! `NN`). A second pass fixes the commonest guessing errors from context:
//!
//! - a guessed verb right after a determiner or possessive is a noun (or an
//!   adjective for `-ed`/`-ing` forms)
//! - a guessed noun or verb after `to` or a modal is a base verb
//! - a past-tense guess after a form of `have` or `be` is a past participle

use super::TagBackend;
use once_cell::sync::Lazy;
use std::collections::HashMap;

static LEXICON: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let groups: &[(&'static str, &[&'static str])] = &[
        ("DT", &["the", "a", "an", "this", "that", "these", "those", "every", "each", "some",
                 "any", "no", "another", "either", "neither", "all", "both"]),
        ("CC", &["and", "or", "but", "nor", "yet", "plus"]),
        ("IN", &["of", "in", "on", "at", "by", "for", "with", "about", "against", "between",
                 "into", "through", "during", "before", "after", "above", "below", "from",
                 "up", "down", "over", "under", "since", "until", "while", "because", "if",
                 "though", "although", "whether", "than", "as", "across", "amid", "among",
                 "despite", "near", "per", "via", "within", "without", "towards", "upon",
                 "like", "unlike", "off", "out"]),
        ("TO", &["to"]),
        ("PRP", &["i", "me", "you", "he", "him", "she", "her", "it", "we", "us", "they",
                  "them", "myself", "yourself", "himself", "herself", "itself", "ourselves",
                  "themselves"]),
        ("PRP$", &["my", "your", "his", "its", "our", "their"]),
        ("MD", &["can", "could", "may", "might", "must", "shall", "should", "will", "would",
                 "cannot"]),
        ("WDT", &["which", "whatever", "whichever"]),
        ("WP", &["who", "whom", "what", "whoever"]),
        ("WP$", &["whose"]),
        ("WRB", &["when", "where", "why", "how", "whenever", "wherever"]),
        ("EX", &["there"]),
        ("RB", &["not", "very", "also", "just", "now", "then", "here", "too", "so", "again",
                 "already", "still", "even", "never", "always", "often", "soon", "once",
                 "only", "ago", "almost", "later", "yet", "ever", "however", "perhaps",
                 "rather", "quite", "together", "away", "back", "n't"]),
        ("RBR", &["more", "less"]),
        ("RBS", &["most", "least"]),
        ("JJ", &["new", "other", "many", "few", "much", "own", "same", "such", "good", "bad",
                 "big", "small", "high", "low", "old", "young", "long", "last", "first",
                 "next", "several", "former", "major", "top", "key", "national", "global",
                 "local", "public", "private", "early", "late", "senior", "chief"]),
        ("JJR", &["better", "worse", "bigger", "higher", "lower", "larger", "greater", "older"]),
        ("JJS", &["best", "worst", "biggest", "highest", "lowest", "largest", "greatest"]),
        ("CD", &["one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
                 "eleven", "twelve", "twenty", "thirty", "forty", "fifty", "hundred",
                 "thousand", "million", "billion", "trillion", "lakh", "crore", "zero"]),
        ("VB", &["be", "have", "do", "say", "make", "go", "take", "get", "give", "see",
                 "know", "come", "think", "win", "rise", "lose", "become", "find", "tell",
                 "meet", "lead", "run", "hold", "keep", "leave", "begin", "bring", "pay"]),
        ("VBZ", &["is", "has", "does", "says", "goes"]),
        ("VBP", &["am", "are"]),
        ("VBD", &["was", "were", "had", "did", "said", "made", "went", "took", "came",
                  "saw", "got", "gave", "knew", "told", "became", "found", "won", "lost",
                  "rose", "fell", "led", "ran", "held", "met", "paid", "began", "brought"]),
        ("VBN", &["been", "done", "gone", "taken", "seen", "given", "known", "become",
                  "shown", "written", "begun", "chosen", "fallen", "risen"]),
        ("VBG", &["being", "having", "doing", "going"]),
        ("UH", &["yes", "oh", "hey", "wow", "please"]),
    ];

    let mut map = HashMap::new();
    for (tag, words) in groups {
        for word in *words {
            map.entry(*word).or_insert(*tag);
        }
    }
    map
});

const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "able", "ible", "ive", "less", "ical", "ic", "ish", "ary", "ial", "ant", "ent",
];

const NOUN_SUFFIXES: &[&str] = &[
    "tion", "sion", "ment", "ness", "ity", "ance", "ence", "ship", "ism", "ist", "hood", "er",
    "or", "age", "ure", "dom",
];

const HAVE_FORMS: &[&str] = &["have", "has", "had", "having"];
const BE_FORMS: &[&str] = &["be", "is", "are", "am", "was", "were", "been", "being"];

/// Penn Treebank tags from a closed-class lexicon and suffix rules.
#[derive(Debug, Default)]
pub struct LexiconTagger;

impl LexiconTagger {
    pub fn new() -> Self {
        Self
    }
}

impl TagBackend for LexiconTagger {
    fn name(&self) -> &'static str {
        "lexicon"
    }

    fn tag_tokens(&self, tokens: &[&str]) -> Vec<String> {
        let mut tagged: Vec<(&'static str, bool)> = tokens
            .iter()
            .enumerate()
            .map(|(i, token)| initial_tag(token, i == 0 || is_sentence_end(tokens[i - 1])))
            .collect();

        for i in 1..tokens.len() {
            let (tag, guessed) = tagged[i];
            if !guessed {
                continue;
            }
            let prev_tag = tagged[i - 1].0;
            let prev_word = tokens[i - 1].to_lowercase();

            let fixed = if matches!(prev_tag, "DT" | "PRP$" | "JJ") && tag.starts_with("VB") {
                if matches!(tag, "VBD" | "VBN" | "VBG") { "JJ" } else { "NN" }
            } else if matches!(prev_tag, "TO" | "MD") && matches!(tag, "NN" | "VBP" | "VBZ" | "VBD") {
                "VB"
            } else if tag == "VBD"
                && (HAVE_FORMS.contains(&prev_word.as_str()) || BE_FORMS.contains(&prev_word.as_str()))
            {
                "VBN"
            } else {
                tag
            };
            tagged[i].0 = fixed;
        }

        tagged.into_iter().map(|(tag, _)| tag.to_string()).collect()
    }
}

fn is_sentence_end(token: &str) -> bool {
    matches!(token, "." | "!" | "?")
}

/// Tag a token in isolation. The flag says whether the tag is a guess that
/// context may override.
fn initial_tag(token: &str, sentence_start: bool) -> (&'static str, bool) {
    if let Some(tag) = punctuation_tag(token) {
        return (tag, false);
    }
    if token.chars().all(|c| c.is_numeric() || matches!(c, '.' | ',' | ':')) {
        return ("CD", false);
    }

    let lower = token.to_lowercase();
    if let Some(&tag) = LEXICON.get(lower.as_str()) {
        return (tag, false);
    }

    let capitalized = token.chars().next().is_some_and(char::is_uppercase);
    if capitalized && !sentence_start {
        return if lower.ends_with('s') && token.chars().count() > 3 && !token.chars().all(char::is_uppercase) {
            ("NNPS", false)
        } else {
            ("NNP", false)
        };
    }

    (suffix_tag(&lower), true)
}

fn punctuation_tag(token: &str) -> Option<&'static str> {
    let mut chars = token.chars();
    let c = chars.next()?;
    if chars.next().is_some() || c.is_alphanumeric() {
        return None;
    }
    Some(match c {
        '.' | '!' | '?' => ".",
        ',' => ",",
        ':' | ';' | '-' | '–' | '—' => ":",
        '(' | '[' | '{' => "(",
        ')' | ']' | '}' => ")",
        '"' | '“' | '‘' | '`' => "``",
        '”' | '’' | '\'' => "''",
        '$' | '₹' | '€' | '£' => "$",
        '#' => "#",
        _ => "SYM",
    })
}

fn suffix_tag(word: &str) -> &'static str {
    if word.contains('\'') || word.contains('’') {
        return "NN";
    }
    if word.ends_with("ing") && word.len() > 4 {
        return "VBG";
    }
    if word.ends_with("ed") && word.len() > 3 {
        return "VBD";
    }
    if word.ends_with("ly") && word.len() > 3 {
        return "RB";
    }
    if word.ends_with("est") && word.len() > 4 {
        return "JJS";
    }
    if NOUN_SUFFIXES.iter().any(|s| word.ends_with(s)) {
        return "NN";
    }
    if ADJECTIVE_SUFFIXES.iter().any(|s| word.ends_with(s)) {
        return "JJ";
    }
    if word.ends_with('s') && !word.ends_with("ss") && !word.ends_with("us") && word.len() > 3 {
        return "NNS";
    }
    "NN"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(text: &str) -> Vec<String> {
        LexiconTagger::new().tag(text).0.into_iter().map(|(_, tag)| tag).collect()
    }

    #[test]
    fn test_closed_class_words() {
        assert_eq!(tags("the team and its players"), vec!["DT", "NN", "CC", "PRP$", "NNS"]);
    }

    #[test]
    fn test_numbers_and_punctuation() {
        assert_eq!(tags("India scored 350 runs ."), vec!["NN", "VBD", "CD", "NNS", "."]);
        assert_eq!(tags("( 7.5 , $ )"), vec!["(", "CD", ",", "$", ")"]);
    }

    #[test]
    fn test_proper_nouns_mid_sentence() {
        assert_eq!(tags("the Reserve Bank"), vec!["DT", "NNP", "NNP"]);
        assert_eq!(tags("visit to NASA"), vec!["NN", "TO", "NNP"]);
    }

    #[test]
    fn test_suffix_guesses() {
        assert_eq!(tags("quickly"), vec!["RB"]);
        assert_eq!(tags("election"), vec!["NN"]);
        assert_eq!(tags("famous"), vec!["JJ"]);
        assert_eq!(tags("running"), vec!["VBG"]);
    }

    #[test]
    fn test_context_after_determiner() {
        // "the injured player": guessed VBD after a determiner becomes JJ
        assert_eq!(tags("the injured player"), vec!["DT", "JJ", "NN"]);
    }

    #[test]
    fn test_context_after_to_and_modal() {
        assert_eq!(tags("plans to launch"), vec!["NNS", "TO", "VB"]);
        assert_eq!(tags("will launch"), vec!["MD", "VB"]);
    }

    #[test]
    fn test_participle_after_have() {
        assert_eq!(tags("has announced"), vec!["VBZ", "VBN"]);
        assert_eq!(tags("was arrested"), vec!["VBD", "VBN"]);
    }

    #[test]
    fn test_tag_count_matches_tokens() {
        let text = "sensex fall 500 point amid global selloff";
        let tagged = LexiconTagger::new().tag(text);
        assert_eq!(tagged.len(), 7);
    }
}
