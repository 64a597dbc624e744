//! Rule-based English lemmatizer.
//!
//! Lookup order for a word:
//!
//! 1. irregular forms (`went` → `go`, `children` → `child`)
//! 2. uninflected words that only look inflected (`news`, `during`, `hundred`)
//! 3. verb suffixes `-ing` / `-ed` / `-ied`, with consonant undoubling and
//!    silent-`e` restoration (`running` → `run`, `hoped` → `hope`)
//! 4. plural suffixes `-ies` / `-es` / `-s`
//!
//! Only ASCII alphabetic words of three letters or more are touched by the
//! suffix rules. All-caps words are treated as acronyms and left alone.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::{HashMap, HashSet};

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\p{L}+").unwrap());

static IRREGULAR: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        // be / have / do
        ("am", "be"), ("is", "be"), ("are", "be"), ("was", "be"), ("were", "be"),
        ("been", "be"), ("being", "be"),
        ("has", "have"), ("had", "have"), ("having", "have"),
        ("does", "do"), ("did", "do"), ("done", "do"), ("doing", "do"),
        // strong verbs
        ("went", "go"), ("gone", "go"), ("goes", "go"),
        ("said", "say"), ("says", "say"),
        ("made", "make"), ("took", "take"), ("taken", "take"),
        ("came", "come"), ("saw", "see"), ("seen", "see"),
        ("knew", "know"), ("known", "know"), ("got", "get"), ("gotten", "get"),
        ("gave", "give"), ("given", "give"), ("found", "find"),
        ("thought", "think"), ("told", "tell"), ("became", "become"),
        ("left", "leave"), ("felt", "feel"), ("brought", "bring"),
        ("began", "begin"), ("begun", "begin"), ("kept", "keep"),
        ("held", "hold"), ("wrote", "write"), ("written", "write"),
        ("stood", "stand"), ("heard", "hear"), ("meant", "mean"),
        ("met", "meet"), ("ran", "run"), ("paid", "pay"), ("sat", "sit"),
        ("spoke", "speak"), ("spoken", "speak"), ("led", "lead"),
        ("grew", "grow"), ("grown", "grow"), ("lost", "lose"),
        ("fell", "fall"), ("fallen", "fall"), ("sent", "send"),
        ("built", "build"), ("understood", "understand"), ("drew", "draw"),
        ("drawn", "draw"), ("broke", "break"), ("broken", "break"),
        ("spent", "spend"), ("rose", "rise"), ("risen", "rise"),
        ("drove", "drive"), ("driven", "drive"), ("bought", "buy"),
        ("wore", "wear"), ("worn", "wear"), ("chose", "choose"),
        ("chosen", "choose"), ("won", "win"), ("sold", "sell"),
        ("caught", "catch"), ("fought", "fight"), ("taught", "teach"),
        ("sought", "seek"), ("struck", "strike"),
        ("shot", "shoot"), ("threw", "throw"), ("thrown", "throw"),
        ("flew", "fly"), ("flown", "fly"), ("ate", "eat"), ("eaten", "eat"),
        ("forgot", "forget"), ("forgotten", "forget"), ("hid", "hide"),
        ("hidden", "hide"), ("woke", "wake"), ("swore", "swear"),
        ("sworn", "swear"), ("slept", "sleep"), ("fled", "flee"),
        ("dealt", "deal"), ("sank", "sink"), ("sunk", "sink"),
        ("shook", "shake"), ("shaken", "shake"), ("froze", "freeze"),
        ("frozen", "freeze"), ("stole", "steal"), ("stolen", "steal"),
        ("bitten", "bite"), ("laid", "lay"),
        ("lying", "lie"), ("dying", "die"), ("tying", "tie"),
        ("used", "use"), ("using", "use"), ("created", "create"),
        ("creating", "create"),
        // nouns
        ("men", "man"), ("women", "woman"), ("children", "child"),
        ("feet", "foot"), ("teeth", "tooth"), ("mice", "mouse"),
        ("geese", "goose"), ("wives", "wife"), ("knives", "knife"),
        ("lives", "life"), ("leaves", "leaf"), ("halves", "half"),
        ("wolves", "wolf"), ("shelves", "shelf"), ("thieves", "thief"),
        ("shoes", "shoe"), ("crises", "crisis"), ("analyses", "analysis"),
        ("criteria", "criterion"), ("phenomena", "phenomenon"),
        ("indices", "index"),
        // adjectives
        ("better", "good"), ("best", "good"), ("worse", "bad"), ("worst", "bad"),
    ]
    .into_iter()
    .collect()
});

static UNINFLECTED: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // -s
        "news", "series", "species", "means", "always", "perhaps", "towards",
        "afterwards", "politics", "economics", "physics", "mathematics",
        "athletics", "statistics", "ethics", "electronics", "olympics", "thus",
        "bias", "alias", "atlas", "canvas", "christmas", "chaos", "whereas",
        "lens", "sometimes", "besides", "across", "unless", "this", "his",
        "yes", "gas", "bus", "plus", "its", "ours", "yours", "theirs", "hers",
        "mumps", "measles", "diabetes", "billiards", "headquarters",
        // -ing
        "during", "morning", "evening", "nothing", "something", "anything",
        "everything", "ceiling", "wedding", "meeting", "funding", "housing",
        "training", "sibling", "spring", "string", "king", "ring", "wing",
        "thing", "sing", "bring", "sting", "swing", "cling", "fling",
        "pudding", "darling", "awning", "herring", "lightning", "ping",
        "viking", "beijing", "nanjing",
        // -ed
        "hundred", "indeed", "need", "speed", "seed", "feed", "deed", "weed",
        "breed", "greed", "bleed", "proceed", "exceed", "succeed", "red", "bed",
        "shed", "sacred", "naked", "wicked", "wretched", "rugged",
        "ragged", "jagged", "beloved", "kindred", "shred", "sled", "wed",
        "embed", "aged",
    ]
    .into_iter()
    .collect()
});

/// Lemmatize every word of `text`, leaving everything between words intact.
pub fn lemmatize_text(text: &str) -> String {
    WORD_RE
        .replace_all(text, |caps: &Captures<'_>| lemmatize_word(&caps[0]))
        .into_owned()
}

/// Lemmatize one word, preserving an initial capital.
pub fn lemmatize_word(word: &str) -> String {
    if word.chars().count() > 1 && word.chars().all(|c| c.is_uppercase()) {
        return word.to_string();
    }

    let lower = word.to_lowercase();
    let lemma = lemma_of_lowercase(&lower);
    if lemma == lower {
        return word.to_string();
    }

    let mut chars = word.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => {
            let mut lemma_chars = lemma.chars();
            match lemma_chars.next() {
                Some(l) => l.to_uppercase().collect::<String>() + lemma_chars.as_str(),
                None => lemma,
            }
        }
        _ => lemma,
    }
}

fn lemma_of_lowercase(w: &str) -> String {
    if let Some(lemma) = IRREGULAR.get(w) {
        return lemma.to_string();
    }
    if w.len() < 4 || !w.bytes().all(|b| b.is_ascii_lowercase()) || UNINFLECTED.contains(w) {
        return w.to_string();
    }

    if let Some(stem) = w.strip_suffix("ied") {
        // applied → apply, but died → die
        return if w.len() > 4 {
            format!("{}y", stem)
        } else {
            w[..w.len() - 1].to_string()
        };
    }
    if let Some(stem) = w.strip_suffix("eed") {
        // agreed → agree, but need stays need
        return if measure(stem.as_bytes()) > 0 {
            format!("{}ee", stem)
        } else {
            w.to_string()
        };
    }
    if let Some(stem) = w.strip_suffix("ing") {
        if let Some(lemma) = verb_stem(stem) {
            return lemma;
        }
        return w.to_string();
    }
    if let Some(stem) = w.strip_suffix("ed") {
        if let Some(lemma) = verb_stem(stem) {
            return lemma;
        }
        return w.to_string();
    }

    plural_stem(w)
}

/// Restore the base form of a verb from the part before `-ing` / `-ed`.
///
/// Returns `None` when the stem has no vowel (`thing`, `bed`).
fn verb_stem(stem: &str) -> Option<String> {
    let b = stem.as_bytes();
    if b.len() < 2 || !contains_vowel(b) {
        return None;
    }

    let mut lemma = stem.to_string();
    if ends_double_consonant(b) && !matches!(b[b.len() - 1], b'l' | b's' | b'z') {
        lemma.pop();
    } else if needs_silent_e(stem) || (measure(b) == 1 && ends_cvc(b)) {
        lemma.push('e');
    }
    Some(lemma)
}

/// Stem endings that in English verbs are nearly always followed by a silent `e`.
fn needs_silent_e(stem: &str) -> bool {
    let b = stem.as_bytes();
    let n = b.len();
    if stem.ends_with("bl") || stem.ends_with("iz") || stem.ends_with("ur") || stem.ends_with("uir") {
        return true;
    }
    // stated → state, but treated → treat
    if stem.ends_with("at") && n >= 3 && !matches!(b[n - 3], b'e' | b'o' | b'a') {
        return true;
    }
    if matches!(b[n - 1], b'c' | b'v') {
        return true;
    }
    if stem.ends_with("ang") || stem.ends_with("eng") || stem.ends_with("rg") || stem.ends_with("dg") {
        return true;
    }
    // caused → cause, raised → raise, released → release
    n >= 3 && b[n - 1] == b's' && is_vowel_at(b, n - 2) && is_vowel_at(b, n - 3)
}

fn plural_stem(w: &str) -> String {
    if let Some(stem) = w.strip_suffix("ies") {
        return if w.len() > 4 {
            format!("{}y", stem)
        } else {
            w[..w.len() - 1].to_string()
        };
    }
    if w.ends_with("sses") {
        return w[..w.len() - 2].to_string();
    }
    for suffix in ["xes", "ches", "shes", "zzes", "oes"] {
        if w.ends_with(suffix) {
            return w[..w.len() - 2].to_string();
        }
    }
    if w.ends_with('s') && !w.ends_with("ss") && !w.ends_with("us") && !w.ends_with("is") {
        return w[..w.len() - 1].to_string();
    }
    w.to_string()
}

fn is_consonant(b: &[u8], i: usize) -> bool {
    match b[i] {
        b'a' | b'e' | b'i' | b'o' | b'u' => false,
        b'y' => i == 0 || !is_consonant(b, i - 1),
        _ => true,
    }
}

fn is_vowel_at(b: &[u8], i: usize) -> bool {
    !is_consonant(b, i)
}

fn contains_vowel(b: &[u8]) -> bool {
    (0..b.len()).any(|i| !is_consonant(b, i))
}

/// Number of vowel-consonant sequences, `m` in `[C](VC){m}[V]`.
fn measure(b: &[u8]) -> usize {
    let mut m = 0;
    let mut prev_vowel = false;
    for i in 0..b.len() {
        let vowel = !is_consonant(b, i);
        if prev_vowel && !vowel {
            m += 1;
        }
        prev_vowel = vowel;
    }
    m
}

fn ends_double_consonant(b: &[u8]) -> bool {
    let n = b.len();
    n >= 2 && b[n - 1] == b[n - 2] && is_consonant(b, n - 1)
}

/// Consonant-vowel-consonant ending where the last consonant is not w, x or y.
fn ends_cvc(b: &[u8]) -> bool {
    let n = b.len();
    n >= 3
        && is_consonant(b, n - 3)
        && !is_consonant(b, n - 2)
        && is_consonant(b, n - 1)
        && !matches!(b[n - 1], b'w' | b'x' | b'y')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(pairs: &[(&str, &str)]) {
        for (word, expected) in pairs {
            assert_eq!(lemmatize_word(word), *expected, "lemma of {:?}", word);
        }
    }

    #[test]
    fn test_irregular_forms() {
        check(&[
            ("was", "be"),
            ("were", "be"),
            ("went", "go"),
            ("children", "child"),
            ("women", "woman"),
            ("said", "say"),
            ("better", "good"),
        ]);
    }

    #[test]
    fn test_plural_nouns() {
        check(&[
            ("shares", "share"),
            ("companies", "company"),
            ("classes", "class"),
            ("boxes", "box"),
            ("matches", "match"),
            ("heroes", "hero"),
            ("days", "day"),
            ("ties", "tie"),
        ]);
    }

    #[test]
    fn test_words_that_only_look_plural() {
        check(&[
            ("news", "news"),
            ("series", "series"),
            ("crisis", "crisis"),
            ("virus", "virus"),
            ("famous", "famous"),
            ("address", "address"),
        ]);
    }

    #[test]
    fn test_verb_forms() {
        check(&[
            ("running", "run"),
            ("stopped", "stop"),
            ("making", "make"),
            ("hoped", "hope"),
            ("hopping", "hop"),
            ("played", "play"),
            ("visiting", "visit"),
            ("opening", "open"),
            ("eating", "eat"),
            ("announced", "announce"),
            ("caused", "cause"),
            ("organized", "organize"),
            ("enabled", "enable"),
            ("stated", "state"),
            ("treated", "treat"),
            ("secured", "secure"),
            ("changed", "change"),
            ("received", "receive"),
            ("studied", "study"),
            ("died", "die"),
            ("agreed", "agree"),
            ("falling", "fall"),
            ("missed", "miss"),
        ]);
    }

    #[test]
    fn test_words_that_only_look_inflected() {
        check(&[
            ("need", "need"),
            ("hundred", "hundred"),
            ("during", "during"),
            ("thing", "thing"),
            ("bed", "bed"),
            ("morning", "morning"),
        ]);
    }

    #[test]
    fn test_case_handling() {
        check(&[("Players", "Player"), ("NASA", "NASA"), ("Went", "Go")]);
    }

    #[test]
    fn test_short_and_non_ascii_words_untouched() {
        check(&[("is", "be"), ("as", "as"), ("gas", "gas"), ("cafés", "cafés")]);
    }

    #[test]
    fn test_lemmatize_text_keeps_punctuation() {
        assert_eq!(
            lemmatize_text("The players, running late, missed flights."),
            "The player, run late, miss flight."
        );
    }

    #[test]
    fn test_measure() {
        assert_eq!(measure(b"tr"), 0);
        assert_eq!(measure(b"tree"), 0);
        assert_eq!(measure(b"trouble"), 1);
        assert_eq!(measure(b"oats"), 1);
        assert_eq!(measure(b"troubles"), 2);
    }
}
