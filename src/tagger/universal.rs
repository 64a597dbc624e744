//! Universal (coarse) tagset on top of the lexicon tagger.

use super::TagBackend;
use super::lexicon::LexiconTagger;

#[derive(Debug, Default)]
pub struct UniversalTagger {
    inner: LexiconTagger,
}

impl UniversalTagger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TagBackend for UniversalTagger {
    fn name(&self) -> &'static str {
        "universal"
    }

    fn tag_tokens(&self, tokens: &[&str]) -> Vec<String> {
        self.inner
            .tag_tokens(tokens)
            .iter()
            .map(|tag| to_universal(tag).to_string())
            .collect()
    }
}

/// Map a Penn Treebank tag to its universal counterpart.
pub fn to_universal(penn: &str) -> &'static str {
    match penn {
        "NN" | "NNS" | "NNP" | "NNPS" => "NOUN",
        "MD" => "VERB",
        "PRP" | "PRP$" | "WP" | "WP$" => "PRON",
        "DT" | "PDT" | "WDT" | "EX" => "DET",
        "IN" => "ADP",
        "CD" => "NUM",
        "CC" => "CONJ",
        "TO" | "RP" | "POS" => "PRT",
        "." | "," | ":" | "(" | ")" | "``" | "''" | "$" | "#" => ".",
        tag if tag.starts_with("VB") => "VERB",
        tag if tag.starts_with("JJ") => "ADJ",
        tag if tag.starts_with("RB") || tag == "WRB" => "ADV",
        _ => "X",
    }
}
