use crate::config::{AnalyzerConfig, StopWords};
use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref RE: Regex = Regex::new(r"[\p{L}\p{N}][\p{L}\p{M}\p{N}]*").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    static ref DEFAULT_ANALYZER: Analyzer = Analyzer::new(&AnalyzerConfig::default());
}

pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a","about","above","after","again","against","all","am","an","and","any","are","as","at",
    "be","because","been","before","being","below","between","both","but","by",
    "can","cannot","could",
    "did","do","does","doing","down","during",
    "each","few","for","from","further",
    "had","has","have","having","he","her","here","hers","herself","him","himself","his","how",
    "i","if","in","into","is","it","its","itself",
    "me","more","most","my","myself",
    "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
    "same","she","should","so","some","such",
    "than","that","the","their","theirs","them","themselves","then","there","these","they","this","those","through","to","too",
    "under","until","up","very",
    "was","we","were","what","when","where","which","while","who","whom","why","with","would",
    "you","your","yours","yourself","yourselves",
];

/// Text normalization shared by indexing and querying.
///
/// One analyzer is stored inside each index and applied to both the records
/// and every query, so a query term can only match a term produced the same
/// way.
#[derive(Debug, Clone)]
pub struct Analyzer {
    strip_accents: bool,
    stop_words: HashSet<String>,
    stemming: bool,
}

impl Analyzer {
    pub fn new(config: &AnalyzerConfig) -> Self {
        let mut analyzer = Self { strip_accents: config.strip_accents, stop_words: HashSet::new(), stemming: config.stemming };
        analyzer.stop_words = match &config.stop_words {
            StopWords::None => HashSet::new(),
            StopWords::English => ENGLISH_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
            // Same folding as the token stream, so "Café" matches "cafe".
            StopWords::Custom(words) => words
                .iter()
                .map(|w| analyzer.normalize(w.trim()))
                .filter(|w| !w.is_empty())
                .collect(),
        };
        analyzer
    }

    fn normalize(&self, text: &str) -> String {
        if self.strip_accents {
            text.nfkd().filter(|c| !is_combining_mark(*c)).collect::<String>().to_lowercase()
        } else {
            text.to_lowercase()
        }
    }

    /// Case-fold, optionally strip accents, split on non-alphanumeric runs,
    /// then drop stop words and stem if configured.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let normalized = self.normalize(text);
        let mut tokens = Vec::new();
        for mat in RE.find_iter(&normalized) {
            let token = mat.as_str();
            if self.is_stopword(token) { continue; }
            if self.stemming {
                tokens.push(STEMMER.stem(token).into_owned());
            } else {
                tokens.push(token.to_string());
            }
        }
        tokens
    }

    fn is_stopword(&self, token: &str) -> bool { self.stop_words.contains(token) }
}

impl Default for Analyzer {
    fn default() -> Self { DEFAULT_ANALYZER.clone() }
}

/// Tokenize with the default analyzer: accents stripped, lower-cased, no
/// stop words, no stemming.
pub fn tokenize(text: &str) -> Vec<String> {
    DEFAULT_ANALYZER.tokenize(text)
}
