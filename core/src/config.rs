//! Build and query configuration for a [`SearchIndex`](crate::SearchIndex).
//!
//! Every field has a default, so a partial JSON document such as
//! `{"idf": "smoothed"}` is a valid configuration.

use serde::{Deserialize, Serialize};

/// Default number of records tokenized per parallel batch during pass 1.
pub const DEFAULT_BATCH_SIZE: usize = 8_192;

/// Default number of hits returned by the glue binary.
pub const DEFAULT_TOP_K: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub analyzer: AnalyzerConfig,
    pub tf: TfScheme,
    pub idf: IdfScheme,
    pub query_weighting: QueryWeighting,
    pub match_mode: MatchMode,
    /// Worker threads for the build; `None` uses the global rayon pool.
    pub threads: Option<usize>,
    pub batch_size: BatchSize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Decompose and drop combining marks, so "café" indexes as "cafe".
    pub strip_accents: bool,
    pub stop_words: StopWords,
    /// English Snowball stemming, applied after stop-word removal.
    pub stemming: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self { strip_accents: true, stop_words: StopWords::None, stemming: false }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopWords {
    #[default]
    None,
    English,
    Custom(Vec<String>),
}

/// Term-frequency component of a tf-idf weight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TfScheme {
    /// `tf = count`
    #[default]
    Linear,
    /// `tf = 1 + ln(count)`
    LogScaled,
}

/// Inverse-document-frequency component of a tf-idf weight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdfScheme {
    /// `idf = ln(N / df)`; zero for terms present in every document.
    #[default]
    Standard,
    /// `idf = ln((N + 1) / (df + 1)) + 1`; never zero.
    Smoothed,
}

/// How a query's terms are weighted before scoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryWeighting {
    #[default]
    TermFrequency,
    TfIdf,
}

/// Which documents are candidates for a query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Documents sharing at least one term with the query.
    #[default]
    Any,
    /// Documents containing every query term.
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchSize(pub usize);

impl Default for BatchSize {
    fn default() -> Self { BatchSize(DEFAULT_BATCH_SIZE) }
}

impl BatchSize {
    pub fn get(self) -> usize { self.0.max(1) }
}
