//! In-memory tf-idf relevance index over short text records.
//!
//! Build a [`SearchIndex`] once from any iterator of [`Indexable`] records,
//! then call [`SearchIndex::rank`] as often as needed, from as many threads
//! as needed.

pub mod cancel;
pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod index;
pub mod matrix;
pub mod ranker;
pub mod sparse;
pub mod tokenizer;
pub mod vocabulary;
pub mod weighting;

pub type TermId = u32;
pub type DocId = u32;

pub use cancel::CancelToken;
pub use config::{AnalyzerConfig, IdfScheme, IndexConfig, MatchMode, QueryWeighting, StopWords, TfScheme};
pub use document::Indexable;
pub use engine::{SearchHit, SearchIndex};
pub use error::{IndexError, Result};
pub use index::{InvertedIndex, Posting};
pub use sparse::SparseVector;
pub use tokenizer::{tokenize, Analyzer};
