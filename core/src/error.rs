use crate::TermId;

/// Errors that abort an index build.
///
/// Queries never fail: unknown terms, empty queries and empty indexes all
/// produce an empty result instead.
#[derive(thiserror::Error, Debug)]
pub enum IndexError {
    #[error("index build cancelled after {scanned} documents")]
    Cancelled { scanned: usize },

    /// A term reached the idf formula without appearing in any document.
    #[error("term {term_id} has zero document frequency")]
    ZeroDocumentFrequency { term_id: TermId },

    #[error("document count exceeds the 32-bit document id space")]
    TooManyDocuments,

    #[error("vocabulary size exceeds the 32-bit term id space")]
    TooManyTerms,

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, IndexError>;
