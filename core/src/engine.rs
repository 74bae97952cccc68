use crate::cancel::CancelToken;
use crate::config::{IndexConfig, MatchMode, QueryWeighting};
use crate::document::Indexable;
use crate::error::{IndexError, Result};
use crate::index::{InvertedIndex, Posting};
use crate::matrix::TermFrequencyMatrix;
use crate::ranker::QueryRanker;
use crate::sparse::SparseVector;
use crate::tokenizer::Analyzer;
use crate::vocabulary::{count_terms, DocumentFrequencies, Vocabulary, VocabularyBuilder};
use crate::weighting::{IdfTable, WeightingEngine};
use crate::DocId;
use indexmap::IndexMap;
use rayon::prelude::*;
use std::time::Instant;

/// One ranked result. `document` is the record passed to the build.
#[derive(Debug)]
pub struct SearchHit<'a, D> {
    pub score: f32,
    pub doc_id: DocId,
    pub document: &'a D,
}

// Manual impls: `D` itself need not be `Clone`.
impl<D> Clone for SearchHit<'_, D> {
    fn clone(&self) -> Self { *self }
}

impl<D> Copy for SearchHit<'_, D> {}

impl<'a, D: Indexable> SearchHit<'a, D> {
    /// Caller-provided id of the matched record.
    pub fn id(&self) -> &'a D::Id { self.document.id() }
}

impl<D> PartialEq for SearchHit<'_, D> {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score && self.doc_id == other.doc_id && std::ptr::eq(self.document, other.document)
    }
}

/// Immutable tf-idf index over a collection of records.
///
/// Built once by [`SearchIndex::build`]; afterwards every method takes
/// `&self`, so the index can be shared between threads and queried
/// concurrently without locks.
#[derive(Debug)]
pub struct SearchIndex<D> {
    documents: Vec<D>,
    analyzer: Analyzer,
    vocabulary: Vocabulary,
    term_frequencies: TermFrequencyMatrix,
    document_frequencies: DocumentFrequencies,
    weighting: WeightingEngine,
    idf: IdfTable,
    index: InvertedIndex,
    query_weighting: QueryWeighting,
    match_mode: MatchMode,
}

enum Workers {
    Global,
    Pool(rayon::ThreadPool),
}

impl Workers {
    fn new(threads: Option<usize>) -> Result<Self> {
        match threads {
            None => Ok(Workers::Global),
            Some(n) => Ok(Workers::Pool(rayon::ThreadPoolBuilder::new().num_threads(n).build()?)),
        }
    }

    fn install<R: Send>(&self, f: impl FnOnce() -> R + Send) -> R {
        match self {
            Workers::Global => f(),
            Workers::Pool(pool) => pool.install(f),
        }
    }
}

impl<D> SearchIndex<D>
where
    D: Indexable + Send + Sync,
{
    pub fn build<I>(records: I, config: &IndexConfig) -> Result<Self>
    where
        I: IntoIterator<Item = D>,
    {
        Self::build_with_cancel(records, config, &CancelToken::new())
    }

    /// Two-pass build. Pass 1 tokenizes records in parallel batches and merges
    /// their counts in stream order; pass 2 starts only once the document
    /// frequencies are frozen.
    pub fn build_with_cancel<I>(records: I, config: &IndexConfig, cancel: &CancelToken) -> Result<Self>
    where
        I: IntoIterator<Item = D>,
    {
        let started = Instant::now();
        let workers = Workers::new(config.threads)?;
        let analyzer = Analyzer::new(&config.analyzer);
        let batch_size = config.batch_size.get();

        let mut builder = VocabularyBuilder::new();
        let mut documents: Vec<D> = Vec::new();
        let mut records = records.into_iter();
        loop {
            if cancel.is_cancelled() {
                return Err(IndexError::Cancelled { scanned: builder.num_docs() });
            }
            let batch: Vec<D> = records.by_ref().take(batch_size).collect();
            if batch.is_empty() {
                break;
            }
            let counts: Vec<IndexMap<String, u32>> = workers.install(|| {
                batch.par_iter().map(|record| count_terms(analyzer.tokenize(&record.text()))).collect()
            });
            for c in counts {
                builder.add_document(c)?;
            }
            documents.extend(batch);
            tracing::debug!(scanned = builder.num_docs(), "tokenized batch");
        }

        let (vocabulary, term_frequencies, document_frequencies) = builder.finish();
        tracing::info!(
            num_docs = documents.len(),
            num_terms = vocabulary.len(),
            nnz = term_frequencies.nnz(),
            "vocabulary assembled"
        );
        if cancel.is_cancelled() {
            return Err(IndexError::Cancelled { scanned: documents.len() });
        }

        let weighting = WeightingEngine::new(config.tf, config.idf);
        let idf = weighting.idf_table(&document_frequencies)?;
        let vectors = workers.install(|| weighting.weigh_matrix(&term_frequencies, &idf, cancel))?;
        let index = InvertedIndex::build(vectors, vocabulary.len());
        tracing::info!(
            num_docs = index.num_docs(),
            postings = index.nnz(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "index build complete"
        );

        Ok(Self {
            documents,
            analyzer,
            vocabulary,
            term_frequencies,
            document_frequencies,
            weighting,
            idf,
            index,
            query_weighting: config.query_weighting,
            match_mode: config.match_mode,
        })
    }
}

impl<D: Indexable> SearchIndex<D> {
    fn ranker(&self) -> QueryRanker<'_> {
        QueryRanker {
            analyzer: &self.analyzer,
            vocabulary: &self.vocabulary,
            weighting: self.weighting,
            idf: &self.idf,
            term_frequencies: &self.term_frequencies,
            index: &self.index,
            query_weighting: self.query_weighting,
            match_mode: self.match_mode,
        }
    }

    /// At most `top_k` hits by descending score, ties by ascending doc id.
    /// Queries with no known terms return nothing.
    pub fn rank(&self, query: &str, top_k: usize) -> Vec<SearchHit<'_, D>> {
        self.ranker()
            .rank(query, top_k)
            .into_iter()
            .filter_map(|(doc_id, score)| {
                let document = self.documents.get(doc_id as usize)?;
                Some(SearchHit { score, doc_id, document })
            })
            .collect()
    }

    pub fn len(&self) -> usize { self.documents.len() }

    pub fn is_empty(&self) -> bool { self.documents.is_empty() }

    pub fn document(&self, doc_id: DocId) -> Option<&D> { self.documents.get(doc_id as usize) }

    pub fn vocabulary(&self) -> &Vocabulary { &self.vocabulary }

    pub fn num_terms(&self) -> usize { self.vocabulary.len() }

    /// Stored nonzero weights across all documents.
    pub fn nnz(&self) -> usize { self.index.nnz() }

    pub fn term_frequencies(&self) -> &TermFrequencyMatrix { &self.term_frequencies }

    /// Document frequency of an already-normalized term; 0 if unknown.
    pub fn document_frequency(&self, term: &str) -> u32 {
        self.vocabulary.term_id(term).map_or(0, |t| self.document_frequencies.get(t))
    }

    pub fn idf(&self, term: &str) -> Option<f32> {
        self.vocabulary.term_id(term).and_then(|t| self.idf.get(t))
    }

    pub fn weights(&self, doc_id: DocId) -> Option<&SparseVector> { self.index.weights(doc_id) }

    pub fn postings(&self, term: &str) -> &[Posting] {
        self.vocabulary.term_id(term).map(|t| self.index.lookup(t)).unwrap_or(&[])
    }
}
