//! Query-time scoring over a built index.

use crate::config::{MatchMode, QueryWeighting};
use crate::index::InvertedIndex;
use crate::matrix::TermFrequencyMatrix;
use crate::sparse::SparseVector;
use crate::tokenizer::Analyzer;
use crate::vocabulary::{count_terms, Vocabulary};
use crate::weighting::{IdfTable, WeightingEngine};
use crate::DocId;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Borrowed view of the index parts needed to answer a query.
#[derive(Clone, Copy)]
pub struct QueryRanker<'a> {
    pub analyzer: &'a Analyzer,
    pub vocabulary: &'a Vocabulary,
    pub weighting: WeightingEngine,
    pub idf: &'a IdfTable,
    pub term_frequencies: &'a TermFrequencyMatrix,
    pub index: &'a InvertedIndex,
    pub query_weighting: QueryWeighting,
    pub match_mode: MatchMode,
}

impl<'a> QueryRanker<'a> {
    /// Weights of the query's known terms. `None` when the query must match
    /// nothing: conjunctive matching with a term outside the vocabulary.
    pub fn query_vector(&self, query: &str) -> Option<SparseVector> {
        let mut pairs = Vec::new();
        for (term, count) in count_terms(self.analyzer.tokenize(query)) {
            let Some(term_id) = self.vocabulary.term_id(&term) else {
                if self.match_mode == MatchMode::All {
                    return None;
                }
                continue;
            };
            let weight = match self.query_weighting {
                QueryWeighting::TermFrequency => count as f32,
                QueryWeighting::TfIdf => self.weighting.tf(count) * self.idf.get(term_id).unwrap_or(0.0),
            };
            pairs.push((term_id, weight));
        }
        Some(SparseVector::from_pairs(pairs))
    }

    /// Union of the postings of the query's terms, ascending and deduplicated.
    pub fn candidates(&self, query: &SparseVector) -> Vec<DocId> {
        let mut docs: Vec<DocId> = query
            .iter()
            .flat_map(|(term_id, _)| self.index.lookup(term_id).iter().map(|p| p.doc_id))
            .collect();
        docs.sort_unstable();
        docs.dedup();
        docs
    }

    fn contains_all(&self, doc_id: DocId, query: &SparseVector) -> bool {
        query.iter().all(|(term_id, _)| self.term_frequencies.get(doc_id, term_id) > 0)
    }

    /// Top `k` `(doc, score)` pairs, best first, ties by ascending doc id.
    pub fn rank(&self, query: &str, k: usize) -> Vec<(DocId, f32)> {
        if k == 0 || self.index.num_docs() == 0 {
            return Vec::new();
        }
        let Some(query_vector) = self.query_vector(query) else {
            return Vec::new();
        };
        if query_vector.is_empty() {
            return Vec::new();
        }
        let candidates = self.candidates(&query_vector);
        let num_candidates = candidates.len();
        let scored = candidates
            .into_iter()
            .filter(|&d| self.match_mode == MatchMode::Any || self.contains_all(d, &query_vector))
            .filter_map(|d| {
                let weights = self.index.weights(d)?;
                Some((d, query_vector.dot(weights)))
            })
            .filter(|&(_, score)| score > 0.0);
        let hits = top_k(scored, k);
        tracing::debug!(terms = query_vector.len(), candidates = num_candidates, hits = hits.len(), "ranked query");
        hits
    }
}

/// Select the best `k` entries with a bounded min-heap and return them sorted
/// by descending score, then ascending doc id.
pub fn top_k<I>(scored: I, k: usize) -> Vec<(DocId, f32)>
where
    I: IntoIterator<Item = (DocId, f32)>,
{
    if k == 0 {
        return Vec::new();
    }
    // Larger key = better hit; `Reverse` on the whole key makes the heap
    // top the worst kept hit.
    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f32>, Reverse<DocId>)>> = BinaryHeap::with_capacity(k + 1);
    for (doc_id, score) in scored {
        heap.push(Reverse((OrderedFloat(score), Reverse(doc_id))));
        if heap.len() > k {
            heap.pop();
        }
    }
    heap.into_sorted_vec()
        .into_iter()
        .map(|Reverse((score, Reverse(doc_id)))| (doc_id, score.0))
        .collect()
}
