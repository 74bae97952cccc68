use crate::sparse::SparseVector;
use crate::{DocId, TermId};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Posting {
    pub doc_id: DocId,
    pub weight: f32, // normalized tf-idf weight
}

/// Per-document weight vectors plus the per-term postings derived from them.
///
/// Postings are sorted by doc id and only contain nonzero weights, so memory
/// grows with the number of nonzero (document, term) pairs.
#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    documents: Vec<SparseVector>,
    postings: Vec<Vec<Posting>>, // indexed by term id
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Derive postings from normalized document vectors. `num_terms` sizes the
    /// postings table; terms with no nonzero weight get an empty list.
    pub fn build(documents: Vec<SparseVector>, num_terms: usize) -> Self {
        let mut lengths = vec![0usize; num_terms];
        for vector in &documents {
            for (term_id, _) in vector.iter() {
                if let Some(len) = lengths.get_mut(term_id as usize) {
                    *len += 1;
                }
            }
        }
        let mut postings: Vec<Vec<Posting>> = lengths.into_iter().map(Vec::with_capacity).collect();
        // Documents are visited in id order, so every list ends up sorted.
        for (doc_id, vector) in documents.iter().enumerate() {
            for (term_id, weight) in vector.iter() {
                if let Some(list) = postings.get_mut(term_id as usize) {
                    list.push(Posting { doc_id: doc_id as DocId, weight });
                }
            }
        }
        Self { documents, postings }
    }

    /// Postings for a term; empty for unknown ids.
    pub fn lookup(&self, term_id: TermId) -> &[Posting] {
        self.postings.get(term_id as usize).map(Vec::as_slice).unwrap_or(&[])
    }

    /// A document's normalized weights; `None` for unknown ids.
    pub fn weights(&self, doc_id: DocId) -> Option<&SparseVector> {
        self.documents.get(doc_id as usize)
    }

    pub fn num_docs(&self) -> usize { self.documents.len() }

    pub fn num_terms(&self) -> usize { self.postings.len() }

    /// Total number of stored postings.
    pub fn nnz(&self) -> usize { self.postings.iter().map(Vec::len).sum() }
}
