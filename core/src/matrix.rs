use crate::{DocId, TermId};

/// Raw term counts for every document, in compressed sparse rows.
///
/// Row `d` holds the `(term, count)` pairs of document `d` sorted by term id.
/// Only nonzero counts are stored; an empty document is an empty row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermFrequencyMatrix {
    row_offsets: Vec<usize>,
    term_ids: Vec<TermId>,
    counts: Vec<u32>,
}

impl Default for TermFrequencyMatrix {
    fn default() -> Self {
        Self { row_offsets: vec![0], term_ids: Vec::new(), counts: Vec::new() }
    }
}

impl TermFrequencyMatrix {
    pub fn new() -> Self { Self::default() }

    /// Append the next document's counts. `row` need not be sorted.
    pub(crate) fn push_row(&mut self, mut row: Vec<(TermId, u32)>) {
        row.sort_unstable_by_key(|&(term_id, _)| term_id);
        for (term_id, count) in row {
            if count == 0 { continue; }
            self.term_ids.push(term_id);
            self.counts.push(count);
        }
        self.row_offsets.push(self.term_ids.len());
    }

    pub fn num_docs(&self) -> usize { self.row_offsets.len() - 1 }

    /// Number of stored nonzero counts.
    pub fn nnz(&self) -> usize { self.counts.len() }

    /// The `(term, count)` pairs of one document; empty for an out-of-range id.
    pub fn row(&self, doc_id: DocId) -> impl Iterator<Item = (TermId, u32)> + '_ {
        let (start, end) = self.bounds(doc_id);
        self.term_ids[start..end].iter().copied().zip(self.counts[start..end].iter().copied())
    }

    pub fn get(&self, doc_id: DocId, term_id: TermId) -> u32 {
        let (start, end) = self.bounds(doc_id);
        match self.term_ids[start..end].binary_search(&term_id) {
            Ok(i) => self.counts[start + i],
            Err(_) => 0,
        }
    }

    fn bounds(&self, doc_id: DocId) -> (usize, usize) {
        let d = doc_id as usize;
        if d >= self.num_docs() {
            return (0, 0);
        }
        (self.row_offsets[d], self.row_offsets[d + 1])
    }
}
