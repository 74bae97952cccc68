//! Pass 1 of the build: term ids, raw counts and document frequencies.
//!
//! Term ids are handed out in order of first occurrence across the document
//! stream. Document frequencies only become readable through
//! [`VocabularyBuilder::finish`], which consumes the builder, so no weight can
//! be computed from a partial scan.

use crate::error::{IndexError, Result};
use crate::matrix::TermFrequencyMatrix;
use crate::tokenizer::Analyzer;
use crate::{DocId, TermId};
use indexmap::{IndexMap, IndexSet};

/// Bijective mapping between normalized terms and their ids.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    terms: IndexSet<String>,
}

impl Vocabulary {
    pub fn term_id(&self, term: &str) -> Option<TermId> {
        self.terms.get_index_of(term).map(|i| i as TermId)
    }

    pub fn term(&self, term_id: TermId) -> Option<&str> {
        self.terms.get_index(term_id as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize { self.terms.len() }

    pub fn is_empty(&self) -> bool { self.terms.is_empty() }

    /// Terms in id order.
    pub fn iter(&self) -> impl Iterator<Item = (TermId, &str)> + '_ {
        self.terms.iter().enumerate().map(|(i, t)| (i as TermId, t.as_str()))
    }
}

/// Frozen document-frequency snapshot, indexed by term id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentFrequencies {
    df: Vec<u32>,
    total_docs: u32,
}

impl DocumentFrequencies {
    /// Number of documents containing `term_id`; 0 for unknown ids.
    pub fn get(&self, term_id: TermId) -> u32 {
        self.df.get(term_id as usize).copied().unwrap_or(0)
    }

    pub fn total_docs(&self) -> u32 { self.total_docs }

    pub fn num_terms(&self) -> usize { self.df.len() }
}

/// Count a document's tokens, keeping first-occurrence order.
pub fn count_terms<I>(tokens: I) -> IndexMap<String, u32>
where
    I: IntoIterator<Item = String>,
{
    let mut counts: IndexMap<String, u32> = IndexMap::new();
    for token in tokens {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}

#[derive(Debug, Default)]
pub struct VocabularyBuilder {
    terms: IndexSet<String>,
    df: Vec<u32>,
    matrix: TermFrequencyMatrix,
}

impl VocabularyBuilder {
    pub fn new() -> Self { Self::default() }

    pub fn num_docs(&self) -> usize { self.matrix.num_docs() }

    /// Merge one document's term counts and return its id. Each distinct term
    /// bumps its document frequency once, whatever its count.
    pub fn add_document(&mut self, counts: IndexMap<String, u32>) -> Result<DocId> {
        let doc_id = DocId::try_from(self.matrix.num_docs()).map_err(|_| IndexError::TooManyDocuments)?;
        let mut row: Vec<(TermId, u32)> = Vec::with_capacity(counts.len());
        for (term, count) in counts {
            if count == 0 { continue; }
            let (idx, _) = self.terms.insert_full(term);
            let term_id = TermId::try_from(idx).map_err(|_| IndexError::TooManyTerms)?;
            if self.df.len() <= idx {
                self.df.resize(idx + 1, 0);
            }
            self.df[idx] += 1;
            row.push((term_id, count));
        }
        self.matrix.push_row(row);
        Ok(doc_id)
    }

    pub fn finish(self) -> (Vocabulary, TermFrequencyMatrix, DocumentFrequencies) {
        let total_docs = self.matrix.num_docs() as u32;
        tracing::debug!(total_docs, num_terms = self.terms.len(), "vocabulary frozen");
        (
            Vocabulary { terms: self.terms },
            self.matrix,
            DocumentFrequencies { df: self.df, total_docs },
        )
    }
}

/// Sequential pass 1 over raw texts.
pub fn build<I, S>(texts: I, analyzer: &Analyzer) -> Result<(Vocabulary, TermFrequencyMatrix, DocumentFrequencies)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut builder = VocabularyBuilder::new();
    for text in texts {
        builder.add_document(count_terms(analyzer.tokenize(text.as_ref())))?;
    }
    Ok(builder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_first_occurrence() {
        let (vocab, tf, df) = build(["the cat sat", "the dog sat"], &Analyzer::default()).unwrap();
        let ids: Vec<(TermId, &str)> = vocab.iter().collect();
        assert_eq!(ids, vec![(0, "the"), (1, "cat"), (2, "sat"), (3, "dog")]);
        assert_eq!(vocab.term_id("dog"), Some(3));
        assert_eq!(vocab.term(1), Some("cat"));
        assert_eq!(vocab.term_id("bird"), None);
        assert_eq!(vocab.term(99), None);
        assert_eq!(tf.num_docs(), 2);
        assert_eq!(df.total_docs(), 2);
    }

    #[test]
    fn document_frequency_counts_documents_not_occurrences() {
        let (vocab, tf, df) = build(["rust rust rust", "rust go"], &Analyzer::default()).unwrap();
        let rust = vocab.term_id("rust").unwrap();
        let go = vocab.term_id("go").unwrap();
        assert_eq!(df.get(rust), 2);
        assert_eq!(df.get(go), 1);
        assert_eq!(tf.get(0, rust), 3);
        assert_eq!(tf.get(1, go), 1);
        assert_eq!(df.get(1234), 0);
    }

    #[test]
    fn empty_text_is_an_empty_row() {
        let (vocab, tf, df) = build(["", "word"], &Analyzer::default()).unwrap();
        assert_eq!(vocab.len(), 1);
        assert_eq!(tf.num_docs(), 2);
        assert_eq!(tf.row(0).count(), 0);
        assert_eq!(df.total_docs(), 2);
    }

    #[test]
    fn zero_documents_build_an_empty_vocabulary() {
        let (vocab, tf, df) = build(Vec::<String>::new(), &Analyzer::default()).unwrap();
        assert!(vocab.is_empty());
        assert_eq!(tf.num_docs(), 0);
        assert_eq!(df.total_docs(), 0);
        assert_eq!(df.num_terms(), 0);
    }
}
