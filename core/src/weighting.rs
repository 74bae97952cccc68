//! Pass 2 of the build: raw counts to normalized tf-idf vectors.

use crate::cancel::CancelToken;
use crate::config::{IdfScheme, TfScheme};
use crate::error::{IndexError, Result};
use crate::matrix::TermFrequencyMatrix;
use crate::sparse::SparseVector;
use crate::vocabulary::DocumentFrequencies;
use crate::{DocId, TermId};
use rayon::prelude::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeightingEngine {
    tf: TfScheme,
    idf: IdfScheme,
}

impl WeightingEngine {
    pub fn new(tf: TfScheme, idf: IdfScheme) -> Self { Self { tf, idf } }

    pub fn tf(&self, raw_tf: u32) -> f32 {
        if raw_tf == 0 {
            return 0.0;
        }
        match self.tf {
            TfScheme::Linear => raw_tf as f32,
            TfScheme::LogScaled => 1.0 + (raw_tf as f32).ln(),
        }
    }

    /// `None` when `doc_freq` is zero: such a term cannot occur in any
    /// document, so reaching here means the statistics are inconsistent.
    pub fn idf(&self, doc_freq: u32, total_docs: u32) -> Option<f32> {
        if doc_freq == 0 {
            return None;
        }
        let n = total_docs as f64;
        let df = doc_freq as f64;
        let idf = match self.idf {
            IdfScheme::Standard => (n / df).ln(),
            IdfScheme::Smoothed => ((n + 1.0) / (df + 1.0)).ln() + 1.0,
        };
        Some(idf as f32)
    }

    pub fn weight(&self, raw_tf: u32, doc_freq: u32, total_docs: u32) -> Option<f32> {
        self.idf(doc_freq, total_docs).map(|idf| self.tf(raw_tf) * idf)
    }

    /// Precompute idf for every term of the frozen snapshot.
    pub fn idf_table(&self, df: &DocumentFrequencies) -> Result<IdfTable> {
        let total_docs = df.total_docs();
        let values = (0..df.num_terms())
            .map(|i| {
                let term_id = i as TermId;
                self.idf(df.get(term_id), total_docs)
                    .ok_or(IndexError::ZeroDocumentFrequency { term_id })
            })
            .collect::<Result<Vec<f32>>>()?;
        Ok(IdfTable { values })
    }

    /// tf × idf for one row, L2-normalized. A row whose weights are all zero
    /// comes back as the empty vector.
    pub fn weigh_row<I>(&self, row: I, idf: &IdfTable) -> Result<SparseVector>
    where
        I: IntoIterator<Item = (TermId, u32)>,
    {
        let pairs = row
            .into_iter()
            .map(|(term_id, count)| {
                let idf = idf.get(term_id).ok_or(IndexError::ZeroDocumentFrequency { term_id })?;
                Ok((term_id, self.tf(count) * idf))
            })
            .collect::<Result<Vec<_>>>()?;
        let mut vector = SparseVector::from_pairs(pairs);
        vector.normalize();
        Ok(vector)
    }

    /// Weigh every row of the matrix in parallel, checking `cancel` per row.
    pub fn weigh_matrix(&self, matrix: &TermFrequencyMatrix, idf: &IdfTable, cancel: &CancelToken) -> Result<Vec<SparseVector>> {
        let num_docs = matrix.num_docs();
        (0..num_docs)
            .into_par_iter()
            .map(|d| {
                if cancel.is_cancelled() {
                    return Err(IndexError::Cancelled { scanned: num_docs });
                }
                self.weigh_row(matrix.row(d as DocId), idf)
            })
            .collect()
    }
}

/// idf per term id, computed once from the frozen document frequencies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdfTable {
    values: Vec<f32>,
}

impl IdfTable {
    pub fn get(&self, term_id: TermId) -> Option<f32> {
        self.values.get(term_id as usize).copied()
    }
}
