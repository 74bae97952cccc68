use crate::TermId;

/// Sparse `term id -> weight` vector stored as pairs sorted by term id.
///
/// Keys are unique. Zero entries are never stored, so `len()` is the number of
/// nonzero components.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(TermId, f32)>,
}

impl SparseVector {
    pub fn new() -> Self { Self::default() }

    /// Build from unordered pairs. Zero weights are dropped; duplicate term
    /// ids are summed.
    pub fn from_pairs(mut pairs: Vec<(TermId, f32)>) -> Self {
        pairs.sort_unstable_by_key(|&(term_id, _)| term_id);
        let mut entries: Vec<(TermId, f32)> = Vec::with_capacity(pairs.len());
        for (term_id, weight) in pairs {
            match entries.last_mut() {
                Some(last) if last.0 == term_id => last.1 += weight,
                _ => entries.push((term_id, weight)),
            }
        }
        entries.retain(|&(_, w)| w != 0.0);
        Self { entries }
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (TermId, f32)> + '_ {
        self.entries.iter().copied()
    }

    pub fn get(&self, term_id: TermId) -> Option<f32> {
        self.entries
            .binary_search_by_key(&term_id, |&(t, _)| t)
            .ok()
            .map(|i| self.entries[i].1)
    }

    pub fn l2_norm(&self) -> f32 {
        self.entries.iter().map(|&(_, w)| w * w).sum::<f32>().sqrt()
    }

    /// Scale to unit length. The zero vector is left untouched.
    pub fn normalize(&mut self) {
        let norm = self.l2_norm();
        if norm == 0.0 { return; }
        for entry in self.entries.iter_mut() {
            entry.1 /= norm;
        }
    }

    /// Dot product over shared terms. Iterates the shorter vector and looks
    /// each term up in the longer one.
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (small, large) = if self.len() <= other.len() { (self, other) } else { (other, self) };
        small
            .iter()
            .filter_map(|(term_id, w)| large.get(term_id).map(|v| w * v))
            .sum()
    }
}
