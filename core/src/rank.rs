use std::cmp::Ordering;

use crate::index::{Index, TermVector};
use crate::DocId;

/// Result count used when the caller does not ask for one.
pub const DEFAULT_TOP_N: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ranked {
    pub doc_id: DocId,
    pub score: f32,
}

/// Cosine similarity between two sparse vectors sorted by term id.
///
/// Defined as 0 when either norm is 0, so degenerate queries rank everything
/// at zero instead of failing.
fn cosine(a: &TermVector, b: &TermVector) -> f32 {
    if a.norm == 0.0 || b.norm == 0.0 {
        return 0.0;
    }
    let mut dot = 0.0f32;
    let (mut i, mut j) = (0, 0);
    while i < a.weights.len() && j < b.weights.len() {
        match a.weights[i].0.cmp(&b.weights[j].0) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                dot += a.weights[i].1 * b.weights[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    // weights are non-negative, so the true range is [0,1]; clamp float drift
    (dot / (a.norm * b.norm)).clamp(0.0, 1.0)
}

/// Score every document against `query` and return the top `top_n`.
///
/// Descending by score; the sort is stable, so equal scores keep corpus
/// order. `top_n == 0` yields an empty list.
pub fn rank(query: &TermVector, index: &Index, top_n: usize) -> Vec<Ranked> {
    let mut scored: Vec<Ranked> = index
        .rows()
        .iter()
        .enumerate()
        .map(|(doc, row)| Ranked {
            doc_id: doc as DocId,
            score: cosine(query, row),
        })
        .collect();
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored.truncate(top_n);
    scored
}
