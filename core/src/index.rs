use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::normalize::Normalizer;
use crate::{DocId, Movie, TermId};

/// Sparse weighted term vector over the index vocabulary.
///
/// Entries are (term id, tf-idf weight) pairs sorted by term id; `norm` is
/// the Euclidean norm, cached so ranking never recomputes it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermVector {
    pub weights: Vec<(TermId, f32)>,
    pub norm: f32,
}

impl TermVector {
    fn from_weights(mut weights: Vec<(TermId, f32)>) -> Self {
        weights.sort_by_key(|&(tid, _)| tid);
        let norm = weights.iter().map(|&(_, w)| w * w).sum::<f32>().sqrt();
        Self { weights, norm }
    }
}

/// Weighted term index over a fixed movie corpus.
///
/// Built once, read-only afterwards. Doc ids are corpus positions. The
/// vocabulary assigns term ids in first-seen order, so two builds over the
/// same corpus produce identical indexes.
#[derive(Debug)]
pub struct Index {
    vocabulary: HashMap<String, TermId>,
    idf: Vec<f32>,
    rows: Vec<TermVector>,
    movies: Vec<Movie>,
    normalizer: Normalizer,
}

impl Index {
    /// Build an index from `movies`, normalizing each overview.
    ///
    /// Term weight is `tf(t, d) * ln(N / df(t))` with raw term counts; df is
    /// at least 1 for every vocabulary term.
    pub fn build(movies: Vec<Movie>, normalizer: Normalizer) -> Result<Self> {
        if movies.is_empty() {
            return Err(Error::EmptyCorpus);
        }
        let n = movies.len();

        let mut vocabulary: HashMap<String, TermId> = HashMap::new();
        let mut next_term_id: TermId = 0;
        let mut df: Vec<u32> = Vec::new();
        let mut counts: Vec<Vec<(TermId, u32)>> = Vec::with_capacity(n);

        for movie in &movies {
            let mut tf: HashMap<TermId, u32> = HashMap::new();
            let mut seen_in_doc: HashSet<TermId> = HashSet::new();
            for term in normalizer.tokens(&movie.overview) {
                let tid = *vocabulary.entry(term).or_insert_with(|| {
                    let id = next_term_id;
                    next_term_id += 1;
                    df.push(0);
                    id
                });
                *tf.entry(tid).or_insert(0) += 1;
                if seen_in_doc.insert(tid) {
                    df[tid as usize] += 1;
                }
            }
            counts.push(tf.into_iter().collect());
        }

        let idf: Vec<f32> = df
            .iter()
            .map(|&df_t| ((n as f32) / (df_t.max(1) as f32)).ln())
            .collect();

        let rows: Vec<TermVector> = counts
            .into_iter()
            .map(|row| {
                TermVector::from_weights(
                    row.into_iter()
                        .map(|(tid, tf_raw)| (tid, tf_raw as f32 * idf[tid as usize]))
                        .collect(),
                )
            })
            .collect();

        tracing::info!(num_docs = n, num_terms = vocabulary.len(), "index build complete");
        Ok(Self {
            vocabulary,
            idf,
            rows,
            movies,
            normalizer,
        })
    }

    /// Project arbitrary text into the vocabulary learned at build time.
    ///
    /// Uses the input's term frequencies with the build-time idf weights;
    /// out-of-vocabulary terms are dropped. A query with no usable signal
    /// projects to the zero vector.
    pub fn project(&self, text: &str) -> TermVector {
        let mut tf: HashMap<TermId, u32> = HashMap::new();
        for term in self.normalizer.tokens(text) {
            if let Some(&tid) = self.vocabulary.get(&term) {
                *tf.entry(tid).or_insert(0) += 1;
            }
        }
        TermVector::from_weights(
            tf.into_iter()
                .map(|(tid, tf_raw)| (tid, tf_raw as f32 * self.idf[tid as usize]))
                .collect(),
        )
    }

    pub fn num_docs(&self) -> usize {
        self.movies.len()
    }

    pub fn num_terms(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn vocabulary(&self) -> &HashMap<String, TermId> {
        &self.vocabulary
    }

    pub fn idf(&self) -> &[f32] {
        &self.idf
    }

    /// One weight row per document, aligned with corpus order.
    pub fn rows(&self) -> &[TermVector] {
        &self.rows
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn movie(&self, doc_id: DocId) -> Option<&Movie> {
        self.movies.get(doc_id as usize)
    }
}
