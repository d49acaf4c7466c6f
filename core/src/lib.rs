//! Storyline-based movie recommendation engine.
//!
//! A sparse lexical model: overviews are normalized, folded into a tf-idf
//! weighted term index, and queries are ranked against the corpus by cosine
//! similarity. No I/O lives here; corpus loading and presentation are the
//! caller's concern.

use serde::{Deserialize, Serialize};

pub mod error;
pub mod handle;
pub mod index;
pub mod normalize;
pub mod rank;

pub use error::{Error, Result};
pub use handle::SharedIndex;
pub use index::{Index, TermVector};
pub use normalize::Normalizer;
pub use rank::{rank, Ranked, DEFAULT_TOP_N};

pub type TermId = u32;
pub type DocId = u32;

/// One corpus entry. Immutable after load; the index assigns doc ids by
/// corpus position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    pub overview: String,
    pub poster_url: String,
}

/// A ranked answer for one query. Scores are cosine similarities in [0,1].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub overview: String,
    pub poster_url: String,
    pub score: f32,
}

/// Build an index over `movies` with the default English normalizer.
pub fn build_index(movies: Vec<Movie>) -> Result<Index> {
    Index::build(movies, Normalizer::english())
}

/// Rank the corpus against `query` and return the top `top_n` movies.
///
/// Degenerate queries (empty, all stopwords, no vocabulary overlap) are not
/// errors: every document scores 0 and the result keeps corpus order.
pub fn recommend(index: &Index, query: &str, top_n: usize) -> Vec<Recommendation> {
    let query_vector = index.project(query);
    let ranked = rank::rank(&query_vector, index, top_n);
    tracing::debug!(query, hits = ranked.len(), "recommend");
    ranked
        .into_iter()
        .map(|r| {
            let movie = &index.movies()[r.doc_id as usize];
            Recommendation {
                title: movie.title.clone(),
                overview: movie.overview.clone(),
                poster_url: movie.poster_url.clone(),
                score: r.score,
            }
        })
        .collect()
}
