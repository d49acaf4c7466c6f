use thiserror::Error;

/// Failures surfaced by the index lifecycle.
///
/// Degenerate queries (empty text, all stopwords, no vocabulary overlap) are
/// not errors; they rank with zero scores.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// A build was attempted over zero documents.
    #[error("corpus contains no documents")]
    EmptyCorpus,

    /// A query went through a handle that never completed a build.
    #[error("index has not been built")]
    IndexNotBuilt,
}

pub type Result<T> = std::result::Result<T, Error>;
