use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{Error, Result};
use crate::index::Index;
use crate::Recommendation;

/// Shared read-only handle over the current index.
///
/// Starts unbuilt. A rebuild constructs a fresh `Index` and `install`s it;
/// the swap is atomic, so concurrent readers either keep the old index or
/// see the new one, never a partial build.
#[derive(Clone, Default)]
pub struct SharedIndex {
    inner: Arc<RwLock<Option<Arc<Index>>>>,
}

impl SharedIndex {
    /// An unbuilt handle; queries fail with `IndexNotBuilt` until `install`.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Swap in a freshly built index.
    pub fn install(&self, index: Index) {
        *self.inner.write() = Some(Arc::new(index));
    }

    /// The currently installed index.
    pub fn get(&self) -> Result<Arc<Index>> {
        self.inner.read().clone().ok_or(Error::IndexNotBuilt)
    }

    /// Rank the corpus against `query` through the installed index.
    pub fn recommend(&self, query: &str, top_n: usize) -> Result<Vec<Recommendation>> {
        Ok(crate::recommend(&self.get()?, query, top_n))
    }
}
