use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use super::error::TaxonomyResult;
use super::index::TaxonomyIndex;
use crate::hashing::short_hex;

/// Outcome of [`TaxonomyHandle::reload`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// A new index was swapped in.
    Swapped { categories: usize },
    /// The dataset fingerprint matched the current index; nothing changed.
    Unchanged,
}

#[derive(Clone)]
/// Shared, hot-swappable handle to a [`TaxonomyIndex`].
///
/// Readers take an `Arc` snapshot and keep using it even if a swap happens mid-query;
/// the index itself is never mutated.
pub struct TaxonomyHandle {
    inner: Arc<RwLock<Arc<TaxonomyIndex>>>,
}

impl TaxonomyHandle {
    pub fn new(index: TaxonomyIndex) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(index))),
        }
    }

    /// Loads `path` (falling back to the emergency taxonomy) and wraps it.
    pub fn load(path: impl AsRef<Path>) -> Self {
        Self::new(TaxonomyIndex::load(path))
    }

    /// Returns the current index.
    #[inline]
    pub fn snapshot(&self) -> Arc<TaxonomyIndex> {
        Arc::clone(&self.inner.read())
    }

    /// Atomically replaces the index and returns the previous one.
    pub fn replace(&self, index: TaxonomyIndex) -> Arc<TaxonomyIndex> {
        let categories = index.len();
        let previous = std::mem::replace(&mut *self.inner.write(), Arc::new(index));
        info!(
            previous_categories = previous.len(),
            categories,
            "Taxonomy index swapped"
        );
        previous
    }

    /// Rebuilds from `path` and swaps it in if the dataset changed.
    ///
    /// Unlike [`TaxonomyIndex::load`], a failed reload keeps the current index.
    pub fn reload(&self, path: impl AsRef<Path>) -> TaxonomyResult<ReloadOutcome> {
        let index = TaxonomyIndex::try_load(path)?;
        if index.fingerprint() == self.snapshot().fingerprint() {
            info!(
                fingerprint = %short_hex(index.fingerprint()),
                "Taxonomy unchanged, skipping swap"
            );
            return Ok(ReloadOutcome::Unchanged);
        }

        let categories = index.len();
        self.replace(index);
        Ok(ReloadOutcome::Swapped { categories })
    }

    /// Number of categories in the current index.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns `true` if the current index holds no categories.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Number of handles sharing this slot.
    pub fn strong_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }
}

impl std::fmt::Debug for TaxonomyHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaxonomyHandle")
            .field("index", &*self.inner.read())
            .field("handles", &Arc::strong_count(&self.inner))
            .finish()
    }
}
