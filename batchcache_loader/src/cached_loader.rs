
use crate::traversal::Traversal;
use anyhow::Result;
use batchcache_types::{device::Device, source::BatchSource};
use std::cmp;
use std::num::NonZeroUsize;
use std::ops::Deref;
use std::sync::Arc;

pub const DEFAULT_NUM_BATCHES: NonZeroUsize = match NonZeroUsize::new(4) {
    Some(n) => n,
    None => unreachable!(),
};

pub(crate) enum CacheState<B> {
    Unpopulated,
    Populated { batches: Vec<Arc<B>>, cursor: usize },
}

pub(crate) enum Population {
    Complete,
    /// The source ran dry after `pulled` batches.
    Exhausted { pulled: usize },
}

/// Wraps a [`BatchSource`], keeps its first `num_batches` batches,
/// and from then on serves those batches round-robin without touching the source again.
///
/// Every traversal yields [`Self::len`] batches, same as a pass over the source would.
/// The round-robin cursor is not reset between traversals.
///
/// The loader derefs to the wrapped source, so the source's own fields and methods
/// stay reachable on the loader.
pub struct CachedLoader<S>
where
    S: BatchSource,
{
    source: S,
    device: Option<Device>,
    num_batches: usize,
    state: CacheState<S::Batch>,
}

impl<S> CachedLoader<S>
where
    S: BatchSource,
{
    /// `num_batches` is clamped to the length of `source`.
    pub fn new(source: S, device: Option<Device>, num_batches: NonZeroUsize) -> Self {
        let num_batches = cmp::min(num_batches.get(), source.len());
        Self {
            source,
            device,
            num_batches,
            state: CacheState::Unpopulated,
        }
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The number of batches retained, i.e. the requested count clamped to [`Self::len`].
    pub fn num_batches(&self) -> usize {
        self.num_batches
    }

    pub fn device(&self) -> Option<Device> {
        self.device
    }

    pub fn is_populated(&self) -> bool {
        matches!(self.state, CacheState::Populated { .. })
    }

    /// Index of the cached batch the next traversal step will yield.
    /// `None` until the cache is populated.
    pub fn cursor(&self) -> Option<usize> {
        match &self.state {
            CacheState::Unpopulated => None,
            CacheState::Populated { cursor, .. } => Some(*cursor),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }
    pub fn into_source(self) -> S {
        self.source
    }

    pub fn iter(&mut self) -> Traversal<'_, S> {
        let len = self.len();
        Traversal::new(self, len)
    }

    /// Pulls up to `num_batches` batches from a fresh pass over the source.
    ///
    /// A pull error leaves the cache unpopulated, so a later traversal starts over.
    pub(crate) fn populate(&mut self) -> Result<Population> {
        let mut batches = Vec::with_capacity(self.num_batches);
        let mut fresh = self.source.batches();
        while batches.len() < self.num_batches {
            match fresh.next() {
                None => break,
                Some(batch) => batches.push(Arc::new(batch?)),
            }
        }
        drop(fresh);

        let pulled = batches.len();
        self.state = CacheState::Populated { batches, cursor: 0 };

        if pulled < self.num_batches {
            tracing::debug!(
                pulled,
                expected = self.num_batches,
                len = self.len(),
                "Source ran dry while populating the batch cache."
            );
            Ok(Population::Exhausted { pulled })
        } else {
            tracing::debug!(pulled, len = self.len(), "Populated the batch cache.");
            Ok(Population::Complete)
        }
    }

    /// Takes the batch under the cursor and advances the cursor.
    pub(crate) fn next_cached(&mut self) -> Option<Arc<S::Batch>> {
        match &mut self.state {
            CacheState::Unpopulated => None,
            CacheState::Populated { batches, cursor } => {
                let batch = Arc::clone(batches.get(*cursor)?);
                *cursor = (*cursor + 1) % batches.len();
                Some(batch)
            }
        }
    }
}

impl<S> From<S> for CachedLoader<S>
where
    S: BatchSource,
{
    fn from(source: S) -> Self {
        Self::new(source, None, DEFAULT_NUM_BATCHES)
    }
}

impl<S> Deref for CachedLoader<S>
where
    S: BatchSource,
{
    type Target = S;

    fn deref(&self) -> &S {
        &self.source
    }
}

impl<'l, S> IntoIterator for &'l mut CachedLoader<S>
where
    S: BatchSource,
{
    type Item = Result<Arc<S::Batch>>;
    type IntoIter = Traversal<'l, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
