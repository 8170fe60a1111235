use crate::cached_loader::{CachedLoader, Population};
use anyhow::Result;
use batchcache_types::source::BatchSource;
use std::sync::Arc;

/// One pass over a [`CachedLoader`].
///
/// The first step of the first pass populates the cache.
/// Dropping a traversal early leaves the loader's cursor where the traversal stopped.
pub struct Traversal<'l, S>
where
    S: BatchSource,
{
    loader: &'l mut CachedLoader<S>,
    remaining: usize,
}

impl<'l, S> Traversal<'l, S>
where
    S: BatchSource,
{
    pub(crate) fn new(loader: &'l mut CachedLoader<S>, remaining: usize) -> Self {
        Self { loader, remaining }
    }

    fn next_impl(&mut self) -> Result<Option<Arc<S::Batch>>> {
        if self.remaining == 0 {
            return Ok(None);
        }

        if !self.loader.is_populated() {
            // On error, end this pass. The error item is the last one yielded.
            self.remaining = 0;
            match self.loader.populate()? {
                Population::Complete => self.remaining = self.loader.len(),
                // Yield each batch that did arrive once, then stop.
                Population::Exhausted { pulled } => self.remaining = pulled,
            }
        }

        match self.loader.next_cached() {
            None => {
                self.remaining = 0;
                Ok(None)
            }
            Some(batch) => {
                self.remaining -= 1;
                Ok(Some(batch))
            }
        }
    }
}

impl<'l, S> Iterator for Traversal<'l, S>
where
    S: BatchSource,
{
    type Item = Result<Arc<S::Batch>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_impl().transpose()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}
