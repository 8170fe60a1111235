//! A batch source is anything that knows how many batches it holds and
//! can hand out a fresh iterator over them on demand.
//!
//! Every call to [`BatchSource::batches`] starts over from the first batch.
//! Pulls are fallible; an `Err` item is the source's own failure,
//! and callers are expected to pass it along untouched.

mod sources_simple;

pub use sources_simple::*;

use anyhow::Result;

pub type BoxedBatches<'s, B> = Box<dyn 's + Iterator<Item = Result<B>>>;

pub trait BatchSource {
    type Batch;

    /// The number of batches a full pass is expected to produce.
    ///
    /// Nothing forces the iterator from [`Self::batches`] to agree with this.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn batches(&self) -> BoxedBatches<'_, Self::Batch>;
}

impl<S> BatchSource for &S
where
    S: BatchSource + ?Sized,
{
    type Batch = S::Batch;

    fn len(&self) -> usize {
        (**self).len()
    }

    fn batches(&self) -> BoxedBatches<'_, Self::Batch> {
        (**self).batches()
    }
}
