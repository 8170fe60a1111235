use super::{BatchSource, BoxedBatches};
use anyhow::Result;
use derive_more::{Constructor, From};

/// Batches held in memory. Every pull yields a clone.
#[derive(From, Clone, Debug)]
pub struct VecSource<B> {
    batches: Vec<B>,
}

impl<B> VecSource<B> {
    pub fn as_slice(&self) -> &[B] {
        &self.batches
    }
}

impl<B> BatchSource for VecSource<B>
where
    B: Clone,
{
    type Batch = B;

    fn len(&self) -> usize {
        self.batches.len()
    }

    fn batches(&self) -> BoxedBatches<'_, B> {
        Box::new(self.batches.iter().cloned().map(Ok))
    }
}

/// Batches produced on demand by calling `generate` with the batch index.
///
/// `generate` runs once per pull, so any cost it carries (sleeping, decoding, ...)
/// is paid every pass.
#[derive(Constructor)]
pub struct SyntheticSource<F> {
    len: usize,
    generate: F,
}

impl<F, B> BatchSource for SyntheticSource<F>
where
    F: Fn(usize) -> Result<B>,
{
    type Batch = B;

    fn len(&self) -> usize {
        self.len
    }

    fn batches(&self) -> BoxedBatches<'_, B> {
        Box::new((0..self.len).map(|i| (self.generate)(i)))
    }
}
