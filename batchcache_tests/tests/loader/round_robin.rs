use crate::helpers::{collect_vals, CountingSource};
use anyhow::Result;
use batchcache_loader::CachedLoader;
use itertools::Itertools;
use rand::prelude::*;
use std::num::NonZeroUsize;

fn nz(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

#[test]
fn continues_across_traversals() -> Result<()> {
    let mut loader = CachedLoader::new(CountingSource::new(6), None, nz(4));

    assert_eq!(collect_vals(loader.iter())?, vec![0, 1, 2, 3, 0, 1]);
    assert_eq!(collect_vals(loader.iter())?, vec![2, 3, 0, 1, 2, 3]);
    assert_eq!(collect_vals(loader.iter())?, vec![0, 1, 2, 3, 0, 1]);

    Ok(())
}

#[test]
fn continues_after_partial_traversal() -> Result<()> {
    let mut loader = CachedLoader::new(CountingSource::new(5), None, nz(3));

    let partial = loader.iter().take(2).map_ok(|b| *b).collect::<Result<Vec<_>>>()?;
    assert_eq!(partial, vec![0, 1]);
    assert_eq!(loader.cursor(), Some(2));

    assert_eq!(collect_vals(loader.iter())?, vec![2, 0, 1, 2, 0]);

    Ok(())
}

#[test]
fn cycles_cached_prefix() -> Result<()> {
    let mut rand_rng = rand::thread_rng();
    for _ in 0..100 {
        let len = rand_rng.gen_range(1..30);
        let req = rand_rng.gen_range(1..10);
        let traversals = rand_rng.gen_range(1..5);
        let mut loader = CachedLoader::new(CountingSource::new(len), None, nz(req));
        let cache_size = loader.num_batches();

        let act = (0..traversals)
            .map(|_| collect_vals(loader.iter()))
            .collect::<Result<Vec<_>>>()?
            .concat();

        let exp = (0..len * traversals).map(|i| i % cache_size).collect_vec();
        assert_eq!(act, exp, "len {len} req {req} traversals {traversals}");
    }
    Ok(())
}
