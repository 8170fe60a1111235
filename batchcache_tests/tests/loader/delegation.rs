use crate::helpers::{collect_vals, LabeledSource};
use anyhow::Result;
use batchcache_loader::CachedLoader;
use batchcache_types::{device::Device, source::BatchSource};
use std::num::NonZeroUsize;

#[test]
fn source_surface_is_reachable() {
    let src = LabeledSource::new("bar", 2, vec![3, 1, 3, 2, 1]);
    let loader = CachedLoader::from(src);

    assert_eq!(loader.foo, "bar");
    assert_eq!(loader.batch_size, 2);
    assert_eq!(loader.num_classes(), 3);
    assert_eq!(loader.source().foo, "bar");
    assert_eq!(loader.len(), 3);
}

#[test]
fn borrowed_source_stays_usable() -> Result<()> {
    let src = LabeledSource::new("bar", 2, vec![3, 1, 3, 2, 1]);
    let mut loader = CachedLoader::new(&src, Some(Device::Cpu), NonZeroUsize::MIN);

    assert_eq!(loader.device(), Some(Device::Cpu));
    assert_eq!(collect_vals(loader.iter())?, vec![vec![3, 1]; 3]);

    // The source itself is not affected by the loader's cache.
    let direct = src.batches().collect::<Result<Vec<_>>>()?;
    assert_eq!(direct, vec![vec![3, 1], vec![3, 2], vec![1]]);
    assert_eq!(loader.foo, src.foo);

    Ok(())
}

#[test]
fn into_source() {
    let loader = CachedLoader::from(LabeledSource::new("baz", 4, vec![]));
    assert!(loader.is_empty());

    let src = loader.into_source();
    assert_eq!(src.foo, "baz");
}
