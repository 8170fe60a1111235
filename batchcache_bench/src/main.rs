//! Times a simulated training loop fed by a slow synthetic source,
//! first directly and then through a [`CachedLoader`].
//!
//! Configured through `BATCHCACHE_*` environment variables. See [`batchcache_bench::config`].

use anyhow::Result;
use batchcache_bench::{
    config::BenchConfig,
    meter::{self, ThroughputReport},
};
use batchcache_loader::CachedLoader;
use batchcache_types::source::{BatchSource, SyntheticSource};
use std::hint;
use std::thread;
use tracing_subscriber::EnvFilter;

const BATCH_ELEMS: usize = 1024;

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    enable_tracing();

    let config = BenchConfig::from_env()?;
    tracing::info!(?config, "Starting.");

    let load_delay = config.load_delay;
    let source = SyntheticSource::new(config.source_len, |i: usize| -> Result<Vec<f32>> {
        thread::sleep(load_delay);
        Ok(vec![i as f32; BATCH_ELEMS])
    });

    let step_delay = config.step_delay;
    let train_step = |batch: &[f32]| -> Result<()> {
        thread::sleep(step_delay);
        hint::black_box(batch.iter().sum::<f32>());
        Ok(())
    };

    let mut direct = ThroughputReport::default();
    for epoch in 0..config.epochs {
        let report = meter::measure(source.batches(), |batch| train_step(batch.as_slice()))?;
        tracing::info!(epoch, %report, "Direct epoch done.");
        direct = direct + report;
    }

    let mut loader = CachedLoader::new(&source, config.device, config.num_batches);
    let mut cached = ThroughputReport::default();
    for epoch in 0..config.epochs {
        let report = meter::measure(loader.iter(), |batch| train_step(batch.as_slice()))?;
        tracing::info!(epoch, %report, "Cached epoch done.");
        cached = cached + report;
    }

    println!("Direct source: {direct}");
    println!(
        "Cached loader: {cached} (cached {} of {} batches)",
        loader.num_batches(),
        loader.len()
    );
    if direct.steps_per_sec() > 0.0 {
        println!(
            "Speedup: {:.2}x",
            cached.steps_per_sec() / direct.steps_per_sec()
        );
    }

    Ok(())
}
