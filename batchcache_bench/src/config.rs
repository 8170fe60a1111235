use anyhow::{anyhow, Result};
use batchcache_loader::DEFAULT_NUM_BATCHES;
use batchcache_types::device::Device;
use std::env;
use std::fmt::Display;
use std::num::NonZeroUsize;
use std::str::FromStr;
use std::time::Duration;

pub const ENV_VAR_SOURCE_LEN: &str = "BATCHCACHE_SOURCE_LEN";
pub const ENV_VAR_NUM_BATCHES: &str = "BATCHCACHE_NUM_BATCHES";
pub const ENV_VAR_LOAD_DELAY_MS: &str = "BATCHCACHE_LOAD_DELAY_MS";
pub const ENV_VAR_STEP_DELAY_MS: &str = "BATCHCACHE_STEP_DELAY_MS";
pub const ENV_VAR_EPOCHS: &str = "BATCHCACHE_EPOCHS";
pub const ENV_VAR_DEVICE: &str = "BATCHCACHE_DEVICE";

pub const DEFAULT_SOURCE_LEN: usize = 32;
pub const DEFAULT_LOAD_DELAY_MS: u64 = 5;
pub const DEFAULT_STEP_DELAY_MS: u64 = 1;
pub const DEFAULT_EPOCHS: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BenchConfig {
    /// Batches per epoch.
    pub source_len: usize,
    pub num_batches: NonZeroUsize,
    /// Simulated cost of producing one batch.
    pub load_delay: Duration,
    /// Simulated cost of one training step.
    pub step_delay: Duration,
    pub epochs: usize,
    pub device: Option<Device>,
}

impl BenchConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Unset variables fall back to defaults. Set but malformed ones are errors.
    pub fn from_vars<L>(lookup: L) -> Result<Self>
    where
        L: Fn(&str) -> Option<String>,
    {
        let source_len = parse_var(&lookup, ENV_VAR_SOURCE_LEN)?.unwrap_or(DEFAULT_SOURCE_LEN);
        let num_batches = parse_var(&lookup, ENV_VAR_NUM_BATCHES)?.unwrap_or(DEFAULT_NUM_BATCHES);
        let load_delay_ms =
            parse_var(&lookup, ENV_VAR_LOAD_DELAY_MS)?.unwrap_or(DEFAULT_LOAD_DELAY_MS);
        let step_delay_ms =
            parse_var(&lookup, ENV_VAR_STEP_DELAY_MS)?.unwrap_or(DEFAULT_STEP_DELAY_MS);
        let epochs = parse_var(&lookup, ENV_VAR_EPOCHS)?.unwrap_or(DEFAULT_EPOCHS);
        let device = parse_var(&lookup, ENV_VAR_DEVICE)?;

        Ok(Self {
            source_len,
            num_batches,
            load_delay: Duration::from_millis(load_delay_ms),
            step_delay: Duration::from_millis(step_delay_ms),
            epochs,
            device,
        })
    }
}

fn parse_var<L, T>(lookup: &L, name: &str) -> Result<Option<T>>
where
    L: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(name) {
        None => Ok(None),
        Some(val) if val.trim().is_empty() => Ok(None),
        Some(val) => val
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| anyhow!("Invalid {name}={val:?}: {e}")),
    }
}
