use anyhow::{anyhow, Result};
use derive_more::Display;
use std::str::FromStr;

/// Where batches are meant to live once handed to the consumer.
///
/// Carried as a placement hint only. Nothing in this workspace moves batch data.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display)]
pub enum Device {
    #[display(fmt = "cpu")]
    Cpu,
    #[display(fmt = "cuda:{}", _0)]
    Cuda(usize),
}

impl FromStr for Device {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match s.split_once(':') {
            None if s.eq_ignore_ascii_case("cpu") => Ok(Self::Cpu),
            None if s.eq_ignore_ascii_case("cuda") => Ok(Self::Cuda(0)),
            Some((typ, ordinal)) if typ.eq_ignore_ascii_case("cuda") => {
                let ordinal = ordinal
                    .parse::<usize>()
                    .map_err(|e| anyhow!("Invalid cuda ordinal {ordinal:?}: {e}"))?;
                Ok(Self::Cuda(ordinal))
            }
            _ => Err(anyhow!("Unknown device {s:?}")),
        }
    }
}
