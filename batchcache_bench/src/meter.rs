use anyhow::Result;
use derive_more::{Add, Constructor};
use std::fmt;
use std::time::{Duration, Instant};

#[derive(Constructor, Add, Clone, Copy, Default, PartialEq, Debug)]
pub struct ThroughputReport {
    pub steps: usize,
    pub elapsed: Duration,
}

impl ThroughputReport {
    pub fn steps_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.steps as f64 / secs
    }
}

impl fmt::Display for ThroughputReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} steps in {:.3?} ({:.1} steps/s)",
            self.steps,
            self.elapsed,
            self.steps_per_sec()
        )
    }
}

/// Drives `batches` to the end, calling `step` on each batch, and times the whole pass,
/// fetching included.
///
/// The first `Err`, from either a batch or a step, aborts the pass and is returned.
pub fn measure<I, B, F>(batches: I, mut step: F) -> Result<ThroughputReport>
where
    I: IntoIterator<Item = Result<B>>,
    F: FnMut(B) -> Result<()>,
{
    let start = Instant::now();
    let mut steps = 0;
    for batch in batches {
        step(batch?)?;
        steps += 1;
    }
    Ok(ThroughputReport::new(steps, start.elapsed()))
}
