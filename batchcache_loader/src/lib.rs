//! Replays the first few batches of a data source instead of pulling from it,
//! so that a training loop can be timed without the cost of data loading.

mod cached_loader;
mod traversal;

pub use cached_loader::{CachedLoader, DEFAULT_NUM_BATCHES};
pub use traversal::Traversal;
