//! Usage search: the reference-finding contract inspections consume, and an in-memory
//! implementation of it.
//!
//! The real usage index belongs to the host. Inspections only see it through
//! [`UsageSearch`], which offers a cheap cost probe and a cancellable full enumeration.

mod memory;
mod search;

pub use memory::{InMemoryUsageIndex, IndexedUsage};
pub use search::{
    SearchCost, SearchInterrupted, SearchScope, UsageLocation, UsageQuery, UsageSearch,
};
pub use tokio_util::sync::CancellationToken;
