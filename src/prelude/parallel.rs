//! Parallel Scanning
//!
//! Uses Rayon to scan many containers against one spec. Blocks are immutable
//! snapshots, so the results can be handed to any thread.

use std::sync::Arc;

use rayon::prelude::*;

use super::locator::PreludeTagBlock;
use super::order::OrderSpec;
use super::source::ChildTagSource;

/// Scan every container in `sources`, preserving input order
pub fn scan_parallel<S>(sources: &[S], spec: &Arc<OrderSpec>) -> Vec<PreludeTagBlock>
where
    S: ChildTagSource + Sync,
{
    sources
        .par_iter()
        .map(|source| PreludeTagBlock::with_spec(source, Arc::clone(spec)))
        .collect()
}
