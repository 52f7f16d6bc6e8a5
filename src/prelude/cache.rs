//! Order Spec Cache
//!
//! NIF callers send the order as a list of binaries on every call. Validated
//! specs are kept in a process-wide LRU keyed by the tag list and handed out
//! as `Arc`s, so blocks built from the same order share one spec.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, OnceLock};

use lru::LruCache;

use super::error::PreludeError;
use super::order::OrderSpec;

/// Maximum number of distinct order specs kept
const CACHE_CAPACITY: usize = 64;

type SpecCache = Mutex<LruCache<Vec<String>, Arc<OrderSpec>>>;

fn cache() -> &'static SpecCache {
    static CACHE: OnceLock<SpecCache> = OnceLock::new();
    CACHE.get_or_init(|| {
        let capacity = NonZeroUsize::new(CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN);
        Mutex::new(LruCache::new(capacity))
    })
}

/// Validated spec for `tags`, from the cache when possible
///
/// Invalid tag lists are never cached. A poisoned cache lock falls back to
/// validating without caching.
///
/// # Errors
///
/// `InvalidSpec` if `tags` is empty or repeats a tag.
pub fn order_spec(tags: Vec<String>) -> Result<Arc<OrderSpec>, PreludeError> {
    let Ok(mut guard) = cache().lock() else {
        return OrderSpec::new(&tags).map(Arc::new);
    };

    if let Some(spec) = guard.get(&tags) {
        return Ok(Arc::clone(spec));
    }

    let spec = Arc::new(OrderSpec::new(&tags)?);
    log::debug!(target: "rustyprelude.cache", "cached order spec of {} tags", spec.len());
    guard.put(tags, Arc::clone(&spec));
    Ok(spec)
}
