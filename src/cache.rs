use std::collections::HashMap;

use crate::id::{Mid, Ssrc};

/// What was decided the first time a mid was munged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    ssrcs: Vec<Ssrc>,
    layer_count: usize,
}

impl CacheEntry {
    pub(crate) fn new(ssrcs: Vec<Ssrc>, layer_count: usize) -> Self {
        assert!(!ssrcs.is_empty(), "CacheEntry without primary SSRC");
        CacheEntry {
            ssrcs,
            layer_count: layer_count.max(1),
        }
    }

    /// SSRC of every layer, the original primary SSRC first.
    pub fn ssrcs(&self) -> &[Ssrc] {
        &self.ssrcs
    }

    /// The primary (lowest layer) SSRC.
    pub fn primary(&self) -> Ssrc {
        self.ssrcs[0]
    }

    /// Number of simulcast layers. Always at least 1.
    pub fn layer_count(&self) -> usize {
        self.layer_count
    }
}

/// Per mid memory of the SSRC handed out, so that renegotiations keep them.
///
/// Entries are never changed once inserted. The first resolution seen for a
/// mid decides the layer count for the lifetime of the cache.
#[derive(Debug, Default)]
pub(crate) struct RenegotiationCache {
    entries: HashMap<Mid, CacheEntry>,
}

impl RenegotiationCache {
    pub fn get(&self, mid: &Mid) -> Option<&CacheEntry> {
        self.entries.get(mid)
    }

    /// Insert an entry unless one exists already. Returns the entry in the cache.
    pub fn insert(&mut self, mid: Mid, entry: CacheEntry) -> &CacheEntry {
        self.entries.entry(mid).or_insert(entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
