//! ChainedHashMap: bucket table of collision chains driven by caller strategies.

use crate::config::MapConfig;
use crate::error::MapError;
use crate::reentrancy::DebugReentrancy;
use crate::strategy::{EqStrategy, HashStrategy};
use slotmap::{DefaultKey, SlotMap};

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
    // Cached `hash_key(key)`; growth re-places entries from this without
    // calling the strategy again.
    hash: u64,
    next: Option<DefaultKey>,
}

/// Separate-chaining hash map whose hashing and key equality are supplied
/// by the caller as `H: HashStrategy<K>` and `E: EqStrategy<K>`.
///
/// Entries are owned by the map; `K` and `V` may themselves be borrows
/// (`&[u8]`, `&T`), in which case the map only aliases caller memory and the
/// borrow checker keeps that memory alive for as long as the map is.
///
/// Growth doubles the bucket table and re-places every entry into its new
/// bucket, so each entry is always reachable from bucket
/// `hash_key(key) % bucket_count()`.
pub struct ChainedHashMap<K, V, H, E> {
    heads: Vec<Option<DefaultKey>>,
    entries: SlotMap<DefaultKey, Entry<K, V>>,
    hasher: H,
    eq: E,
    max_fill_ratio: f64,
    reentrancy: DebugReentrancy,
}

fn empty_table(buckets: usize) -> Result<Vec<Option<DefaultKey>>, MapError> {
    let mut heads = Vec::new();
    heads
        .try_reserve_exact(buckets)
        .map_err(|source| MapError::TableAlloc { buckets, source })?;
    heads.resize(buckets, None);
    Ok(heads)
}

impl<K, V, H, E> ChainedHashMap<K, V, H, E>
where
    H: HashStrategy<K>,
    E: EqStrategy<K>,
{
    /// Create a map with `MapConfig::default()` (101 buckets, fill ratio 0.5).
    pub fn new(hasher: H, eq: E) -> Result<Self, MapError> {
        Self::with_config(MapConfig::default(), hasher, eq)
    }

    /// Create a map with explicit table parameters. Fails without leaving a
    /// usable value behind if the config is invalid or the bucket table
    /// cannot be allocated.
    pub fn with_config(config: MapConfig, hasher: H, eq: E) -> Result<Self, MapError> {
        config.validate()?;
        let heads = empty_table(config.initial_buckets)?;
        tracing::debug!(
            buckets = config.initial_buckets,
            max_fill_ratio = config.max_fill_ratio,
            "created chained hash map"
        );
        Ok(Self {
            heads,
            entries: SlotMap::with_key(),
            hasher,
            eq,
            max_fill_ratio: config.max_fill_ratio,
            reentrancy: DebugReentrancy::new(),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of bucket slots (not entries).
    pub fn bucket_count(&self) -> usize {
        self.heads.len()
    }

    /// `len() / bucket_count()`.
    pub fn fill_ratio(&self) -> f64 {
        self.entries.len() as f64 / self.heads.len() as f64
    }

    pub fn max_fill_ratio(&self) -> f64 {
        self.max_fill_ratio
    }

    #[inline]
    fn bucket_of(&self, hash: u64) -> usize {
        (hash % self.heads.len() as u64) as usize
    }

    // Walk the chain of `hash`'s bucket; only the equality strategy decides
    // a match, the cached hash just skips entries that cannot match.
    fn find_slot(&self, key: &K, hash: u64) -> Option<DefaultKey> {
        let mut cur = self.heads[self.bucket_of(hash)];
        while let Some(slot) = cur {
            let e = self.entries.get(slot)?;
            if e.hash == hash && self.eq.keys_equal(key, &e.key) {
                return Some(slot);
            }
            cur = e.next;
        }
        None
    }

    fn locate(&self, key: &K) -> (u64, Option<DefaultKey>) {
        let _g = self.reentrancy.enter();
        let hash = self.hasher.hash_key(key);
        (hash, self.find_slot(key, hash))
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        let (_, slot) = self.locate(key);
        self.entries.get(slot?).map(|e| &e.value)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let (_, slot) = self.locate(key);
        self.entries.get_mut(slot?).map(|e| &mut e.value)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.locate(key).1.is_some()
    }

    /// Insert or update.
    ///
    /// If the table is above its fill ratio it is grown first; a failed
    /// growth returns the error and leaves the map exactly as it was.
    /// When an equal key is already stored, only its value is replaced and
    /// the previous value is returned; the stored key and the chain stay as
    /// they are and `len()` is unchanged. Otherwise the entry becomes the
    /// new head of its bucket's chain.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>, MapError> {
        if self.fill_ratio() > self.max_fill_ratio {
            self.grow()?;
        }

        let (hash, found) = self.locate(&key);
        if let Some(e) = found.and_then(|slot| self.entries.get_mut(slot)) {
            return Ok(Some(core::mem::replace(&mut e.value, value)));
        }

        let idx = self.bucket_of(hash);
        let next = self.heads[idx];
        let slot = self.entries.insert(Entry {
            key,
            value,
            hash,
            next,
        });
        self.heads[idx] = Some(slot);
        Ok(None)
    }

    fn grow(&mut self) -> Result<(), MapError> {
        let buckets = self.heads.len();
        let doubled = buckets
            .checked_mul(2)
            .ok_or(MapError::CapacityOverflow { buckets })?;
        match self.rehash_into(doubled) {
            Ok(()) => {
                tracing::debug!(
                    from = buckets,
                    to = doubled,
                    entries = self.entries.len(),
                    "grew bucket table"
                );
                Ok(())
            }
            Err(e) => {
                tracing::warn!(buckets, error = %e, "bucket table growth failed");
                Err(e)
            }
        }
    }

    // Build the new table completely before swapping it in, so an
    // allocation failure leaves the old table and all links untouched.
    fn rehash_into(&mut self, buckets: usize) -> Result<(), MapError> {
        let mut heads = empty_table(buckets)?;
        for (slot, e) in self.entries.iter_mut() {
            let idx = (e.hash % buckets as u64) as usize;
            e.next = heads[idx];
            heads[idx] = Some(slot);
        }
        self.heads = heads;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn head_value(&self, bucket: usize) -> Option<&V> {
        let slot = (*self.heads.get(bucket)?)?;
        self.entries.get(slot).map(|e| &e.value)
    }

    #[cfg(test)]
    pub(crate) fn stored_key(&self, key: &K) -> Option<&K> {
        let (_, slot) = self.locate(key);
        self.entries.get(slot?).map(|e| &e.key)
    }

    #[cfg(test)]
    pub(crate) fn chain_len(&self, bucket: usize) -> usize {
        let mut n = 0;
        let mut cur = self.heads[bucket];
        while let Some(slot) = cur {
            n += 1;
            cur = self.entries[slot].next;
        }
        n
    }
}
