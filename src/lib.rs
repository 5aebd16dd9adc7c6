//! chain-hashmap: a single-threaded, separate-chaining hash map whose
//! hashing and key equality are supplied by the caller.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small associative container where the caller, not `K: Hash`
//!   / `K: Eq`, decides how keys are hashed and compared.
//! - Pieces:
//!   - `strategy`: the `HashStrategy<K>` / `EqStrategy<K>` capabilities,
//!     blanket impls for closures and function pointers, the default
//!     one-at-a-time byte-span hash, and `Hash`/`PartialEq` bridges.
//!   - `ChainedHashMap<K, V, H, E>`: bucket table of chain heads over an
//!     entry arena; bucket index is `hash % bucket_count`.
//!   - `MapConfig`: initial bucket count (101) and max fill ratio (0.5),
//!     passed at construction instead of global constants.
//!
//! Constraints
//! - Single-threaded: no internal locking. The map is `Send`; mutation from
//!   several threads goes through an external `Mutex`.
//! - No removal and no iteration; entries live until the map is dropped.
//! - Insert is an upsert: an equal key keeps its entry and its place in
//!   the chain, only the value is replaced.
//! - Allocation failure of the bucket table (construction or growth) is a
//!   `MapError`, never an abort; a failed growth leaves the map unchanged.
//!
//! Strategy contract
//! - Strategies must be pure and consistent: `keys_equal(a, b)` implies
//!   `hash_key(a) == hash_key(b)`. Violations are not detected and make
//!   lookups unreliable.
//! - The byte-span hash must not be applied to the raw bytes of a struct
//!   (padding is unspecified); hash composite keys field by field.
//!
//! Growth and rehashing
//! - When `len / bucket_count` exceeds the max fill ratio, the next insert
//!   doubles the table and re-places every entry in a freshly built table
//!   before swapping it in. Entries cache their hash, so strategies are
//!   never invoked during growth.
//!
//! Reentrancy policy
//! - Strategies run while the map is probing a chain. A debug-only guard
//!   panics if a strategy calls back into the same map during that window.
//!
//! Ownership
//! - The map owns its table and entry records. `K` and `V` may be borrows
//!   (`&[u8]`, `&T`) to alias caller memory without copying; lifetimes then
//!   keep that memory alive for as long as the map. Dropping the map
//!   releases every entry and the table exactly once.

mod chained_hash_map;
mod chained_hash_map_proptest;
mod config;
mod error;
mod reentrancy;
pub mod strategy;

// Public surface
pub use chained_hash_map::ChainedHashMap;
pub use config::{MapConfig, DEFAULT_INITIAL_BUCKETS, DEFAULT_MAX_FILL_RATIO};
pub use error::MapError;
pub use strategy::{one_at_a_time, EqStrategy, HashStrategy, OneAtATime, StdEq, StdHash};
