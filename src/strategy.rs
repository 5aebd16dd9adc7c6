//! Hash and equality strategies supplied by the caller.
//!
//! A `ChainedHashMap` never calls `K: Hash` or `K: Eq` directly; it is
//! parameterized by one `HashStrategy<K>` and one `EqStrategy<K>`, fixed for
//! its lifetime. Both are resolved statically. Closures and function
//! pointers implement the traits through blanket impls, so
//! `|k: &String| ...` is a valid strategy.
//!
//! Contract (not checked at runtime): both strategies are pure and
//! deterministic, and `keys_equal(a, b)` implies
//! `hash_key(a) == hash_key(b)`. Breaking it makes lookups unreliable.

use core::hash::{BuildHasher, Hash};
use hashbrown::hash_map::DefaultHashBuilder;

pub trait HashStrategy<K: ?Sized> {
    fn hash_key(&self, key: &K) -> u64;
}

pub trait EqStrategy<K: ?Sized> {
    fn keys_equal(&self, a: &K, b: &K) -> bool;
}

impl<K: ?Sized, F> HashStrategy<K> for F
where
    F: Fn(&K) -> u64,
{
    #[inline]
    fn hash_key(&self, key: &K) -> u64 {
        self(key)
    }
}

impl<K: ?Sized, F> EqStrategy<K> for F
where
    F: Fn(&K, &K) -> bool,
{
    #[inline]
    fn keys_equal(&self, a: &K, b: &K) -> bool {
        self(a, b)
    }
}

/// Jenkins one-at-a-time hash over a byte span of known length.
///
/// Order-sensitive and not null-terminated: every byte in `bytes` counts.
/// Do not feed it the raw memory of a struct; padding bytes are
/// unspecified. Hash composite keys field by field and combine the results.
pub fn one_at_a_time(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0;
    for &b in bytes {
        hash = hash.wrapping_add(u64::from(b));
        hash = hash.wrapping_add(hash << 10);
        hash ^= hash >> 6;
    }
    hash = hash.wrapping_add(hash << 3);
    hash ^= hash >> 11;
    hash.wrapping_add(hash << 15)
}

/// Default byte-span strategy: `one_at_a_time` over `key.as_ref()`.
#[derive(Copy, Clone, Debug, Default)]
pub struct OneAtATime;

impl<K> HashStrategy<K> for OneAtATime
where
    K: ?Sized + AsRef<[u8]>,
{
    #[inline]
    fn hash_key(&self, key: &K) -> u64 {
        one_at_a_time(key.as_ref())
    }
}

/// Routes `K: Hash` through a `BuildHasher`.
#[derive(Clone, Debug, Default)]
pub struct StdHash<S = DefaultHashBuilder> {
    build: S,
}

impl<S> StdHash<S> {
    pub fn with_hasher(build: S) -> Self {
        Self { build }
    }
}

impl<K, S> HashStrategy<K> for StdHash<S>
where
    K: ?Sized + Hash,
    S: BuildHasher,
{
    #[inline]
    fn hash_key(&self, key: &K) -> u64 {
        self.build.hash_one(key)
    }
}

/// Equality through `K: PartialEq`.
#[derive(Copy, Clone, Debug, Default)]
pub struct StdEq;

impl<K> EqStrategy<K> for StdEq
where
    K: ?Sized + PartialEq,
{
    #[inline]
    fn keys_equal(&self, a: &K, b: &K) -> bool {
        a == b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_at_a_time_known_vectors() {
        assert_eq!(one_at_a_time(b""), 0);
        assert_eq!(one_at_a_time(b"a"), 0x6_ca2e_9442);
        assert_eq!(one_at_a_time(b"blah blah"), 0x8fcc_efbe_f222_ddc4);
    }

    /// Invariant: the hash depends on byte order, not only on the byte multiset.
    #[test]
    fn one_at_a_time_is_order_sensitive() {
        assert_ne!(one_at_a_time(b"ab"), one_at_a_time(b"ba"));
    }

    /// Invariant: no terminator semantics; a trailing NUL is a distinct key.
    #[test]
    fn one_at_a_time_counts_every_byte() {
        assert_ne!(one_at_a_time(b"blah blah"), one_at_a_time(b"blah blah\0"));
    }

    #[test]
    fn one_at_a_time_strategy_accepts_byte_like_keys() {
        let expected = one_at_a_time(b"key");
        assert_eq!(OneAtATime.hash_key("key"), expected);
        assert_eq!(OneAtATime.hash_key(&b"key"[..]), expected);
        assert_eq!(OneAtATime.hash_key(&String::from("key")), expected);
        assert_eq!(OneAtATime.hash_key(&vec![b'k', b'e', b'y']), expected);
    }

    #[test]
    fn closures_are_strategies() {
        let h = |k: &u32| u64::from(*k) * 3;
        let e = |a: &u32, b: &u32| a % 10 == b % 10;
        assert_eq!(h.hash_key(&7), 21);
        assert!(e.keys_equal(&3, &13));
        assert!(!e.keys_equal(&3, &14));
    }

    #[test]
    fn fn_pointers_are_strategies() {
        fn len_hash(k: &str) -> u64 {
            k.len() as u64
        }
        fn ignore_case(a: &str, b: &str) -> bool {
            a.eq_ignore_ascii_case(b)
        }
        let h: fn(&str) -> u64 = len_hash;
        let e: fn(&str, &str) -> bool = ignore_case;
        assert_eq!(h.hash_key("four"), 4);
        assert!(e.keys_equal("Key", "kEY"));
    }

    #[test]
    fn std_strategies_agree_with_hash_and_eq() {
        let h: StdHash = StdHash::default();
        let a = String::from("same");
        let b = String::from("same");
        assert_eq!(h.hash_key(&a), h.hash_key(&b));
        assert!(StdEq.keys_equal(&a, &b));
        assert!(!StdEq.keys_equal(&a, &String::from("other")));
    }
}
