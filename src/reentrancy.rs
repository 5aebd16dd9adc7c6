//! Debug-only reentrancy guard around strategy callbacks.
//!
//! `ChainedHashMap` calls into caller code (hash and equality strategies)
//! while it walks a chain. A strategy that reaches back into the same map
//! during that walk is a contract violation; in debug builds it panics, in
//! release builds the guard compiles away.

#[cfg(debug_assertions)]
use core::cell::Cell;
#[cfg(not(debug_assertions))]
use core::marker::PhantomData;

/// Per-map depth tracker. Public entry points that invoke strategies hold
/// `let _g = self.reentrancy.enter();` for the duration of the call.
///
/// Holds a `Cell` in debug builds, which keeps the map `!Sync` while still
/// allowing it to be moved across threads (e.g. behind a `Mutex`).
#[derive(Debug)]
pub(crate) struct DebugReentrancy {
    #[cfg(debug_assertions)]
    depth: Cell<u32>,
}

impl DebugReentrancy {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            depth: Cell::new(0),
        }
    }

    /// Panics in debug builds if the map is already inside a guarded call.
    #[inline]
    pub(crate) fn enter(&self) -> ReentrancyGuard<'_> {
        #[cfg(debug_assertions)]
        {
            let d = self.depth.get();
            assert!(
                d == 0,
                "reentrancy detected: a hash or equality strategy called back into the map"
            );
            self.depth.set(d + 1);
            ReentrancyGuard { owner: self }
        }

        #[cfg(not(debug_assertions))]
        {
            ReentrancyGuard { _z: PhantomData }
        }
    }
}

impl Default for DebugReentrancy {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) struct ReentrancyGuard<'a> {
    #[cfg(debug_assertions)]
    owner: &'a DebugReentrancy,
    #[cfg(not(debug_assertions))]
    _z: PhantomData<&'a ()>,
}

impl Drop for ReentrancyGuard<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        {
            let d = self.owner.depth.get();
            debug_assert!(d > 0);
            self.owner.depth.set(d - 1);
        }
    }
}
