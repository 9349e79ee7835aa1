// Copyright 2025 the Sprig Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stable widget identity.
//!
//! An [`Id`] is a 32-bit FNV-1a hash folded from the identity on top of the
//! [`IdStack`] (or the offset basis at the root) and a caller-supplied seed.
//! The same ancestry and seed always produce the same id, which is what lets
//! per-widget state survive from one frame to the next without handles.
//!
//! Seeds are anything implementing [`IdSeed`]: labels, byte strings, integers
//! (pointer-like discriminators), other ids, or a `(label, index)` pair for
//! identical labels declared in a loop.

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::UsageError;

/// FNV-1a offset basis; the hash of the empty path.
pub const HASH_INITIAL: u32 = 2_166_136_261;

const FNV_PRIME: u32 = 16_777_619;

/// A stable widget or container identity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(pub u32);

impl Id {
    /// The identity of the root scope, before any seed is folded in.
    pub const ROOT: Self = Self(HASH_INITIAL);
}

fn fold_bytes(mut hash: u32, bytes: &[u8]) -> u32 {
    for &b in bytes {
        hash = (hash ^ u32::from(b)).wrapping_mul(FNV_PRIME);
    }
    hash
}

/// A value that can be folded into a running identity hash.
pub trait IdSeed {
    /// Fold `self` into `hash` and return the result.
    fn fold_into(&self, hash: u32) -> u32;
}

impl IdSeed for [u8] {
    fn fold_into(&self, hash: u32) -> u32 {
        fold_bytes(hash, self)
    }
}

impl IdSeed for str {
    fn fold_into(&self, hash: u32) -> u32 {
        fold_bytes(hash, self.as_bytes())
    }
}

impl IdSeed for String {
    fn fold_into(&self, hash: u32) -> u32 {
        self.as_str().fold_into(hash)
    }
}

impl IdSeed for u32 {
    fn fold_into(&self, hash: u32) -> u32 {
        fold_bytes(hash, &self.to_le_bytes())
    }
}

impl IdSeed for u64 {
    fn fold_into(&self, hash: u32) -> u32 {
        fold_bytes(hash, &self.to_le_bytes())
    }
}

impl IdSeed for usize {
    fn fold_into(&self, hash: u32) -> u32 {
        fold_bytes(hash, &self.to_le_bytes())
    }
}

impl IdSeed for Id {
    fn fold_into(&self, hash: u32) -> u32 {
        self.0.fold_into(hash)
    }
}

impl<T: IdSeed + ?Sized> IdSeed for &T {
    fn fold_into(&self, hash: u32) -> u32 {
        (**self).fold_into(hash)
    }
}

impl<A: IdSeed, B: IdSeed> IdSeed for (A, B) {
    fn fold_into(&self, hash: u32) -> u32 {
        self.1.fold_into(self.0.fold_into(hash))
    }
}

/// Stack of enclosing scope identities.
#[derive(Clone, Debug, Default)]
pub struct IdStack {
    stack: Vec<Id>,
    last: Option<Id>,
}

impl IdStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash `seed` under the current scope without pushing it.
    pub fn id<S: IdSeed + ?Sized>(&mut self, seed: &S) -> Id {
        let base = self.top().unwrap_or(Id::ROOT);
        let id = Id(seed.fold_into(base.0));
        self.last = Some(id);
        id
    }

    /// Hash `seed` under the current scope and enter it.
    pub fn push<S: IdSeed + ?Sized>(&mut self, seed: &S) -> Id {
        let id = self.id(seed);
        self.stack.push(id);
        id
    }

    /// Enter an already computed scope.
    pub fn push_id(&mut self, id: Id) {
        self.stack.push(id);
    }

    /// Leave the innermost scope.
    pub fn pop(&mut self) -> Result<Id, UsageError> {
        self.stack.pop().ok_or(UsageError::IdStackUnderflow)
    }

    /// The innermost scope, if any.
    pub fn top(&self) -> Option<Id> {
        self.stack.last().copied()
    }

    /// The most recently computed id.
    pub fn last_id(&self) -> Option<Id> {
        self.last
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Drop every scope.
    pub fn clear(&mut self) {
        self.stack.clear();
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fnv1a_reference_values() {
        // Published FNV-1a 32-bit test vectors.
        assert_eq!("".fold_into(HASH_INITIAL), 0x811c_9dc5);
        assert_eq!("a".fold_into(HASH_INITIAL), 0xe40c_292c);
        assert_eq!("foobar".fold_into(HASH_INITIAL), 0xbf9c_f968);
    }

    #[test]
    fn identical_paths_yield_identical_ids() {
        let run = || {
            let mut ids = IdStack::new();
            ids.push("window");
            ids.push(&("row", 3_u32));
            let id = ids.id("OK");
            ids.pop().unwrap();
            ids.pop().unwrap();
            id
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn scope_changes_identity() {
        let mut ids = IdStack::new();
        let bare = ids.id("OK");
        ids.push("window");
        let scoped = ids.id("OK");
        assert_ne!(bare, scoped);
    }

    #[test]
    fn disambiguator_separates_loop_items() {
        let mut ids = IdStack::new();
        let a = ids.id(&("item", 0_u32));
        let b = ids.id(&("item", 1_u32));
        assert_ne!(a, b);
    }

    #[test]
    fn u32_hashes_as_four_le_bytes() {
        assert_eq!(7_u32.fold_into(HASH_INITIAL), [7_u8, 0, 0, 0].fold_into(HASH_INITIAL));
        assert_eq!(Id(7).fold_into(HASH_INITIAL), 7_u32.fold_into(HASH_INITIAL));
    }

    #[test]
    fn pop_on_empty_is_usage_error() {
        let mut ids = IdStack::new();
        assert_eq!(ids.pop(), Err(UsageError::IdStackUnderflow));
    }

    #[test]
    fn last_id_tracks_most_recent_hash() {
        let mut ids = IdStack::new();
        let id = ids.id("x");
        assert_eq!(ids.last_id(), Some(id));
        assert_eq!(ids.depth(), 0);
    }
}
