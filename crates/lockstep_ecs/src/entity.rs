//! Entity identifiers
//!
//! Ids are allocated monotonically and never reused within a process run,
//! so a stale entity can never alias a newer one.

use std::fmt;

/// Opaque entity identifier
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity(u64);

impl Entity {
    /// Raw id value
    #[inline]
    pub const fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic entity allocator. No free list: ids from cleared scenes are
/// retired for the remainder of the process.
#[derive(Debug, Default)]
pub struct EntityAllocator {
    next: u64,
}

impl EntityAllocator {
    /// Create a new allocator
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh, never-before-issued entity
    pub fn allocate(&mut self) -> Entity {
        let id = self.next;
        self.next += 1;
        Entity(id)
    }

    /// Total number of ids issued so far
    pub fn issued(&self) -> u64 {
        self.next
    }
}
