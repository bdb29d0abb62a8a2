//! Slot allocation.
//!
//! Slots are small integer indices into the runtime value array. The
//! allocator memoizes one slot per output port and hands out the smallest
//! unused index first, so freed indices are reused.

use crate::graph::PortRef;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Index into the runtime slot array.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct SlotId(pub u32);

impl SlotId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SlotId({})", self.0)
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

/// Allocates [`SlotId`]s for output ports and anonymous sink inputs.
#[derive(Debug, Default)]
pub struct SlotAllocator {
    by_port: HashMap<PortRef, SlotId>,
    used: BTreeSet<u32>,
}

impl SlotAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The slot for `key`, allocating one on first reference.
    pub fn allocate(&mut self, key: PortRef) -> SlotId {
        if let Some(&slot) = self.by_port.get(&key) {
            return slot;
        }
        let slot = self.allocate_fresh();
        self.by_port.insert(key, slot);
        slot
    }

    /// A slot with no port key. Never returned by [`allocate`](Self::allocate).
    pub fn allocate_fresh(&mut self) -> SlotId {
        let mut candidate = 0u32;
        while self.used.contains(&candidate) {
            candidate += 1;
        }
        self.used.insert(candidate);
        SlotId(candidate)
    }

    /// Release the slot held by `key`. Unknown keys are ignored.
    pub fn free(&mut self, key: PortRef) {
        if let Some(slot) = self.by_port.remove(&key) {
            self.used.remove(&slot.0);
        }
    }

    /// Release an anonymous slot.
    pub fn free_slot(&mut self, slot: SlotId) {
        self.by_port.retain(|_, s| *s != slot);
        self.used.remove(&slot.0);
    }

    /// Lookup without allocating.
    pub fn get(&self, key: PortRef) -> Option<SlotId> {
        self.by_port.get(&key).copied()
    }

    /// Highest slot currently in use.
    pub fn max_slot(&self) -> Option<SlotId> {
        self.used.iter().next_back().map(|&s| SlotId(s))
    }

    /// Size of an array that can hold every allocated slot.
    pub fn slot_count(&self) -> usize {
        self.max_slot().map_or(0, |s| s.index() + 1)
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}
