// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Tracked object slots

use crate::cast::Cast;
use std::fmt;

/// Non-owning handle to an external UI object
///
/// Handles are allocated by an [`ObjectTable`]. A handle never keeps the
/// object alive; once the slot is released, the handle compares unequal to
/// any handle allocated later for the same slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectHandle {
    index: u32,
    generation: u32,
}

impl ObjectHandle {
    /// Slot index
    #[inline]
    pub fn index(self) -> u32 {
        self.index
    }

    /// Slot generation
    #[inline]
    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

#[derive(Clone, Debug, Default)]
struct Slot {
    generation: u32,
    alive: bool,
}

/// Arena of tracked object slots
///
/// The host toolkit allocates one handle per UI object it wants animated
/// and releases it from its own destruction hook. Released slots are reused
/// with a bumped generation, so stale handles can never alias a new object.
#[derive(Clone, Debug, Default)]
pub struct ObjectTable {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl ObjectTable {
    /// Construct an empty table
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live objects
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if no object is live
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocate a handle for a new object
    pub fn insert(&mut self) -> ObjectHandle {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.alive = true;
            return ObjectHandle {
                index,
                generation: slot.generation,
            };
        }

        let index = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
        self.slots.push(Slot {
            generation: 0,
            alive: true,
        });
        ObjectHandle {
            index,
            generation: 0,
        }
    }

    /// True if `handle` refers to a live object
    pub fn contains(&self, handle: ObjectHandle) -> bool {
        self.slots
            .get(handle.index as usize)
            .is_some_and(|slot| slot.alive && slot.generation == handle.generation)
    }

    /// Release the slot of `handle`
    ///
    /// Returns `false` if the handle was already stale.
    pub fn remove(&mut self, handle: ObjectHandle) -> bool {
        let Some(slot) = self.slots.get_mut(handle.index as usize) else {
            return false;
        };
        if !slot.alive || slot.generation != handle.generation {
            return false;
        }

        slot.alive = false;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.len -= 1;
        true
    }

    /// Iterate over live handles
    pub fn iter(&self) -> impl Iterator<Item = ObjectHandle> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.alive.then(|| ObjectHandle {
                index: i.cast(),
                generation: slot.generation,
            })
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reuse_bumps_generation() {
        let mut table = ObjectTable::new();
        let a = table.insert();
        let b = table.insert();
        assert_ne!(a, b);
        assert_eq!(table.len(), 2);

        assert!(table.remove(a));
        assert!(!table.remove(a));
        assert!(!table.contains(a));

        let c = table.insert();
        assert_eq!(c.index(), a.index());
        assert_ne!(c, a);
        assert!(table.contains(c));
        assert!(table.contains(b));
        assert_eq!(table.iter().count(), 2);
    }

    #[test]
    fn display() {
        let mut table = ObjectTable::new();
        let a = table.insert();
        assert_eq!(a.to_string(), "#0v0");
        table.remove(a);
        assert_eq!(table.insert().to_string(), "#0v1");
    }
}
