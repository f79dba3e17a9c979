// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Object-keyed registry

use crate::ObjectHandle;
use linear_map::LinearMap;
use rustc_hash::FxHashMap as HashMap;
use std::fmt::Debug;

/// Identity of a tracked region: an object plus an optional sub-key
///
/// The sub-key distinguishes independent regions of one object, e.g. the
/// two arrows of a scroll bar. Use `S = ()` where an object has a single
/// region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Key<S = ()> {
    /// The tracked object
    pub object: ObjectHandle,
    /// Region of `object`
    pub sub: S,
}

impl<S> Key<S> {
    /// Construct
    #[inline]
    pub fn new(object: ObjectHandle, sub: S) -> Self {
        Key { object, sub }
    }
}

impl From<ObjectHandle> for Key<()> {
    #[inline]
    fn from(object: ObjectHandle) -> Self {
        Key { object, sub: () }
    }
}

/// Map from [`Key`] to per-key data, grouped by object
///
/// All sub-keys of an object share one watch: the object is watched when its
/// first sub-key is tracked and dropped (with all its sub-keys) by
/// [`Self::on_object_destroyed`] or [`Self::forget_object`].
///
/// Few sub-keys exist per object, so these are held in a [`LinearMap`].
#[derive(Clone)]
pub struct KeyRegistry<S, V> {
    objects: HashMap<ObjectHandle, LinearMap<S, V>>,
    len: usize,
}

impl<S, V> Default for KeyRegistry<S, V> {
    fn default() -> Self {
        KeyRegistry {
            objects: Default::default(),
            len: 0,
        }
    }
}

impl<S, V> Debug for KeyRegistry<S, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyRegistry")
            .field("len", &self.len)
            .field("num_objects", &self.objects.len())
            .finish()
    }
}

impl<S: Copy + Eq + Debug, V> KeyRegistry<S, V> {
    /// Construct an empty registry
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries (over all objects and sub-keys)
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if there are no entries
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of watched objects
    #[inline]
    pub fn num_objects(&self) -> usize {
        self.objects.len()
    }

    /// True if `object` has at least one entry
    #[inline]
    pub fn is_watched(&self, object: ObjectHandle) -> bool {
        self.objects.contains_key(&object)
    }

    /// True if `key` has an entry
    pub fn contains(&self, key: Key<S>) -> bool {
        self.get(key).is_some()
    }

    /// Get the entry for `key`
    pub fn get(&self, key: Key<S>) -> Option<&V> {
        self.objects.get(&key.object)?.get(&key.sub)
    }

    /// Get the entry for `key`, mutably
    pub fn get_mut(&mut self, key: Key<S>) -> Option<&mut V> {
        self.objects.get_mut(&key.object)?.get_mut(&key.sub)
    }

    /// Track `key` with `value`, returning any previous value
    pub fn track(&mut self, key: Key<S>, value: V) -> Option<V> {
        let map = self.objects.entry(key.object).or_insert_with(|| {
            log::trace!(target: "sheen_core::registry", "track: watching {}", key.object);
            LinearMap::new()
        });
        let old = map.insert(key.sub, value);
        if old.is_none() {
            self.len += 1;
        }
        old
    }

    /// Remove the entry for `key`
    ///
    /// The object stops being watched when its last sub-key is removed.
    pub fn forget(&mut self, key: Key<S>) -> Option<V> {
        let map = self.objects.get_mut(&key.object)?;
        let value = map.remove(&key.sub)?;
        self.len -= 1;
        if map.is_empty() {
            self.objects.remove(&key.object);
        }
        Some(value)
    }

    /// Remove all entries of `object` (deliberate unregistration)
    ///
    /// Returns `true` if anything was removed.
    pub fn forget_object(&mut self, object: ObjectHandle) -> bool {
        self.remove_object(object) > 0
    }

    /// Destruction notification for `object`
    ///
    /// Removes every entry of `object` across all sub-keys; returns the
    /// number of entries evicted.
    pub fn on_object_destroyed(&mut self, object: ObjectHandle) -> usize {
        let n = self.remove_object(object);
        if n > 0 {
            log::trace!(
                target: "sheen_core::registry",
                "on_object_destroyed: evicted {n} entries of {object}"
            );
        }
        n
    }

    fn remove_object(&mut self, object: ObjectHandle) -> usize {
        match self.objects.remove(&object) {
            Some(map) => {
                self.len -= map.len();
                map.len()
            }
            None => 0,
        }
    }

    /// Remove all entries
    pub fn clear(&mut self) {
        self.objects.clear();
        self.len = 0;
    }

    /// Iterate over watched objects
    pub fn objects(&self) -> impl Iterator<Item = ObjectHandle> + '_ {
        self.objects.keys().copied()
    }

    /// Iterate over entries
    pub fn entries(&self) -> impl Iterator<Item = (Key<S>, &V)> + '_ {
        self.objects.iter().flat_map(|(object, map)| {
            map.iter().map(move |(sub, v)| (Key::new(*object, *sub), v))
        })
    }

    /// Iterate over entries, mutably
    pub fn entries_mut(&mut self) -> impl Iterator<Item = (Key<S>, &mut V)> + '_ {
        self.objects.iter_mut().flat_map(|(object, map)| {
            let object = *object;
            map.iter_mut().map(move |(sub, v)| (Key::new(object, *sub), v))
        })
    }

    /// Retain only entries for which `f` returns `true`
    pub fn retain(&mut self, mut f: impl FnMut(Key<S>, &mut V) -> bool) {
        let mut removed = 0;
        self.objects.retain(|object, map| {
            let subs: smallvec::SmallVec<[S; 4]> = map
                .iter_mut()
                .filter_map(|(sub, v)| (!f(Key::new(*object, *sub), v)).then_some(*sub))
                .collect();
            for sub in subs {
                map.remove(&sub);
                removed += 1;
            }
            !map.is_empty()
        });
        self.len -= removed;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ObjectTable;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Part {
        A,
        B,
    }

    #[test]
    fn sub_keys_share_object_watch() {
        let mut table = ObjectTable::new();
        let (x, y) = (table.insert(), table.insert());
        let mut reg = KeyRegistry::<Part, u32>::new();

        assert!(reg.track(Key::new(x, Part::A), 1).is_none());
        assert!(reg.track(Key::new(x, Part::B), 2).is_none());
        assert_eq!(reg.track(Key::new(x, Part::B), 3), Some(2));
        reg.track(Key::new(y, Part::A), 4);
        assert_eq!(reg.len(), 3);
        assert_eq!(reg.num_objects(), 2);

        assert_eq!(reg.on_object_destroyed(x), 2);
        assert!(!reg.contains(Key::new(x, Part::A)));
        assert!(!reg.contains(Key::new(x, Part::B)));
        assert!(!reg.is_watched(x));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.on_object_destroyed(x), 0);
    }

    #[test]
    fn forget_last_sub_key_unwatches() {
        let mut table = ObjectTable::new();
        let x = table.insert();
        let mut reg = KeyRegistry::<Part, u32>::new();
        reg.track(Key::new(x, Part::A), 5);
        if let Some(v) = reg.get_mut(Key::new(x, Part::A)) {
            *v += 5;
        }
        assert_eq!(reg.get(Key::new(x, Part::A)), Some(&10));
        assert_eq!(reg.len(), 1);

        assert_eq!(reg.forget(Key::new(x, Part::B)), None);
        assert_eq!(reg.forget(Key::new(x, Part::A)), Some(10));
        assert!(reg.is_empty());
        assert!(!reg.is_watched(x));
    }

    #[test]
    fn retain_counts() {
        let mut table = ObjectTable::new();
        let (x, y) = (table.insert(), table.insert());
        let mut reg = KeyRegistry::<Part, u32>::new();
        reg.track(Key::new(x, Part::A), 1);
        reg.track(Key::new(x, Part::B), 2);
        reg.track(Key::new(y, Part::A), 3);

        reg.retain(|_, v| *v != 2);
        assert_eq!(reg.len(), 2);
        reg.retain(|key, _| key.object != y);
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.num_objects(), 1);
        let keys: Vec<_> = reg.entries().map(|(key, _)| key).collect();
        assert_eq!(keys, vec![Key::new(x, Part::A)]);
        assert_eq!(format!("{reg:?}"), "KeyRegistry { len: 1, num_objects: 1 }");
    }

    #[test]
    fn stale_handle_never_matches() {
        let mut table = ObjectTable::new();
        let x = table.insert();
        let mut reg = KeyRegistry::<(), u32>::new();
        reg.track(x.into(), 1);
        table.remove(x);
        let z = table.insert();
        assert!(reg.get(z.into()).is_none());
    }
}
