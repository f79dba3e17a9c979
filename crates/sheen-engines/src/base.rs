// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Engine trait and registration set

use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
use sheen::config::AnimationConfig;
use sheen::{AnimationParams, Key, ObjectHandle, Profile, Scheduler, TransitionEngine};
use std::fmt::Debug;
use std::time::Duration;

/// Bulk operations common to all engines
///
/// [`crate::Animations`] holds its engines as concrete types but uses this
/// trait to apply configuration, route unregistration and deliver ticks
/// uniformly.
pub trait Engine {
    /// Enable or disable transitions
    ///
    /// Disabling discards transition state (all keys become untracked) but
    /// not registrations or stored geometry.
    fn set_enabled(&mut self, enabled: bool);

    /// True if transitions are enabled
    fn enabled(&self) -> bool;

    /// Set the base transition duration
    fn set_duration(&mut self, duration: Duration);

    /// Apply all relevant global settings
    fn apply_config(&mut self, config: &AnimationConfig);

    /// Forget `object` entirely
    ///
    /// Returns `true` if `object` was known to this engine.
    fn unregister_widget(&mut self, object: ObjectHandle) -> bool;

    /// Advance by `delta`; returns `true` if still animating
    fn tick(&mut self, sched: &mut dyn Scheduler, delta: Duration) -> bool;

    /// True while a tick has been requested
    fn is_ticking(&self) -> bool;
}

/// Set of objects registered with an engine
///
/// Registration is idempotent.
#[derive(Clone, Debug, Default)]
pub struct WidgetSet {
    set: HashSet<ObjectHandle>,
    name: &'static str,
}

impl WidgetSet {
    /// Construct; `name` identifies the owner in log messages
    pub fn new(name: &'static str) -> Self {
        WidgetSet {
            set: Default::default(),
            name,
        }
    }

    /// Register `object`; returns `true` if newly inserted
    pub fn insert(&mut self, object: ObjectHandle) -> bool {
        let inserted = self.set.insert(object);
        if inserted {
            log::debug!(target: "sheen_engines", "{}: register {object}", self.name);
        }
        inserted
    }

    /// Unregister `object`; returns `true` if it was registered
    pub fn remove(&mut self, object: ObjectHandle) -> bool {
        let removed = self.set.remove(&object);
        if removed {
            log::debug!(target: "sheen_engines", "{}: unregister {object}", self.name);
        }
        removed
    }

    /// True if `object` is registered
    #[inline]
    pub fn contains(&self, object: ObjectHandle) -> bool {
        self.set.contains(&object)
    }

    /// Number of registered objects
    #[inline]
    pub fn len(&self) -> usize {
        self.set.len()
    }

    /// True if no object is registered
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Iterate over registered objects (unordered)
    pub fn iter(&self) -> impl Iterator<Item = ObjectHandle> + '_ {
        self.set.iter().copied()
    }
}

/// A [`TransitionEngine`] animating only registered objects
///
/// This is the common body of the simpler specialised engines. Engines where
/// at most one sub-key per object is active at a time (the hovered section
/// of a header, the hovered tab) use [`Self::set_current`], which fades the
/// previous sub-key out while fading the new one in.
#[derive(Clone, Debug)]
pub(crate) struct Gated<S = ()> {
    widgets: WidgetSet,
    current: HashMap<ObjectHandle, S>,
    engine: TransitionEngine<S>,
}

impl<S: Copy + Eq + Debug> Gated<S> {
    pub(crate) fn new(name: &'static str, profile: Profile) -> Self {
        Gated {
            widgets: WidgetSet::new(name),
            current: Default::default(),
            engine: TransitionEngine::new(profile),
        }
    }

    #[cfg(test)]
    fn engine(&self) -> &TransitionEngine<S> {
        &self.engine
    }

    #[inline]
    pub(crate) fn register_widget(&mut self, object: ObjectHandle) -> bool {
        self.widgets.insert(object)
    }

    #[inline]
    pub(crate) fn is_registered(&self, object: ObjectHandle) -> bool {
        self.widgets.contains(object)
    }

    pub(crate) fn update_state(
        &mut self,
        sched: &mut dyn Scheduler,
        key: Key<S>,
        active: bool,
        params: AnimationParams,
    ) -> bool {
        self.widgets.contains(key.object) && self.engine.update_state(sched, key, active, params)
    }

    /// Make `sub` the only active sub-key of `object`
    ///
    /// Returns `true` if the current sub-key changed.
    pub(crate) fn set_current(
        &mut self,
        sched: &mut dyn Scheduler,
        object: ObjectHandle,
        sub: Option<S>,
    ) -> bool {
        if !self.widgets.contains(object) {
            return false;
        }
        let previous = match sub {
            Some(sub) => self.current.insert(object, sub),
            None => self.current.remove(&object),
        };
        if previous == sub {
            return false;
        }

        let none = AnimationParams::empty();
        if let Some(previous) = previous {
            self.engine
                .update_state(sched, Key::new(object, previous), false, none);
        }
        if let Some(sub) = sub {
            self.engine.update_state(sched, Key::new(object, sub), true, none);
        }
        true
    }

    #[inline]
    pub(crate) fn current(&self, object: ObjectHandle) -> Option<S> {
        self.current.get(&object).copied()
    }

    #[inline]
    pub(crate) fn is_animated(&self, key: Key<S>) -> bool {
        self.engine.is_animated(key)
    }

    #[inline]
    pub(crate) fn opacity(&self, key: Key<S>) -> Option<f32> {
        self.engine.opacity(key)
    }
}

impl<S: Copy + Eq + Debug> Engine for Gated<S> {
    fn set_enabled(&mut self, enabled: bool) {
        self.engine.set_enabled(enabled);
    }

    fn enabled(&self) -> bool {
        self.engine.enabled()
    }

    fn set_duration(&mut self, duration: Duration) {
        self.engine.set_duration(duration);
    }

    fn apply_config(&mut self, config: &AnimationConfig) {
        self.engine.apply_config(config);
    }

    fn unregister_widget(&mut self, object: ObjectHandle) -> bool {
        self.engine.unregister_widget(object);
        self.current.remove(&object);
        self.widgets.remove(object)
    }

    fn tick(&mut self, sched: &mut dyn Scheduler, delta: Duration) -> bool {
        self.engine.tick(sched, delta)
    }

    fn is_ticking(&self) -> bool {
        self.engine.is_ticking()
    }
}

/// Implement [`Engine`] by forwarding to a field which implements it
macro_rules! impl_engine_via {
    ($T:ty, $field:ident) => {
        impl $crate::Engine for $T {
            fn set_enabled(&mut self, enabled: bool) {
                $crate::Engine::set_enabled(&mut self.$field, enabled);
            }

            fn enabled(&self) -> bool {
                $crate::Engine::enabled(&self.$field)
            }

            fn set_duration(&mut self, duration: ::std::time::Duration) {
                $crate::Engine::set_duration(&mut self.$field, duration);
            }

            fn apply_config(&mut self, config: &::sheen::config::AnimationConfig) {
                $crate::Engine::apply_config(&mut self.$field, config);
            }

            fn unregister_widget(&mut self, object: ::sheen::ObjectHandle) -> bool {
                $crate::Engine::unregister_widget(&mut self.$field, object)
            }

            fn tick(
                &mut self,
                sched: &mut dyn ::sheen::Scheduler,
                delta: ::std::time::Duration,
            ) -> bool {
                $crate::Engine::tick(&mut self.$field, sched, delta)
            }

            fn is_ticking(&self) -> bool {
                $crate::Engine::is_ticking(&self.$field)
            }
        }
    };
}
