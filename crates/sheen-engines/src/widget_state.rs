// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Hover / focus / enable / pressed state of whole widgets

use crate::Engine;
use rustc_hash::FxHashMap as HashMap;
use sheen::config::AnimationConfig;
use sheen::{AnimationMode, AnimationParams, ObjectHandle, Profile, Scheduler, TransitionEngine};
use std::time::Duration;

/// Widget-level interaction dimensions
///
/// Holds one [`TransitionEngine`] per [`AnimationMode`]. Objects must be
/// registered for a mode before it is animated for them.
#[derive(Clone, Debug)]
pub struct WidgetStateEngine {
    name: &'static str,
    registered: HashMap<ObjectHandle, AnimationMode>,
    hover: TransitionEngine,
    focus: TransitionEngine,
    enable: TransitionEngine,
    pressed: TransitionEngine,
}

impl WidgetStateEngine {
    /// Construct; `name` identifies this instance in log messages
    pub fn new(name: &'static str) -> Self {
        WidgetStateEngine {
            name,
            registered: Default::default(),
            hover: TransitionEngine::new(Profile::HOVER),
            focus: TransitionEngine::new(Profile::FOCUS),
            enable: TransitionEngine::new(Profile::ENABLE),
            pressed: TransitionEngine::new(Profile::PRESSED),
        }
    }

    fn engines_mut(&mut self) -> [&mut TransitionEngine; 4] {
        [
            &mut self.hover,
            &mut self.focus,
            &mut self.enable,
            &mut self.pressed,
        ]
    }

    /// Engine for a single `mode`
    pub fn engine(&self, mode: AnimationMode) -> Option<&TransitionEngine> {
        if mode == AnimationMode::HOVER {
            Some(&self.hover)
        } else if mode == AnimationMode::FOCUS {
            Some(&self.focus)
        } else if mode == AnimationMode::ENABLE {
            Some(&self.enable)
        } else if mode == AnimationMode::PRESSED {
            Some(&self.pressed)
        } else {
            None
        }
    }

    fn engine_mut(&mut self, mode: AnimationMode) -> Option<&mut TransitionEngine> {
        if mode == AnimationMode::HOVER {
            Some(&mut self.hover)
        } else if mode == AnimationMode::FOCUS {
            Some(&mut self.focus)
        } else if mode == AnimationMode::ENABLE {
            Some(&mut self.enable)
        } else if mode == AnimationMode::PRESSED {
            Some(&mut self.pressed)
        } else {
            None
        }
    }

    /// Register `object` for `modes`
    ///
    /// Modes accumulate over repeated calls. Returns `true` if any mode was
    /// newly added.
    pub fn register_widget(&mut self, object: ObjectHandle, modes: AnimationMode) -> bool {
        let entry = self.registered.entry(object).or_default();
        let added = !entry.contains(modes);
        *entry |= modes;
        if added {
            log::debug!(target: "sheen_engines", "{}: register {object} for {modes:?}", self.name);
        }
        added
    }

    /// True if `object` is registered for any of `modes`
    pub fn is_registered(&self, object: ObjectHandle, modes: AnimationMode) -> bool {
        self.registered
            .get(&object)
            .is_some_and(|m| m.intersects(modes))
    }

    /// Iterate over objects registered for any of `modes`
    pub fn registered_widgets(
        &self,
        modes: AnimationMode,
    ) -> impl Iterator<Item = ObjectHandle> + '_ {
        self.registered
            .iter()
            .filter(move |(_, m)| m.intersects(modes))
            .map(|(object, _)| *object)
    }

    /// Report input for `object` in a single `mode`
    ///
    /// Returns `true` if transition state changed. Objects not registered
    /// for `mode` are ignored.
    #[inline]
    pub fn update_state(
        &mut self,
        sched: &mut dyn Scheduler,
        object: ObjectHandle,
        mode: AnimationMode,
        active: bool,
    ) -> bool {
        self.update_state_with(sched, object, mode, active, AnimationParams::empty())
    }

    /// Report input for `object` in a single `mode`, with parameters
    pub fn update_state_with(
        &mut self,
        sched: &mut dyn Scheduler,
        object: ObjectHandle,
        mode: AnimationMode,
        active: bool,
        params: AnimationParams,
    ) -> bool {
        if !self.is_registered(object, mode) {
            return false;
        }
        match self.engine_mut(mode) {
            Some(engine) => engine.update_state(sched, object, active, params),
            None => false,
        }
    }

    /// True while `mode` is animating for `object`
    pub fn is_animated(&self, object: ObjectHandle, mode: AnimationMode) -> bool {
        self.engine(mode).is_some_and(|e| e.is_animated(object))
    }

    /// Opacity of `mode` for `object`, if tracked
    pub fn opacity(&self, object: ObjectHandle, mode: AnimationMode) -> Option<f32> {
        self.engine(mode).and_then(|e| e.opacity(object))
    }

    fn first_animated(&self, object: ObjectHandle, order: [AnimationMode; 3]) -> AnimationMode {
        order
            .into_iter()
            .find(|mode| self.is_animated(object, *mode))
            .unwrap_or_else(AnimationMode::empty)
    }

    /// The animated mode to use when painting a frame
    ///
    /// Precedence: enable, focus, hover. Empty if none is animated.
    pub fn frame_animation_mode(&self, object: ObjectHandle) -> AnimationMode {
        use AnimationMode as M;
        self.first_animated(object, [M::ENABLE, M::FOCUS, M::HOVER])
    }

    /// Opacity of [`Self::frame_animation_mode`]
    pub fn frame_opacity(&self, object: ObjectHandle) -> Option<f32> {
        self.opacity(object, self.frame_animation_mode(object))
    }

    /// The animated mode to use when painting a button
    ///
    /// Precedence: enable, hover, focus. Empty if none is animated.
    pub fn button_animation_mode(&self, object: ObjectHandle) -> AnimationMode {
        use AnimationMode as M;
        self.first_animated(object, [M::ENABLE, M::HOVER, M::FOCUS])
    }

    /// Opacity of [`Self::button_animation_mode`]
    pub fn button_opacity(&self, object: ObjectHandle) -> Option<f32> {
        self.opacity(object, self.button_animation_mode(object))
    }

    /// Destruction notification: evict all transition state of `object`
    pub fn object_destroyed(&mut self, object: ObjectHandle) -> usize {
        self.engines_mut()
            .into_iter()
            .map(|e| e.object_destroyed(object))
            .sum()
    }
}

impl Engine for WidgetStateEngine {
    fn set_enabled(&mut self, enabled: bool) {
        for engine in self.engines_mut() {
            engine.set_enabled(enabled);
        }
    }

    fn enabled(&self) -> bool {
        self.hover.enabled()
    }

    fn set_duration(&mut self, duration: Duration) {
        for engine in self.engines_mut() {
            engine.set_duration(duration);
        }
    }

    fn apply_config(&mut self, config: &AnimationConfig) {
        for engine in self.engines_mut() {
            engine.apply_config(config);
        }
    }

    fn unregister_widget(&mut self, object: ObjectHandle) -> bool {
        self.object_destroyed(object);
        let known = self.registered.remove(&object).is_some();
        if known {
            log::debug!(target: "sheen_engines", "{}: unregister {object}", self.name);
        }
        known
    }

    fn tick(&mut self, sched: &mut dyn Scheduler, delta: Duration) -> bool {
        let mut running = false;
        for engine in self.engines_mut() {
            if engine.is_ticking() {
                running |= engine.tick(sched, delta);
            }
        }
        running
    }

    fn is_ticking(&self) -> bool {
        self.hover.is_ticking()
            || self.focus.is_ticking()
            || self.enable.is_ticking()
            || self.pressed.is_ticking()
    }
}
