// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Tab bar hover and focus

use crate::Engine;
use crate::base::Gated;
use sheen::config::AnimationConfig;
use sheen::geom::Coord;
use sheen::{AnimationMode, AnimationParams, Key, ObjectHandle, Profile, Scheduler};
use std::time::Duration;

/// Hover and focus transitions of tabs
///
/// Tabs have no persistent identity of their own, so each is keyed by its
/// top-left position within the tab bar. Only [`AnimationMode::HOVER`] and
/// [`AnimationMode::FOCUS`] are supported.
#[derive(Clone, Debug)]
pub struct TabBarEngine {
    hover: Gated<Coord>,
    focus: Gated<Coord>,
}

impl Default for TabBarEngine {
    fn default() -> Self {
        TabBarEngine::new()
    }
}

impl TabBarEngine {
    /// Construct
    pub fn new() -> Self {
        TabBarEngine {
            hover: Gated::new("tab_bar", Profile::HOVER),
            focus: Gated::new("tab_bar", Profile::FOCUS),
        }
    }

    fn data(&self, mode: AnimationMode) -> Option<&Gated<Coord>> {
        if mode == AnimationMode::HOVER {
            Some(&self.hover)
        } else if mode == AnimationMode::FOCUS {
            Some(&self.focus)
        } else {
            None
        }
    }

    fn data_mut(&mut self, mode: AnimationMode) -> Option<&mut Gated<Coord>> {
        if mode == AnimationMode::HOVER {
            Some(&mut self.hover)
        } else if mode == AnimationMode::FOCUS {
            Some(&mut self.focus)
        } else {
            None
        }
    }

    /// Register `object` for hover and focus; returns `true` if newly registered
    pub fn register_widget(&mut self, object: ObjectHandle) -> bool {
        let added = self.hover.register_widget(object);
        self.focus.register_widget(object) || added
    }

    /// True if `object` is registered
    #[inline]
    pub fn is_registered(&self, object: ObjectHandle) -> bool {
        self.hover.is_registered(object)
    }

    /// Report input for the tab at `position`
    pub fn update_state(
        &mut self,
        sched: &mut dyn Scheduler,
        object: ObjectHandle,
        position: Coord,
        mode: AnimationMode,
        value: bool,
    ) -> bool {
        let key = Key::new(object, position);
        match self.data_mut(mode) {
            Some(data) => data.update_state(sched, key, value, AnimationParams::empty()),
            None => false,
        }
    }

    /// Set the single active tab for `mode` (`None`: no tab)
    pub fn set_current_tab(
        &mut self,
        sched: &mut dyn Scheduler,
        object: ObjectHandle,
        mode: AnimationMode,
        position: Option<Coord>,
    ) -> bool {
        match self.data_mut(mode) {
            Some(data) => data.set_current(sched, object, position),
            None => false,
        }
    }

    /// The active tab for `mode`, if any
    pub fn current_tab(&self, object: ObjectHandle, mode: AnimationMode) -> Option<Coord> {
        self.data(mode)?.current(object)
    }

    /// True while the tab at `position` is animating in `mode`
    pub fn is_animated(&self, object: ObjectHandle, position: Coord, mode: AnimationMode) -> bool {
        let key = Key::new(object, position);
        self.data(mode).is_some_and(|data| data.is_animated(key))
    }

    /// Opacity of the tab at `position` in `mode`, if tracked
    pub fn opacity(&self, object: ObjectHandle, position: Coord, mode: AnimationMode) -> Option<f32> {
        let key = Key::new(object, position);
        self.data(mode)?.opacity(key)
    }
}

impl Engine for TabBarEngine {
    fn set_enabled(&mut self, enabled: bool) {
        self.hover.set_enabled(enabled);
        self.focus.set_enabled(enabled);
    }

    fn enabled(&self) -> bool {
        self.hover.enabled()
    }

    fn set_duration(&mut self, duration: Duration) {
        self.hover.set_duration(duration);
        self.focus.set_duration(duration);
    }

    fn apply_config(&mut self, config: &AnimationConfig) {
        self.hover.apply_config(config);
        self.focus.apply_config(config);
    }

    fn unregister_widget(&mut self, object: ObjectHandle) -> bool {
        let known = self.hover.unregister_widget(object);
        self.focus.unregister_widget(object) || known
    }

    fn tick(&mut self, sched: &mut dyn Scheduler, delta: Duration) -> bool {
        let hover = self.hover.is_ticking() && self.hover.tick(sched, delta);
        let focus = self.focus.is_ticking() && self.focus.tick(sched, delta);
        hover || focus
    }

    fn is_ticking(&self) -> bool {
        self.hover.is_ticking() || self.focus.is_ticking()
    }
}
