// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Spin box arrow hover

use crate::base::Gated;
use sheen::{AnimationParams, Key, ObjectHandle, Profile, Scheduler};

/// The arrows of a spin box
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpinBoxArrow {
    Up,
    Down,
}

/// Hover transitions of spin box arrows
#[derive(Clone, Debug)]
pub struct SpinBoxEngine {
    hover: Gated<SpinBoxArrow>,
}

impl_engine_via!(SpinBoxEngine, hover);

impl Default for SpinBoxEngine {
    fn default() -> Self {
        SpinBoxEngine::new()
    }
}

impl SpinBoxEngine {
    /// Construct
    pub fn new() -> Self {
        SpinBoxEngine {
            hover: Gated::new("spin_box", Profile::HOVER),
        }
    }

    /// Register `object`; returns `true` if newly registered
    #[inline]
    pub fn register_widget(&mut self, object: ObjectHandle) -> bool {
        self.hover.register_widget(object)
    }

    /// True if `object` is registered
    #[inline]
    pub fn is_registered(&self, object: ObjectHandle) -> bool {
        self.hover.is_registered(object)
    }

    /// Report whether `arrow` of `object` is hovered
    pub fn update_state(
        &mut self,
        sched: &mut dyn Scheduler,
        object: ObjectHandle,
        arrow: SpinBoxArrow,
        hovered: bool,
    ) -> bool {
        let key = Key::new(object, arrow);
        self.hover
            .update_state(sched, key, hovered, AnimationParams::empty())
    }

    /// True while the hover of `arrow` is animating
    #[inline]
    pub fn is_animated(&self, object: ObjectHandle, arrow: SpinBoxArrow) -> bool {
        self.hover.is_animated(Key::new(object, arrow))
    }

    /// Hover opacity of `arrow`, if tracked
    #[inline]
    pub fn opacity(&self, object: ObjectHandle, arrow: SpinBoxArrow) -> Option<f32> {
        self.hover.opacity(Key::new(object, arrow))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Engine;
    use sheen::{ObjectTable, TickQueue};

    #[test]
    fn arrows_are_independent() {
        let mut objects = ObjectTable::new();
        let spin = objects.insert();
        let mut queue = TickQueue::new();
        let mut engine = SpinBoxEngine::new();
        engine.register_widget(spin);

        assert!(engine.update_state(&mut queue, spin, SpinBoxArrow::Up, true));
        assert!(!engine.update_state(&mut queue, spin, SpinBoxArrow::Down, false));
        assert!(engine.is_animated(spin, SpinBoxArrow::Up));
        assert_eq!(engine.opacity(spin, SpinBoxArrow::Down), None);

        assert!(engine.unregister_widget(spin));
        assert!(!engine.is_registered(spin));
        assert_eq!(engine.opacity(spin, SpinBoxArrow::Up), None);
    }
}
