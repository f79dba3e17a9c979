// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Tool box tab hover

use crate::base::Gated;
use sheen::{AnimationParams, ObjectHandle, Profile, Scheduler};

/// Hover transition of tool box tabs
///
/// Registered objects are the tab buttons of a tool box, not the tool box.
#[derive(Clone, Debug)]
pub struct ToolBoxEngine {
    hover: Gated,
}

impl_engine_via!(ToolBoxEngine, hover);

impl Default for ToolBoxEngine {
    fn default() -> Self {
        ToolBoxEngine::new()
    }
}

impl ToolBoxEngine {
    /// Construct
    pub fn new() -> Self {
        ToolBoxEngine {
            hover: Gated::new("tool_box", Profile::HOVER),
        }
    }

    /// Register a tab button; returns `true` if newly registered
    #[inline]
    pub fn register_widget(&mut self, object: ObjectHandle) -> bool {
        self.hover.register_widget(object)
    }

    /// True if `object` is registered
    #[inline]
    pub fn is_registered(&self, object: ObjectHandle) -> bool {
        self.hover.is_registered(object)
    }

    /// Report whether the tab `object` is hovered
    pub fn update_state(
        &mut self,
        sched: &mut dyn Scheduler,
        object: ObjectHandle,
        hovered: bool,
    ) -> bool {
        self.hover
            .update_state(sched, object.into(), hovered, AnimationParams::empty())
    }

    /// True while the hover of `object` is animating
    #[inline]
    pub fn is_animated(&self, object: ObjectHandle) -> bool {
        self.hover.is_animated(object.into())
    }

    /// Hover opacity of `object`, if tracked
    #[inline]
    pub fn opacity(&self, object: ObjectHandle) -> Option<f32> {
        self.hover.opacity(object.into())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Engine;
    use sheen::{ObjectTable, TickQueue};
    use std::time::Duration;

    #[test]
    fn hover_round_trip() {
        let mut objects = ObjectTable::new();
        let tab = objects.insert();
        let mut queue = TickQueue::new();
        let mut engine = ToolBoxEngine::new();
        engine.set_duration(Duration::from_millis(100));
        assert!(!engine.update_state(&mut queue, tab, true));

        engine.register_widget(tab);
        assert!(engine.update_state(&mut queue, tab, true));
        assert!(engine.tick(&mut queue, Duration::from_millis(40)));
        assert!(engine.update_state(&mut queue, tab, false));
        let opacity = engine.opacity(tab).unwrap();
        assert!((opacity - 0.4).abs() < 1e-4);
        assert!(!engine.tick(&mut queue, Duration::from_millis(50)));
        assert_eq!(engine.opacity(tab), None);
        assert!(!engine.is_ticking());
    }
}
