// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Header view section hover

use crate::base::Gated;
use sheen::{AnimationParams, Key, ObjectHandle, Profile, Scheduler};

/// Hover transitions of header view sections, keyed by section index
///
/// At most one section is hovered at a time: hovering a new section fades
/// the previous one out.
#[derive(Clone, Debug)]
pub struct HeaderViewEngine {
    hover: Gated<usize>,
}

impl_engine_via!(HeaderViewEngine, hover);

impl Default for HeaderViewEngine {
    fn default() -> Self {
        HeaderViewEngine::new()
    }
}

impl HeaderViewEngine {
    /// Construct
    pub fn new() -> Self {
        HeaderViewEngine {
            hover: Gated::new("header_view", Profile::HOVER),
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

    /// Set the hovered section of `object` (`None`: pointer left)
    #[inline]
    pub fn set_hovered_section(
        &mut self,
        sched: &mut dyn Scheduler,
        object: ObjectHandle,
        section: Option<usize>,
    ) -> bool {
        self.hover.set_current(sched, object, section)
    }

    /// The hovered section of `object`
    #[inline]
    pub fn hovered_section(&self, object: ObjectHandle) -> Option<usize> {
        self.hover.current(object)
    }

    /// Report hover of a single section
    pub fn update_state(
        &mut self,
        sched: &mut dyn Scheduler,
        object: ObjectHandle,
        section: usize,
        hovered: bool,
    ) -> bool {
        let key = Key::new(object, section);
        self.hover
            .update_state(sched, key, hovered, AnimationParams::empty())
    }

    /// True while the hover of `section` is animating
    #[inline]
    pub fn is_animated(&self, object: ObjectHandle, section: usize) -> bool {
        self.hover.is_animated(Key::new(object, section))
    }

    /// Hover opacity of `section`, if tracked
    #[inline]
    pub fn opacity(&self, object: ObjectHandle, section: usize) -> Option<f32> {
        self.hover.opacity(Key::new(object, section))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Engine;
    use sheen::{ObjectTable, TickQueue};
    use std::time::Duration;

    #[test]
    fn sections_cross_fade() {
        let mut objects = ObjectTable::new();
        let header = objects.insert();
        let mut queue = TickQueue::new();
        let mut engine = HeaderViewEngine::new();
        engine.set_duration(Duration::from_millis(100));
        engine.register_widget(header);

        engine.set_hovered_section(&mut queue, header, Some(0));
        engine.tick(&mut queue, Duration::from_millis(100));
        assert_eq!(engine.opacity(header, 0), Some(1.0));

        assert!(engine.set_hovered_section(&mut queue, header, Some(3)));
        assert_eq!(engine.hovered_section(header), Some(3));
        assert!(engine.is_animated(header, 0));
        assert!(engine.is_animated(header, 3));
        engine.tick(&mut queue, Duration::from_millis(100));
        assert_eq!(engine.opacity(header, 0), None);
        assert_eq!(engine.opacity(header, 3), Some(1.0));

        engine.set_hovered_section(&mut queue, header, None);
        engine.tick(&mut queue, Duration::from_millis(100));
        assert_eq!(engine.opacity(header, 3), None);
        assert!(!engine.is_ticking());
    }
}
