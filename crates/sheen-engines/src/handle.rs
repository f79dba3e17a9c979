// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Hover of a non-rectangular hot zone (dial handle, combo box arrow)

use crate::Engine;
use crate::base::Gated;
use rustc_hash::FxHashMap as HashMap;
use sheen::config::AnimationConfig;
use sheen::geom::{Coord, Rect};
use sheen::{AnimationParams, ObjectHandle, Profile, Scheduler};
use std::time::Duration;

#[derive(Clone, Copy, Debug, Default)]
struct HandleData {
    rect: Option<Rect>,
    position: Option<Coord>,
}

/// Hover transition of a handle, with the last pointer position
///
/// The painter stores the handle's bounding rect with
/// [`Self::set_handle_rect`]; pointer motion reported through
/// [`Self::hover_move`] is recorded and tested against that rect. Callers
/// needing a finer hot zone (e.g. a round dial knob) may instead read
/// [`Self::position`] and report hover through [`Self::update_state`].
#[derive(Clone, Debug)]
pub struct HandleEngine {
    hover: Gated,
    data: HashMap<ObjectHandle, HandleData>,
}

impl HandleEngine {
    /// Construct; `name` identifies this instance in log messages
    pub fn new(name: &'static str) -> Self {
        HandleEngine {
            hover: Gated::new(name, Profile::HOVER),
            data: Default::default(),
        }
    }

    /// Register `object`; returns `true` if newly registered
    pub fn register_widget(&mut self, object: ObjectHandle) -> bool {
        self.data.entry(object).or_default();
        self.hover.register_widget(object)
    }

    /// True if `object` is registered
    #[inline]
    pub fn is_registered(&self, object: ObjectHandle) -> bool {
        self.hover.is_registered(object)
    }

    /// Store the handle rect of `object`
    pub fn set_handle_rect(&mut self, object: ObjectHandle, rect: Rect) -> bool {
        match self.data.get_mut(&object) {
            Some(data) => {
                data.rect = Some(rect);
                true
            }
            None => false,
        }
    }

    /// The stored handle rect of `object`
    pub fn handle_rect(&self, object: ObjectHandle) -> Option<Rect> {
        self.data.get(&object)?.rect
    }

    /// Last pointer position over `object`
    pub fn position(&self, object: ObjectHandle) -> Option<Coord> {
        self.data.get(&object)?.position
    }

    /// Report pointer motion over `object`
    ///
    /// Hover is active if the stored handle rect contains `position`.
    /// Callers should not report motion while the handle is being dragged.
    pub fn hover_move(
        &mut self,
        sched: &mut dyn Scheduler,
        object: ObjectHandle,
        position: Coord,
    ) -> bool {
        let Some(data) = self.data.get_mut(&object) else {
            return false;
        };
        data.position = Some(position);
        let hovered = data.rect.is_some_and(|rect| rect.contains(position));
        self.update_state(sched, object, hovered)
    }

    /// Report that the pointer left `object`
    pub fn hover_leave(&mut self, sched: &mut dyn Scheduler, object: ObjectHandle) -> bool {
        if let Some(data) = self.data.get_mut(&object) {
            data.position = None;
        }
        self.update_state(sched, object, false)
    }

    /// Report hover of the handle directly
    pub fn update_state(
        &mut self,
        sched: &mut dyn Scheduler,
        object: ObjectHandle,
        hovered: bool,
    ) -> bool {
        self.hover
            .update_state(sched, object.into(), hovered, AnimationParams::empty())
    }

    /// True while the handle hover of `object` is animating
    #[inline]
    pub fn is_animated(&self, object: ObjectHandle) -> bool {
        self.hover.is_animated(object.into())
    }

    /// Handle hover opacity of `object`, if tracked
    #[inline]
    pub fn opacity(&self, object: ObjectHandle) -> Option<f32> {
        self.hover.opacity(object.into())
    }
}

impl Engine for HandleEngine {
    fn set_enabled(&mut self, enabled: bool) {
        self.hover.set_enabled(enabled);
    }

    fn enabled(&self) -> bool {
        self.hover.enabled()
    }

    fn set_duration(&mut self, duration: Duration) {
        self.hover.set_duration(duration);
    }

    fn apply_config(&mut self, config: &AnimationConfig) {
        self.hover.apply_config(config);
    }

    fn unregister_widget(&mut self, object: ObjectHandle) -> bool {
        self.data.remove(&object);
        self.hover.unregister_widget(object)
    }

    fn tick(&mut self, sched: &mut dyn Scheduler, delta: Duration) -> bool {
        self.hover.tick(sched, delta)
    }

    fn is_ticking(&self) -> bool {
        self.hover.is_ticking()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use sheen::geom::Size;
    use sheen::{ObjectTable, TickQueue};

    #[test]
    fn hover_by_rect() {
        let mut objects = ObjectTable::new();
        let dial = objects.insert();
        let mut queue = TickQueue::new();
        let mut engine = HandleEngine::new("dial");
        assert!(!engine.set_handle_rect(dial, Rect::ZERO));
        engine.register_widget(dial);
        assert!(engine.set_handle_rect(dial, Rect::new(Coord(10, 10), Size(8, 8))));

        assert!(!engine.hover_move(&mut queue, dial, Coord(2, 2)));
        assert_eq!(engine.position(dial), Some(Coord(2, 2)));
        assert_eq!(engine.opacity(dial), None);

        assert!(engine.hover_move(&mut queue, dial, Coord(12, 14)));
        assert!(engine.is_animated(dial));
        assert!(!engine.hover_move(&mut queue, dial, Coord(13, 14)));

        assert!(engine.hover_leave(&mut queue, dial));
        assert_eq!(engine.position(dial), None);
        assert_eq!(engine.handle_rect(dial), Some(Rect::new(Coord(10, 10), Size(8, 8))));

        assert!(engine.unregister_widget(dial));
        assert_eq!(engine.handle_rect(dial), None);
    }
}
