// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Scroll bar sub-control hover

use crate::Engine;
use rustc_hash::FxHashMap as HashMap;
use sheen::config::AnimationConfig;
use sheen::geom::{Coord, Rect};
use sheen::{AnimationParams, Key, ObjectHandle, Profile, Scheduler, TransitionEngine};
use std::time::Duration;

/// Independently animated regions of a scroll bar
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScrollBarPart {
    /// The draggable handle
    Slider,
    /// The arrow increasing the value
    AddLine,
    /// The arrow decreasing the value
    SubLine,
    /// The track behind the handle
    Groove,
}

impl ScrollBarPart {
    /// All parts
    pub const ALL: [ScrollBarPart; 4] = [
        ScrollBarPart::Slider,
        ScrollBarPart::AddLine,
        ScrollBarPart::SubLine,
        ScrollBarPart::Groove,
    ];

    /// True for the two arrows, whose rects are stored
    #[inline]
    pub fn is_arrow(self) -> bool {
        matches!(self, ScrollBarPart::AddLine | ScrollBarPart::SubLine)
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Debug, Default)]
struct ScrollBarData {
    hovered: [bool; 4],
    add_line_rect: Option<Rect>,
    sub_line_rect: Option<Rect>,
    position: Option<Coord>,
}

impl ScrollBarData {
    fn rect_mut(&mut self, part: ScrollBarPart) -> Option<&mut Option<Rect>> {
        match part {
            ScrollBarPart::AddLine => Some(&mut self.add_line_rect),
            ScrollBarPart::SubLine => Some(&mut self.sub_line_rect),
            _ => None,
        }
    }
}

/// Hover transitions of scroll bar parts
///
/// Each registered scroll bar has one hover timeline per [`ScrollBarPart`]
/// (keyed by the part), a hover flag per part, the last pointer position and
/// the rects of both arrows as last supplied by the painter. The engine does
/// no hit-testing: callers resolve the hovered part and report it through
/// [`Self::update_hover`].
///
/// Registration data (flags, rects, position) survives disabling of
/// transitions. The rect of an arrow is cleared once its hover has fully
/// faded out.
#[derive(Clone, Debug)]
pub struct ScrollBarEngine {
    data: HashMap<ObjectHandle, ScrollBarData>,
    hover: TransitionEngine<ScrollBarPart>,
}

impl Default for ScrollBarEngine {
    fn default() -> Self {
        ScrollBarEngine::new()
    }
}

impl ScrollBarEngine {
    /// Construct
    pub fn new() -> Self {
        ScrollBarEngine {
            data: Default::default(),
            hover: TransitionEngine::new(Profile::HOVER),
        }
    }

    /// Register `object`; returns `true` if newly registered
    pub fn register_widget(&mut self, object: ObjectHandle) -> bool {
        if self.data.contains_key(&object) {
            return false;
        }
        log::debug!(target: "sheen_engines", "scroll_bar: register {object}");
        self.data.insert(object, ScrollBarData::default());
        true
    }

    /// True if `object` is registered
    #[inline]
    pub fn is_registered(&self, object: ObjectHandle) -> bool {
        self.data.contains_key(&object)
    }

    /// Store the screen rect of an arrow
    ///
    /// Returns `false` if `object` is unregistered or `part` is not an arrow.
    pub fn set_sub_control_rect(
        &mut self,
        object: ObjectHandle,
        part: ScrollBarPart,
        rect: Rect,
    ) -> bool {
        let Some(data) = self.data.get_mut(&object) else {
            return false;
        };
        match data.rect_mut(part) {
            Some(slot) => {
                *slot = Some(rect);
                true
            }
            None => false,
        }
    }

    /// The stored rect of an arrow, if any
    pub fn sub_control_rect(&self, object: ObjectHandle, part: ScrollBarPart) -> Option<Rect> {
        let data = self.data.get(&object)?;
        match part {
            ScrollBarPart::AddLine => data.add_line_rect,
            ScrollBarPart::SubLine => data.sub_line_rect,
            _ => None,
        }
    }

    /// Report pointer motion over `object`
    ///
    /// `part` is the part under the pointer (if any); every other part is
    /// considered not hovered. Returns `true` if any hover flag changed.
    /// Callers should not report motion while the handle is being dragged.
    pub fn update_hover(
        &mut self,
        sched: &mut dyn Scheduler,
        object: ObjectHandle,
        part: Option<ScrollBarPart>,
        position: Option<Coord>,
    ) -> bool {
        let Some(data) = self.data.get_mut(&object) else {
            return false;
        };
        data.position = position;

        let mut changed = false;
        for p in ScrollBarPart::ALL {
            let hovered = part == Some(p);
            if data.hovered[p.index()] != hovered {
                data.hovered[p.index()] = hovered;
                changed = true;
                let key = Key::new(object, p);
                self.hover
                    .update_state(sched, key, hovered, AnimationParams::empty());
            }
        }
        changed
    }

    /// Report that the pointer left `object`
    #[inline]
    pub fn hover_leave(&mut self, sched: &mut dyn Scheduler, object: ObjectHandle) -> bool {
        self.update_hover(sched, object, None, None)
    }

    /// True if `part` of `object` is hovered
    pub fn is_hovered(&self, object: ObjectHandle, part: ScrollBarPart) -> bool {
        self.data
            .get(&object)
            .is_some_and(|data| data.hovered[part.index()])
    }

    /// Last pointer position reported over `object`
    pub fn position(&self, object: ObjectHandle) -> Option<Coord> {
        self.data.get(&object)?.position
    }

    /// True while the hover of `part` is animating
    pub fn is_animated(&self, object: ObjectHandle, part: ScrollBarPart) -> bool {
        self.hover.is_animated(Key::new(object, part))
    }

    /// Hover opacity of `part`, if tracked
    pub fn opacity(&self, object: ObjectHandle, part: ScrollBarPart) -> Option<f32> {
        self.hover.opacity(Key::new(object, part))
    }
}

impl Engine for ScrollBarEngine {
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
        self.hover.unregister_widget(object);
        let known = self.data.remove(&object).is_some();
        if known {
            log::debug!(target: "sheen_engines", "scroll_bar: unregister {object}");
        }
        known
    }

    fn tick(&mut self, sched: &mut dyn Scheduler, delta: Duration) -> bool {
        let data = &mut self.data;
        self.hover.tick_with(sched, delta, |key, state| {
            if !state
                && let Some(slot) = data.get_mut(&key.object).and_then(|d| d.rect_mut(key.sub))
            {
                *slot = None;
            }
        })
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

    fn ms(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    #[test]
    fn arrows_are_independent() {
        let mut objects = ObjectTable::new();
        let w = objects.insert();
        let mut queue = TickQueue::new();
        let mut engine = ScrollBarEngine::new();
        engine.set_duration(ms(100));
        assert!(engine.register_widget(w));

        let add = ScrollBarPart::AddLine;
        let sub = ScrollBarPart::SubLine;
        assert!(engine.update_hover(&mut queue, w, Some(add), Some(Coord(5, 95))));
        engine.tick(&mut queue, ms(50));
        assert!(engine.update_hover(&mut queue, w, Some(sub), Some(Coord(5, 5))));

        assert!(engine.is_hovered(w, sub));
        assert!(!engine.is_hovered(w, add));
        assert!(engine.is_animated(w, add));
        assert!(engine.is_animated(w, sub));
        assert_eq!(engine.opacity(w, sub), Some(0.0));
        let add_opacity = engine.opacity(w, add).unwrap();
        assert!(add_opacity > 0.4 && add_opacity < 0.6);
        assert_eq!(engine.position(w), Some(Coord(5, 5)));
        assert_eq!(engine.opacity(w, ScrollBarPart::Slider), None);
    }

    #[test]
    fn arrow_rect_cleared_after_fade_out() {
        let mut objects = ObjectTable::new();
        let w = objects.insert();
        let mut queue = TickQueue::new();
        let mut engine = ScrollBarEngine::new();
        engine.set_duration(ms(100));
        engine.register_widget(w);

        let rect = Rect::new(Coord(0, 90), Size(10, 10));
        let add = ScrollBarPart::AddLine;
        assert!(engine.set_sub_control_rect(w, add, rect));
        assert!(!engine.set_sub_control_rect(w, ScrollBarPart::Groove, rect));
        assert_eq!(engine.sub_control_rect(w, add), Some(rect));

        engine.update_hover(&mut queue, w, Some(add), Some(Coord(5, 95)));
        engine.tick(&mut queue, ms(100));
        assert_eq!(engine.sub_control_rect(w, add), Some(rect));

        engine.hover_leave(&mut queue, w);
        assert_eq!(engine.position(w), None);
        assert!(engine.tick(&mut queue, ms(50)));
        assert_eq!(engine.sub_control_rect(w, add), Some(rect));
        assert!(!engine.tick(&mut queue, ms(60)));
        assert_eq!(engine.sub_control_rect(w, add), None);
        assert_eq!(engine.opacity(w, add), None);
    }

    #[test]
    fn disable_keeps_geometry() {
        let mut objects = ObjectTable::new();
        let w = objects.insert();
        let mut queue = TickQueue::new();
        let mut engine = ScrollBarEngine::new();
        engine.register_widget(w);
        let rect = Rect::new(Coord(0, 0), Size(10, 10));
        engine.set_sub_control_rect(w, ScrollBarPart::SubLine, rect);
        engine.set_enabled(false);

        assert!(engine.update_hover(&mut queue, w, Some(ScrollBarPart::SubLine), None));
        assert!(engine.is_hovered(w, ScrollBarPart::SubLine));
        assert!(!engine.is_animated(w, ScrollBarPart::SubLine));
        assert!(!queue.is_pending());
        assert_eq!(engine.sub_control_rect(w, ScrollBarPart::SubLine), Some(rect));
    }

    #[test]
    fn unregistered_is_ignored() {
        let mut objects = ObjectTable::new();
        let w = objects.insert();
        let mut queue = TickQueue::new();
        let mut engine = ScrollBarEngine::new();
        assert!(!engine.update_hover(&mut queue, w, Some(ScrollBarPart::Slider), None));
        assert!(!engine.is_hovered(w, ScrollBarPart::Slider));
        assert!(!engine.unregister_widget(w));
    }
}
