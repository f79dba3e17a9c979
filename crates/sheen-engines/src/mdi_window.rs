// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! MDI window title button hover

use crate::base::Gated;
use sheen::{AnimationParams, Key, ObjectHandle, Profile, Scheduler};

/// Title bar buttons of an MDI sub-window
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MdiButton {
    Minimize,
    Maximize,
    Restore,
    Close,
}

/// Hover transitions of MDI window title buttons
///
/// At most one button is hovered at a time.
#[derive(Clone, Debug)]
pub struct MdiWindowEngine {
    hover: Gated<MdiButton>,
}

impl_engine_via!(MdiWindowEngine, hover);

impl Default for MdiWindowEngine {
    fn default() -> Self {
        MdiWindowEngine::new()
    }
}

impl MdiWindowEngine {
    /// Construct
    pub fn new() -> Self {
        MdiWindowEngine {
            hover: Gated::new("mdi_window", Profile::HOVER),
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

    /// Set the hovered button (`None`: no button)
    #[inline]
    pub fn set_hovered_button(
        &mut self,
        sched: &mut dyn Scheduler,
        object: ObjectHandle,
        button: Option<MdiButton>,
    ) -> bool {
        self.hover.set_current(sched, object, button)
    }

    /// The hovered button, if any
    #[inline]
    pub fn hovered_button(&self, object: ObjectHandle) -> Option<MdiButton> {
        self.hover.current(object)
    }

    /// Report hover of a single button
    pub fn update_state(
        &mut self,
        sched: &mut dyn Scheduler,
        object: ObjectHandle,
        button: MdiButton,
        hovered: bool,
    ) -> bool {
        let key = Key::new(object, button);
        self.hover
            .update_state(sched, key, hovered, AnimationParams::empty())
    }

    /// True while the hover of `button` is animating
    #[inline]
    pub fn is_animated(&self, object: ObjectHandle, button: MdiButton) -> bool {
        self.hover.is_animated(Key::new(object, button))
    }

    /// Hover opacity of `button`, if tracked
    #[inline]
    pub fn opacity(&self, object: ObjectHandle, button: MdiButton) -> Option<f32> {
        self.hover.opacity(Key::new(object, button))
    }
}
