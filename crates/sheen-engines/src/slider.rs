// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Slider handle hover

use crate::base::Gated;
use sheen::{AnimationParams, ObjectHandle, Profile, Scheduler};

/// Hover transition of slider handles
#[derive(Clone, Debug)]
pub struct SliderEngine {
    hover: Gated,
}

impl_engine_via!(SliderEngine, hover);

impl Default for SliderEngine {
    fn default() -> Self {
        SliderEngine::new()
    }
}

impl SliderEngine {
    /// Construct
    pub fn new() -> Self {
        SliderEngine {
            hover: Gated::new("slider", Profile::HOVER),
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

    /// Report whether the handle of `object` is hovered
    ///
    /// Callers should not report changes while the handle is being dragged.
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
