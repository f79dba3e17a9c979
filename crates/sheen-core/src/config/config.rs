// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Animation configuration

use crate::Easing;
use crate::cast::Cast;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A message which may be used to update [`AnimationConfig`]
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigMsg {
    Enabled(bool),
    DurationMs(u32),
    Steps(u32),
    Easing(Option<Easing>),
    BusyEnabled(bool),
    BusyCycleMs(u32),
    TickIntervalMs(u32),
}

/// Animation configuration
///
/// This is serializable (using `feature = "serde"`) with the following fields:
///
/// > `enabled`: `bool` \
/// > `duration_ms`: `u32` (base transition duration) \
/// > `steps`: `u32` (opacity quantisation; `0` for continuous) \
/// > `easing`: optional [`Easing`] (when absent, each engine uses its own curves) \
/// > `busy_enabled`: `bool` \
/// > `busy_cycle_ms`: `u32` (busy indicator cycle period) \
/// > `tick_interval_ms`: `u32`
///
/// All fields are optional in serialised form.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnimationConfig {
    #[cfg_attr(feature = "serde", serde(default = "defaults::enabled"))]
    pub enabled: bool,

    #[cfg_attr(feature = "serde", serde(default = "defaults::duration_ms"))]
    pub duration_ms: u32,

    #[cfg_attr(feature = "serde", serde(default))]
    pub steps: u32,

    #[cfg_attr(feature = "serde", serde(default))]
    pub easing: Option<Easing>,

    #[cfg_attr(feature = "serde", serde(default = "defaults::enabled"))]
    pub busy_enabled: bool,

    #[cfg_attr(feature = "serde", serde(default = "defaults::busy_cycle_ms"))]
    pub busy_cycle_ms: u32,

    #[cfg_attr(feature = "serde", serde(default = "defaults::tick_interval_ms"))]
    pub tick_interval_ms: u32,

    #[cfg_attr(feature = "serde", serde(skip))]
    is_dirty: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        AnimationConfig {
            enabled: defaults::enabled(),
            duration_ms: defaults::duration_ms(),
            steps: 0,
            easing: None,
            busy_enabled: defaults::enabled(),
            busy_cycle_ms: defaults::busy_cycle_ms(),
            tick_interval_ms: defaults::tick_interval_ms(),
            is_dirty: false,
        }
    }
}

impl AnimationConfig {
    /// Has the config ever been updated?
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    /// Apply a change
    ///
    /// Returns `true` if the value changed.
    pub fn change_config(&mut self, msg: ConfigMsg) -> bool {
        let old = self.clone();
        match msg {
            ConfigMsg::Enabled(v) => self.enabled = v,
            ConfigMsg::DurationMs(v) => self.duration_ms = v,
            ConfigMsg::Steps(v) => self.steps = v,
            ConfigMsg::Easing(v) => self.easing = v,
            ConfigMsg::BusyEnabled(v) => self.busy_enabled = v,
            ConfigMsg::BusyCycleMs(v) => self.busy_cycle_ms = v,
            ConfigMsg::TickIntervalMs(v) => self.tick_interval_ms = v,
        }
        let changed = *self != old;
        self.is_dirty |= changed;
        changed
    }

    /// Base transition duration
    #[inline]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms.cast())
    }

    /// Busy indicator cycle period (at least 1ms)
    #[inline]
    pub fn busy_cycle(&self) -> Duration {
        Duration::from_millis(self.busy_cycle_ms.max(1).cast())
    }

    /// Delay between ticks while animating
    #[inline]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.cast())
    }
}

pub(crate) mod defaults {
    pub fn enabled() -> bool {
        true
    }
    pub fn duration_ms() -> u32 {
        150
    }
    pub fn busy_cycle_ms() -> u32 {
        600
    }
    pub fn tick_interval_ms() -> u32 {
        16 // ~60 fps
    }
}
