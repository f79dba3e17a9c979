// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Progress bar busy indicator

use crate::Engine;
use rustc_hash::FxHashMap as HashMap;
use sheen::cast::{Cast, CastFloat};
use sheen::config::AnimationConfig;
use sheen::{ObjectHandle, Scheduler};
use std::time::Duration;

/// Size of one busy indicator stripe, in the painter's units
///
/// The phase counter runs over `0..2 * BUSY_INDICATOR_SIZE`.
pub const BUSY_INDICATOR_SIZE: u32 = 14;

/// Free-running phase for indeterminate progress bars
///
/// Unlike other engines this has no settled state: a single shared phase
/// advances while at least one registered object is marked animated, and
/// stops (requesting no further ticks) when none is.
#[derive(Clone, Debug)]
pub struct BusyIndicatorEngine {
    enabled: bool,
    cycle: Duration,
    tick_interval: Duration,
    objects: HashMap<ObjectHandle, bool>,
    num_animated: usize,
    phase: f32,
    ticking: bool,
}

impl Default for BusyIndicatorEngine {
    fn default() -> Self {
        BusyIndicatorEngine::new()
    }
}

impl BusyIndicatorEngine {
    /// Construct with default cycle duration and tick interval
    pub fn new() -> Self {
        let config = AnimationConfig::default();
        BusyIndicatorEngine {
            enabled: config.busy_enabled,
            cycle: config.busy_cycle(),
            tick_interval: config.tick_interval(),
            objects: Default::default(),
            num_animated: 0,
            phase: 0.0,
            ticking: false,
        }
    }

    /// Phase period
    #[inline]
    pub fn period(&self) -> u32 {
        2 * BUSY_INDICATOR_SIZE
    }

    /// Duration of one full phase cycle
    #[inline]
    pub fn cycle(&self) -> Duration {
        self.cycle
    }

    /// Set the duration of one full phase cycle
    ///
    /// Durations below 1ms are raised to 1ms.
    pub fn set_cycle(&mut self, cycle: Duration) {
        self.cycle = cycle.max(Duration::from_millis(1));
    }

    /// Set the delay passed to [`Scheduler::schedule_tick`]
    #[inline]
    pub fn set_tick_interval(&mut self, interval: Duration) {
        self.tick_interval = interval;
    }

    /// Register `object`; returns `true` if newly registered
    ///
    /// Registration alone does not animate; see [`Self::set_animated`].
    pub fn register_widget(&mut self, object: ObjectHandle) -> bool {
        if self.objects.contains_key(&object) {
            return false;
        }
        log::debug!(target: "sheen_engines", "busy_indicator: register {object}");
        self.objects.insert(object, false);
        true
    }

    /// True if `object` is registered
    #[inline]
    pub fn is_registered(&self, object: ObjectHandle) -> bool {
        self.objects.contains_key(&object)
    }

    /// Number of registered objects currently wanting busy animation
    #[inline]
    pub fn num_animated(&self) -> usize {
        self.num_animated
    }

    /// Mark whether `object` currently shows a busy indicator
    ///
    /// This may be called on every paint. Ignored for unregistered objects.
    pub fn set_animated(&mut self, sched: &mut dyn Scheduler, object: ObjectHandle, value: bool) {
        let Some(animated) = self.objects.get_mut(&object) else {
            return;
        };
        if *animated != value {
            *animated = value;
            if value {
                self.num_animated += 1;
            } else {
                self.num_animated -= 1;
            }
            log::trace!(
                target: "sheen_engines",
                "busy_indicator: {object} animated={value}, count={}",
                self.num_animated
            );
        }

        if value && self.enabled && !self.ticking {
            self.ticking = true;
            sched.schedule_tick(self.tick_interval);
        }
    }

    /// True if `object` is animated and the engine is enabled
    pub fn is_animated(&self, object: ObjectHandle) -> bool {
        self.enabled && self.objects.get(&object).copied().unwrap_or(false)
    }

    /// Iterate over objects currently animated (for repainting)
    pub fn animated_widgets(&self) -> impl Iterator<Item = ObjectHandle> + '_ {
        self.objects
            .iter()
            .filter(|(_, animated)| **animated)
            .map(|(object, _)| *object)
    }

    /// Current phase in `[0, period)`, as painted
    #[inline]
    pub fn value(&self) -> u32 {
        let value: u32 = self.phase.cast_floor();
        value.min(self.period() - 1)
    }

    /// Current phase in `[0, period)`, unrounded
    #[inline]
    pub fn phase(&self) -> f32 {
        self.phase
    }
}

impl Engine for BusyIndicatorEngine {
    fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            log::debug!(target: "sheen_engines", "busy_indicator: set_enabled: {enabled}");
            self.enabled = enabled;
        }
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    /// Sets the cycle duration (see [`BusyIndicatorEngine::set_cycle`])
    fn set_duration(&mut self, duration: Duration) {
        self.set_cycle(duration);
    }

    fn apply_config(&mut self, config: &AnimationConfig) {
        self.set_enabled(config.busy_enabled);
        self.set_cycle(config.busy_cycle());
        self.set_tick_interval(config.tick_interval());
    }

    fn unregister_widget(&mut self, object: ObjectHandle) -> bool {
        match self.objects.remove(&object) {
            Some(animated) => {
                if animated {
                    self.num_animated -= 1;
                }
                log::debug!(target: "sheen_engines", "busy_indicator: unregister {object}");
                true
            }
            None => false,
        }
    }

    fn tick(&mut self, sched: &mut dyn Scheduler, delta: Duration) -> bool {
        if !self.enabled || self.num_animated == 0 {
            self.ticking = false;
            return false;
        }

        let period: f32 = self.period().cast();
        let step = period * delta.as_secs_f32() / self.cycle.as_secs_f32();
        self.phase = (self.phase + step).rem_euclid(period);
        if !self.phase.is_finite() {
            self.phase = 0.0;
        }

        sched.schedule_tick(self.tick_interval);
        self.ticking = true;
        true
    }

    fn is_ticking(&self) -> bool {
        self.ticking
    }
}
