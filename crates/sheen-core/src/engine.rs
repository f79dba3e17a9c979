// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Per-dimension transition engine

use crate::cast::{Cast, Conv};
use crate::config::{AnimationConfig, defaults};
use crate::{Direction, EasingPair, Key, KeyRegistry, ObjectHandle, Scheduler, Timeline};
use smallvec::SmallVec;
use std::fmt::Debug;
use std::time::Duration;

bitflags! {
    /// Interaction dimensions an object may be registered for
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct AnimationMode: u8 {
        /// Pointer hover
        const HOVER = 1 << 0;
        /// Keyboard focus
        const FOCUS = 1 << 1;
        /// Enabled / disabled
        const ENABLE = 1 << 2;
        /// Pressed / sunken
        const PRESSED = 1 << 3;
    }
}

bitflags! {
    /// Per-call options for [`TransitionEngine::update_state`]
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct AnimationParams: u8 {
        /// Always run forward: activation restarts from the beginning,
        /// deactivation never reverses
        const FORWARD_ONLY = 1 << 0;
        /// Use three times the configured duration
        const LONG_DURATION = 1 << 1;
        /// Overshoot when entering, accelerate when leaving
        /// ([`EasingPair::OUT_BACK`]), regardless of the configured easing
        const OUT_BACK = 1 << 2;
    }
}

/// Per-dimension constants of a [`TransitionEngine`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Profile {
    /// Input value assumed for untracked keys
    pub initial_state: bool,
    /// Behave as if [`AnimationParams::FORWARD_ONLY`] were always passed
    pub forward_only: bool,
    /// The configured duration is divided by this (minimum 1)
    pub duration_divisor: u32,
    /// Easing curves used unless the configuration names a curve
    pub easing: EasingPair,
}

impl Profile {
    /// Pointer hover
    pub const HOVER: Profile = Profile {
        initial_state: false,
        forward_only: false,
        duration_divisor: 1,
        easing: EasingPair::LINEAR,
    };

    /// Keyboard focus
    pub const FOCUS: Profile = Profile::HOVER;

    /// Enabled state: widgets start enabled
    pub const ENABLE: Profile = Profile {
        initial_state: true,
        ..Profile::HOVER
    };

    /// Pressed state: runs at half the configured duration
    pub const PRESSED: Profile = Profile {
        duration_divisor: 2,
        ..Profile::HOVER
    };

    /// Replace the easing curves
    #[inline]
    #[must_use]
    pub const fn with_easing(mut self, easing: EasingPair) -> Self {
        self.easing = easing;
        self
    }

    /// Profile for a single-flag `mode`
    pub fn for_mode(mode: AnimationMode) -> Option<Profile> {
        if mode == AnimationMode::HOVER {
            Some(Profile::HOVER)
        } else if mode == AnimationMode::FOCUS {
            Some(Profile::FOCUS)
        } else if mode == AnimationMode::ENABLE {
            Some(Profile::ENABLE)
        } else if mode == AnimationMode::PRESSED {
            Some(Profile::PRESSED)
        } else {
            None
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Profile::HOVER
    }
}

#[derive(Clone, Debug)]
struct Entry {
    timeline: Timeline,
    state: bool,
    params: AnimationParams,
}

/// Transition state of one interaction dimension over many keys
///
/// Each [`Key`] has at most one [`Timeline`]. The state machine per key is:
///
/// -   untracked: input equals the profile's initial state; [`Self::opacity`]
///     returns `None`
/// -   entering on / entering off: a timeline runs towards the position
///     representing the latest input ([`Self::is_animated`] is `true`)
/// -   settled on: the timeline finished away from the initial state; the
///     entry is kept so that [`Self::opacity`] keeps reporting it
///
/// A timeline finishing at the initial state evicts its entry. Opacity
/// always measures the degree of the *active* input (`1.0` = fully active).
///
/// Ticks are requested from a [`Scheduler`] only while some timeline runs.
#[derive(Clone, Debug)]
pub struct TransitionEngine<S = ()> {
    profile: Profile,
    enabled: bool,
    duration: Duration,
    steps: u32,
    easing: EasingPair,
    tick_interval: Duration,
    ticking: bool,
    data: KeyRegistry<S, Entry>,
}

impl<S: Copy + Eq + Debug> Default for TransitionEngine<S> {
    fn default() -> Self {
        TransitionEngine::new(Profile::default())
    }
}

impl<S: Copy + Eq + Debug> TransitionEngine<S> {
    /// Construct with default duration and tick interval
    pub fn new(profile: Profile) -> Self {
        TransitionEngine {
            profile,
            enabled: true,
            duration: Duration::from_millis(defaults::duration_ms().cast()),
            steps: 0,
            easing: profile.easing,
            tick_interval: Duration::from_millis(defaults::tick_interval_ms().cast()),
            ticking: false,
            data: KeyRegistry::new(),
        }
    }

    /// Get the profile
    #[inline]
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// True if transitions are enabled
    #[inline]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable transitions
    ///
    /// Disabling evicts all entries immediately: state changes become
    /// instant and every key reports as untracked.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        log::debug!(target: "sheen_core::engine", "set_enabled: {enabled}");
        self.enabled = enabled;
        if !enabled {
            self.data.clear();
        }
    }

    /// Apply global settings from `config`
    ///
    /// This sets the enabled flag, duration, quantisation steps, easing and
    /// tick interval. Where `config` names no easing curve, the profile's
    /// curves are used.
    pub fn apply_config(&mut self, config: &AnimationConfig) {
        self.set_enabled(config.enabled);
        self.set_duration(config.duration());
        self.set_steps(config.steps);
        let easing = config.easing.map_or(self.profile.easing, EasingPair::from);
        self.set_easing(easing);
        self.set_tick_interval(config.tick_interval());
    }

    /// The configured duration (before profile and per-call scaling)
    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Set the configured duration
    ///
    /// Running timelines keep their progress and adopt the new duration.
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
        let (profile, base) = (self.profile, duration);
        for (_, entry) in self.data.entries_mut() {
            let d = scaled_duration(&profile, base, entry.params);
            entry.timeline.set_duration(d);
        }
    }

    /// Opacity quantisation steps (`0`: continuous)
    #[inline]
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Set opacity quantisation steps
    #[inline]
    pub fn set_steps(&mut self, steps: u32) {
        self.steps = steps;
    }

    /// Easing curves
    #[inline]
    pub fn easing(&self) -> EasingPair {
        self.easing
    }

    /// Set the easing curves, including for running timelines
    ///
    /// Timelines started with [`AnimationParams::OUT_BACK`] keep their
    /// curves.
    pub fn set_easing(&mut self, easing: impl Into<EasingPair>) {
        let easing = easing.into();
        self.easing = easing;
        for (_, entry) in self.data.entries_mut() {
            if !entry.params.contains(AnimationParams::OUT_BACK) {
                entry.timeline.set_easing(easing);
            }
        }
    }

    fn easing_for(&self, params: AnimationParams) -> EasingPair {
        if params.contains(AnimationParams::OUT_BACK) {
            EasingPair::OUT_BACK
        } else {
            self.easing
        }
    }

    /// Delay passed to [`Scheduler::schedule_tick`]
    #[inline]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Set the delay passed to [`Scheduler::schedule_tick`]
    #[inline]
    pub fn set_tick_interval(&mut self, interval: Duration) {
        self.tick_interval = interval;
    }

    /// True while a tick has been requested and timelines may still run
    #[inline]
    pub fn is_ticking(&self) -> bool {
        self.ticking
    }

    /// Number of tracked keys
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if no key is tracked
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// True if `key` is tracked (animating or settled on)
    #[inline]
    pub fn contains(&self, key: impl Into<Key<S>>) -> bool {
        self.data.contains(key.into())
    }

    /// Iterate over tracked keys
    pub fn keys(&self) -> impl Iterator<Item = Key<S>> + '_ {
        self.data.entries().map(|(key, _)| key)
    }

    /// Iterate over objects with at least one tracked key
    pub fn objects(&self) -> impl Iterator<Item = ObjectHandle> + '_ {
        self.data.objects()
    }

    /// Duration of a timeline started with `params`
    pub fn effective_duration(&self, params: AnimationParams) -> Duration {
        scaled_duration(&self.profile, self.duration, params)
    }

    /// Report the latest input for `key`
    ///
    /// Returns `true` if this changed transition state.
    ///
    /// -   Same input as last reported: no-op.
    /// -   Untracked key and input equal to the initial state: no-op.
    /// -   Otherwise the key's timeline is started towards the new input; a
    ///     running timeline reverses smoothly (see [`Timeline::start`]).
    ///
    /// With [`AnimationParams::FORWARD_ONLY`], activation restarts the
    /// timeline from the beginning while deactivation lets it finish
    /// (or untracks the key immediately if already finished).
    pub fn update_state(
        &mut self,
        sched: &mut dyn Scheduler,
        key: impl Into<Key<S>>,
        active: bool,
        params: AnimationParams,
    ) -> bool {
        let key = key.into();
        if !self.enabled {
            return false;
        }

        let duration = self.effective_duration(params);
        let easing = self.easing_for(params);
        let forward_only =
            self.profile.forward_only || params.contains(AnimationParams::FORWARD_ONLY);

        if !self.data.contains(key) {
            if active == self.profile.initial_state {
                return false;
            }

            let mut timeline =
                Timeline::settled(duration, self.profile.initial_state).with_easing(easing);
            if forward_only {
                timeline.restart(Direction::Forward, duration);
            } else {
                timeline.start(Direction::towards(active), duration);
            }
            log::trace!(
                target: "sheen_core::engine",
                "update_state: {key:?} starts towards {active} over {}ms",
                duration.as_millis()
            );
            self.data.track(key, Entry {
                timeline,
                state: active,
                params,
            });
            self.request_tick(sched);
            return true;
        }

        let entry = match self.data.get_mut(key) {
            Some(entry) => entry,
            None => return false,
        };
        if entry.state == active {
            return false;
        }
        entry.state = active;
        entry.params = params;

        if forward_only {
            if !active {
                if !entry.timeline.is_running() {
                    log::trace!(target: "sheen_core::engine", "update_state: {key:?} released");
                    self.data.forget(key);
                }
                return true;
            }
            entry.timeline.set_easing(easing);
            entry.timeline.restart(Direction::Forward, duration);
        } else {
            let direction = Direction::towards(active);
            entry.timeline.start_with(direction, duration, easing);
        }

        log::trace!(
            target: "sheen_core::engine",
            "update_state: {key:?} redirected towards {active} at {:.3}",
            entry.timeline.position()
        );
        self.request_tick(sched);
        true
    }

    /// Last input reported for a tracked key
    pub fn state(&self, key: impl Into<Key<S>>) -> Option<bool> {
        self.data.get(key.into()).map(|entry| entry.state)
    }

    /// True while the timeline of `key` runs
    pub fn is_animated(&self, key: impl Into<Key<S>>) -> bool {
        self.data
            .get(key.into())
            .is_some_and(|entry| entry.timeline.is_running())
    }

    /// Degree of the active state for `key`, in `[0, 1]`
    ///
    /// Returns `None` if `key` is untracked; callers should then draw the
    /// static appearance of the current state.
    pub fn opacity(&self, key: impl Into<Key<S>>) -> Option<f32> {
        self.data
            .get(key.into())
            .map(|entry| self.digitize(entry.timeline.value()))
    }

    /// Timeline of `key`, if tracked
    pub fn timeline(&self, key: impl Into<Key<S>>) -> Option<&Timeline> {
        self.data.get(key.into()).map(|entry| &entry.timeline)
    }

    fn digitize(&self, value: f32) -> f32 {
        if self.steps > 0 {
            let steps = f32::conv(self.steps);
            (value * steps).floor() / steps
        } else {
            value
        }
    }

    /// Untrack a single key without running completion
    pub fn forget(&mut self, key: impl Into<Key<S>>) -> bool {
        self.data.forget(key.into()).is_some()
    }

    /// Untrack all keys of `object` (deliberate unregistration)
    pub fn unregister_widget(&mut self, object: ObjectHandle) -> bool {
        self.data.forget_object(object)
    }

    /// Destruction notification: evict all keys of `object` immediately
    pub fn object_destroyed(&mut self, object: ObjectHandle) -> usize {
        self.data.on_object_destroyed(object)
    }

    fn request_tick(&mut self, sched: &mut dyn Scheduler) {
        if !self.ticking {
            self.ticking = true;
            sched.schedule_tick(self.tick_interval);
        }
    }

    /// Advance all running timelines by `delta`
    ///
    /// Returns `true` if any timeline is still running (in which case the
    /// next tick has been requested).
    #[inline]
    pub fn tick(&mut self, sched: &mut dyn Scheduler, delta: Duration) -> bool {
        self.tick_with(sched, delta, |_, _| ())
    }

    /// Advance all running timelines by `delta`, reporting completions
    ///
    /// `on_settled(key, state)` is called for each timeline finishing during
    /// this tick, with the input it settled to. Keys settling at the
    /// initial state have already been evicted when this is called.
    pub fn tick_with(
        &mut self,
        sched: &mut dyn Scheduler,
        delta: Duration,
        mut on_settled: impl FnMut(Key<S>, bool),
    ) -> bool {
        let initial = self.profile.initial_state;
        let mut running = false;
        let mut settled = SmallVec::<[(Key<S>, bool); 4]>::new();

        self.data.retain(|key, entry| {
            if !entry.timeline.is_running() {
                return true;
            }
            if entry.timeline.tick(delta) {
                running = true;
                return true;
            }

            settled.push((key, entry.state));
            let at_active_end = (entry.timeline.position() >= 1.0) == entry.state;
            entry.state != initial && at_active_end
        });

        for (key, state) in settled {
            log::trace!(target: "sheen_core::engine", "tick: {key:?} settled at {state}");
            on_settled(key, state);
        }

        if running {
            sched.schedule_tick(self.tick_interval);
        }
        self.ticking = running;
        running
    }
}

fn scaled_duration(profile: &Profile, base: Duration, params: AnimationParams) -> Duration {
    let mut duration = base / profile.duration_divisor.max(1);
    if params.contains(AnimationParams::LONG_DURATION) {
        duration = duration.saturating_mul(3);
    }
    duration
}
