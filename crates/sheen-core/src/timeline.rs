// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Timed progress counter

use std::time::Duration;

/// Direction of travel of a [`Timeline`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards position `1.0`
    #[default]
    Forward,
    /// Towards position `0.0`
    Backward,
}

impl Direction {
    /// The direction reaching the position representing `state`
    #[inline]
    pub fn towards(state: bool) -> Self {
        match state {
            true => Direction::Forward,
            false => Direction::Backward,
        }
    }

    /// The opposite direction
    #[inline]
    #[must_use = "method does not modify self but returns a new value"]
    pub fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// Easing curve applied to linear position
///
/// All curves map `0 → 0` and `1 → 1`; output is clamped to `[0, 1]`.
#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    /// No easing
    #[default]
    Linear,
    /// Quadratic, accelerating
    InQuad,
    /// Quadratic, decelerating
    OutQuad,
    /// Cubic, accelerating then decelerating
    InOutCubic,
    /// Quintic, accelerating
    InQuint,
    /// Quintic, decelerating
    OutQuint,
    /// Decelerating with overshoot (clamped, so it reaches `1` early)
    OutBack,
    /// User-supplied curve
    #[cfg_attr(feature = "serde", serde(skip))]
    Custom(fn(f32) -> f32),
}

impl PartialEq for Easing {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Easing::Custom(a), Easing::Custom(b)) => std::ptr::fn_addr_eq(*a, *b),
            (a, b) => std::mem::discriminant(a) == std::mem::discriminant(b),
        }
    }
}

impl Easing {
    /// Map a linear position `t` through the curve
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        let v = match self {
            Easing::Linear => t,
            Easing::InQuad => t * t,
            Easing::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::InQuint => t.powi(5),
            Easing::OutQuint => 1.0 - (1.0 - t).powi(5),
            Easing::OutBack => {
                const C1: f32 = 1.70158;
                const C3: f32 = C1 + 1.0;
                1.0 + C3 * (t - 1.0).powi(3) + C1 * (t - 1.0).powi(2)
            }
            Easing::Custom(f) => f(t),
        };
        if v.is_nan() { t } else { v.clamp(0.0, 1.0) }
    }

    /// Find the least position `t` such that `self.apply(t) >= value`
    ///
    /// The curve is assumed to be non-decreasing.
    pub fn inverse(self, value: f32) -> f32 {
        let value = value.clamp(0.0, 1.0);
        if value == 0.0 || matches!(self, Easing::Linear) {
            return value;
        }

        let (mut lo, mut hi) = (0.0f32, 1.0f32);
        for _ in 0..24 {
            let mid = 0.5 * (lo + hi);
            if self.apply(mid) < value {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        hi
    }
}

/// A pair of easing curves, selected by [`Direction`]
///
/// The forward curve applies while entering the active state, the backward
/// curve while leaving it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EasingPair {
    /// Curve used while running [`Direction::Forward`]
    pub forward: Easing,
    /// Curve used while running [`Direction::Backward`]
    pub backward: Easing,
}

impl EasingPair {
    /// Linear in both directions
    pub const LINEAR: EasingPair = EasingPair::uniform(Easing::Linear);

    /// Decelerate in, accelerate out
    pub const QUINT: EasingPair = EasingPair {
        forward: Easing::OutQuint,
        backward: Easing::InQuint,
    };

    /// Overshoot in, accelerate out
    pub const OUT_BACK: EasingPair = EasingPair {
        forward: Easing::OutBack,
        backward: Easing::InQuint,
    };

    /// The same curve in both directions
    #[inline]
    pub const fn uniform(easing: Easing) -> Self {
        EasingPair {
            forward: easing,
            backward: easing,
        }
    }

    /// The curve for `direction`
    #[inline]
    pub fn get(self, direction: Direction) -> Easing {
        match direction {
            Direction::Forward => self.forward,
            Direction::Backward => self.backward,
        }
    }
}

impl From<Easing> for EasingPair {
    #[inline]
    fn from(easing: Easing) -> Self {
        EasingPair::uniform(easing)
    }
}

/// A timed progress counter
///
/// A timeline has a *position* in `[0, 1]` and a [`Direction`]. While
/// running, [`Self::tick`] moves the position towards the end of the current
/// direction; *progress* is the fraction of that travel already completed.
/// The eased [`Self::value`] uses the curve of the current direction.
///
/// The timeline does not schedule its own ticks: this is the caller's job.
#[derive(Clone, Debug, PartialEq)]
pub struct Timeline {
    duration: Duration,
    direction: Direction,
    progress: f32,
    running: bool,
    easing: EasingPair,
}

impl Default for Timeline {
    fn default() -> Self {
        Timeline::new(Duration::ZERO)
    }
}

impl Timeline {
    /// Construct, stopped at position `0`
    pub fn new(duration: Duration) -> Self {
        Timeline {
            duration,
            direction: Direction::Forward,
            progress: 0.0,
            running: false,
            easing: EasingPair::LINEAR,
        }
    }

    /// Construct, stopped at the end position representing `state`
    ///
    /// That is, position `1` if `state` else position `0`.
    pub fn settled(duration: Duration, state: bool) -> Self {
        Timeline {
            duration,
            direction: Direction::towards(state),
            progress: 1.0,
            running: false,
            easing: EasingPair::LINEAR,
        }
    }

    /// Set the easing curves
    #[inline]
    #[must_use]
    pub fn with_easing(mut self, easing: impl Into<EasingPair>) -> Self {
        self.easing = easing.into();
        self
    }

    /// Set the easing curves
    ///
    /// A running timeline keeps its position, so its value may jump.
    #[inline]
    pub fn set_easing(&mut self, easing: impl Into<EasingPair>) {
        self.easing = easing.into();
    }

    /// Get the easing curves
    #[inline]
    pub fn easing(&self) -> EasingPair {
        self.easing
    }

    /// The easing curve of the current direction
    #[inline]
    pub fn curve(&self) -> Easing {
        self.easing.get(self.direction)
    }

    /// Get the duration of a full traversal
    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Set the duration of a full traversal
    ///
    /// Progress is preserved; only the remaining time changes.
    #[inline]
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    /// Current direction
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// True while the timeline has not reached the end of its direction
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Fraction of travel completed in the current direction, in `[0, 1]`
    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Time elapsed in the current direction
    pub fn elapsed(&self) -> Duration {
        self.duration.mul_f32(self.progress)
    }

    /// Linear position in `[0, 1]`
    #[inline]
    pub fn position(&self) -> f32 {
        match self.direction {
            Direction::Forward => self.progress,
            Direction::Backward => 1.0 - self.progress,
        }
    }

    /// Eased position in `[0, 1]`
    #[inline]
    pub fn value(&self) -> f32 {
        self.curve().apply(self.position())
    }

    /// Start or redirect the timeline
    ///
    /// -   Running in the same direction: no-op (progress is preserved).
    /// -   Running in the opposite direction: progress is mirrored
    ///     (`1 - progress`) so that position is continuous. Where the two
    ///     directions use different curves, position is instead chosen so
    ///     that [`Self::value`] is continuous.
    /// -   Stopped: continue from the current position; if already at the
    ///     end of `direction` the traversal is replayed from its start.
    #[inline]
    pub fn start(&mut self, direction: Direction, duration: Duration) {
        let easing = self.easing;
        self.start_with(direction, duration, easing);
    }

    /// Start or redirect the timeline, replacing the easing curves
    ///
    /// As [`Self::start`], except that continuity of [`Self::value`] is
    /// measured from the old curve to the new one.
    pub fn start_with(
        &mut self,
        direction: Direction,
        duration: Duration,
        easing: impl Into<EasingPair>,
    ) {
        let easing = easing.into();
        self.duration = duration;
        if self.running && self.direction == direction {
            self.easing = easing;
            return;
        }

        let (value, old_curve) = (self.value(), self.curve());
        self.easing = easing;
        let curve = easing.get(direction);
        let position = if curve == old_curve {
            self.position()
        } else {
            curve.inverse(value)
        };
        self.direction = direction;
        self.progress = match direction {
            Direction::Forward => position,
            Direction::Backward => 1.0 - position,
        };
        if !self.running && self.progress >= 1.0 {
            self.progress = 0.0;
        }
        self.running = true;
    }

    /// Restart from the beginning of `direction`
    pub fn restart(&mut self, direction: Direction, duration: Duration) {
        self.duration = duration;
        self.direction = direction;
        self.progress = 0.0;
        self.running = true;
    }

    /// Stop without changing position
    #[inline]
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Advance by `delta`
    ///
    /// Returns `true` while still running. A zero duration completes on the
    /// first tick. Ticking a stopped timeline does nothing and returns `false`.
    pub fn tick(&mut self, delta: Duration) -> bool {
        if !self.running {
            return false;
        }

        if self.duration.is_zero() {
            self.progress = 1.0;
        } else {
            let step = delta.as_secs_f32() / self.duration.as_secs_f32();
            self.progress = (self.progress + step).clamp(0.0, 1.0);
        }

        if self.progress >= 1.0 {
            self.progress = 1.0;
            self.running = false;
        }
        self.running
    }
}
