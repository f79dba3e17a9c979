// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Tick scheduling

use std::time::Duration;

/// The host event loop's timer facility
///
/// Engines call [`Scheduler::schedule_tick`] while they have running
/// transitions. The host is expected to call the owning engine's `tick`
/// method (usually via `Animations::tick`) once the delay has passed, passing
/// the time actually elapsed since the previous tick.
///
/// Requests made before delivery should be merged; the earliest wins.
pub trait Scheduler {
    /// Request a tick after `delay`
    fn schedule_tick(&mut self, delay: Duration);
}

impl<S: Scheduler + ?Sized> Scheduler for &mut S {
    #[inline]
    fn schedule_tick(&mut self, delay: Duration) {
        (**self).schedule_tick(delay);
    }
}

impl<S: Scheduler + ?Sized> Scheduler for Box<S> {
    #[inline]
    fn schedule_tick(&mut self, delay: Duration) {
        (**self).schedule_tick(delay);
    }
}

/// A passive [`Scheduler`] recording the next requested tick
///
/// Hosts may poll this after event handling to arm a single timer; tests use
/// it to drive ticks by hand.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickQueue {
    next: Option<Duration>,
    requests: usize,
}

impl TickQueue {
    /// Construct with nothing pending
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// True if a tick has been requested and not yet taken
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.next.is_some()
    }

    /// The pending delay, if any
    #[inline]
    pub fn pending(&self) -> Option<Duration> {
        self.next
    }

    /// Take the pending delay, if any
    #[inline]
    pub fn take(&mut self) -> Option<Duration> {
        self.next.take()
    }

    /// Total number of requests received (including merged requests)
    #[inline]
    pub fn requests(&self) -> usize {
        self.requests
    }
}

impl Scheduler for TickQueue {
    fn schedule_tick(&mut self, delay: Duration) {
        self.requests += 1;
        if let Some(next) = self.next
            && next <= delay
        {
            return;
        }

        log::trace!(
            target: "sheen_core::scheduler",
            "schedule_tick: tick at now+{}ms",
            delay.as_millis()
        );
        self.next = Some(delay);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn merge_earliest() {
        let mut queue = TickQueue::new();
        assert!(!queue.is_pending());
        queue.schedule_tick(Duration::from_millis(16));
        queue.schedule_tick(Duration::from_millis(30));
        queue.schedule_tick(Duration::from_millis(8));
        assert_eq!(queue.requests(), 3);
        assert_eq!(queue.take(), Some(Duration::from_millis(8)));
        assert_eq!(queue.take(), None);
    }

    #[test]
    fn through_dyn() {
        let mut queue = TickQueue::new();
        {
            let sched: &mut dyn Scheduler = &mut queue;
            sched.schedule_tick(Duration::ZERO);
        }
        assert_eq!(queue.pending(), Some(Duration::ZERO));
    }
}
