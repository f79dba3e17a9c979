// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Behaviour of a single transition engine over time

use sheen::{AnimationParams, ObjectTable, Profile, TickQueue, TransitionEngine};
use std::time::Duration;

fn init_log() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

fn hover_engine(duration: Duration) -> TransitionEngine {
    let mut engine = TransitionEngine::new(Profile::HOVER);
    engine.set_duration(duration);
    engine
}

/// Deliver ticks of `step` while requested; returns the number delivered
fn run(engine: &mut TransitionEngine, queue: &mut TickQueue, step: Duration) -> usize {
    let mut n = 0;
    while queue.take().is_some() {
        engine.tick(queue, step);
        n += 1;
        assert!(n < 1000, "transition does not settle");
    }
    n
}

#[test]
fn settles_monotonically() {
    init_log();
    let mut objects = ObjectTable::new();
    let w = objects.insert();
    let mut queue = TickQueue::new();
    let mut engine = hover_engine(ms(150));

    engine.update_state(&mut queue, w, true, AnimationParams::empty());
    let mut last = engine.opacity(w).unwrap();
    while queue.take().is_some() {
        engine.tick(&mut queue, ms(16));
        let opacity = engine.opacity(w).unwrap();
        assert!(opacity >= last);
        last = opacity;
    }
    assert_eq!(last, 1.0);
    assert!(!engine.is_animated(w));
}

#[test]
fn hover_flip_mid_transition() {
    init_log();
    let mut objects = ObjectTable::new();
    let w = objects.insert();
    let mut queue = TickQueue::new();
    let mut engine = hover_engine(ms(150));
    let none = AnimationParams::empty();

    assert!(engine.update_state(&mut queue, w, true, none));
    assert_eq!(queue.take(), Some(ms(16)));
    assert!(engine.tick(&mut queue, ms(80)));
    let before = engine.opacity(w).unwrap();
    assert!((before - 80.0 / 150.0).abs() < 1e-4);

    assert!(engine.update_state(&mut queue, w, false, none));
    let timeline = engine.timeline(w).unwrap();
    assert!((timeline.progress() - (1.0 - before)).abs() < 1e-4);
    let after = engine.opacity(w).unwrap();
    assert!((after - before).abs() < 1e-6);

    // 80ms of travel remain back to zero
    assert!(engine.tick(&mut queue, ms(40)));
    let mid = engine.opacity(w).unwrap();
    assert!(mid < before && mid > 0.0);
    assert!(engine.tick(&mut queue, ms(39)));
    assert!(!engine.tick(&mut queue, ms(2)));
    assert_eq!(engine.opacity(w), None);
    assert!(!engine.contains(w));
}

#[test]
fn repeated_input_is_idempotent() {
    init_log();
    let mut objects = ObjectTable::new();
    let w = objects.insert();
    let mut queue = TickQueue::new();
    let mut engine = hover_engine(ms(100));
    let none = AnimationParams::empty();

    assert!(engine.update_state(&mut queue, w, true, none));
    engine.tick(&mut queue, ms(30));
    let timeline = engine.timeline(w).cloned();
    for _ in 0..5 {
        assert!(!engine.update_state(&mut queue, w, true, none));
    }
    assert_eq!(engine.timeline(w).cloned(), timeline);
    assert_eq!(engine.len(), 1);
}

#[test]
fn no_ticks_while_idle() {
    init_log();
    let mut objects = ObjectTable::new();
    let (a, b) = (objects.insert(), objects.insert());
    let mut queue = TickQueue::new();
    let mut engine = hover_engine(ms(100));
    let none = AnimationParams::empty();

    engine.update_state(&mut queue, a, false, none);
    assert_eq!(queue.requests(), 0);

    engine.update_state(&mut queue, a, true, none);
    engine.update_state(&mut queue, b, true, none);
    assert_eq!(queue.requests(), 1);
    assert!(run(&mut engine, &mut queue, ms(16)) > 0);
    assert!(!engine.is_ticking());

    let requests = queue.requests();
    engine.update_state(&mut queue, a, true, none);
    assert!(!engine.tick(&mut queue, ms(16)));
    assert_eq!(queue.requests(), requests);
    assert!(!queue.is_pending());
}

#[test]
fn destroyed_object_is_evicted() {
    init_log();
    let mut objects = ObjectTable::new();
    let (a, b) = (objects.insert(), objects.insert());
    let mut queue = TickQueue::new();
    let mut engine = hover_engine(ms(100));
    let none = AnimationParams::empty();

    engine.update_state(&mut queue, a, true, none);
    engine.update_state(&mut queue, b, true, none);
    engine.tick(&mut queue, ms(20));
    assert!(objects.remove(a));
    assert_eq!(engine.object_destroyed(a), 1);

    assert_eq!(engine.opacity(a), None);
    assert!(engine.opacity(b).is_some());
    assert_eq!(engine.objects().collect::<Vec<_>>(), vec![b]);

    // The slot is reused under a new generation
    let c = objects.insert();
    assert_ne!(a, c);
    assert_eq!(engine.opacity(c), None);
}

#[test]
fn duration_change_keeps_progress() {
    init_log();
    let mut objects = ObjectTable::new();
    let w = objects.insert();
    let mut queue = TickQueue::new();
    let mut engine = hover_engine(ms(100));

    engine.update_state(&mut queue, w, true, AnimationParams::LONG_DURATION);
    engine.tick(&mut queue, ms(150));
    let before = engine.opacity(w).unwrap();
    assert!((before - 0.5).abs() < 1e-4);

    engine.set_duration(ms(200));
    assert_eq!(engine.timeline(w).unwrap().duration(), ms(600));
    assert_eq!(engine.opacity(w), Some(before));
}
