// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! The engine registry, driven as a host toolkit would drive it

use sheen::config::{AnimationConfig, ConfigMsg, Format};
use sheen::engines::{ScrollBarPart, SpinBoxArrow};
use sheen::geom::{Coord, Rect, Size};
use sheen::{AnimationMode, Animations, Engine, TickQueue, WidgetKind};
use std::time::Duration;

fn init_log() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

/// Deliver requested ticks of `step` until none is requested
fn run(animations: &mut Animations, queue: &mut TickQueue, step: Duration) {
    let mut n = 0;
    while queue.take().is_some() {
        animations.tick(queue, step);
        n += 1;
        assert!(n < 1000, "animations do not settle");
    }
}

#[test]
fn button_hover_round_trip() {
    init_log();
    let mut animations = Animations::default();
    let mut queue = TickQueue::new();
    let button = animations.insert_object();
    animations.register_widget(button, WidgetKind::Button { in_tool_box: false });

    let state = animations.widget_state_mut();
    assert!(state.update_state(&mut queue, button, AnimationMode::HOVER, true));
    assert!(animations.is_ticking());
    run(&mut animations, &mut queue, ms(16));
    let state = animations.widget_state();
    assert_eq!(state.button_opacity(button), None);
    assert_eq!(state.opacity(button, AnimationMode::HOVER), Some(1.0));

    let state = animations.widget_state_mut();
    assert!(state.update_state(&mut queue, button, AnimationMode::HOVER, false));
    assert_eq!(state.button_animation_mode(button), AnimationMode::HOVER);
    run(&mut animations, &mut queue, ms(16));
    assert_eq!(animations.widget_state().opacity(button, AnimationMode::HOVER), None);
    assert!(!animations.is_ticking());
}

#[test]
fn destroy_evicts_all_parts() {
    init_log();
    let mut animations = Animations::default();
    let mut queue = TickQueue::new();
    let bar = animations.insert_object();
    let other = animations.insert_object();
    animations.register_widget(bar, WidgetKind::ScrollBar);
    animations.register_widget(other, WidgetKind::ScrollBar);

    let rect = Rect::new(Coord(0, 90), Size(10, 10));
    let scroll_bar = animations.scroll_bar_mut();
    scroll_bar.set_sub_control_rect(bar, ScrollBarPart::AddLine, rect);
    scroll_bar.update_hover(&mut queue, bar, Some(ScrollBarPart::AddLine), Some(Coord(5, 95)));
    scroll_bar.update_hover(&mut queue, bar, Some(ScrollBarPart::SubLine), Some(Coord(5, 5)));
    scroll_bar.update_hover(&mut queue, other, Some(ScrollBarPart::Slider), None);
    animations.tick(&mut queue, ms(30));

    assert!(animations.destroy_object(bar));
    let scroll_bar = animations.scroll_bar();
    for part in ScrollBarPart::ALL {
        assert_eq!(scroll_bar.opacity(bar, part), None);
        assert!(!scroll_bar.is_hovered(bar, part));
    }
    assert_eq!(scroll_bar.sub_control_rect(bar, ScrollBarPart::AddLine), None);
    assert!(scroll_bar.opacity(other, ScrollBarPart::Slider).is_some());

    // Late events for the destroyed object are ignored
    let scroll_bar = animations.scroll_bar_mut();
    assert!(!scroll_bar.update_hover(&mut queue, bar, Some(ScrollBarPart::Groove), None));
    assert!(!animations.register_widget(bar, WidgetKind::ScrollBar));
}

#[test]
fn unregister_keeps_handle() {
    init_log();
    let mut animations = Animations::default();
    let mut queue = TickQueue::new();
    let spin = animations.insert_object();
    animations.register_widget(spin, WidgetKind::SpinBox);
    let spin_box = animations.spin_box_mut();
    assert!(spin_box.update_state(&mut queue, spin, SpinBoxArrow::Up, true));

    assert!(animations.unregister_widget(spin));
    assert!(!animations.unregister_widget(spin));
    assert_eq!(animations.spin_box().opacity(spin, SpinBoxArrow::Up), None);
    assert!(animations.objects().contains(spin));

    assert!(animations.register_widget(spin, WidgetKind::SpinBox));
    assert!(animations.spin_box().is_registered(spin));
    let input = animations.input_widget();
    assert!(input.is_registered(spin, AnimationMode::HOVER));
}

#[test]
fn busy_indicator_refcount() {
    init_log();
    let mut animations = Animations::default();
    let mut queue = TickQueue::new();
    let (a, b) = (animations.insert_object(), animations.insert_object());
    animations.register_widget(a, WidgetKind::ProgressBar);
    animations.register_widget(b, WidgetKind::ProgressBar);
    assert!(!queue.is_pending());

    let busy = animations.busy_indicator_mut();
    busy.set_animated(&mut queue, a, true);
    busy.set_animated(&mut queue, b, true);
    busy.set_animated(&mut queue, b, true);
    assert_eq!(busy.num_animated(), 2);
    assert!(queue.take().is_some());

    assert!(animations.tick(&mut queue, ms(60)));
    let phase = animations.busy_indicator().phase();
    assert!(phase > 0.0);

    animations.unregister_widget(a);
    assert_eq!(animations.busy_indicator().num_animated(), 1);
    assert!(animations.tick(&mut queue, ms(60)));
    assert!(animations.busy_indicator().phase() != phase);

    animations.unregister_widget(b);
    queue.take();
    assert!(!animations.tick(&mut queue, ms(60)));
    assert!(!queue.is_pending());
    assert!(!animations.is_ticking());

    animations.register_widget(b, WidgetKind::ProgressBar);
    animations
        .busy_indicator_mut()
        .set_animated(&mut queue, b, true);
    assert!(queue.is_pending());
    assert!(animations.is_ticking());
}

#[test]
fn combo_box_arrow_hover() {
    init_log();
    let mut animations = Animations::default();
    let mut queue = TickQueue::new();
    let combo = animations.insert_object();
    animations.register_widget(combo, WidgetKind::ComboBox);

    let engine = animations.combo_box_mut();
    assert!(engine.set_handle_rect(combo, Rect::new(Coord(80, 0), Size(20, 20))));
    assert!(!engine.hover_move(&mut queue, combo, Coord(10, 10)));
    assert!(engine.hover_move(&mut queue, combo, Coord(90, 10)));
    assert!(engine.is_animated(combo));
    assert_eq!(engine.position(combo), Some(Coord(90, 10)));

    assert!(engine.hover_leave(&mut queue, combo));
    run(&mut animations, &mut queue, ms(16));
    assert_eq!(animations.combo_box().opacity(combo), None);
}

#[test]
fn tabs_cross_fade() {
    init_log();
    let mut animations = Animations::default();
    let mut queue = TickQueue::new();
    let tabs = animations.insert_object();
    animations.register_widget(tabs, WidgetKind::TabBar);

    let (first, second) = (Coord(0, 0), Coord(60, 0));
    let hover = AnimationMode::HOVER;
    let tab_bar = animations.tab_bar_mut();
    assert!(tab_bar.set_current_tab(&mut queue, tabs, hover, Some(first)));
    run(&mut animations, &mut queue, ms(16));

    let tab_bar = animations.tab_bar_mut();
    assert!(tab_bar.set_current_tab(&mut queue, tabs, hover, Some(second)));
    assert_eq!(tab_bar.opacity(tabs, first, hover), Some(1.0));
    assert_eq!(tab_bar.opacity(tabs, second, hover), Some(0.0));
    animations.tick(&mut queue, ms(75));
    let tab_bar = animations.tab_bar();
    let (a, b) = (
        tab_bar.opacity(tabs, first, hover).unwrap(),
        tab_bar.opacity(tabs, second, hover).unwrap(),
    );
    assert!((a + b - 1.0).abs() < 1e-4);
    assert_eq!(tab_bar.current_tab(tabs, hover), Some(second));
}

#[test]
fn config_from_json() {
    init_log();
    let text = r#"{ "duration_ms": 40, "steps": 2 }"#;
    let config: AnimationConfig = Format::Json.read_str(text).unwrap();
    assert_eq!(config.duration(), ms(40));
    assert!(config.enabled);

    let mut animations = Animations::new(config);
    let mut queue = TickQueue::new();
    let slider = animations.insert_object();
    animations.register_widget(slider, WidgetKind::Slider);
    assert!(animations.slider().enabled());

    animations.slider_mut().update_state(&mut queue, slider, true);
    animations.tick(&mut queue, ms(30));
    assert_eq!(animations.slider().opacity(slider), Some(0.5));
    animations.tick(&mut queue, ms(30));
    assert_eq!(animations.slider().opacity(slider), Some(1.0));
    assert!(!animations.is_ticking());
}

#[test]
fn disabled_config_is_instant() {
    init_log();
    let mut config = AnimationConfig::default();
    assert!(config.change_config(ConfigMsg::Enabled(false)));
    let mut animations = Animations::new(config);
    let mut queue = TickQueue::new();
    let header = animations.insert_object();
    animations.register_widget(header, WidgetKind::HeaderView);

    let header_view = animations.header_view_mut();
    assert!(header_view.set_hovered_section(&mut queue, header, Some(3)));
    assert_eq!(header_view.hovered_section(header), Some(3));
    assert_eq!(header_view.opacity(header, 3), None);
    assert!(!queue.is_pending());
}
