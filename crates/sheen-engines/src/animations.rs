// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Engine registry

use crate::{
    BusyIndicatorEngine, Engine, HandleEngine, HeaderViewEngine, MdiWindowEngine,
    ScrollBarEngine, SliderEngine, SpinBoxEngine, TabBarEngine, ToolBoxEngine, WidgetStateEngine,
};
use sheen::config::{AnimationConfig, ConfigMsg, Options};
use sheen::util::warn_on_error;
use sheen::{AnimationMode, ObjectHandle, ObjectTable, Scheduler};
use std::time::Duration;

/// Kind of a widget, as far as animation is concerned
///
/// This selects the engines a widget is registered with by
/// [`Animations::register_widget`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    /// A tool bar button; hover and focus
    ToolButton,
    /// A push button, check box or radio button
    ///
    /// Buttons forming the tabs of a tool box are also registered with the
    /// [`ToolBoxEngine`].
    Button {
        /// The button is a tab of a tool box
        in_tool_box: bool,
    },
    /// Only checkable group boxes (which have a check box) are animated
    GroupBox {
        /// The group box has a check box
        checkable: bool,
    },
    /// Per-part hover of arrows, handle and groove
    ScrollBar,
    /// Hover of the slider handle
    Slider,
    /// Hover of the dial handle, found from the pointer position
    Dial,
    /// Busy indicator, driven by [`BusyIndicatorEngine::set_animated`]
    ProgressBar,
    /// Arrow hover plus input-widget hover and focus
    ComboBox,
    /// Up and down arrows plus input-widget hover and focus
    SpinBox,
    /// Single-line text input; input-widget hover and focus
    LineEdit,
    /// Multi-line text input; input-widget hover and focus
    TextEdit,
    /// Per-section hover
    HeaderView,
    /// A list, tree or table view
    ItemView,
    /// Per-tab hover with a single current tab
    TabBar,
    /// Generic scroll areas are animated like input widgets only when they
    /// have a sunken frame and accept keyboard focus
    ScrollArea {
        /// The area draws a sunken frame
        sunken: bool,
        /// The area accepts keyboard focus from both click and tab
        strong_focus: bool,
    },
    /// Hover of the title bar buttons
    MdiWindow,
    /// Anything else; animated for enabled state only
    Other,
}

const NUM_ENGINES: usize = 13;

/// Registry of all animation engines
///
/// Owns the [`ObjectTable`] of tracked objects and one instance of each
/// engine. The host toolkit:
///
/// 1.  allocates a handle per widget with [`Self::insert_object`] and
///     registers it with [`Self::register_widget`] (on "polish"),
/// 2.  reports input to the engines and queries them while painting,
/// 3.  delivers ticks requested through its [`Scheduler`] to [`Self::tick`],
/// 4.  calls [`Self::unregister_widget`] on "unpolish" and
///     [`Self::destroy_object`] from its destruction hook.
#[derive(Clone, Debug)]
pub struct Animations {
    config: AnimationConfig,
    objects: ObjectTable,
    widget_enability: WidgetStateEngine,
    widget_state: WidgetStateEngine,
    input_widget: WidgetStateEngine,
    combo_box: HandleEngine,
    busy_indicator: BusyIndicatorEngine,
    header_view: HeaderViewEngine,
    scroll_bar: ScrollBarEngine,
    slider: SliderEngine,
    dial: HandleEngine,
    spin_box: SpinBoxEngine,
    tab_bar: TabBarEngine,
    tool_box: ToolBoxEngine,
    mdi_window: MdiWindowEngine,
}

impl Default for Animations {
    fn default() -> Self {
        Animations::new(AnimationConfig::default())
    }
}

impl Animations {
    /// Construct, applying `config` to all engines
    pub fn new(config: AnimationConfig) -> Self {
        let mut animations = Animations {
            config: AnimationConfig::default(),
            objects: ObjectTable::new(),
            widget_enability: WidgetStateEngine::new("widget_enability"),
            widget_state: WidgetStateEngine::new("widget_state"),
            input_widget: WidgetStateEngine::new("input_widget"),
            combo_box: HandleEngine::new("combo_box"),
            busy_indicator: BusyIndicatorEngine::new(),
            header_view: HeaderViewEngine::new(),
            scroll_bar: ScrollBarEngine::new(),
            slider: SliderEngine::new(),
            dial: HandleEngine::new("dial"),
            spin_box: SpinBoxEngine::new(),
            tab_bar: TabBarEngine::new(),
            tool_box: ToolBoxEngine::new(),
            mdi_window: MdiWindowEngine::new(),
        };
        animations.setup_engines(&config);
        animations
    }

    /// Construct, loading config as directed by the environment
    ///
    /// See [`Options::from_env`]. On failure to read config a warning is
    /// logged and the default config is used.
    pub fn from_env() -> Self {
        let options = Options::from_env();
        let config = warn_on_error("failed to read animation config", options.read_config())
            .unwrap_or_default();
        Animations::new(config)
    }

    fn engines(&self) -> [&dyn Engine; NUM_ENGINES] {
        [
            &self.widget_enability,
            &self.widget_state,
            &self.input_widget,
            &self.combo_box,
            &self.busy_indicator,
            &self.header_view,
            &self.scroll_bar,
            &self.slider,
            &self.dial,
            &self.spin_box,
            &self.tab_bar,
            &self.tool_box,
            &self.mdi_window,
        ]
    }

    fn engines_mut(&mut self) -> [&mut dyn Engine; NUM_ENGINES] {
        [
            &mut self.widget_enability,
            &mut self.widget_state,
            &mut self.input_widget,
            &mut self.combo_box,
            &mut self.busy_indicator,
            &mut self.header_view,
            &mut self.scroll_bar,
            &mut self.slider,
            &mut self.dial,
            &mut self.spin_box,
            &mut self.tab_bar,
            &mut self.tool_box,
            &mut self.mdi_window,
        ]
    }

    /// The active configuration
    #[inline]
    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Apply `config` to all engines
    ///
    /// The busy indicator takes its enabled flag and cycle duration from the
    /// `busy_*` fields; all other engines from `enabled` and `duration_ms`.
    pub fn setup_engines(&mut self, config: &AnimationConfig) {
        log::debug!(target: "sheen_engines::animations", "setup_engines: {config:?}");
        for engine in self.engines_mut() {
            engine.apply_config(config);
        }
        self.config = config.clone();
    }

    /// Apply a live configuration change
    ///
    /// Returns `true` if the configuration changed.
    pub fn change_config(&mut self, msg: ConfigMsg) -> bool {
        let mut config = self.config.clone();
        if !config.change_config(msg) {
            return false;
        }
        self.setup_engines(&config);
        true
    }

    /// Tracked objects
    #[inline]
    pub fn objects(&self) -> &ObjectTable {
        &self.objects
    }

    /// Allocate a handle for a new object
    #[inline]
    pub fn insert_object(&mut self) -> ObjectHandle {
        self.objects.insert()
    }

    /// Register `object` with the engines suitable for `kind`
    ///
    /// Every object is registered with the enability engine. Registration is
    /// idempotent. Stale handles are ignored (returning `false`).
    pub fn register_widget(&mut self, object: ObjectHandle, kind: WidgetKind) -> bool {
        if !self.objects.contains(object) {
            log::warn!(target: "sheen_engines::animations", "register_widget: stale handle {object}");
            return false;
        }
        log::debug!(target: "sheen_engines::animations", "register_widget: {object} as {kind:?}");

        use AnimationMode as M;
        let hover_focus = M::HOVER | M::FOCUS;
        self.widget_enability.register_widget(object, M::ENABLE);

        match kind {
            WidgetKind::ToolButton => {
                self.widget_state.register_widget(object, hover_focus);
            }
            WidgetKind::Button { in_tool_box } => {
                if in_tool_box {
                    self.tool_box.register_widget(object);
                }
                self.widget_state.register_widget(object, hover_focus);
            }
            WidgetKind::GroupBox { checkable } => {
                if checkable {
                    self.widget_state.register_widget(object, hover_focus);
                }
            }
            WidgetKind::ScrollBar => {
                self.scroll_bar.register_widget(object);
            }
            WidgetKind::Slider => {
                self.slider.register_widget(object);
            }
            WidgetKind::Dial => {
                self.dial.register_widget(object);
            }
            WidgetKind::ProgressBar => {
                self.busy_indicator.register_widget(object);
            }
            WidgetKind::ComboBox => {
                self.combo_box.register_widget(object);
                self.input_widget.register_widget(object, hover_focus);
            }
            WidgetKind::SpinBox => {
                self.spin_box.register_widget(object);
                self.input_widget.register_widget(object, hover_focus);
            }
            WidgetKind::LineEdit | WidgetKind::TextEdit | WidgetKind::ItemView => {
                self.input_widget.register_widget(object, hover_focus);
            }
            WidgetKind::HeaderView => {
                self.header_view.register_widget(object);
            }
            WidgetKind::TabBar => {
                self.tab_bar.register_widget(object);
            }
            WidgetKind::ScrollArea {
                sunken,
                strong_focus,
            } => {
                if sunken && strong_focus {
                    self.input_widget.register_widget(object, hover_focus);
                }
            }
            WidgetKind::MdiWindow => {
                self.mdi_window.register_widget(object);
            }
            WidgetKind::Other => (),
        }
        true
    }

    /// Unregister `object` from all engines (toolkit "unpolish")
    ///
    /// The handle stays valid; the object may be registered again.
    /// Returns `true` if any engine knew `object`.
    pub fn unregister_widget(&mut self, object: ObjectHandle) -> bool {
        let mut known = false;
        for engine in self.engines_mut() {
            known |= engine.unregister_widget(object);
        }
        if known {
            log::debug!(target: "sheen_engines::animations", "unregister_widget: {object}");
        }
        known
    }

    /// Destruction notification for `object`
    ///
    /// Evicts all state of `object` from every engine immediately (without
    /// running completion) and releases its handle. Returns `false` if the
    /// handle was already stale.
    pub fn destroy_object(&mut self, object: ObjectHandle) -> bool {
        if !self.objects.remove(object) {
            return false;
        }
        for engine in self.engines_mut() {
            engine.unregister_widget(object);
        }
        log::trace!(target: "sheen_engines::animations", "destroy_object: {object}");
        true
    }

    /// Deliver a tick to all engines which requested one
    ///
    /// `delta` is the time elapsed since the previous tick. Returns `true`
    /// if any engine is still animating (and has requested another tick).
    pub fn tick(&mut self, sched: &mut dyn Scheduler, delta: Duration) -> bool {
        let mut running = false;
        for engine in self.engines_mut() {
            if engine.is_ticking() {
                running |= engine.tick(sched, delta);
            }
        }
        running
    }

    /// True while any engine has requested a tick
    pub fn is_ticking(&self) -> bool {
        self.engines().iter().any(|engine| engine.is_ticking())
    }
}

macro_rules! engine_accessors {
    ($($(#[$meta:meta])* $field:ident, $field_mut:ident: $T:ty;)*) => {
        impl Animations {
            $(
                $(#[$meta])*
                #[inline]
                pub fn $field(&self) -> &$T {
                    &self.$field
                }

                $(#[$meta])*
                #[inline]
                pub fn $field_mut(&mut self) -> &mut $T {
                    &mut self.$field
                }
            )*
        }
    };
}

engine_accessors! {
    /// Enabled state of all registered widgets
    widget_enability, widget_enability_mut: WidgetStateEngine;
    /// Hover and focus of buttons and checkable group boxes
    widget_state, widget_state_mut: WidgetStateEngine;
    /// Hover and focus of editors, item views and focusable scroll areas
    input_widget, input_widget_mut: WidgetStateEngine;
    /// Combo box arrow hover
    combo_box, combo_box_mut: HandleEngine;
    /// Progress bar busy indicator
    busy_indicator, busy_indicator_mut: BusyIndicatorEngine;
    /// Header view section hover
    header_view, header_view_mut: HeaderViewEngine;
    /// Scroll bar part hover
    scroll_bar, scroll_bar_mut: ScrollBarEngine;
    /// Slider handle hover
    slider, slider_mut: SliderEngine;
    /// Dial handle hover
    dial, dial_mut: HandleEngine;
    /// Spin box arrow hover
    spin_box, spin_box_mut: SpinBoxEngine;
    /// Tab hover and focus
    tab_bar, tab_bar_mut: TabBarEngine;
    /// Tool box tab hover
    tool_box, tool_box_mut: ToolBoxEngine;
    /// MDI window title button hover
    mdi_window, mdi_window_mut: MdiWindowEngine;
}

#[cfg(test)]
mod test {
    use super::*;
    use sheen::TickQueue;

    #[test]
    fn routing() {
        let mut animations = Animations::default();
        let button = animations.insert_object();
        let tab = animations.insert_object();
        let group = animations.insert_object();
        let area = animations.insert_object();

        assert!(animations.register_widget(button, WidgetKind::Button { in_tool_box: false }));
        animations.register_widget(tab, WidgetKind::Button { in_tool_box: true });
        animations.register_widget(group, WidgetKind::GroupBox { checkable: false });
        animations.register_widget(area, WidgetKind::ScrollArea {
            sunken: true,
            strong_focus: true,
        });

        let enability = animations.widget_enability();
        for object in [button, tab, group, area] {
            assert!(enability.is_registered(object, AnimationMode::ENABLE));
        }
        let state = animations.widget_state();
        assert!(state.is_registered(button, AnimationMode::HOVER | AnimationMode::FOCUS));
        assert!(!state.is_registered(group, AnimationMode::HOVER));
        assert!(!animations.tool_box().is_registered(button));
        assert!(animations.tool_box().is_registered(tab));
        assert!(animations.input_widget().is_registered(area, AnimationMode::FOCUS));
    }

    #[test]
    fn stale_handle_not_registered() {
        let mut animations = Animations::default();
        let w = animations.insert_object();
        assert!(animations.destroy_object(w));
        assert!(!animations.destroy_object(w));
        assert!(!animations.register_widget(w, WidgetKind::Slider));
        assert!(!animations.slider().is_registered(w));
    }

    #[test]
    fn change_config_reconfigures() {
        let mut animations = Animations::default();
        let mut queue = TickQueue::new();
        let w = animations.insert_object();
        animations.register_widget(w, WidgetKind::LineEdit);
        animations
            .input_widget_mut()
            .update_state(&mut queue, w, AnimationMode::FOCUS, true);
        assert!(animations.is_ticking());

        assert!(animations.change_config(ConfigMsg::Enabled(false)));
        assert!(!animations.change_config(ConfigMsg::Enabled(false)));
        assert!(!animations.config().enabled);
        assert_eq!(animations.input_widget().opacity(w, AnimationMode::FOCUS), None);
        assert!(!animations.tick(&mut queue, Duration::from_millis(16)));
        assert!(!animations.is_ticking());

        animations.change_config(ConfigMsg::DurationMs(40));
        assert_eq!(
            animations.slider().enabled(),
            animations.config().enabled
        );
        assert_eq!(animations.busy_indicator().cycle(), Duration::from_millis(600));
    }
}
