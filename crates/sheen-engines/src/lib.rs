// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Sheen specialised animation engines
//!
//! Each engine composes one or more [`sheen::TransitionEngine`]s with the
//! domain knowledge of one kind of widget: which interaction dimensions it
//! animates, which sub-regions it has and which geometry callers need to
//! store with it.
//!
//! [`Animations`] owns one instance of each engine and routes widget
//! (un)registration, destruction and ticks to them.

#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
mod base;

mod animations;
mod busy_indicator;
mod handle;
mod header_view;
mod mdi_window;
mod scroll_bar;
mod slider;
mod spin_box;
mod tab_bar;
mod tool_box;
mod widget_state;

pub use animations::{Animations, WidgetKind};
pub use base::{Engine, WidgetSet};
pub use busy_indicator::{BUSY_INDICATOR_SIZE, BusyIndicatorEngine};
pub use handle::HandleEngine;
pub use header_view::HeaderViewEngine;
pub use mdi_window::{MdiButton, MdiWindowEngine};
pub use scroll_bar::{ScrollBarEngine, ScrollBarPart};
pub use slider::SliderEngine;
pub use spin_box::{SpinBoxArrow, SpinBoxEngine};
pub use tab_bar::TabBarEngine;
pub use tool_box::ToolBoxEngine;
pub use widget_state::WidgetStateEngine;
