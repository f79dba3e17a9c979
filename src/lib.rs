// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Sheen: transition state for themed widget styles
//!
//! This, the main Sheen crate, is merely a wrapper over other crates:
//!
//! -   [`sheen_core`] provides timelines, object tracking, the generic
//!     [`TransitionEngine`] and configuration
//! -   [`sheen_engines`] provides the specialised engines and the
//!     [`Animations`] registry
//!
//! All items from [`sheen_core`] are directly re-exported from this crate
//! (e.g. [`sheen::geom::Rect`](crate::geom::Rect)), as are the contents of
//! [`sheen_engines`] (under [`engines`] and, for the most used items, at the
//! top level).
//!
//! The [easy-cast](https://docs.rs/easy-cast/0.5/easy_cast) library is re-exported as `sheen::cast`.
//!
//! # Usage
//!
//! A style owns one [`Animations`] instance. The host toolkit supplies a
//! [`Scheduler`] which arms a timer when a tick is requested and calls
//! [`Animations::tick`] when it fires:
//!
//! ```
//! use sheen::{AnimationMode, Animations, TickQueue, WidgetKind};
//! use std::time::Duration;
//!
//! let mut animations = Animations::default();
//! let mut queue = TickQueue::new();
//!
//! let button = animations.insert_object();
//! animations.register_widget(button, WidgetKind::ToolButton);
//! animations
//!     .widget_state_mut()
//!     .update_state(&mut queue, button, AnimationMode::HOVER, true);
//!
//! while let Some(delay) = queue.take() {
//!     animations.tick(&mut queue, delay);
//! }
//! let state = animations.widget_state();
//! assert_eq!(state.opacity(button, AnimationMode::HOVER), Some(1.0));
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

pub use sheen_core::*;

pub extern crate sheen_engines as engines;

pub use sheen_engines::{Animations, Engine, WidgetKind};
