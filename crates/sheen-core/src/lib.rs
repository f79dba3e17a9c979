// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Sheen core: transition state for themed widget painting
//!
//! This crate tracks, per external UI object, whether some interaction
//! dimension (hover, focus, press, enabled) is fading in, fading out or
//! settled, and exposes a single progress value for painting code to blend
//! with.
//!
//! Building blocks, leaves first:
//!
//! -   [`Timeline`]: a pure timed progress counter
//! -   [`ObjectTable`] / [`ObjectHandle`]: generation-checked slots standing
//!     in for externally owned UI objects
//! -   [`KeyRegistry`]: per-object, per-sub-key storage with eviction on
//!     object destruction
//! -   [`Scheduler`]: the host event loop's timer facility
//! -   [`TransitionEngine`]: one interaction dimension over many keys

#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
extern crate bitflags;

pub extern crate easy_cast as cast;

mod engine;
mod object;
mod registry;
mod scheduler;
mod timeline;

pub mod config;
pub mod geom;
pub mod util;

pub use engine::{AnimationMode, AnimationParams, Profile, TransitionEngine};
pub use object::{ObjectHandle, ObjectTable};
pub use registry::{Key, KeyRegistry};
pub use scheduler::{Scheduler, TickQueue};
pub use timeline::{Direction, Easing, EasingPair, Timeline};
