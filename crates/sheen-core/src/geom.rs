// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Geometry data types
//!
//! [`Coord`] and [`Size`] are 2D integer (`i32`) types in the host's pixel
//! space. Engines only store these (e.g. the last pointer position or the
//! rect of a sub-control); hit-testing remains the caller's job except for
//! the convenience [`Rect::contains`].

use std::ops::{Add, Sub};

/// A 2D coordinate
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord(pub i32, pub i32);

impl Coord {
    /// The constant `(0, 0)`
    pub const ZERO: Self = Coord(0, 0);

    /// Construct with both components equal to `n`
    #[inline]
    pub const fn splat(n: i32) -> Self {
        Coord(n, n)
    }
}

impl From<(i32, i32)> for Coord {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Coord(x, y)
    }
}

/// A 2D size
///
/// Components are expected to be non-negative.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size(pub i32, pub i32);

impl Size {
    /// The constant `(0, 0)`
    pub const ZERO: Self = Size(0, 0);

    /// True if either component is zero or negative
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 <= 0 || self.1 <= 0
    }
}

impl Add<Size> for Coord {
    type Output = Coord;
    #[inline]
    fn add(self, rhs: Size) -> Coord {
        Coord(self.0 + rhs.0, self.1 + rhs.1)
    }
}

impl Sub for Coord {
    type Output = Size;
    #[inline]
    fn sub(self, rhs: Coord) -> Size {
        Size(self.0 - rhs.0, self.1 - rhs.1)
    }
}

/// An axis-aligned rectangular region
///
/// The region is defined by a point `pos` and an extent `size`. It is empty
/// unless `size` is positive on both axes.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub pos: Coord,
    pub size: Size,
}

impl Rect {
    /// The empty rect (all fields zero)
    pub const ZERO: Self = Self::new(Coord::ZERO, Size::ZERO);

    /// Construct from a [`Coord`] and [`Size`]
    #[inline]
    pub const fn new(pos: Coord, size: Size) -> Self {
        Rect { pos, size }
    }

    /// Construct from two coords
    ///
    /// It is expected that `pos <= pos2`.
    #[inline]
    pub fn from_coords(pos: Coord, pos2: Coord) -> Self {
        Rect {
            pos,
            size: pos2 - pos,
        }
    }

    /// Get the second point (pos + size)
    #[inline]
    pub fn pos2(&self) -> Coord {
        self.pos + self.size
    }

    /// True if the rect covers no area
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// Check whether the given coordinate is contained within this rect
    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        c.0 >= self.pos.0
            && c.0 < self.pos.0 + self.size.0
            && c.1 >= self.pos.1
            && c.1 < self.pos.1 + self.size.1
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rect_contains() {
        let r = Rect::from_coords(Coord(10, 20), Coord(30, 25));
        assert_eq!(r.size, Size(20, 5));
        assert_eq!(r.pos2(), Coord(30, 25));
        assert!(r.contains(Coord(10, 20)));
        assert!(r.contains(Coord(29, 24)));
        assert!(!r.contains(Coord(30, 24)));
        assert!(!r.contains(Coord(9, 22)));
        assert!(Rect::ZERO.is_empty());
        assert!(!Rect::ZERO.contains(Coord::ZERO));
    }
}
