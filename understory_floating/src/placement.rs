// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay placement relative to an anchor.
//!
//! The controller does not render overlays, but renderers share one notion of
//! where an overlay goes: a [`Side`] of the anchor and an [`Align`]ment along
//! that side. [`Placement::place_within`] adds the two adjustments floating
//! overlays usually need near the edge of a viewport: flip to the opposite
//! side, then shift along the cross axis.
//!
//! ```
//! use kurbo::{Rect, Size};
//! use understory_floating::placement::{Align, Placement, Side};
//!
//! let anchor = Rect::new(100.0, 100.0, 140.0, 120.0);
//! let bubble = Placement::new(Side::Bottom, Align::Start).place(anchor, Size::new(60.0, 20.0), 4.0);
//! assert_eq!(bubble, Rect::new(100.0, 124.0, 160.0, 144.0));
//! ```

use core::str::FromStr;

use kurbo::{Point, Rect, Size};

use crate::config::ConfigError;

/// The side of the anchor an overlay sits on.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Side {
    /// Above the anchor.
    #[default]
    Top,
    /// Below the anchor.
    Bottom,
    /// Left of the anchor.
    Left,
    /// Right of the anchor.
    Right,
}

impl Side {
    /// The opposite side.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// Alignment of the overlay along the anchor's side.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Align {
    /// Overlay's leading edge lines up with the anchor's leading edge.
    Start,
    /// Overlay is centered on the anchor.
    #[default]
    Center,
    /// Overlay's trailing edge lines up with the anchor's trailing edge.
    End,
}

/// Where an overlay goes relative to its anchor.
///
/// Parses from the usual names: `top`, `bottom-start`, `right-end`, and so on.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Placement {
    /// Side of the anchor.
    pub side: Side,
    /// Alignment along that side.
    pub align: Align,
}

impl Placement {
    /// Centered above the anchor.
    pub const TOP: Self = Self::new(Side::Top, Align::Center);
    /// Centered below the anchor.
    pub const BOTTOM: Self = Self::new(Side::Bottom, Align::Center);
    /// Centered left of the anchor.
    pub const LEFT: Self = Self::new(Side::Left, Align::Center);
    /// Centered right of the anchor.
    pub const RIGHT: Self = Self::new(Side::Right, Align::Center);

    /// Create a placement.
    pub const fn new(side: Side, align: Align) -> Self {
        Self { side, align }
    }

    /// The same alignment on the opposite side.
    #[must_use]
    pub const fn flipped(self) -> Self {
        Self::new(self.side.opposite(), self.align)
    }

    /// Rectangle for an overlay of `size`, `gap` away from `anchor`.
    pub fn place(self, anchor: Rect, size: Size, gap: f64) -> Rect {
        let x = match self.side {
            Side::Left => anchor.x0 - gap - size.width,
            Side::Right => anchor.x1 + gap,
            Side::Top | Side::Bottom => align(self.align, anchor.x0, anchor.x1, size.width),
        };
        let y = match self.side {
            Side::Top => anchor.y0 - gap - size.height,
            Side::Bottom => anchor.y1 + gap,
            Side::Left | Side::Right => align(self.align, anchor.y0, anchor.y1, size.height),
        };
        Rect::from_origin_size(Point::new(x, y), size)
    }

    /// Like [`place`](Self::place), but keeps the overlay inside `bounds`.
    ///
    /// If the overlay overflows `bounds` on the main axis and the opposite side
    /// fits, the placement flips. The overlay is then shifted along the cross
    /// axis until it is inside `bounds` (or pinned to the leading edge when it
    /// is larger than `bounds`). Returns the placement actually used.
    pub fn place_within(self, anchor: Rect, size: Size, gap: f64, bounds: Rect) -> (Self, Rect) {
        let mut used = self;
        let mut rect = self.place(anchor, size, gap);
        if overflows_main(self.side, rect, bounds) {
            let flipped = self.flipped();
            let alt = flipped.place(anchor, size, gap);
            if !overflows_main(flipped.side, alt, bounds) {
                used = flipped;
                rect = alt;
            }
        }

        let (dx, dy) = if used.side.is_vertical() {
            (shift(rect.x0, rect.x1, bounds.x0, bounds.x1), 0.0)
        } else {
            (0.0, shift(rect.y0, rect.y1, bounds.y0, bounds.y1))
        };
        (used, rect + kurbo::Vec2::new(dx, dy))
    }
}

fn align(align: Align, start: f64, end: f64, extent: f64) -> f64 {
    match align {
        Align::Start => start,
        Align::Center => (start + end - extent) * 0.5,
        Align::End => end - extent,
    }
}

fn overflows_main(side: Side, rect: Rect, bounds: Rect) -> bool {
    match side {
        Side::Top => rect.y0 < bounds.y0,
        Side::Bottom => rect.y1 > bounds.y1,
        Side::Left => rect.x0 < bounds.x0,
        Side::Right => rect.x1 > bounds.x1,
    }
}

fn shift(start: f64, end: f64, min: f64, max: f64) -> f64 {
    if start < min {
        min - start
    } else if end > max {
        // Never push the leading edge past `min`.
        (max - end).max(min - start)
    } else {
        0.0
    }
}

impl FromStr for Placement {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (side, align) = match s.split_once('-') {
            Some((side, align)) => (side, Some(align)),
            None => (s, None),
        };
        let side = match side {
            "top" => Side::Top,
            "bottom" => Side::Bottom,
            "left" => Side::Left,
            "right" => Side::Right,
            _ => return Err(ConfigError::UnknownPlacement(s.into())),
        };
        let align = match align {
            None => Align::Center,
            Some("start") => Align::Start,
            Some("end") => Align::End,
            Some(_) => return Err(ConfigError::UnknownPlacement(s.into())),
        };
        Ok(Self::new(side, align))
    }
}
