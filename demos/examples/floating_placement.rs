// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tooltip placement near the viewport edge.
//!
//! Places a tooltip above buttons in a voice call bar. The bar sits at the top
//! of the window, so the preferred `top` placement flips below, and the
//! rightmost button's tooltip shifts left to stay on screen.
//!
//! Run:
//! - `cargo run -p understory_floating_demos --example floating_placement`

use kurbo::{Rect, Size};
use understory_floating::placement::Placement;

fn main() {
    let viewport = Rect::new(0.0, 0.0, 320.0, 240.0);
    let bubble = Size::new(96.0, 24.0);
    let placement: Placement = "top".parse().expect("known placement");

    for (label, x) in [("Mute", 8.0), ("Deafen", 140.0), ("Leave", 288.0)] {
        let button = Rect::new(x, 8.0, x + 24.0, 32.0);
        let (used, rect) = placement.place_within(button, bubble, 6.0, viewport);
        println!("{label:>7}: {used:?} at {rect:?}");
        assert!(rect.y0 >= viewport.y0 && rect.x1 <= viewport.x1 && rect.x0 >= viewport.x0);
        assert_eq!(used, Placement::BOTTOM);
    }
}
