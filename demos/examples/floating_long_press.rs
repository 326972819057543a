// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Long press on touch devices.
//!
//! A touch held for 500ms opens the context menu; lifting or moving the finger
//! earlier cancels it. Time is driven by hand here; a real host would wake up
//! at `Registry::next_deadline`.
//!
//! Run:
//! - `cargo run -p understory_floating_demos --example floating_long_press`

use core::time::Duration;

use tracing_subscriber::EnvFilter;
use understory_floating::config::{AnchorConfig, ContextMenuConfig};
use understory_floating::host::NoHost;
use understory_floating::registry::Registry;
use understory_floating::types::{AnchorEvent, EventName, OverlayKind, VisibilityEvent};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut host = NoHost;
    let mut overlays: Registry<&str, (), &str> = Registry::new();
    let message = overlays
        .attach(
            "message-42",
            AnchorConfig::new().with_context_menu(ContextMenuConfig::new("message-menu")),
            &mut host,
        )
        .expect("valid configuration");

    // Quick tap: lifted at 300ms.
    let _ = overlays.handle(message, &AnchorEvent::new(EventName::TouchStart).at(ms(0)));
    let _ = overlays.handle(message, &AnchorEvent::new(EventName::TouchEnd).at(ms(300)));
    let fired = overlays.poll(ms(500));
    println!("== Tap ==\n  {fired:?}");
    assert!(fired.is_empty());

    // Hold.
    let _ = overlays.handle(message, &AnchorEvent::new(EventName::TouchStart).at(ms(1_000)));
    let deadline = overlays.next_deadline();
    println!("== Hold ==\n  wake up at {deadline:?}");
    assert_eq!(deadline, Some(ms(1_500)));
    let fired = overlays.poll(ms(1_500));
    println!("  {fired:?}");
    assert_eq!(
        fired,
        [(message, VisibilityEvent::Shown(OverlayKind::ContextMenu))]
    );

    // Unmount while another hold is pending: nothing fires afterwards.
    let _ = overlays.handle(message, &AnchorEvent::new(EventName::TouchStart).at(ms(2_000)));
    let _ = overlays.detach(message, &mut host);
    assert!(overlays.poll(ms(3_000)).is_empty());
    println!("== Unmount ==\n  no late trigger");
}
