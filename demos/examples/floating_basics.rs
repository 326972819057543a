// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Floating overlay basics.
//!
//! Attaches a chat member's avatar with a user card, a tooltip, and a context
//! menu, then replays a short pointer session against it. The host prints what
//! a web toolkit would do with each request.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p understory_floating_demos --example floating_basics`

use tracing_subscriber::EnvFilter;
use understory_floating::binding::Overlay;
use understory_floating::config::{AnchorConfig, ContextMenuConfig, TooltipConfig};
use understory_floating::host::AnchorHost;
use understory_floating::registry::Registry;
use understory_floating::types::{
    AnchorEvent, EventName, ListenerOptions, Modifiers, OverlayKind, VisibilityEvent,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
struct Element(u32);

struct PrintHost;
impl AnchorHost<Element> for PrintHost {
    fn add_listener(&mut self, anchor: &Element, event: &EventName, options: ListenerOptions) {
        println!("  {anchor:?}.addEventListener({event}, passive: {})", options.passive);
    }

    fn remove_listener(&mut self, anchor: &Element, event: &EventName) {
        println!("  {anchor:?}.removeEventListener({event})");
    }

    fn set_interactive(&mut self, anchor: &Element, interactive: bool) {
        println!("  {anchor:?}.style: cursor pointer = {interactive}, user-select none = {interactive}");
    }

    fn set_accessible_label(&mut self, anchor: &Element, label: Option<&str>) {
        println!("  {anchor:?}.ariaLabel = {label:?}");
    }
}

#[derive(Debug)]
struct Member {
    name: &'static str,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut host = PrintHost;
    let mut overlays: Registry<Element, Member, &'static str> = Registry::new();

    println!("== Attach ==");
    let avatar = overlays
        .attach(
            Element(1),
            AnchorConfig::new()
                .with_user_card(Member { name: "alice" })
                .with_tooltip(TooltipConfig::text("alice"))
                .with_context_menu(ContextMenuConfig::new("member-menu")),
            &mut host,
        )
        .expect("valid configuration");

    let session = [
        // Tooltip.
        AnchorEvent::new(EventName::MouseEnter),
        // Card replaces the tooltip.
        AnchorEvent::new(EventName::Click),
        // Tooltip hide only applies to a visible tooltip.
        AnchorEvent::new(EventName::MouseLeave),
        // Shift click swaps the card for the menu.
        AnchorEvent::new(EventName::Click).with_modifiers(Modifiers::SHIFT),
    ];

    println!("== Session ==");
    for event in &session {
        let handled = overlays.handle(avatar, event).expect("avatar is attached");
        println!("  {} -> {:?} {:?}", event.name, handled.outcome, handled.transitions);
    }

    let binding = overlays.get(avatar).expect("avatar is attached");
    match binding.overlay() {
        Some(Overlay::ContextMenu(menu)) => println!("== Render == context menu {:?}", menu.menu),
        Some(Overlay::UserCard(card)) => {
            println!("== Render == user card for {}", card.payload.name);
        }
        Some(Overlay::Tooltip(tip)) => println!("== Render == tooltip at {:?}", tip.placement),
        None => println!("== Render == nothing"),
    }
    assert_eq!(binding.visible(), Some(OverlayKind::ContextMenu));

    println!("== Navigate ==");
    let closed = overlays.hide_all();
    println!("  {closed:?}");
    assert_eq!(closed, [(avatar, VisibilityEvent::Hidden(OverlayKind::ContextMenu))]);

    println!("== Detach ==");
    let element = overlays.detach(avatar, &mut host);
    assert_eq!(element, Some(Element(1)));
    assert!(overlays.is_empty());
}
