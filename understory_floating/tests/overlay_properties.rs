// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests over random interaction sequences.

use std::time::Duration;

use proptest::prelude::*;
use understory_floating::binding::Binding;
use understory_floating::config::{AnchorConfig, ContextMenuConfig, TooltipConfig};
use understory_floating::host::NoHost;
use understory_floating::registry::Registry;
use understory_floating::types::{AnchorEvent, EventName, Modifiers, OverlayKind, VisibilityEvent};

#[derive(Clone, Debug)]
enum Step {
    Event(EventName, bool),
    Wait(u64),
    Hide,
    Reconfigure(u8),
}

fn config(mask: u8) -> AnchorConfig<(), (), ()> {
    let mut config = AnchorConfig::new();
    if mask & 1 != 0 {
        config = config.with_user_card(());
    }
    if mask & 2 != 0 {
        config = config.with_tooltip(TooltipConfig::text("tip"));
    }
    if mask & 4 != 0 {
        config = config.with_context_menu(ContextMenuConfig::new(()));
    }
    config
}

fn event_name() -> impl Strategy<Value = EventName> {
    prop_oneof![
        Just(EventName::Click),
        Just(EventName::ContextMenu),
        Just(EventName::TouchStart),
        Just(EventName::TouchEnd),
        Just(EventName::TouchMove),
        Just(EventName::MouseEnter),
        Just(EventName::MouseLeave),
    ]
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        6 => (event_name(), any::<bool>()).prop_map(|(name, shift)| Step::Event(name, shift)),
        2 => (0_u64..800).prop_map(Step::Wait),
        1 => Just(Step::Hide),
        1 => (0_u8..8).prop_map(Step::Reconfigure),
    ]
}

/// Replays `changes` from `start` and checks every intermediate state holds at most one kind.
fn replay(start: Option<OverlayKind>, changes: &[VisibilityEvent]) -> Option<OverlayKind> {
    let mut current = start;
    for change in changes {
        current = match (*change, current) {
            (VisibilityEvent::Hidden(kind), Some(shown)) => {
                assert_eq!(kind, shown, "hid a kind that was not visible");
                None
            }
            (VisibilityEvent::Shown(kind), None) => Some(kind),
            (change, current) => panic!("{change:?} while {current:?} is visible"),
        };
    }
    current
}

proptest! {
    #[test]
    fn at_most_one_overlay_and_only_enabled_kinds(
        mask in 0_u8..8,
        steps in prop::collection::vec(step(), 0..64),
    ) {
        let mut host = NoHost;
        let mut binding = Binding::attach(0_u32, config(mask), &mut host).unwrap();
        let mut now = Duration::ZERO;
        let mut enabled = config(mask).kinds();

        for step in steps {
            let before = binding.visible();
            let changes = match step {
                Step::Event(name, shift) => {
                    let modifiers = if shift { Modifiers::SHIFT } else { Modifiers::empty() };
                    let event = AnchorEvent::new(name).with_modifiers(modifiers).at(now);
                    binding.handle(&event).transitions
                }
                Step::Wait(ms) => {
                    now += Duration::from_millis(ms);
                    binding.poll(now)
                }
                Step::Hide => binding.hide(),
                Step::Reconfigure(mask) => {
                    enabled = config(mask).kinds();
                    binding.reconfigure(config(mask), &mut host).unwrap()
                }
            };

            prop_assert_eq!(replay(before, &changes), binding.visible());
            for change in &changes {
                if let VisibilityEvent::Shown(kind) = change {
                    prop_assert!(enabled.has(*kind), "{:?} shown while disabled", kind);
                }
            }
            if let Some(kind) = binding.visible() {
                prop_assert!(enabled.has(kind));
            }
        }
        let _ = binding.dispose(&mut host);
    }

    #[test]
    fn toggling_a_card_twice_returns_to_hidden(start_with_tooltip in any::<bool>()) {
        let mut host = NoHost;
        let all = config(7);
        let mut binding = Binding::attach(0_u32, all, &mut host).unwrap();
        if start_with_tooltip {
            let _ = binding.trigger(OverlayKind::Tooltip, Some(true));
        }
        let _ = binding.trigger(OverlayKind::UserCard, None);
        let _ = binding.trigger(OverlayKind::UserCard, None);
        prop_assert_eq!(binding.visible(), None);
        let _ = binding.dispose(&mut host);
    }

    #[test]
    fn long_press_fires_only_after_full_delay(lift_at in 0_u64..1_000) {
        let mut host = NoHost;
        let mut binding = Binding::attach(0_u32, config(4), &mut host).unwrap();
        let _ = binding.handle(&AnchorEvent::new(EventName::TouchStart));
        let lifted = lift_at < 500;
        if lifted {
            let _ = binding.handle(
                &AnchorEvent::new(EventName::TouchEnd).at(Duration::from_millis(lift_at)),
            );
        }
        let _ = binding.poll(Duration::from_millis(1_000));
        let expected = if lifted { None } else { Some(OverlayKind::ContextMenu) };
        prop_assert_eq!(binding.visible(), expected);
        let _ = binding.dispose(&mut host);
    }
}

#[test]
fn unmount_with_pending_long_press() {
    let mut host = NoHost;
    let mut registry: Registry<u32> = Registry::new();
    let id = registry.attach(9, config(4), &mut host).unwrap();
    let _ = registry.handle(id, &AnchorEvent::new(EventName::TouchStart));

    assert_eq!(registry.detach(id, &mut host), Some(9));
    assert!(registry.poll(Duration::from_secs(1)).is_empty());
    assert_eq!(registry.iter().count(), 0);
    assert_eq!(registry.find(&9), None);
}

#[test]
fn disabled_kinds_never_react() {
    let mut host = NoHost;
    for mask in 0_u8..8 {
        let enabled = config(mask).kinds();
        let mut binding = Binding::attach(0_u32, config(mask), &mut host).unwrap();
        for kind in OverlayKind::ALL {
            if !enabled.has(kind) {
                assert!(binding.trigger(kind, Some(true)).is_empty());
                assert_eq!(binding.visible(), None);
            }
        }
        let _ = binding.dispose(&mut host);
    }
}
