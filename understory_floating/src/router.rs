// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event router: interprets native anchor events against a configuration.
//!
//! ## Overview
//!
//! [`route`] maps one [`AnchorEvent`] to an [`Action`] and an [`Outcome`]. It
//! never touches the visibility slot itself; the [`binding`](crate::binding)
//! applies the action. [`listeners`] names the native listeners each kind
//! needs, so a binding can install and remove exactly those.
//!
//! | Event | Condition | Action |
//! |---|---|---|
//! | `click` | context menu enabled and shift held | toggle the context menu |
//! | `click` | shift held, no context menu | nothing |
//! | `click` | otherwise | toggle the user card |
//! | context menu trigger | context menu enabled | toggle the context menu, consume the event |
//! | `touchstart` | context menu enabled | arm the long press |
//! | `touchend` / `touchmove` | always | cancel the long press |
//! | `mouseenter` | tooltip enabled | show the tooltip |
//! | `mouseleave` | tooltip enabled | hide the tooltip |
//!
//! ## Long press
//!
//! Touch devices have no right click. A touch held for [`LONG_PRESS_DELAY`]
//! without moving or lifting opens the context menu. [`LongPress`] tracks the
//! single pending timer; time is supplied by the caller so behavior is
//! deterministic and independent of any event loop.

use alloc::vec::Vec;
use core::time::Duration;

use crate::config::AnchorConfig;
use crate::types::{AnchorEvent, EventName, ListenerOptions, Modifiers, Outcome, OverlayKind};

/// How long a touch must be held to open the context menu.
pub const LONG_PRESS_DELAY: Duration = Duration::from_millis(500);

/// What the binding should do in response to an event.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Action {
    /// Nothing.
    None,
    /// Request a visibility transition for a kind (see
    /// [`Visibility::trigger`](crate::visibility::Visibility::trigger)).
    Trigger(OverlayKind, Option<bool>),
    /// Start the long-press timer.
    ArmLongPress,
    /// Cancel a pending long-press timer.
    CancelLongPress,
}

/// Result of routing one event.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Route {
    /// Action to apply to the binding.
    pub action: Action,
    /// How the host should treat the native event.
    pub outcome: Outcome,
}

impl Route {
    const IGNORE: Self = Self::new(Action::None);

    const fn new(action: Action) -> Self {
        Self {
            action,
            outcome: Outcome::Continue,
        }
    }
}

/// Route `event` against `config`.
///
/// The context menu trigger is checked first so a configuration may reuse a
/// standard event name (for example `click`) to open its menu.
pub fn route<U, M, C>(config: &AnchorConfig<U, M, C>, event: &AnchorEvent) -> Route {
    if let Some(menu) = &config.context_menu
        && event.name == menu.trigger_event()
    {
        return Route {
            action: Action::Trigger(OverlayKind::ContextMenu, None),
            outcome: Outcome::StopAndConsume,
        };
    }

    match event.name {
        // Shift-click is a context menu gesture; without a menu it does nothing.
        EventName::Click if event.modifiers.contains(Modifiers::SHIFT) => {
            if config.context_menu.is_some() {
                Route::new(Action::Trigger(OverlayKind::ContextMenu, None))
            } else {
                Route::IGNORE
            }
        }
        EventName::Click => Route::new(Action::Trigger(OverlayKind::UserCard, None)),
        EventName::TouchStart if config.context_menu.is_some() => Route::new(Action::ArmLongPress),
        EventName::TouchEnd | EventName::TouchMove => Route::new(Action::CancelLongPress),
        EventName::MouseEnter if config.tooltip.is_some() => {
            Route::new(Action::Trigger(OverlayKind::Tooltip, Some(true)))
        }
        EventName::MouseLeave if config.tooltip.is_some() => {
            Route::new(Action::Trigger(OverlayKind::Tooltip, Some(false)))
        }
        _ => Route::IGNORE,
    }
}

/// The native listeners `kind` needs under `config`.
///
/// Empty when the kind is disabled.
pub fn listeners<U, M, C>(
    kind: OverlayKind,
    config: &AnchorConfig<U, M, C>,
) -> Vec<(EventName, ListenerOptions)> {
    let mut out = Vec::new();
    match kind {
        OverlayKind::UserCard if config.user_card.is_some() => {
            out.push((EventName::Click, ListenerOptions::ACTIVE));
        }
        OverlayKind::Tooltip if config.tooltip.is_some() => {
            out.push((EventName::MouseEnter, ListenerOptions::ACTIVE));
            out.push((EventName::MouseLeave, ListenerOptions::ACTIVE));
        }
        OverlayKind::ContextMenu => {
            if let Some(menu) = &config.context_menu {
                out.push((menu.trigger_event(), ListenerOptions::ACTIVE));
                out.push((EventName::TouchStart, ListenerOptions::PASSIVE));
                out.push((EventName::TouchEnd, ListenerOptions::PASSIVE));
                out.push((EventName::TouchMove, ListenerOptions::PASSIVE));
            }
        }
        _ => {}
    }
    out
}

/// The single pending long-press timer of an anchor.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct LongPress {
    deadline: Option<Duration>,
}

impl LongPress {
    /// Create an idle timer.
    pub const fn new() -> Self {
        Self { deadline: None }
    }

    /// Start (or restart) the timer at `now`.
    pub fn arm(&mut self, now: Duration, delay: Duration) {
        self.deadline = Some(now.saturating_add(delay));
    }

    /// Cancel the pending timer, if any.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a timer is pending.
    pub const fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// When the pending timer fires.
    pub const fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Fire the timer if it is due at `now`. A timer fires at most once.
    pub fn fire(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ContextMenuConfig, TooltipConfig};

    fn everything() -> AnchorConfig<(), (), ()> {
        AnchorConfig::new()
            .with_user_card(())
            .with_tooltip(TooltipConfig::text("Alice"))
            .with_context_menu(ContextMenuConfig::new(()))
    }

    fn action(config: &AnchorConfig, event: AnchorEvent) -> Action {
        route(config, &event).action
    }

    #[test]
    fn shift_click_opens_context_menu_only_when_enabled() {
        let shift = AnchorEvent::new(EventName::Click).with_modifiers(Modifiers::SHIFT);
        assert_eq!(
            action(&everything(), shift.clone()),
            Action::Trigger(OverlayKind::ContextMenu, None)
        );
        let card_only: AnchorConfig = AnchorConfig::new().with_user_card(());
        assert_eq!(action(&card_only, shift), Action::None);
        assert_eq!(
            action(&card_only, AnchorEvent::new(EventName::Click)),
            Action::Trigger(OverlayKind::UserCard, None)
        );
    }

    #[test]
    fn context_menu_event_is_consumed() {
        let r = route(&everything(), &AnchorEvent::new(EventName::ContextMenu));
        assert_eq!(r.action, Action::Trigger(OverlayKind::ContextMenu, None));
        assert_eq!(r.outcome, Outcome::StopAndConsume);
    }

    #[test]
    fn custom_trigger_replaces_contextmenu() {
        let config: AnchorConfig = AnchorConfig::new()
            .with_context_menu(ContextMenuConfig::new(()).with_trigger("auxclick"));
        assert_eq!(
            action(&config, AnchorEvent::new(EventName::parse("auxclick"))),
            Action::Trigger(OverlayKind::ContextMenu, None)
        );
        assert_eq!(
            action(&config, AnchorEvent::new(EventName::ContextMenu)),
            Action::None
        );
    }

    #[test]
    fn hover_follows_tooltip_presence() {
        assert_eq!(
            action(&everything(), AnchorEvent::new(EventName::MouseEnter)),
            Action::Trigger(OverlayKind::Tooltip, Some(true))
        );
        assert_eq!(
            action(&everything(), AnchorEvent::new(EventName::MouseLeave)),
            Action::Trigger(OverlayKind::Tooltip, Some(false))
        );
        let none: AnchorConfig = AnchorConfig::new();
        assert_eq!(
            action(&none, AnchorEvent::new(EventName::MouseEnter)),
            Action::None
        );
    }

    #[test]
    fn touch_drives_long_press() {
        let config = everything();
        assert_eq!(
            action(&config, AnchorEvent::new(EventName::TouchStart)),
            Action::ArmLongPress
        );
        assert_eq!(
            action(&config, AnchorEvent::new(EventName::TouchMove)),
            Action::CancelLongPress
        );
        assert_eq!(
            action(&config, AnchorEvent::new(EventName::TouchEnd)),
            Action::CancelLongPress
        );
    }

    #[test]
    fn listeners_per_kind() {
        let config = everything();
        let names = |kind| -> Vec<EventName> {
            listeners(kind, &config).into_iter().map(|(n, _)| n).collect()
        };
        assert_eq!(names(OverlayKind::UserCard), [EventName::Click]);
        assert_eq!(
            names(OverlayKind::Tooltip),
            [EventName::MouseEnter, EventName::MouseLeave]
        );
        assert_eq!(
            names(OverlayKind::ContextMenu),
            [
                EventName::ContextMenu,
                EventName::TouchStart,
                EventName::TouchEnd,
                EventName::TouchMove
            ]
        );
        assert!(listeners(OverlayKind::UserCard, &AnchorConfig::<(), (), ()>::new()).is_empty());
        // Touch listeners never cancel, so they are passive.
        assert!(
            listeners(OverlayKind::ContextMenu, &config)
                .iter()
                .skip(1)
                .all(|(_, o)| o.passive)
        );
    }

    #[test]
    fn long_press_fires_once_at_deadline() {
        let mut lp = LongPress::new();
        lp.arm(Duration::from_millis(100), LONG_PRESS_DELAY);
        assert_eq!(lp.deadline(), Some(Duration::from_millis(600)));
        assert!(!lp.fire(Duration::from_millis(599)));
        assert!(lp.fire(Duration::from_millis(600)));
        assert!(!lp.fire(Duration::from_millis(700)));
        assert!(!lp.is_armed());
    }

    #[test]
    fn cancelled_long_press_never_fires() {
        let mut lp = LongPress::new();
        lp.arm(Duration::ZERO, LONG_PRESS_DELAY);
        lp.cancel();
        assert!(!lp.fire(Duration::from_secs(10)));
    }
}
