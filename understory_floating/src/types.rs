// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the controller: overlay kinds, events, outcomes, and visibility changes.
//!
//! ## Overview
//!
//! These types describe what flows between a host toolkit and the controller.
//! They are referenced by the [`router`](crate::router), the [`binding`](crate::binding)
//! and the [`registry`](crate::registry).

use alloc::borrow::Cow;
use core::time::Duration;

/// The kinds of floating overlay an anchor can show.
///
/// At most one kind is visible per anchor at any instant.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum OverlayKind {
    /// Profile card for the user the anchor represents. Toggled by click.
    UserCard,
    /// Hover bubble. Follows pointer presence.
    Tooltip,
    /// Context menu. Toggled by right click, shift click, or long press.
    ContextMenu,
}

impl OverlayKind {
    /// All kinds, in a fixed order.
    pub const ALL: [Self; 3] = [Self::UserCard, Self::Tooltip, Self::ContextMenu];

    /// The single-kind flag set for this kind.
    pub const fn flag(self) -> OverlayKinds {
        match self {
            Self::UserCard => OverlayKinds::USER_CARD,
            Self::Tooltip => OverlayKinds::TOOLTIP,
            Self::ContextMenu => OverlayKinds::CONTEXT_MENU,
        }
    }

    /// Whether the kind is toggled by explicit user action (as opposed to
    /// following pointer presence).
    pub const fn is_toggle(self) -> bool {
        !matches!(self, Self::Tooltip)
    }
}

bitflags::bitflags! {
    /// A set of [`OverlayKind`]s.
    ///
    /// Used both for the kinds a configuration enables and for the kinds
    /// whose listeners are currently installed on an anchor.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct OverlayKinds: u8 {
        /// [`OverlayKind::UserCard`].
        const USER_CARD    = 0b0000_0001;
        /// [`OverlayKind::Tooltip`].
        const TOOLTIP      = 0b0000_0010;
        /// [`OverlayKind::ContextMenu`].
        const CONTEXT_MENU = 0b0000_0100;
    }
}

impl OverlayKinds {
    /// Whether `kind` is in the set.
    pub const fn has(self, kind: OverlayKind) -> bool {
        self.contains(kind.flag())
    }
}

bitflags::bitflags! {
    /// Keyboard modifiers held while a pointer event fired.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift key.
        const SHIFT   = 0b0000_0001;
        /// Control key.
        const CONTROL = 0b0000_0010;
        /// Alt / Option key.
        const ALT     = 0b0000_0100;
        /// Meta / Command key.
        const META    = 0b0000_1000;
    }
}

/// Native event names the controller listens for on an anchor.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum EventName {
    /// `click`
    Click,
    /// `contextmenu`
    ContextMenu,
    /// `touchstart`
    TouchStart,
    /// `touchend`
    TouchEnd,
    /// `touchmove`
    TouchMove,
    /// `mouseenter`
    MouseEnter,
    /// `mouseleave`
    MouseLeave,
    /// Any other event name, used as an alternate context menu trigger.
    Custom(Cow<'static, str>),
}

impl EventName {
    /// Map a native event name to its variant; unknown names become [`EventName::Custom`].
    pub fn parse(name: &str) -> Self {
        match name {
            "click" => Self::Click,
            "contextmenu" => Self::ContextMenu,
            "touchstart" => Self::TouchStart,
            "touchend" => Self::TouchEnd,
            "touchmove" => Self::TouchMove,
            "mouseenter" => Self::MouseEnter,
            "mouseleave" => Self::MouseLeave,
            other => Self::Custom(Cow::Owned(other.into())),
        }
    }

    /// The native event name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Click => "click",
            Self::ContextMenu => "contextmenu",
            Self::TouchStart => "touchstart",
            Self::TouchEnd => "touchend",
            Self::TouchMove => "touchmove",
            Self::MouseEnter => "mouseenter",
            Self::MouseLeave => "mouseleave",
            Self::Custom(name) => name,
        }
    }
}

impl core::fmt::Display for EventName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options passed to the host when installing a listener.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ListenerOptions {
    /// The listener never cancels the event, so the host may scroll without waiting on it.
    pub passive: bool,
}

impl ListenerOptions {
    /// Options for a listener that may cancel the event.
    pub const ACTIVE: Self = Self { passive: false };
    /// Options for a listener that never cancels the event.
    pub const PASSIVE: Self = Self { passive: true };
}

/// An event delivered by the host for an anchor.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AnchorEvent {
    /// Native event name.
    pub name: EventName,
    /// Modifier keys held when the event fired.
    pub modifiers: Modifiers,
    /// Monotonic timestamp, measured from an origin chosen by the host.
    pub time: Duration,
}

impl AnchorEvent {
    /// An event with no modifiers at time zero.
    pub fn new(name: EventName) -> Self {
        Self {
            name,
            modifiers: Modifiers::empty(),
            time: Duration::ZERO,
        }
    }

    /// Set the held modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Set the timestamp.
    #[must_use]
    pub fn at(mut self, time: Duration) -> Self {
        self.time = time;
        self
    }
}

/// How the host should treat the native event once it has been routed.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// Let the event continue as usual.
    Continue,
    /// Prevent the default action and stop all further propagation,
    /// including other listeners on the same element.
    StopAndConsume,
}

/// A discrete change of an anchor's visibility slot.
///
/// A cross-kind transition is always reported as a [`Hidden`](Self::Hidden)
/// for the old kind followed by a [`Shown`](Self::Shown) for the new one.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum VisibilityEvent {
    /// The overlay of this kind became visible.
    Shown(OverlayKind),
    /// The overlay of this kind was hidden.
    Hidden(OverlayKind),
}

impl VisibilityEvent {
    /// The kind the change refers to.
    pub const fn kind(self) -> OverlayKind {
        match self {
            Self::Shown(kind) | Self::Hidden(kind) => kind,
        }
    }
}
