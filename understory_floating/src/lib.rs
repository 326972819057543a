// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Floating: a deterministic, `no_std` controller for anchored floating overlays.
//!
//! ## Overview
//!
//! Chat clients hang three kinds of floating overlay off ordinary elements:
//! a user card opened by clicking a name or avatar, a tooltip shown while the
//! pointer rests on a button, and a context menu opened by right click, shift
//! click or a long press. This crate decides which of them is visible for each
//! anchor. It does not render overlays or perform hit testing.
//!
//! ## Model
//!
//! - An anchor shows at most one overlay at a time. See [`visibility`].
//! - User cards and context menus toggle; tooltips follow pointer presence and
//!   never interrupt the other two.
//! - Switching from one overlay to another is always reported as a hide
//!   followed by a show, so renderers can run exit animations.
//! - What an anchor may show is described by an [`AnchorConfig`](config::AnchorConfig).
//!   Kinds missing from the configuration are disabled, and events for them
//!   are ignored even when they arrive late.
//!
//! ## Workflow
//!
//! 1) Implement [`AnchorHost`](host::AnchorHost) for your toolkit so the
//!    controller can install listeners and set affordances on an anchor.
//! 2) Attach each anchor through a [`Registry`](registry::Registry) (or a
//!    standalone [`Binding`](binding::Binding)). The registry is an ordinary
//!    value owned by your application; there is no global state.
//! 3) Forward native events with [`Registry::handle`](registry::Registry::handle)
//!    and honor the returned [`Outcome`](types::Outcome). Render the overlays
//!    reported by the returned [`VisibilityEvent`](types::VisibilityEvent)s, or
//!    query [`Binding::overlay`](binding::Binding::overlay).
//! 4) When [`Registry::next_deadline`](registry::Registry::next_deadline)
//!    passes, call [`Registry::poll`](registry::Registry::poll) to fire long presses.
//! 5) When the configuration of an anchor changes, pass the new value to
//!    [`Binding::reconfigure`](binding::Binding::reconfigure); when the anchor
//!    unmounts, [`Registry::detach`](registry::Registry::detach) it.
//!
//! Time is always supplied by the caller, so behavior is reproducible in tests.
//!
//! ## Example
//!
//! ```
//! use core::time::Duration;
//! use understory_floating::config::{AnchorConfig, ContextMenuConfig, TooltipConfig};
//! use understory_floating::host::NoHost;
//! use understory_floating::registry::Registry;
//! use understory_floating::types::{AnchorEvent, EventName, OverlayKind, Outcome, VisibilityEvent};
//!
//! let mut host = NoHost;
//! let mut overlays: Registry<u32, (), &str> = Registry::new();
//! let avatar = overlays
//!     .attach(
//!         7,
//!         AnchorConfig::new()
//!             .with_tooltip(TooltipConfig::text("alice"))
//!             .with_context_menu(ContextMenuConfig::new("member-menu")),
//!         &mut host,
//!     )
//!     .unwrap();
//!
//! // Hover shows the tooltip.
//! let hover = overlays.handle(avatar, &AnchorEvent::new(EventName::MouseEnter)).unwrap();
//! assert_eq!(hover.transitions, [VisibilityEvent::Shown(OverlayKind::Tooltip)]);
//!
//! // Right click replaces it with the context menu and consumes the native event.
//! let menu = overlays.handle(avatar, &AnchorEvent::new(EventName::ContextMenu)).unwrap();
//! assert_eq!(menu.outcome, Outcome::StopAndConsume);
//! assert_eq!(
//!     menu.transitions,
//!     [
//!         VisibilityEvent::Hidden(OverlayKind::Tooltip),
//!         VisibilityEvent::Shown(OverlayKind::ContextMenu),
//!     ]
//! );
//!
//! // Nothing is waiting on a timer.
//! assert_eq!(overlays.next_deadline(), None::<Duration>);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` in Kurbo, `tracing` and `thiserror`.
//! - `libm`: Kurbo's `no_std` math backend, for builds without `std`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod binding;
pub mod config;
pub mod host;
pub mod placement;
pub mod registry;
pub mod router;
pub mod types;
pub mod visibility;
