// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-anchor binding: configuration, visibility slot, listeners and long-press timer.
//!
//! ## Lifecycle
//!
//! 1) [`Binding::attach`] validates the configuration and installs the
//!    listeners each enabled kind needs through an [`AnchorHost`].
//! 2) The host forwards native events to [`Binding::handle`] and calls
//!    [`Binding::poll`] when [`Binding::next_deadline`] passes.
//! 3) Whenever the configuration is recomputed, the host passes it to
//!    [`Binding::reconfigure`], which swaps listeners for the kinds that changed.
//! 4) [`Binding::dispose`] cancels the long press, removes every listener and
//!    returns the anchor. It consumes the binding, so it runs exactly once.
//!
//! ## Example
//!
//! ```
//! use understory_floating::binding::Binding;
//! use understory_floating::config::AnchorConfig;
//! use understory_floating::host::NoHost;
//! use understory_floating::types::{AnchorEvent, EventName, OverlayKind};
//!
//! let mut host = NoHost;
//! let config: AnchorConfig<&str> = AnchorConfig::new().with_user_card("alice");
//! let mut binding = Binding::attach(1_u32, config, &mut host).unwrap();
//!
//! binding.handle(&AnchorEvent::new(EventName::Click));
//! assert_eq!(binding.visible(), Some(OverlayKind::UserCard));
//! binding.handle(&AnchorEvent::new(EventName::Click));
//! assert_eq!(binding.visible(), None);
//!
//! let anchor = binding.dispose(&mut host);
//! assert_eq!(anchor, 1);
//! ```

use alloc::string::String;
use alloc::vec::Vec;
use core::time::Duration;

use crate::config::{AnchorConfig, ConfigError, ContextMenuConfig, TooltipConfig, UserCardConfig};
use crate::host::AnchorHost;
use crate::router::{self, Action, LONG_PRESS_DELAY, LongPress};
use crate::types::{AnchorEvent, EventName, Outcome, OverlayKind, OverlayKinds, VisibilityEvent};
use crate::visibility::Visibility;

/// Result of [`Binding::handle`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Handled {
    /// How the host should treat the native event.
    pub outcome: Outcome,
    /// Visibility changes caused by the event, in order.
    pub transitions: Vec<VisibilityEvent>,
}

impl Handled {
    fn ignored() -> Self {
        Self {
            outcome: Outcome::Continue,
            transitions: Vec::new(),
        }
    }
}

/// Borrowed view of the configuration behind the visible overlay.
#[derive(Debug)]
pub enum Overlay<'a, U, M, C> {
    /// The user card is visible.
    UserCard(&'a UserCardConfig<U>),
    /// The tooltip is visible.
    Tooltip(&'a TooltipConfig<C>),
    /// The context menu is visible.
    ContextMenu(&'a ContextMenuConfig<M>),
}

/// Interaction state for one anchor.
///
/// See the [module docs](self) for the lifecycle.
#[must_use = "a binding must be disposed to remove its listeners"]
#[derive(Debug)]
pub struct Binding<A, U = (), M = (), C = ()> {
    anchor: A,
    config: AnchorConfig<U, M, C>,
    visibility: Visibility,
    // Listeners installed per kind, indexed like `OverlayKind::ALL`.
    listeners: [Vec<EventName>; 3],
    interactive: bool,
    label: Option<String>,
    long_press: LongPress,
    long_press_delay: Duration,
}

const fn slot(kind: OverlayKind) -> usize {
    match kind {
        OverlayKind::UserCard => 0,
        OverlayKind::Tooltip => 1,
        OverlayKind::ContextMenu => 2,
    }
}

impl<A, U, M, C> Binding<A, U, M, C> {
    /// Bind `config` to `anchor`, installing listeners through `host`.
    ///
    /// Fails without touching the host if the configuration is invalid.
    pub fn attach<H>(
        anchor: A,
        config: AnchorConfig<U, M, C>,
        host: &mut H,
    ) -> Result<Self, ConfigError>
    where
        H: AnchorHost<A> + ?Sized,
    {
        config.validate()?;
        let mut binding = Self {
            anchor,
            config,
            visibility: Visibility::new(),
            listeners: Default::default(),
            interactive: false,
            label: None,
            long_press: LongPress::new(),
            long_press_delay: LONG_PRESS_DELAY,
        };
        binding.sync(host);
        tracing::debug!(kinds = ?binding.config.kinds(), "anchor attached");
        Ok(binding)
    }

    /// The anchor handle.
    pub fn anchor(&self) -> &A {
        &self.anchor
    }

    /// The configuration events are currently routed against.
    pub fn config(&self) -> &AnchorConfig<U, M, C> {
        &self.config
    }

    /// The visible kind, if any.
    pub fn visible(&self) -> Option<OverlayKind> {
        self.visibility.current()
    }

    /// The configuration of the visible overlay, for the renderer.
    pub fn overlay(&self) -> Option<Overlay<'_, U, M, C>> {
        match self.visibility.current()? {
            OverlayKind::UserCard => self.config.user_card.as_ref().map(Overlay::UserCard),
            OverlayKind::Tooltip => self.config.tooltip.as_ref().map(Overlay::Tooltip),
            OverlayKind::ContextMenu => self.config.context_menu.as_ref().map(Overlay::ContextMenu),
        }
    }

    /// Kinds whose listeners are installed.
    pub fn listening(&self) -> OverlayKinds {
        let mut kinds = OverlayKinds::empty();
        for kind in OverlayKind::ALL {
            kinds.set(kind.flag(), !self.listeners[slot(kind)].is_empty());
        }
        kinds
    }

    /// Set how long a touch must be held to open the context menu.
    ///
    /// Applies to touches that start after the call.
    pub fn set_long_press_delay(&mut self, delay: Duration) {
        self.long_press_delay = delay;
    }

    /// Replace the configuration.
    ///
    /// For each kind whose listeners differ under the new configuration, the
    /// old listeners are removed before the new ones are added. If the visible
    /// kind is no longer enabled it is hidden, and disabling the context menu
    /// cancels a pending long press. On error nothing changes.
    pub fn reconfigure<H>(
        &mut self,
        config: AnchorConfig<U, M, C>,
        host: &mut H,
    ) -> Result<Vec<VisibilityEvent>, ConfigError>
    where
        H: AnchorHost<A> + ?Sized,
    {
        config.validate()?;
        self.config = config;
        self.sync(host);

        let enabled = self.config.kinds();
        if !enabled.has(OverlayKind::ContextMenu) {
            self.long_press.cancel();
        }
        let transitions = match self.visibility.current() {
            Some(kind) if !enabled.has(kind) => self.visibility.hide(),
            _ => Vec::new(),
        };
        tracing::debug!(kinds = ?enabled, hidden = !transitions.is_empty(), "anchor reconfigured");
        Ok(transitions)
    }

    /// Route a native event.
    ///
    /// Events without an installed listener are ignored, as are events for
    /// kinds the current configuration disables.
    pub fn handle(&mut self, event: &AnchorEvent) -> Handled {
        if !self.is_listening_for(&event.name) {
            tracing::trace!(event = %event.name, "no listener installed");
            return Handled::ignored();
        }
        let route = router::route(&self.config, event);
        let transitions = match route.action {
            Action::None => Vec::new(),
            Action::Trigger(kind, desired) => self.trigger(kind, desired),
            Action::ArmLongPress => {
                self.long_press.arm(event.time, self.long_press_delay);
                Vec::new()
            }
            Action::CancelLongPress => {
                self.long_press.cancel();
                Vec::new()
            }
        };
        Handled {
            outcome: route.outcome,
            transitions,
        }
    }

    /// Request a visibility transition (see [`Visibility::trigger`]).
    pub fn trigger(&mut self, kind: OverlayKind, desired: Option<bool>) -> Vec<VisibilityEvent> {
        self.visibility.trigger(kind, desired, self.config.kinds())
    }

    /// Hide whatever is visible, regardless of configuration.
    pub fn hide(&mut self) -> Vec<VisibilityEvent> {
        self.visibility.hide()
    }

    /// When the pending long press fires, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.long_press.deadline()
    }

    /// Fire the long press if it is due at `now`, opening the context menu.
    pub fn poll(&mut self, now: Duration) -> Vec<VisibilityEvent> {
        if self.long_press.fire(now) {
            tracing::trace!("long press");
            self.trigger(OverlayKind::ContextMenu, None)
        } else {
            Vec::new()
        }
    }

    /// Tear down and return the anchor.
    pub fn dispose<H>(mut self, host: &mut H) -> A
    where
        H: AnchorHost<A> + ?Sized,
    {
        self.teardown(host);
        self.anchor
    }

    /// Give up the anchor of a binding that was already torn down.
    pub(crate) fn into_anchor(self) -> A {
        self.anchor
    }

    /// Cancel the long press, then remove every listener and affordance.
    pub(crate) fn teardown<H>(&mut self, host: &mut H)
    where
        H: AnchorHost<A> + ?Sized,
    {
        self.long_press.cancel();
        for kind in OverlayKind::ALL {
            self.uninstall(kind, host);
        }
        if self.interactive {
            host.set_interactive(&self.anchor, false);
            self.interactive = false;
        }
        if self.label.take().is_some() {
            host.set_accessible_label(&self.anchor, None);
        }
        tracing::debug!("anchor detached");
    }

    /// Bring listeners and affordances in line with the current configuration.
    fn sync<H>(&mut self, host: &mut H)
    where
        H: AnchorHost<A> + ?Sized,
    {
        for kind in OverlayKind::ALL {
            let wanted = router::listeners(kind, &self.config);
            let unchanged = wanted.len() == self.listeners[slot(kind)].len()
                && wanted
                    .iter()
                    .zip(&self.listeners[slot(kind)])
                    .all(|((name, _), installed)| name == installed);
            if unchanged {
                continue;
            }
            self.uninstall(kind, host);
            for (name, options) in wanted {
                if !self.is_listening_for(&name) {
                    host.add_listener(&self.anchor, &name, options);
                }
                self.listeners[slot(kind)].push(name);
            }
            tracing::debug!(
                ?kind,
                listeners = self.listeners[slot(kind)].len(),
                "listeners installed"
            );
        }

        let interactive = self.config.user_card.is_some();
        if interactive != self.interactive {
            host.set_interactive(&self.anchor, interactive);
            self.interactive = interactive;
        }

        let label = self.config.accessible_label();
        if label != self.label.as_deref() {
            host.set_accessible_label(&self.anchor, label);
            self.label = label.map(String::from);
        }
    }

    /// Drop the listeners of `kind`. A native listener shared with another
    /// kind (a context menu trigger reusing `click`, say) stays installed
    /// until its last user goes away.
    fn uninstall<H>(&mut self, kind: OverlayKind, host: &mut H)
    where
        H: AnchorHost<A> + ?Sized,
    {
        let names = core::mem::take(&mut self.listeners[slot(kind)]);
        for (i, name) in names.iter().enumerate() {
            if !names[i + 1..].contains(name) && !self.is_listening_for(name) {
                host.remove_listener(&self.anchor, name);
            }
        }
    }

    fn is_listening_for(&self, name: &EventName) -> bool {
        self.listeners.iter().flatten().any(|n| n == name)
    }
}
