// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-slot visibility state machine.
//!
//! ## Semantics
//!
//! An anchor shows at most one overlay. [`Visibility`] holds that slot and
//! computes the [`VisibilityEvent`]s needed to move between states:
//!
//! - User cards and context menus toggle. Toggling a kind while another kind
//!   is visible hides the old one first, so observers always see a `Hidden`
//!   before the `Shown`.
//! - Tooltips are level-triggered. A show request only applies while nothing
//!   is visible (a tooltip never interrupts an explicit overlay), and a hide
//!   request only applies while the tooltip itself is visible.
//! - [`Visibility::hide`] clears the slot unconditionally.
//!
//! ## Minimal example
//!
//! ```
//! use understory_floating::types::{OverlayKind, OverlayKinds, VisibilityEvent};
//! use understory_floating::visibility::Visibility;
//!
//! let enabled = OverlayKinds::all();
//! let mut v = Visibility::new();
//! assert_eq!(
//!     v.trigger(OverlayKind::UserCard, None, enabled),
//!     vec![VisibilityEvent::Shown(OverlayKind::UserCard)]
//! );
//! assert_eq!(
//!     v.trigger(OverlayKind::ContextMenu, None, enabled),
//!     vec![
//!         VisibilityEvent::Hidden(OverlayKind::UserCard),
//!         VisibilityEvent::Shown(OverlayKind::ContextMenu),
//!     ]
//! );
//! ```

use alloc::vec::Vec;

use crate::types::{OverlayKind, OverlayKinds, VisibilityEvent};

/// The visibility slot of one anchor.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Visibility {
    current: Option<OverlayKind>,
}

impl Visibility {
    /// Create a hidden slot.
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// The visible kind, if any.
    pub const fn current(&self) -> Option<OverlayKind> {
        self.current
    }

    /// Whether nothing is visible.
    pub const fn is_hidden(&self) -> bool {
        self.current.is_none()
    }

    /// Request a transition for `kind` and return the resulting changes.
    ///
    /// `enabled` is the set of kinds the anchor's current configuration
    /// allows; requests for other kinds are ignored. `desired` only matters
    /// for [`OverlayKind::Tooltip`]: `Some(true)` shows, `Some(false)` hides,
    /// and `None` toggles within the same guards.
    pub fn trigger(
        &mut self,
        kind: OverlayKind,
        desired: Option<bool>,
        enabled: OverlayKinds,
    ) -> Vec<VisibilityEvent> {
        let mut out = Vec::new();
        if !enabled.has(kind) {
            return out;
        }

        if kind.is_toggle() {
            match self.current {
                Some(current) if current == kind => self.set(None, &mut out),
                None => self.set(Some(kind), &mut out),
                Some(_) => {
                    self.set(None, &mut out);
                    self.set(Some(kind), &mut out);
                }
            }
        } else {
            match self.current {
                Some(OverlayKind::Tooltip) if desired != Some(true) => self.set(None, &mut out),
                None if desired != Some(false) => self.set(Some(kind), &mut out),
                _ => {}
            }
        }
        out
    }

    /// Hide whatever is visible.
    pub fn hide(&mut self) -> Vec<VisibilityEvent> {
        let mut out = Vec::new();
        self.set(None, &mut out);
        out
    }

    fn set(&mut self, next: Option<OverlayKind>, out: &mut Vec<VisibilityEvent>) {
        if self.current == next {
            return;
        }
        if let Some(prev) = self.current.take() {
            tracing::trace!(kind = ?prev, "overlay hidden");
            out.push(VisibilityEvent::Hidden(prev));
        }
        if let Some(kind) = next {
            tracing::trace!(?kind, "overlay shown");
            out.push(VisibilityEvent::Shown(kind));
        }
        self.current = next;
    }
}
