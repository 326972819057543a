// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The seam between the controller and a UI toolkit.
//!
//! A [`Binding`](crate::binding::Binding) never touches elements directly.
//! It asks an [`AnchorHost`] to install and remove native listeners and to
//! update the anchor's affordances. A web toolkit implements this with
//! `addEventListener` and style/attribute writes; a retained-mode toolkit can
//! record the wanted events on its widget; tests record the calls.

use crate::types::{EventName, ListenerOptions};

/// Toolkit operations on an anchor of type `A`.
///
/// The anchor is a cheap handle (an element reference or a widget id); the
/// toolkit owns the element itself.
pub trait AnchorHost<A> {
    /// Start delivering `event` for `anchor`.
    fn add_listener(&mut self, anchor: &A, event: &EventName, options: ListenerOptions);

    /// Stop delivering `event` for `anchor`.
    fn remove_listener(&mut self, anchor: &A, event: &EventName);

    /// Mark the anchor as clickable: pointer cursor, no text selection.
    fn set_interactive(&mut self, anchor: &A, interactive: bool) {
        let _ = (anchor, interactive);
    }

    /// Set or clear the anchor's accessible label.
    fn set_accessible_label(&mut self, anchor: &A, label: Option<&str>) {
        let _ = (anchor, label);
    }
}

/// A host that ignores every request.
///
/// Useful when events are delivered unconditionally, for example in headless
/// tests, and nothing needs to be installed.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoHost;

impl<A> AnchorHost<A> for NoHost {
    #[inline]
    fn add_listener(&mut self, _anchor: &A, _event: &EventName, _options: ListenerOptions) {}

    #[inline]
    fn remove_listener(&mut self, _anchor: &A, _event: &EventName) {}
}
