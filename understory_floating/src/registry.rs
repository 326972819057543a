// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registry of active bindings.
//!
//! ## Overview
//!
//! A [`Registry`] is an explicit collection owned by the application (or by a
//! view tree) and passed to whoever attaches and detaches anchors. Routing an
//! event does not need it; it exists so that collaborators can enumerate the
//! live bindings, for example to hide every overlay on navigation.
//!
//! Bindings live in generational slots addressed by [`AnchorId`].
//!
//! ```
//! use understory_floating::config::{AnchorConfig, TooltipConfig};
//! use understory_floating::host::NoHost;
//! use understory_floating::registry::Registry;
//! use understory_floating::types::{AnchorEvent, EventName, OverlayKind};
//!
//! let mut host = NoHost;
//! let mut registry: Registry<&str> = Registry::new();
//! let mute = registry
//!     .attach("mute-button", AnchorConfig::new().with_tooltip(TooltipConfig::text("Mute")), &mut host)
//!     .unwrap();
//!
//! registry.handle(mute, &AnchorEvent::new(EventName::MouseEnter));
//! assert_eq!(registry.visible().collect::<Vec<_>>(), [(mute, OverlayKind::Tooltip)]);
//!
//! // Route change: close everything.
//! let closed = registry.hide_all();
//! assert_eq!(closed.len(), 1);
//! assert_eq!(registry.detach(mute, &mut host), Some("mute-button"));
//! assert!(registry.is_empty());
//! ```

use alloc::vec::Vec;
use core::time::Duration;

use crate::binding::{Binding, Handled};
use crate::config::{AnchorConfig, ConfigError};
use crate::host::AnchorHost;
use crate::router::LONG_PRESS_DELAY;
use crate::types::{AnchorEvent, OverlayKind, VisibilityEvent};

/// Identifier for a binding in a [`Registry`].
///
/// A slot index plus a generation counter. When a binding is detached its slot
/// may be reused, but the generation is bumped, so a stale `AnchorId` never
/// refers to a newer binding.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct AnchorId(u32, u32);

impl AnchorId {
    const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// The live bindings of an application or view tree.
#[derive(Debug)]
pub struct Registry<A, U = (), M = (), C = ()> {
    slots: Vec<Option<Binding<A, U, M, C>>>,
    generations: Vec<u32>, // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    long_press_delay: Duration,
}

impl<A, U, M, C> Default for Registry<A, U, M, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, U, M, C> Registry<A, U, M, C> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            long_press_delay: LONG_PRESS_DELAY,
        }
    }

    /// Set the long-press delay for bindings attached from now on.
    pub fn set_long_press_delay(&mut self, delay: Duration) {
        self.long_press_delay = delay;
    }

    /// Attach `config` to `anchor` and register the binding.
    pub fn attach<H>(
        &mut self,
        anchor: A,
        config: AnchorConfig<U, M, C>,
        host: &mut H,
    ) -> Result<AnchorId, ConfigError>
    where
        H: AnchorHost<A> + ?Sized,
    {
        let mut binding = Binding::attach(anchor, config, host)?;
        binding.set_long_press_delay(self.long_press_delay);
        Ok(self.insert(binding))
    }

    /// Register an already attached binding.
    pub fn insert(&mut self, binding: Binding<A, U, M, C>) -> AnchorId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.slots[idx] = Some(binding);
            (idx, generation)
        } else {
            self.slots.push(Some(binding));
            self.generations.push(1);
            (self.slots.len() - 1, 1)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "AnchorId stores 32-bit slot indices."
        )]
        let id = AnchorId::new(idx as u32, generation);
        tracing::trace!(?id, live = self.len(), "binding registered");
        id
    }

    /// Tear down and unregister a binding, returning its anchor.
    ///
    /// The long press is cancelled and every listener removed before the
    /// binding leaves the registry. Stale ids are ignored.
    pub fn detach<H>(&mut self, id: AnchorId, host: &mut H) -> Option<A>
    where
        H: AnchorHost<A> + ?Sized,
    {
        let binding = self.get_mut(id)?;
        binding.teardown(host);
        debug_assert!(
            binding.next_deadline().is_none(),
            "long press still pending after teardown"
        );
        self.remove(id).map(Binding::into_anchor)
    }

    /// Unregister a binding without tearing it down.
    ///
    /// The caller becomes responsible for [`Binding::dispose`].
    pub fn remove(&mut self, id: AnchorId) -> Option<Binding<A, U, M, C>> {
        if !self.is_alive(id) {
            return None;
        }
        self.free_list.push(id.idx());
        self.slots[id.idx()].take()
    }

    /// Whether `id` refers to a registered binding.
    pub fn is_alive(&self, id: AnchorId) -> bool {
        self.generations.get(id.idx()) == Some(&id.1)
            && self.slots.get(id.idx()).is_some_and(Option::is_some)
    }

    /// The binding for `id`.
    pub fn get(&self, id: AnchorId) -> Option<&Binding<A, U, M, C>> {
        if !self.is_alive(id) {
            return None;
        }
        self.slots[id.idx()].as_ref()
    }

    /// The binding for `id`, mutably.
    pub fn get_mut(&mut self, id: AnchorId) -> Option<&mut Binding<A, U, M, C>> {
        if !self.is_alive(id) {
            return None;
        }
        self.slots[id.idx()].as_mut()
    }

    /// Find the binding registered for `anchor`.
    pub fn find(&self, anchor: &A) -> Option<AnchorId>
    where
        A: PartialEq,
    {
        self.iter()
            .find(|(_, binding)| binding.anchor() == anchor)
            .map(|(id, _)| id)
    }

    /// Number of registered bindings.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }

    /// Whether no binding is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All registered bindings.
    pub fn iter(&self) -> impl Iterator<Item = (AnchorId, &Binding<A, U, M, C>)> + '_ {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "AnchorId stores 32-bit slot indices."
            )]
            let id = AnchorId::new(idx as u32, self.generations[idx]);
            slot.as_ref().map(|binding| (id, binding))
        })
    }

    /// Anchors with a visible overlay, and what they show.
    pub fn visible(&self) -> impl Iterator<Item = (AnchorId, OverlayKind)> + '_ {
        self.iter()
            .filter_map(|(id, binding)| binding.visible().map(|kind| (id, kind)))
    }

    /// Route a native event to the binding for `id`.
    pub fn handle(&mut self, id: AnchorId, event: &AnchorEvent) -> Option<Handled> {
        Some(self.get_mut(id)?.handle(event))
    }

    /// Hide every visible overlay.
    pub fn hide_all(&mut self) -> Vec<(AnchorId, VisibilityEvent)> {
        self.for_each_binding(Binding::hide)
    }

    /// Fire every long press due at `now`.
    pub fn poll(&mut self, now: Duration) -> Vec<(AnchorId, VisibilityEvent)> {
        self.for_each_binding(|binding| binding.poll(now))
    }

    /// The earliest pending long-press deadline.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.iter()
            .filter_map(|(_, binding)| binding.next_deadline())
            .min()
    }

    fn for_each_binding(
        &mut self,
        mut f: impl FnMut(&mut Binding<A, U, M, C>) -> Vec<VisibilityEvent>,
    ) -> Vec<(AnchorId, VisibilityEvent)> {
        let mut out = Vec::new();
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            let Some(binding) = slot else {
                continue;
            };
            #[allow(
                clippy::cast_possible_truncation,
                reason = "AnchorId stores 32-bit slot indices."
            )]
            let id = AnchorId::new(idx as u32, self.generations[idx]);
            out.extend(f(binding).into_iter().map(|event| (id, event)));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ContextMenuConfig, TooltipConfig};
    use crate::host::recording::RecordingHost;
    use crate::types::EventName;
    use alloc::vec;

    use OverlayKind::{ContextMenu, Tooltip, UserCard};
    use VisibilityEvent::{Hidden, Shown};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn menu() -> AnchorConfig {
        AnchorConfig::new().with_context_menu(ContextMenuConfig::new(()))
    }

    #[test]
    fn attach_detach_roundtrip() {
        let mut host = RecordingHost::default();
        let mut reg: Registry<u32> = Registry::new();
        let a = reg.attach(1, menu(), &mut host).unwrap();
        let b = reg
            .attach(2, AnchorConfig::new().with_user_card(()), &mut host)
            .unwrap();
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.find(&2), Some(b));

        assert_eq!(reg.detach(a, &mut host), Some(1));
        assert!(host.installed(1).is_empty());
        assert!(!reg.is_alive(a));
        assert_eq!(reg.find(&1), None);
        assert_eq!(reg.len(), 1);

        // Double detach is a no-op.
        assert_eq!(reg.detach(a, &mut host), None);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn stale_id_does_not_alias_reused_slot() {
        let mut host = RecordingHost::default();
        let mut reg: Registry<u32> = Registry::new();
        let old = reg.attach(1, menu(), &mut host).unwrap();
        let _ = reg.detach(old, &mut host);
        let new = reg.attach(2, menu(), &mut host).unwrap();
        assert_ne!(old, new);
        assert!(reg.get(old).is_none());
        assert!(reg.handle(old, &AnchorEvent::new(EventName::ContextMenu)).is_none());
        assert_eq!(reg.get(new).map(|b| *b.anchor()), Some(2));
    }

    #[test]
    fn hide_all_reports_each_anchor() {
        let mut host = RecordingHost::default();
        let mut reg: Registry<u32> = Registry::new();
        let card = reg
            .attach(1, AnchorConfig::new().with_user_card(()), &mut host)
            .unwrap();
        let tip = reg
            .attach(
                2,
                AnchorConfig::new().with_tooltip(TooltipConfig::text("Hi")),
                &mut host,
            )
            .unwrap();
        let idle = reg.attach(3, menu(), &mut host).unwrap();

        let _ = reg.handle(card, &AnchorEvent::new(EventName::Click));
        let _ = reg.handle(tip, &AnchorEvent::new(EventName::MouseEnter));
        assert_eq!(reg.visible().count(), 2);

        assert_eq!(
            reg.hide_all(),
            vec![(card, Hidden(UserCard)), (tip, Hidden(Tooltip))]
        );
        assert_eq!(reg.visible().count(), 0);
        assert!(reg.get(idle).is_some_and(|b| b.visible().is_none()));
    }

    #[test]
    fn poll_fires_due_long_presses() {
        let mut host = RecordingHost::default();
        let mut reg: Registry<u32> = Registry::new();
        let a = reg.attach(1, menu(), &mut host).unwrap();
        let b = reg.attach(2, menu(), &mut host).unwrap();

        let _ = reg.handle(a, &AnchorEvent::new(EventName::TouchStart).at(ms(0)));
        let _ = reg.handle(b, &AnchorEvent::new(EventName::TouchStart).at(ms(200)));
        assert_eq!(reg.next_deadline(), Some(ms(500)));

        assert_eq!(reg.poll(ms(500)), vec![(a, Shown(ContextMenu))]);
        assert_eq!(reg.next_deadline(), Some(ms(700)));
        assert_eq!(reg.poll(ms(700)), vec![(b, Shown(ContextMenu))]);
        assert_eq!(reg.next_deadline(), None);
    }

    #[test]
    fn detach_cancels_pending_long_press() {
        let mut host = RecordingHost::default();
        let mut reg: Registry<u32> = Registry::new();
        let a = reg.attach(1, menu(), &mut host).unwrap();
        let _ = reg.handle(a, &AnchorEvent::new(EventName::TouchStart).at(ms(0)));
        assert_eq!(reg.next_deadline(), Some(ms(500)));

        let _ = reg.detach(a, &mut host);
        assert_eq!(reg.next_deadline(), None);
        assert!(reg.poll(ms(1_000)).is_empty());
        assert_eq!(reg.iter().count(), 0);
    }

    #[test]
    fn long_press_delay_applies_to_new_bindings() {
        let mut host = RecordingHost::default();
        let mut reg: Registry<u32> = Registry::new();
        reg.set_long_press_delay(ms(800));
        let a = reg.attach(1, menu(), &mut host).unwrap();
        let _ = reg.handle(a, &AnchorEvent::new(EventName::TouchStart).at(ms(100)));
        assert_eq!(reg.next_deadline(), Some(ms(900)));
    }

    #[test]
    fn remove_hands_back_live_binding() {
        let mut host = RecordingHost::default();
        let mut reg: Registry<u32> = Registry::new();
        let a = reg.attach(1, menu(), &mut host).unwrap();
        let binding = reg.remove(a).unwrap();
        assert!(reg.is_empty());
        // Listeners are still installed until the caller disposes.
        assert_eq!(host.installed(1).len(), 4);
        assert_eq!(binding.dispose(&mut host), 1);
        assert!(host.installed(1).is_empty());
    }
}
