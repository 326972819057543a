// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-anchor configuration: which overlay kinds are enabled and their payloads.
//!
//! An [`AnchorConfig`] is a plain value. Toolkits that compute it reactively
//! hand each new value to [`Binding::reconfigure`](crate::binding::Binding::reconfigure);
//! the binding always routes events against the most recent one.
//!
//! The payload types are opaque to the controller:
//! - `U` is the user card payload (for example a user and member handle),
//! - `M` is whatever the renderer needs to build the context menu,
//! - `C` is rich tooltip content.
//!
//! ```
//! use understory_floating::config::{AnchorConfig, ContextMenuConfig, TooltipConfig};
//! use understory_floating::types::OverlayKinds;
//!
//! let config: AnchorConfig<(), &str> = AnchorConfig::new()
//!     .with_tooltip(TooltipConfig::text("Mute"))
//!     .with_context_menu(ContextMenuConfig::new("voice-menu"));
//! assert_eq!(config.kinds(), OverlayKinds::TOOLTIP | OverlayKinds::CONTEXT_MENU);
//! assert!(config.validate().is_ok());
//! ```

use alloc::string::String;

use crate::placement::Placement;
use crate::types::{EventName, OverlayKinds};

/// Errors raised when a configuration cannot be bound.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A tooltip with rich content has no accessible label to put on the anchor.
    #[error("tooltip with rich content requires an accessible label")]
    MissingAccessibleLabel,
    /// A context menu was given an empty trigger event name.
    #[error("context menu trigger event name is empty")]
    EmptyTrigger,
    /// A placement name did not match any known side and alignment.
    #[error("unknown placement `{0}`")]
    UnknownPlacement(String),
}

/// Configuration for the user card overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct UserCardConfig<U> {
    /// Data the renderer needs to build the card.
    pub payload: U,
}

/// Tooltip content.
#[derive(Clone, Debug, PartialEq)]
pub enum TooltipContent<C> {
    /// Plain text, also used as the anchor's accessible label.
    Text(String),
    /// Rich content with a separately supplied accessible label.
    Rich {
        /// Renderable content.
        content: C,
        /// Accessible label for the anchor. Required.
        aria_label: Option<String>,
    },
}

/// Configuration for the tooltip overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipConfig<C> {
    /// Preferred placement relative to the anchor.
    pub placement: Placement,
    /// What the tooltip shows.
    pub content: TooltipContent<C>,
}

impl<C> TooltipConfig<C> {
    /// A plain text tooltip with the default placement.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            placement: Placement::default(),
            content: TooltipContent::Text(text.into()),
        }
    }

    /// A rich tooltip with the default placement.
    pub fn rich(content: C, aria_label: impl Into<String>) -> Self {
        Self {
            placement: Placement::default(),
            content: TooltipContent::Rich {
                content,
                aria_label: Some(aria_label.into()),
            },
        }
    }

    /// Set the placement.
    #[must_use]
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// The label the anchor should expose to assistive technology.
    pub fn accessible_label(&self) -> Result<&str, ConfigError> {
        match &self.content {
            TooltipContent::Text(text) => Ok(text),
            TooltipContent::Rich {
                aria_label: Some(label),
                ..
            } => Ok(label),
            TooltipContent::Rich {
                aria_label: None, ..
            } => Err(ConfigError::MissingAccessibleLabel),
        }
    }
}

/// Configuration for the context menu overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct ContextMenuConfig<M> {
    /// Data the renderer needs to build the menu.
    pub menu: M,
    /// Native event that opens the menu; `None` means `contextmenu`.
    pub trigger: Option<String>,
}

impl<M> ContextMenuConfig<M> {
    /// A menu opened by the native `contextmenu` event.
    pub fn new(menu: M) -> Self {
        Self {
            menu,
            trigger: None,
        }
    }

    /// Open the menu on a different native event.
    #[must_use]
    pub fn with_trigger(mut self, event: impl Into<String>) -> Self {
        self.trigger = Some(event.into());
        self
    }

    /// The event the menu listens for.
    pub fn trigger_event(&self) -> EventName {
        match &self.trigger {
            Some(name) => EventName::parse(name),
            None => EventName::ContextMenu,
        }
    }
}

/// Everything a single anchor can show.
///
/// A missing section disables that kind for the anchor.
#[derive(Clone, Debug, PartialEq)]
pub struct AnchorConfig<U = (), M = (), C = ()> {
    /// User card, opened by click.
    pub user_card: Option<UserCardConfig<U>>,
    /// Tooltip, shown while the pointer is over the anchor.
    pub tooltip: Option<TooltipConfig<C>>,
    /// Context menu, opened by right click, shift click or long press.
    pub context_menu: Option<ContextMenuConfig<M>>,
}

impl<U, M, C> Default for AnchorConfig<U, M, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U, M, C> AnchorConfig<U, M, C> {
    /// A configuration with every kind disabled.
    pub fn new() -> Self {
        Self {
            user_card: None,
            tooltip: None,
            context_menu: None,
        }
    }

    /// Enable the user card.
    #[must_use]
    pub fn with_user_card(mut self, payload: U) -> Self {
        self.user_card = Some(UserCardConfig { payload });
        self
    }

    /// Enable the tooltip.
    #[must_use]
    pub fn with_tooltip(mut self, tooltip: TooltipConfig<C>) -> Self {
        self.tooltip = Some(tooltip);
        self
    }

    /// Enable the context menu.
    #[must_use]
    pub fn with_context_menu(mut self, menu: ContextMenuConfig<M>) -> Self {
        self.context_menu = Some(menu);
        self
    }

    /// The kinds this configuration enables.
    pub fn kinds(&self) -> OverlayKinds {
        let mut kinds = OverlayKinds::empty();
        kinds.set(OverlayKinds::USER_CARD, self.user_card.is_some());
        kinds.set(OverlayKinds::TOOLTIP, self.tooltip.is_some());
        kinds.set(OverlayKinds::CONTEXT_MENU, self.context_menu.is_some());
        kinds
    }

    /// Check that the configuration can be bound to an anchor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(tooltip) = &self.tooltip {
            tooltip.accessible_label()?;
        }
        if let Some(menu) = &self.context_menu
            && menu.trigger.as_deref().is_some_and(str::is_empty)
        {
            return Err(ConfigError::EmptyTrigger);
        }
        Ok(())
    }

    /// The accessible label the anchor should carry, if a tooltip is enabled.
    pub(crate) fn accessible_label(&self) -> Option<&str> {
        self.tooltip
            .as_ref()
            .and_then(|tooltip| tooltip.accessible_label().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_enables_nothing() {
        let config: AnchorConfig = AnchorConfig::new();
        assert!(config.kinds().is_empty());
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn rich_tooltip_without_label_is_rejected() {
        let config: AnchorConfig<(), (), u8> = AnchorConfig::new().with_tooltip(TooltipConfig {
            placement: Placement::default(),
            content: TooltipContent::Rich {
                content: 7,
                aria_label: None,
            },
        });
        assert_eq!(config.validate(), Err(ConfigError::MissingAccessibleLabel));
    }

    #[test]
    fn accessible_label_prefers_text_then_aria() {
        let text: TooltipConfig<()> = TooltipConfig::text("Deafen");
        assert_eq!(text.accessible_label(), Ok("Deafen"));
        let rich = TooltipConfig::rich(42_u32, "Connection quality");
        assert_eq!(rich.accessible_label(), Ok("Connection quality"));
    }

    #[test]
    fn context_menu_trigger_defaults_to_contextmenu() {
        let menu = ContextMenuConfig::new(());
        assert_eq!(menu.trigger_event(), EventName::ContextMenu);
        let menu = menu.with_trigger("auxclick");
        assert_eq!(menu.trigger_event().as_str(), "auxclick");
        let menu = ContextMenuConfig::new(()).with_trigger("click");
        assert_eq!(menu.trigger_event(), EventName::Click);
    }

    #[test]
    fn empty_trigger_is_rejected() {
        let config: AnchorConfig =
            AnchorConfig::new().with_context_menu(ContextMenuConfig::new(()).with_trigger(""));
        assert_eq!(config.validate(), Err(ConfigError::EmptyTrigger));
    }
}
