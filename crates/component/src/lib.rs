//! Savable components.
//!
//! A savable component is a pluggable, persisted object (a field type, a
//! widget type, ...) that takes part in a save/delete lifecycle:
//!
//! - [`SavableComponent::before_save`] / [`SavableComponent::before_delete`]
//!   publish on the component's event bus and report whether listeners allow
//!   the action.
//! - [`SavableComponent::after_save`] / [`SavableComponent::after_delete`]
//!   notify listeners once the action has been carried out.
//! - [`SavableComponent::settings`] reads the component's settings from the
//!   attribute list produced by `#[derive(Settings)]`.
//!
//! The [`persist`] module sequences the hooks around a [`Store`].

extern crate self as atelier_component;

mod component;
mod error;
mod id;
pub mod persist;
mod settings;
mod value;

pub use atelier_events::{
	EVENT_AFTER_DELETE, EVENT_AFTER_SAVE, EVENT_BEFORE_DELETE, EVENT_BEFORE_SAVE, EventBus,
	HookBus, HookError, HookResult, LifecycleEvent, Listener, ListenerId,
};
pub use atelier_macros::Settings;
pub use component::{ComponentState, SavableComponent};
pub use error::{SettingsError, ValueError};
pub use id::ComponentId;
pub use persist::{Outcome, PersistError, Store};
pub use settings::{Settings, SettingsMap};
pub use value::{FromSettingValue, SettingValue};

#[cfg(test)]
mod tests;
