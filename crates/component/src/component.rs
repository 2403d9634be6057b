//! The savable component contract.

use atelier_events::{
	EVENT_AFTER_DELETE, EVENT_AFTER_SAVE, EVENT_BEFORE_DELETE, EVENT_BEFORE_SAVE, EventBus,
	HookBus, HookError, HookResult, LifecycleEvent, ListenerId,
};
use tracing::debug;

use crate::{ComponentId, SettingValue, Settings, SettingsError, SettingsMap};

/// Lifecycle state shared by every savable component.
///
/// Concrete component types embed this (marked `#[settings(skip)]`) and hand
/// it out through [`SavableComponent::state`].
pub struct ComponentState {
	/// Persisted id, or a placeholder, or nothing for a fresh component.
	pub id: Option<ComponentId>,
	events: Box<dyn EventBus>,
}

impl ComponentState {
	/// Creates state for a new component with an in-process [`HookBus`].
	pub fn new() -> Self {
		Self::with_bus(HookBus::new())
	}

	/// Creates state with a custom event bus.
	pub fn with_bus(bus: impl EventBus + 'static) -> Self {
		Self {
			id: None,
			events: Box::new(bus),
		}
	}

	/// Sets the id, builder style.
	pub fn with_id(mut self, id: impl Into<ComponentId>) -> Self {
		self.id = Some(id.into());
		self
	}

	/// The component's event bus.
	pub fn events(&self) -> &dyn EventBus {
		self.events.as_ref()
	}

	/// Mutable access to the component's event bus.
	pub fn events_mut(&mut self) -> &mut dyn EventBus {
		self.events.as_mut()
	}
}

impl Default for ComponentState {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for ComponentState {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ComponentState")
			.field("id", &self.id)
			.finish_non_exhaustive()
	}
}

/// A pluggable, persisted component.
///
/// The persistence orchestrator drives the lifecycle: it calls a before-hook,
/// writes or deletes only when the hook returned `true`, then calls the
/// matching after-hook. See [`crate::persist`].
pub trait SavableComponent: Settings {
	/// Shared lifecycle state.
	fn state(&self) -> &ComponentState;

	/// Mutable shared lifecycle state.
	fn state_mut(&mut self) -> &mut ComponentState;

	/// Whether this component type may be offered in selection lists.
	fn is_selectable() -> bool {
		true
	}

	/// The component's id, if it has one.
	fn id(&self) -> Option<&ComponentId> {
		self.state().id.as_ref()
	}

	/// Returns true if the component has not been persisted yet.
	///
	/// A missing id and placeholder ids (see [`ComponentId::is_placeholder`])
	/// both count as new.
	fn is_new(&self) -> bool {
		self.id().is_none_or(ComponentId::is_placeholder)
	}

	/// Current settings, keyed by [`Settings::settings_attributes`] in order.
	///
	/// An attribute without a readable value maps to [`SettingValue::Null`].
	fn settings(&self) -> SettingsMap {
		Self::settings_attributes()
			.iter()
			.map(|&name| (name, self.setting(name).unwrap_or_default()))
			.collect()
	}

	/// Writes persisted settings back onto the component.
	///
	/// Stops at the first unknown name or ill-typed value.
	fn apply_settings<I, K>(&mut self, settings: I) -> Result<(), SettingsError>
	where
		I: IntoIterator<Item = (K, SettingValue)>,
		K: AsRef<str>,
	{
		for (name, value) in settings {
			self.set_setting(name.as_ref(), value)?;
		}
		Ok(())
	}

	/// Custom settings UI fragment; `None` means the type has none.
	fn settings_html(&self) -> Option<String> {
		None
	}

	/// Subscribes a listener to one of this component's lifecycle channels.
	fn on<F>(&mut self, channel: &str, listener: F) -> ListenerId
	where
		F: FnMut(&LifecycleEvent) -> Result<HookResult, HookError> + 'static,
	{
		self.state_mut()
			.events_mut()
			.subscribe(channel, Box::new(listener))
	}

	/// Asks listeners whether the component may be saved.
	///
	/// `is_new` is the caller's view and is passed to listeners as is.
	/// Returns `Ok(false)` when a listener vetoed; listener failures are
	/// returned unchanged.
	fn before_save(&mut self, is_new: bool) -> Result<bool, HookError> {
		let event = LifecycleEvent::save(is_new);
		let verdict = self
			.state_mut()
			.events_mut()
			.publish(EVENT_BEFORE_SAVE, &event)?;
		if verdict.is_cancel() {
			debug!(id = ?self.id(), is_new, "save vetoed");
		}
		Ok(!verdict.is_cancel())
	}

	/// Notifies listeners that the component was saved.
	fn after_save(&mut self, is_new: bool) -> Result<(), HookError> {
		let event = LifecycleEvent::save(is_new);
		self.state_mut()
			.events_mut()
			.publish(EVENT_AFTER_SAVE, &event)?;
		Ok(())
	}

	/// Asks listeners whether the component may be deleted.
	fn before_delete(&mut self) -> Result<bool, HookError> {
		let verdict = self
			.state_mut()
			.events_mut()
			.publish(EVENT_BEFORE_DELETE, &LifecycleEvent::bare())?;
		if verdict.is_cancel() {
			debug!(id = ?self.id(), "delete vetoed");
		}
		Ok(!verdict.is_cancel())
	}

	/// Notifies listeners that the component was deleted.
	fn after_delete(&mut self) -> Result<(), HookError> {
		self.state_mut()
			.events_mut()
			.publish(EVENT_AFTER_DELETE, &LifecycleEvent::bare())?;
		Ok(())
	}
}
