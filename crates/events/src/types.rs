//! Listener type definitions: HookResult, Listener, ListenerId.

use crate::{HookError, LifecycleEvent};

/// Answer returned by a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HookResult {
	/// Let the pending action go ahead.
	#[default]
	Continue,
	/// Veto the pending action (only meaningful on before-channels).
	Cancel,
}

impl HookResult {
	/// Returns true if this is [`HookResult::Cancel`].
	#[inline]
	pub fn is_cancel(self) -> bool {
		self == HookResult::Cancel
	}

	/// Folds another listener's answer into this verdict.
	///
	/// Cancel is sticky: once either side cancels the result stays cancelled.
	#[inline]
	pub fn merge(self, other: HookResult) -> HookResult {
		if self.is_cancel() || other.is_cancel() {
			HookResult::Cancel
		} else {
			HookResult::Continue
		}
	}
}

impl From<()> for HookResult {
	fn from(_: ()) -> Self {
		HookResult::Continue
	}
}

impl From<bool> for HookResult {
	/// `true` means "valid", i.e. continue.
	fn from(valid: bool) -> Self {
		if valid {
			HookResult::Continue
		} else {
			HookResult::Cancel
		}
	}
}

/// Boxed listener callback.
///
/// Listeners run on the publishing thread and must finish before the publish
/// call returns; there is no `Send` bound.
pub type Listener = Box<dyn FnMut(&LifecycleEvent) -> Result<HookResult, HookError>>;

/// Handle returned by [`crate::EventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub(crate) u64);

impl ListenerId {
	/// Creates an id from a raw counter value, for custom [`crate::EventBus`]
	/// implementations.
	#[inline]
	pub const fn new(raw: u64) -> Self {
		Self(raw)
	}

	/// Returns the underlying counter value.
	#[inline]
	pub fn as_u64(self) -> u64 {
		self.0
	}
}

impl std::fmt::Display for ListenerId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "ListenerId({})", self.0)
	}
}
