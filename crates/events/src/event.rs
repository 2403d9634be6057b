//! Lifecycle payload and well-known channel names.

/// Published before a component is saved. Listeners may cancel.
pub const EVENT_BEFORE_SAVE: &str = "beforeSave";
/// Published after a component was saved.
pub const EVENT_AFTER_SAVE: &str = "afterSave";
/// Published before a component is deleted. Listeners may cancel.
pub const EVENT_BEFORE_DELETE: &str = "beforeDelete";
/// Published after a component was deleted.
pub const EVENT_AFTER_DELETE: &str = "afterDelete";

/// Single-use payload handed to listeners for one hook invocation.
///
/// The payload is immutable while listeners run; vetoes travel back through
/// the listener's return value instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LifecycleEvent {
	is_new: Option<bool>,
}

impl LifecycleEvent {
	/// Payload for the save channels, carrying the caller's view of whether
	/// this save creates the component.
	pub fn save(is_new: bool) -> Self {
		Self {
			is_new: Some(is_new),
		}
	}

	/// Payload without save information, used by the delete channels.
	pub fn bare() -> Self {
		Self::default()
	}

	/// `Some` on save events, `None` otherwise.
	#[inline]
	pub fn is_new(&self) -> Option<bool> {
		self.is_new
	}
}
