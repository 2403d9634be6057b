//! Event bus capability and the in-process [`HookBus`].

use rustc_hash::FxHashMap as HashMap;
use tracing::{debug, trace};

use crate::{HookError, HookResult, LifecycleEvent, Listener, ListenerId};

/// Publish/subscribe capability a component depends on.
///
/// Implementations must run every listener of a channel synchronously, in
/// subscription order, before [`EventBus::publish`] returns. The returned
/// verdict is [`HookResult::Cancel`] if any listener cancelled; listeners
/// after a cancel still run.
pub trait EventBus {
	/// Registers a listener on a channel.
	fn subscribe(&mut self, channel: &str, listener: Listener) -> ListenerId;

	/// Removes a listener. Returns false if it was not subscribed.
	fn unsubscribe(&mut self, channel: &str, id: ListenerId) -> bool;

	/// Publishes an event and returns the folded verdict.
	///
	/// The first listener error is returned unchanged and ends the dispatch.
	fn publish(&mut self, channel: &str, event: &LifecycleEvent) -> Result<HookResult, HookError>;

	/// Returns true if at least one listener is subscribed to `channel`.
	fn has_listeners(&self, channel: &str) -> bool;
}

struct Subscriber {
	id: ListenerId,
	handler: Listener,
}

/// Default [`EventBus`] keeping listeners per channel in registration order.
#[derive(Default)]
pub struct HookBus {
	channels: HashMap<Box<str>, Vec<Subscriber>>,
	next_id: u64,
}

impl HookBus {
	/// Creates an empty bus.
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of listeners subscribed to `channel`.
	pub fn listener_count(&self, channel: &str) -> usize {
		self.channels.get(channel).map_or(0, Vec::len)
	}
}

impl std::fmt::Debug for HookBus {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let mut map = f.debug_map();
		for (channel, subs) in &self.channels {
			map.entry(channel, &subs.len());
		}
		map.finish()
	}
}

impl EventBus for HookBus {
	fn subscribe(&mut self, channel: &str, listener: Listener) -> ListenerId {
		let id = ListenerId(self.next_id);
		self.next_id += 1;
		self.channels
			.entry(Box::from(channel))
			.or_default()
			.push(Subscriber {
				id,
				handler: listener,
			});
		trace!(channel, %id, "listener subscribed");
		id
	}

	fn unsubscribe(&mut self, channel: &str, id: ListenerId) -> bool {
		let Some(subs) = self.channels.get_mut(channel) else {
			return false;
		};
		let before = subs.len();
		subs.retain(|s| s.id != id);
		subs.len() != before
	}

	fn publish(&mut self, channel: &str, event: &LifecycleEvent) -> Result<HookResult, HookError> {
		let Some(subs) = self.channels.get_mut(channel) else {
			return Ok(HookResult::Continue);
		};

		let mut verdict = HookResult::Continue;
		for sub in subs.iter_mut() {
			let result = (sub.handler)(event)?;
			if result.is_cancel() && !verdict.is_cancel() {
				debug!(channel, listener = %sub.id, "listener vetoed event");
			}
			verdict = verdict.merge(result);
		}
		Ok(verdict)
	}

	fn has_listeners(&self, channel: &str) -> bool {
		self.listener_count(channel) > 0
	}
}
