//! Lifecycle event bus for savable components.
//!
//! Components publish a [`LifecycleEvent`] on a named channel before and after
//! they are saved or deleted. Listeners subscribed to that channel run
//! synchronously, in subscription order, and answer with a [`HookResult`]:
//!
//! ```ignore
//! let mut bus = HookBus::new();
//! bus.subscribe(EVENT_BEFORE_SAVE, Box::new(|event| {
//!     if event.is_new() == Some(true) {
//!         return Ok(HookResult::Cancel);
//!     }
//!     Ok(HookResult::Continue)
//! }));
//!
//! let verdict = bus.publish(EVENT_BEFORE_SAVE, &LifecycleEvent::save(true))?;
//! assert!(verdict.is_cancel());
//! ```
//!
//! The bus folds listener answers into a single verdict; a listener never sees
//! or edits another listener's answer.

mod bus;
mod error;
mod event;
mod types;

pub use bus::{EventBus, HookBus};
pub use error::HookError;
pub use event::{
	EVENT_AFTER_DELETE, EVENT_AFTER_SAVE, EVENT_BEFORE_DELETE, EVENT_BEFORE_SAVE, LifecycleEvent,
};
pub use types::{HookResult, Listener, ListenerId};
