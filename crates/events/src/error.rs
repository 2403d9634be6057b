//! Listener failure type.

use thiserror::Error;

/// A failure raised by a listener.
///
/// The bus hands this back to the publisher exactly as the listener returned
/// it. A veto is not an error; listeners veto by returning
/// [`crate::HookResult::Cancel`].
#[derive(Debug, Error)]
pub enum HookError {
	/// Failure described by a plain message.
	#[error("{0}")]
	Message(String),

	/// Failure carrying an arbitrary source error.
	#[error(transparent)]
	Other(#[from] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl HookError {
	/// Creates an error from a message.
	pub fn msg(message: impl Into<String>) -> Self {
		HookError::Message(message.into())
	}

	/// Wraps any error type.
	pub fn new<E>(error: E) -> Self
	where
		E: std::error::Error + Send + Sync + 'static,
	{
		HookError::Other(Box::new(error))
	}
}
