//! Hook sequencing around a persistence backend.
//!
//! [`save`] and [`delete`] run `before -> write/delete -> after` in that
//! order. Nothing reaches the [`Store`] when a before-hook vetoes, and the
//! after-hook only fires once the store reported success.

use atelier_events::HookError;
use thiserror::Error;
use tracing::debug;

use crate::{ComponentId, SavableComponent};

/// Backend that actually writes and deletes component rows.
pub trait Store<C: ?Sized> {
	/// Backend failure type.
	type Error;

	/// Persists the component and returns its (possibly new) id.
	fn write(&mut self, component: &C, is_new: bool) -> Result<ComponentId, Self::Error>;

	/// Removes the component.
	fn delete(&mut self, component: &C) -> Result<(), Self::Error>;
}

/// How a lifecycle action ended when nothing failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
	/// The store performed the action and after-listeners were notified.
	Applied,
	/// A before-listener vetoed; the store was not touched.
	Vetoed,
}

/// Failure while sequencing a lifecycle action.
///
/// A veto is not an error; it is reported as [`Outcome::Vetoed`].
#[derive(Debug, Error)]
pub enum PersistError<E> {
	/// A lifecycle listener failed.
	#[error(transparent)]
	Hook(#[from] HookError),

	/// The store failed.
	#[error("store error: {0}")]
	Store(#[source] E),
}

/// Saves a component through `store`.
///
/// On success the id returned by the store replaces the component's id.
pub fn save<C, S>(store: &mut S, component: &mut C) -> Result<Outcome, PersistError<S::Error>>
where
	C: SavableComponent,
	S: Store<C>,
{
	let is_new = component.is_new();
	if !component.before_save(is_new)? {
		return Ok(Outcome::Vetoed);
	}

	let id = store
		.write(component, is_new)
		.map_err(PersistError::Store)?;
	debug!(%id, is_new, "component saved");
	component.state_mut().id = Some(id);

	component.after_save(is_new)?;
	Ok(Outcome::Applied)
}

/// Deletes a component through `store`.
pub fn delete<C, S>(store: &mut S, component: &mut C) -> Result<Outcome, PersistError<S::Error>>
where
	C: SavableComponent,
	S: Store<C>,
{
	if !component.before_delete()? {
		return Ok(Outcome::Vetoed);
	}

	store.delete(component).map_err(PersistError::Store)?;
	debug!(id = ?component.id(), "component deleted");

	component.after_delete()?;
	Ok(Outcome::Applied)
}
