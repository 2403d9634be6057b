//! Error types for settings access.

use thiserror::Error;

/// A [`crate::SettingValue`] could not be converted to the requested type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
	/// The value has a different type.
	#[error("expected {expected}, got {got}")]
	TypeMismatch {
		/// The type that was requested.
		expected: &'static str,
		/// The type name of the provided value.
		got: &'static str,
	},

	/// A number does not fit the target type.
	#[error("{value} is out of range for {target}")]
	OutOfRange {
		/// The provided number, as written.
		value: String,
		/// The target Rust type.
		target: &'static str,
	},
}

/// Errors raised when writing settings back onto a component.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
	/// The component type does not declare this setting.
	#[error("unknown setting: {0}")]
	UnknownSetting(String),

	/// The value does not fit the setting's type.
	#[error("invalid value for setting '{name}': {source}")]
	InvalidValue {
		/// Setting name.
		name: String,
		/// Conversion failure.
		source: ValueError,
	},
}
