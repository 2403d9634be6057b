//! Settings attribute access.

use indexmap::IndexMap;

use crate::{SettingValue, SettingsError};

/// Ordered mapping from setting name to its current value.
pub type SettingsMap = IndexMap<&'static str, SettingValue>;

/// Attribute-level access to a component's settings.
///
/// Usually derived with `#[derive(Settings)]`, which lists the struct's own
/// public fields in declaration order. Attributes of an embedded base struct
/// are not part of the list unless the concrete type redeclares them.
pub trait Settings {
	/// Names of the settings this type introduces, in declaration order.
	fn settings_attributes() -> &'static [&'static str];

	/// Reads the current value of one setting.
	fn setting(&self, name: &str) -> Option<SettingValue>;

	/// Writes one setting.
	fn set_setting(&mut self, name: &str, value: SettingValue) -> Result<(), SettingsError>;
}
