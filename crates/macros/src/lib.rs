//! Procedural macros for Atelier components.
//!
//! Provides:
//! * `#[derive(Settings)]` - settings attribute list and accessors for a component

use proc_macro::TokenStream;

/// Settings derive macro implementation.
mod settings;


/// Derives `atelier_component::Settings` from a struct's own public fields.
///
/// Every `pub` named field becomes a setting, in declaration order. This is a
/// blanket rule: adding a public field to a component type makes it a
/// persisted setting. Fields that are not `pub`, or that carry
/// `#[settings(skip)]`, are left out. Use `skip` on an embedded base struct so
/// the concrete type only owns the settings it introduces.
///
/// ```ignore
/// #[derive(Settings)]
/// pub struct Dropdown {
///     #[settings(skip)]
///     pub state: ComponentState,
///     pub options: Vec<String>,
///     pub multi: bool,
///     cache: Option<String>,
/// }
///
/// assert_eq!(Dropdown::settings_attributes(), &["options", "multi"]);
/// ```
///
/// Field types must implement `Clone`, `Into<SettingValue>` and
/// `FromSettingValue`.
#[proc_macro_derive(Settings, attributes(settings))]
pub fn derive_settings(input: TokenStream) -> TokenStream {
	settings::derive_settings(input)
}
