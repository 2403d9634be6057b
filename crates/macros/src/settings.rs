//! `#[derive(Settings)]` expansion.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Field, Fields, Visibility, parse_macro_input};

pub fn derive_settings(input: TokenStream) -> TokenStream {
	let input = parse_macro_input!(input as DeriveInput);
	expand(&input)
		.unwrap_or_else(syn::Error::into_compile_error)
		.into()
}

pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
	let name = &input.ident;

	let Data::Struct(data) = &input.data else {
		return Err(syn::Error::new_spanned(
			input,
			"Settings can only be derived for structs",
		));
	};
	let Fields::Named(fields) = &data.fields else {
		return Err(syn::Error::new_spanned(
			input,
			"Settings requires a struct with named fields",
		));
	};

	let mut idents = Vec::new();
	let mut keys = Vec::new();
	let mut types = Vec::new();
	for field in &fields.named {
		if !is_setting(field)? {
			continue;
		}
		let Some(ident) = &field.ident else {
			continue;
		};
		keys.push(ident.unraw().to_string());
		idents.push(ident);
		types.push(&field.ty);
	}

	// Generic field types need the conversion bounds spelled out.
	let mut generics = input.generics.clone();
	if !generics.params.is_empty() {
		let where_clause = generics.make_where_clause();
		for ty in &types {
			where_clause.predicates.push(syn::parse_quote! {
				#ty: ::core::clone::Clone
					+ ::core::convert::Into<::atelier_component::SettingValue>
					+ ::atelier_component::FromSettingValue
			});
		}
	}
	let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

	Ok(quote! {
		impl #impl_generics ::atelier_component::Settings for #name #ty_generics #where_clause {
			fn settings_attributes() -> &'static [&'static str] {
				&[#(#keys),*]
			}

			fn setting(&self, name: &str) -> ::core::option::Option<::atelier_component::SettingValue> {
				match name {
					#(
						#keys => ::core::option::Option::Some(
							::core::convert::Into::<::atelier_component::SettingValue>::into(
								::core::clone::Clone::clone(&self.#idents),
							),
						),
					)*
					_ => ::core::option::Option::None,
				}
			}

			#[allow(unused_variables)]
			fn set_setting(
				&mut self,
				name: &str,
				value: ::atelier_component::SettingValue,
			) -> ::core::result::Result<(), ::atelier_component::SettingsError> {
				match name {
					#(
						#keys => {
							self.#idents = ::atelier_component::FromSettingValue::from_setting(value)
								.map_err(|source| ::atelier_component::SettingsError::InvalidValue {
									name: #keys.to_string(),
									source,
								})?;
							::core::result::Result::Ok(())
						}
					)*
					_ => ::core::result::Result::Err(
						::atelier_component::SettingsError::UnknownSetting(name.to_string()),
					),
				}
			}
		}
	})
}

/// A field is a setting when it is `pub` and not marked `#[settings(skip)]`.
fn is_setting(field: &Field) -> syn::Result<bool> {
	let mut skip = false;
	for attr in &field.attrs {
		if !attr.path().is_ident("settings") {
			continue;
		}
		attr.parse_nested_meta(|meta| {
			if meta.path.is_ident("skip") {
				skip = true;
				Ok(())
			} else {
				Err(meta.error("unsupported settings attribute, expected `skip`"))
			}
		})?;
	}
	Ok(!skip && matches!(field.vis, Visibility::Public(_)))
}
