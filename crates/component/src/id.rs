//! Component identifiers.

use serde::{Deserialize, Serialize};

/// Prefix marking a placeholder id handed out before the real one exists.
const PLACEHOLDER_PREFIX: &str = "new";

/// Identifier of a persisted component.
///
/// Row ids are integers; string ids appear when callers pre-allocate a
/// placeholder such as `"new1"` for client-side correlation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComponentId {
	/// Numeric id assigned by the store.
	Int(u64),
	/// String id, possibly a placeholder.
	Str(String),
}

impl ComponentId {
	/// Returns true if this id does not (yet) name a persisted row.
	///
	/// That is `0`, the empty string, or any string starting with `"new"`.
	pub fn is_placeholder(&self) -> bool {
		match self {
			ComponentId::Int(n) => *n == 0,
			ComponentId::Str(s) => s.is_empty() || s.starts_with(PLACEHOLDER_PREFIX),
		}
	}
}

impl std::fmt::Display for ComponentId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ComponentId::Int(n) => write!(f, "{n}"),
			ComponentId::Str(s) => f.write_str(s),
		}
	}
}

impl From<u64> for ComponentId {
	fn from(v: u64) -> Self {
		ComponentId::Int(v)
	}
}

impl From<String> for ComponentId {
	fn from(v: String) -> Self {
		ComponentId::Str(v)
	}
}

impl From<&str> for ComponentId {
	fn from(v: &str) -> Self {
		ComponentId::Str(v.to_string())
	}
}
