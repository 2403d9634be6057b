//! Migration configuration and manifest lookup.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::Result;

/// Environment variable pointing at the project's `composer.json`.
pub const COMPOSER_PATH_ENV: &str = "ATELIER_COMPOSER_PATH";

const MANIFEST_FILE: &str = "composer.json";

/// Settings for repair migrations, usually read from `migrate.toml`.
///
/// ```toml
/// base-path = "/srv/site"
/// manifest-path = "/srv/site/composer.json"
/// repository-pattern = "//asset-packagist.org"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct MigrateConfig {
	/// Project root; the manifest defaults to `<base-path>/composer.json`.
	pub base_path: PathBuf,
	/// Explicit manifest location, overriding everything else.
	pub manifest_path: Option<PathBuf>,
	/// Substring identifying the repository entries to drop.
	pub repository_pattern: Option<String>,
}

impl MigrateConfig {
	/// Parses a TOML document.
	pub fn from_toml(src: &str) -> Result<Self> {
		Ok(toml::from_str(src)?)
	}
}

/// Resolves where the project manifest lives.
///
/// Precedence: explicit path, then [`COMPOSER_PATH_ENV`], then
/// `<base>/composer.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestLocator {
	base: PathBuf,
	explicit: Option<PathBuf>,
}

impl ManifestLocator {
	/// Locator rooted at a project directory.
	pub fn new(base: impl Into<PathBuf>) -> Self {
		Self {
			base: base.into(),
			explicit: None,
		}
	}

	/// Pins the manifest to an explicit path.
	pub fn with_manifest_path(mut self, path: impl Into<PathBuf>) -> Self {
		self.explicit = Some(path.into());
		self
	}

	/// Builds a locator from configuration.
	pub fn from_config(config: &MigrateConfig) -> Self {
		Self {
			base: config.base_path.clone(),
			explicit: config.manifest_path.clone(),
		}
	}

	/// Resolves the manifest path, consulting the process environment.
	pub fn resolve(&self) -> PathBuf {
		self.resolve_with_env(std::env::var_os(COMPOSER_PATH_ENV).as_deref())
	}

	/// Resolves the manifest path against a given environment value.
	pub fn resolve_with_env(&self, env: Option<&OsStr>) -> PathBuf {
		if let Some(path) = &self.explicit {
			return path.clone();
		}
		match env {
			Some(value) if !value.is_empty() => PathBuf::from(value),
			_ => self.default_path(),
		}
	}

	fn default_path(&self) -> PathBuf {
		Path::new(&self.base).join(MANIFEST_FILE)
	}
}
