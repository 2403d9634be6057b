//! Removal of the asset-packagist.org Composer repository.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::{
	ManifestLocator, MigrateConfig, MigrateError, Migration, MigrationReport, MigrationWarning,
	Result,
};

/// Substring of the repository URL that marks an entry for removal.
pub const ASSET_PACKAGIST_PATTERN: &str = "//asset-packagist.org";

/// Drops every `repositories` entry whose `url` contains the pattern.
///
/// Other keys and the order of the remaining entries are left alone. The
/// manifest is only rewritten when an entry was removed, so running the
/// migration again is a no-op.
#[derive(Debug, Clone)]
pub struct DropAssetPackagist {
	manifest: PathBuf,
	pattern: String,
}

impl DropAssetPackagist {
	/// Migration for the manifest at `manifest`.
	pub fn new(manifest: impl Into<PathBuf>) -> Self {
		Self {
			manifest: manifest.into(),
			pattern: ASSET_PACKAGIST_PATTERN.to_string(),
		}
	}

	/// Migration configured from a [`MigrateConfig`].
	pub fn from_config(config: &MigrateConfig) -> Self {
		let mut migration = Self::new(ManifestLocator::from_config(config).resolve());
		if let Some(pattern) = &config.repository_pattern {
			migration.pattern = pattern.clone();
		}
		migration
	}

	/// The manifest this migration edits.
	pub fn manifest(&self) -> &Path {
		&self.manifest
	}

	fn read(&self) -> Result<Option<Value>> {
		let text = match fs::read_to_string(&self.manifest) {
			Ok(text) => text,
			Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
			Err(error) => {
				return Err(MigrateError::Io {
					path: self.manifest.clone(),
					error,
				});
			}
		};
		serde_json::from_str(&text)
			.map(Some)
			.map_err(|error| MigrateError::Json {
				path: self.manifest.clone(),
				error,
			})
	}

	/// Writes the document the way Composer does: four-space indent and a
	/// trailing newline.
	fn write(&self, doc: &Value) -> Result<()> {
		let mut buf = Vec::new();
		let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
		let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
		doc.serialize(&mut ser).map_err(|error| MigrateError::Json {
			path: self.manifest.clone(),
			error,
		})?;
		buf.push(b'\n');
		fs::write(&self.manifest, buf).map_err(|error| MigrateError::Io {
			path: self.manifest.clone(),
			error,
		})
	}
}

impl Migration for DropAssetPackagist {
	fn name(&self) -> &str {
		"drop_asset_packagist"
	}

	fn up(&self) -> Result<MigrationReport> {
		let Some(mut doc) = self.read()? else {
			warn!(
				path = %self.manifest.display(),
				"could not remove the asset-packagist.org repository: composer.json not found"
			);
			return Ok(MigrationReport::unchanged().with_warning(
				MigrationWarning::MissingManifest {
					path: self.manifest.clone(),
				},
			));
		};

		let Some(root) = doc.as_object_mut() else {
			return Err(MigrateError::InvalidManifest {
				path: self.manifest.clone(),
				reason: "top level is not an object",
			});
		};

		let removed = strip_repositories(root, &self.pattern);
		if removed == 0 {
			return Ok(MigrationReport::unchanged());
		}

		self.write(&doc)?;
		info!(path = %self.manifest.display(), removed, "removed repository entries");
		Ok(MigrationReport::changed())
	}
}

/// Removes matching repository entries from a manifest's top-level object.
///
/// `repositories` may be a list or an object keyed by repository name.
/// Returns the number of entries removed.
pub fn strip_repositories(root: &mut Map<String, Value>, pattern: &str) -> usize {
	let matches = |repo: &Value| {
		repo.get("url")
			.and_then(Value::as_str)
			.is_some_and(|url| url.contains(pattern))
	};

	match root.get_mut("repositories") {
		Some(Value::Array(repos)) => {
			let before = repos.len();
			repos.retain(|repo| !matches(repo));
			before - repos.len()
		}
		Some(Value::Object(repos)) => {
			let before = repos.len();
			repos.retain(|_, repo| !matches(repo));
			before - repos.len()
		}
		_ => 0,
	}
}
