//! Error and warning types for migrations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop a migration.
#[derive(Debug, Error)]
pub enum MigrateError {
	/// Error reading or writing a file.
	#[error("I/O error on {path}: {error}")]
	Io {
		/// Path to the file.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// A JSON document could not be parsed or serialized.
	#[error("JSON error in {path}: {error}")]
	Json {
		/// Path to the document.
		path: PathBuf,
		/// The underlying JSON error.
		error: serde_json::Error,
	},

	/// The document parsed but has the wrong shape.
	#[error("invalid manifest {path}: {reason}")]
	InvalidManifest {
		/// Path to the document.
		path: PathBuf,
		/// What is wrong with it.
		reason: &'static str,
	},

	/// Migration configuration could not be parsed.
	#[error("config parse error: {0}")]
	Config(#[from] toml::de::Error),

	/// The migration only runs forward.
	#[error("migration {0} cannot be reverted")]
	Irreversible(String),

	/// A revert was requested for a migration that never ran.
	#[error("migration {0} has not been applied")]
	NotApplied(String),
}

/// Result type for migration operations.
pub type Result<T> = std::result::Result<T, MigrateError>;

/// Non-fatal condition met while migrating.
///
/// Warnings are logged and returned in the report; the migration still
/// counts as applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationWarning {
	/// The manifest to repair does not exist.
	MissingManifest {
		/// Where the manifest was expected.
		path: PathBuf,
	},
}

impl std::fmt::Display for MigrationWarning {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			MigrationWarning::MissingManifest { path } => {
				write!(f, "{} could not be found; nothing to repair", path.display())
			}
		}
	}
}
