//! Data repair migrations.
//!
//! A [`Migration`] runs once forward; most repairs cannot be undone and say so
//! through [`MigrateError::Irreversible`]. The [`Migrator`] keeps track of
//! which migrations have been applied.
//!
//! [`DropAssetPackagist`] removes the asset-packagist.org repository from a
//! project's `composer.json`. A missing manifest is reported as a
//! [`MigrationWarning`], not an error: there is nothing to repair.

mod asset_packagist;
mod config;
mod error;
mod migration;

pub use asset_packagist::{ASSET_PACKAGIST_PATTERN, DropAssetPackagist, strip_repositories};
pub use config::{COMPOSER_PATH_ENV, ManifestLocator, MigrateConfig};
pub use error::{MigrateError, MigrationWarning, Result};
pub use migration::{Migration, MigrationReport, Migrator};
