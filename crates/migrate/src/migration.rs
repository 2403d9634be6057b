//! Migration trait and runner.

use tracing::{debug, info};

use crate::{MigrateError, MigrationWarning, Result};

/// What a migration run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
	/// True if the migration modified anything.
	pub changed: bool,
	/// Non-fatal conditions met on the way.
	pub warnings: Vec<MigrationWarning>,
}

impl MigrationReport {
	/// A run that modified data.
	pub fn changed() -> Self {
		Self {
			changed: true,
			warnings: Vec::new(),
		}
	}

	/// A run that found nothing to do.
	pub fn unchanged() -> Self {
		Self::default()
	}

	/// Adds a warning, builder style.
	pub fn with_warning(mut self, warning: MigrationWarning) -> Self {
		self.warnings.push(warning);
		self
	}
}

/// A one-shot data migration.
pub trait Migration {
	/// Stable name recorded once the migration has been applied.
	fn name(&self) -> &str;

	/// Applies the migration. Must be safe to run again.
	fn up(&self) -> Result<MigrationReport>;

	/// Reverts the migration. Fails unless the migration overrides it.
	fn down(&self) -> Result<MigrationReport> {
		Err(MigrateError::Irreversible(self.name().to_string()))
	}
}

/// Applies migrations in order and remembers which ones ran.
#[derive(Debug, Clone, Default)]
pub struct Migrator {
	applied: Vec<String>,
}

impl Migrator {
	/// Creates a migrator with an empty history.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a migrator from a previously recorded history.
	pub fn with_history<I, S>(applied: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			applied: applied.into_iter().map(Into::into).collect(),
		}
	}

	/// Names of applied migrations, oldest first.
	pub fn applied(&self) -> &[String] {
		&self.applied
	}

	/// Returns true if a migration with this name has been applied.
	pub fn is_applied(&self, name: &str) -> bool {
		self.applied.iter().any(|n| n == name)
	}

	/// Applies one migration; returns `None` if it had already been applied.
	pub fn up(&mut self, migration: &dyn Migration) -> Result<Option<MigrationReport>> {
		let name = migration.name();
		if self.is_applied(name) {
			debug!(migration = name, "already applied, skipping");
			return Ok(None);
		}

		let report = migration.up()?;
		info!(
			migration = name,
			changed = report.changed,
			warnings = report.warnings.len(),
			"migration applied"
		);
		self.applied.push(name.to_string());
		Ok(Some(report))
	}

	/// Applies every pending migration in order, stopping at the first error.
	pub fn run_all(&mut self, migrations: &[&dyn Migration]) -> Result<Vec<(String, MigrationReport)>> {
		let mut reports = Vec::new();
		for migration in migrations {
			if let Some(report) = self.up(*migration)? {
				reports.push((migration.name().to_string(), report));
			}
		}
		Ok(reports)
	}

	/// Reverts an applied migration.
	///
	/// The history is only updated when the migration's `down` succeeds.
	pub fn down(&mut self, migration: &dyn Migration) -> Result<MigrationReport> {
		let name = migration.name();
		let Some(pos) = self.applied.iter().position(|n| n == name) else {
			return Err(MigrateError::NotApplied(name.to_string()));
		};

		let report = migration.down()?;
		self.applied.remove(pos);
		info!(migration = name, "migration reverted");
		Ok(report)
	}
}
