//! Build diagnostics.

use menuweave_mapping::LoadError;

use crate::factory::WindowId;
use crate::ready::ReadyState;
use crate::resolve::ResolveError;

/// A rule dropped during resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingProblem {
	/// Position of the rule in the store.
	pub ordinal: usize,
	pub target: String,
	pub source: String,
	pub error: ResolveError,
}

/// Summary of one successful build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
	/// Rules loaded for the scope.
	pub rules: usize,
	/// Rules skipped because their module is inactive.
	pub gated: usize,
	/// Entries placed in the hierarchy, before pruning.
	pub placed: usize,
	/// Entries skipped by the builder (duplicate targets, suppressed separators).
	pub skipped: usize,
	pub pruned_containers: usize,
	pub problems: Vec<MappingProblem>,
	/// Set when the build waited on a readiness signal.
	pub readiness: Option<ReadyState>,
}

/// Structural failures. The window keeps its unmapped hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
	#[error("{window} has no source hierarchy")]
	MissingSourceMenu { window: WindowId },
	#[error(transparent)]
	Load(#[from] LoadError),
	#[error("{window} was closed while its menu was building")]
	Retired { window: WindowId },
}
