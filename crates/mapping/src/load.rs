//! Mapping file loading utilities.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::{debug, warn};

use crate::error::{ConfigError, ConfigWarning};
use crate::kdl::{ParsedStore, parse_store_str};
use crate::store::{MappingStore, MemoryStore, RawEntry};

/// Base mapping file name.
pub const BASE_FILE: &str = "menus.kdl";
/// Optional overlay appended after the base rules.
pub const OVERLAY_FILE: &str = "menus.local.kdl";

/// Aggregate result of loading mapping layers from a directory.
#[derive(Debug, Default)]
pub struct StoreLoadReport {
	/// Merged store; `None` when no layer exists or any existing layer failed to load.
	pub store: Option<MemoryStore>,
	/// Non-fatal parse warnings keyed by source file path.
	pub warnings: Vec<(PathBuf, ConfigWarning)>,
	/// File read or parse errors keyed by source file path.
	pub errors: Vec<(PathBuf, String)>,
}

/// Loads `menus.kdl` and the optional `menus.local.kdl` overlay from `dir`.
///
/// Overlay rules are appended after the base rules of the same namespace, so the base
/// keeps precedence for duplicate targets.
///
/// Loading is all-or-nothing: if a layer that exists cannot be read or parsed, no store is
/// produced, since the remaining layer alone would silently drop or reorder rules. Every
/// layer is still read so the report lists all diagnostics.
pub fn load_store_from_dir(dir: &Path) -> StoreLoadReport {
	let mut report = StoreLoadReport::default();
	let mut merged = MemoryStore::new();
	let mut found_any = false;

	for filename in [BASE_FILE, OVERLAY_FILE] {
		load_layer(&mut report, &mut merged, &mut found_any, &dir.join(filename));
	}

	if found_any && report.errors.is_empty() {
		report.store = Some(merged);
	}

	report
}

fn load_layer(report: &mut StoreLoadReport, merged: &mut MemoryStore, found_any: &mut bool, path: &Path) {
	if !path.exists() {
		return;
	}

	let layer = std::fs::read_to_string(path)
		.map_err(|source| ConfigError::Io {
			path: path.display().to_string(),
			source,
		})
		.and_then(|content| parse_store_str(&content));

	match layer {
		Ok(ParsedStore { store, warnings }) => {
			for warning in warnings {
				report.warnings.push((path.to_path_buf(), warning));
			}
			merged.extend(store);
			*found_any = true;
		}
		Err(error) => {
			report.errors.push((path.to_path_buf(), error.to_string()));
		}
	}
}

/// Mapping store backed by a directory of KDL files, reloadable in place.
///
/// Readers always see a complete store: a reload swaps the whole store atomically and a
/// failed reload keeps the previous one.
pub struct FileStore {
	dir: PathBuf,
	current: ArcSwap<MemoryStore>,
}

impl FileStore {
	/// Opens `dir` and performs the initial load.
	pub fn open(dir: impl Into<PathBuf>) -> (Self, StoreLoadReport) {
		let store = Self {
			dir: dir.into(),
			current: ArcSwap::from_pointee(MemoryStore::new()),
		};
		let report = store.reload();
		(store, report)
	}

	/// Re-reads the mapping files.
	///
	/// The store is replaced only if every existing layer loaded; otherwise the previous
	/// contents stay in effect.
	pub fn reload(&self) -> StoreLoadReport {
		let report = load_store_from_dir(&self.dir);

		for (path, error) in &report.errors {
			warn!(path = %path.display(), %error, "failed to load mapping file");
		}
		for (path, warning) in &report.warnings {
			warn!(path = %path.display(), %warning, "mapping file warning");
		}

		match &report.store {
			Some(store) => {
				debug!(dir = %self.dir.display(), entries = store.len(), "mapping store reloaded");
				self.current.store(Arc::new(store.clone()));
			}
			None => debug!(dir = %self.dir.display(), "mapping layers incomplete; keeping previous store"),
		}

		report
	}

	pub fn dir(&self) -> &Path {
		&self.dir
	}

	/// Returns the store currently in effect.
	pub fn snapshot(&self) -> Arc<MemoryStore> {
		self.current.load_full()
	}
}

impl MappingStore for FileStore {
	fn entries(&self, namespace: &str) -> Vec<RawEntry> {
		self.current.load().entries(namespace)
	}
}
