//! Process-wide set of live mappers.
//!
//! Each window registers one mapper per remapped hierarchy. A global reload (after a store
//! change or a history update) rebuilds every registered mapper in registration order.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::factory::WindowId;
use crate::mapper::MenuMapper;
use crate::report::{BuildError, BuildReport};

/// Result of rebuilding one mapper during [`MapperRegistry::reload_all`].
#[derive(Debug)]
pub struct ReloadOutcome {
	pub window: WindowId,
	pub namespace: String,
	pub result: Result<BuildReport, BuildError>,
}

/// Shared, thread-safe list of live mappers.
#[derive(Clone, Default)]
pub struct MapperRegistry {
	inner: Arc<Mutex<Vec<Arc<MenuMapper>>>>,
}

impl MapperRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds `mapper`. Registering the same mapper twice is a no-op.
	pub fn register(&self, mapper: Arc<MenuMapper>) {
		let mut mappers = self.inner.lock();
		if mappers.iter().any(|m| Arc::ptr_eq(m, &mapper)) {
			return;
		}
		debug!(window = %mapper.window_id(), namespace = %mapper.scope().namespace, "mapper registered");
		mappers.push(mapper);
	}

	/// Removes every mapper of `window` and clears their caches.
	///
	/// Returns the number of mappers removed.
	pub fn unregister(&self, window: WindowId) -> usize {
		let removed: Vec<_> = {
			let mut mappers = self.inner.lock();
			let (removed, kept): (Vec<_>, Vec<_>) = mappers.drain(..).partition(|m| m.window_id() == window);
			*mappers = kept;
			removed
		};

		for mapper in &removed {
			mapper.clear();
		}
		if !removed.is_empty() {
			debug!(%window, count = removed.len(), "mappers unregistered");
		}
		removed.len()
	}

	/// Invalidates and rebuilds every registered mapper.
	///
	/// Mappers are snapshotted first so builds run without holding the registry lock. A mapper
	/// registered concurrently is picked up by the next reload. A mapper unregistered while
	/// the reload runs is retired, so its build installs nothing and reports
	/// [`BuildError::Retired`].
	pub fn reload_all(&self) -> Vec<ReloadOutcome> {
		let mappers = self.snapshot();
		let outcomes: Vec<_> = mappers
			.iter()
			.map(|mapper| ReloadOutcome {
				window: mapper.window_id(),
				namespace: mapper.scope().namespace.clone(),
				result: mapper.rebuild(),
			})
			.collect();

		let failed: Vec<_> = outcomes
			.iter()
			.filter_map(|o| match &o.result {
				Err(BuildError::Retired { .. }) | Ok(_) => None,
				Err(e) => Some((o.window, e.to_string())),
			})
			.collect();
		if !failed.is_empty() {
			let samples: Vec<_> = failed.iter().take(5).collect();
			warn!(count = failed.len(), ?samples, "mappers kept their previous hierarchy");
		}
		info!(mappers = outcomes.len(), failed = failed.len(), "menus reloaded");

		outcomes
	}

	pub fn len(&self) -> usize {
		self.inner.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.inner.lock().is_empty()
	}

	/// Distinct windows with at least one registered mapper, in registration order.
	pub fn windows(&self) -> Vec<WindowId> {
		let mut windows = Vec::new();
		for mapper in self.inner.lock().iter() {
			if !windows.contains(&mapper.window_id()) {
				windows.push(mapper.window_id());
			}
		}
		windows
	}

	fn snapshot(&self) -> Vec<Arc<MenuMapper>> {
		self.inner.lock().clone()
	}
}

impl std::fmt::Debug for MapperRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MapperRegistry").field("mappers", &self.len()).finish()
	}
}
