//! Module activation queries gating mapping rules.

use rustc_hash::FxHashSet;

/// Answers whether a named host module is currently active.
pub trait ModuleActivation: Send + Sync {
	fn is_active(&self, module: &str) -> bool;
}

/// Treats every module as active.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllModules;

impl ModuleActivation for AllModules {
	fn is_active(&self, _module: &str) -> bool {
		true
	}
}

/// Fixed set of active module names.
#[derive(Debug, Clone, Default)]
pub struct ActiveModules {
	names: FxHashSet<String>,
}

impl ActiveModules {
	pub fn new<I, S>(names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			names: names.into_iter().map(Into::into).collect(),
		}
	}

	pub fn activate(&mut self, module: impl Into<String>) {
		self.names.insert(module.into());
	}

	pub fn deactivate(&mut self, module: &str) -> bool {
		self.names.remove(module)
	}
}

impl ModuleActivation for ActiveModules {
	fn is_active(&self, module: &str) -> bool {
		self.names.contains(module)
	}
}
