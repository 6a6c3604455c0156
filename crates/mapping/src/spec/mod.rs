//! Ordered rule list for one mapping scope.

use menuweave_actions::{ActionPath, ReservedSyntax};
use tracing::{debug, warn};

use crate::error::LoadError;
use crate::modules::ModuleActivation;
use crate::rule::{MappingRule, MappingScope, SourceSpec};
use crate::store::MappingStore;


/// Rules of one scope, in store declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingSpec {
	rules: Vec<MappingRule>,
	/// Entries dropped for a blank value.
	skipped: usize,
}

impl MappingSpec {
	/// Loads and classifies the rules of `scope` from `store`.
	///
	/// Keys outside the scope prefix are ignored and the prefix is stripped from the rest.
	/// Blank keys are dropped quietly, blank values with a warning.
	///
	/// # Errors
	///
	/// Returns [`LoadError::NoRules`] if no usable entry remains for the scope.
	pub fn load(store: &dyn MappingStore, scope: &MappingScope, syntax: &ReservedSyntax) -> Result<Self, LoadError> {
		let prefix = scope.base_prefix.as_deref().map(|p| ActionPath::parse(p, &syntax.delimiter));
		let mut spec = MappingSpec::default();

		for (ordinal, entry) in store.entries(&scope.namespace).into_iter().enumerate() {
			let key = entry.key.trim();
			if key.is_empty() {
				debug!(namespace = %scope.namespace, ordinal, "mapping entry with blank key");
				continue;
			}

			let path = ActionPath::parse(key, &syntax.delimiter);
			let target = match &prefix {
				Some(prefix) => match path.strip_prefix(prefix) {
					Some(rest) => rest,
					None => continue,
				},
				None => path,
			};

			if target.is_empty() {
				debug!(namespace = %scope.namespace, key, "mapping entry targets the scope root");
				continue;
			}

			let value = entry.value.trim();
			if value.is_empty() {
				warn!(namespace = %scope.namespace, key, "mapping entry has a blank value; skipped");
				spec.skipped += 1;
				continue;
			}

			spec.rules.push(MappingRule {
				target,
				source: SourceSpec::classify(value, syntax),
				raw_source: value.to_string(),
				module: entry.module.map(|m| m.trim().to_string()).filter(|m| !m.is_empty()),
				ordinal,
			});
		}

		if spec.rules.is_empty() {
			return Err(LoadError::NoRules {
				namespace: scope.namespace.clone(),
				prefix: scope.base_prefix.clone(),
			});
		}

		debug!(namespace = %scope.namespace, rules = spec.rules.len(), skipped = spec.skipped, "loaded mapping spec");
		Ok(spec)
	}

	pub fn rules(&self) -> &[MappingRule] {
		&self.rules
	}

	/// Rules whose activation module is absent or active, in declaration order.
	pub fn active_rules<'a>(&'a self, modules: &'a dyn ModuleActivation) -> impl Iterator<Item = &'a MappingRule> {
		self.rules.iter().filter(move |rule| rule.is_enabled(modules))
	}

	pub fn skipped(&self) -> usize {
		self.skipped
	}

	pub fn len(&self) -> usize {
		self.rules.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rules.is_empty()
	}
}
