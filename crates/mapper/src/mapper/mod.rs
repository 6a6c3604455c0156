//! Per-window mapper: flatten, load, resolve, assemble, install.

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwapOption;
use menuweave_actions::{ActionRegistry, ReservedSyntax};
use menuweave_mapping::{AllModules, MappingScope, MappingSpec, MappingStore, ModuleActivation};
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::builder::{HierarchyBuilder, Placement, SeparatorPolicy, TargetPath};
use crate::factory::{ActionFactories, FactoryContext, WindowContext, WindowId};
use crate::host::MenuHost;
use crate::menu::{BuiltMenu, MenuKind};
use crate::ready::{HierarchyReady, ReadyState};
use crate::report::{BuildError, BuildReport, MappingProblem};
use crate::resolve::{ActionResolver, Resolved};


/// Application-wide collaborators shared by every window's mapper.
#[derive(Clone)]
pub struct MapperEnv {
	pub store: Arc<dyn MappingStore>,
	pub factories: Arc<ActionFactories>,
	pub modules: Arc<dyn ModuleActivation>,
	pub syntax: ReservedSyntax,
	pub separators: SeparatorPolicy,
}

impl MapperEnv {
	/// Creates an environment with every module active and default syntax.
	pub fn new(store: Arc<dyn MappingStore>, factories: Arc<ActionFactories>) -> Self {
		Self {
			store,
			factories,
			modules: Arc::new(AllModules),
			syntax: ReservedSyntax::default(),
			separators: SeparatorPolicy::default(),
		}
	}

	pub fn with_modules(mut self, modules: Arc<dyn ModuleActivation>) -> Self {
		self.modules = modules;
		self
	}

	pub fn with_syntax(mut self, syntax: ReservedSyntax) -> Self {
		self.syntax = syntax;
		self
	}

	pub fn with_separator_policy(mut self, policy: SeparatorPolicy) -> Self {
		self.separators = policy;
		self
	}
}

/// Remaps one host hierarchy (a window's menu bar or one context menu kind).
///
/// The flattened [`ActionRegistry`] is cached between builds and only rebuilt after
/// [`MenuMapper::invalidate`]. After [`MenuMapper::clear`] the mapper is retired: builds
/// still in flight finish without installing or caching anything, and later builds fail
/// with [`BuildError::Retired`].
pub struct MenuMapper {
	window: WindowContext,
	kind: MenuKind,
	scope: MappingScope,
	host: Arc<dyn MenuHost>,
	env: MapperEnv,
	registry: ArcSwapOption<ActionRegistry>,
	/// Held while committing a build so `clear` cannot interleave with an install.
	retired: Mutex<bool>,
}

impl MenuMapper {
	pub fn new(env: MapperEnv, window: WindowContext, kind: MenuKind, scope: MappingScope, host: Arc<dyn MenuHost>) -> Self {
		Self {
			window,
			kind,
			scope,
			host,
			env,
			registry: ArcSwapOption::empty(),
			retired: Mutex::new(false),
		}
	}

	pub fn window(&self) -> &WindowContext {
		&self.window
	}

	pub fn window_id(&self) -> WindowId {
		self.window.id
	}

	pub fn kind(&self) -> MenuKind {
		self.kind
	}

	pub fn scope(&self) -> &MappingScope {
		&self.scope
	}

	/// Returns the cached registry, if a build has flattened one.
	pub fn cached_registry(&self) -> Option<Arc<ActionRegistry>> {
		self.registry.load_full()
	}

	pub fn is_retired(&self) -> bool {
		*self.retired.lock()
	}

	/// Builds the remapped hierarchy and installs it into the host.
	///
	/// # Errors
	///
	/// Structural failures leave the host's current hierarchy untouched.
	pub fn build(&self) -> Result<BuildReport, BuildError> {
		if self.is_retired() {
			return Err(BuildError::Retired { window: self.window.id });
		}

		let (registry, fresh) = match self.registry.load_full() {
			Some(registry) => (registry, false),
			None => {
				let Some(source) = self.host.source_menu() else {
					warn!(window = %self.window.id, namespace = %self.scope.namespace, "no source hierarchy; keeping unmapped menu");
					return Err(BuildError::MissingSourceMenu { window: self.window.id });
				};
				(Arc::new(ActionRegistry::build(&source, &self.env.syntax)), true)
			}
		};

		let spec = match MappingSpec::load(self.env.store.as_ref(), &self.scope, &self.env.syntax) {
			Ok(spec) => spec,
			Err(error) => {
				warn!(window = %self.window.id, %error, "mapping load failed; keeping unmapped menu");
				self.commit(registry, fresh, None)?;
				return Err(error.into());
			}
		};

		let (menu, report) = self.assemble(&spec, &registry);
		self.commit(registry, fresh, Some(menu))?;
		Ok(report)
	}

	/// Waits up to `budget` for the host's populator, then builds regardless.
	pub fn build_when_ready(&self, ready: &HierarchyReady, budget: Duration) -> Result<BuildReport, BuildError> {
		let state = ready.wait_for(budget);
		if state == ReadyState::TimedOut {
			warn!(window = %self.window.id, ?budget, "source hierarchy not ready; building against partial hierarchy");
		}

		let mut report = self.build()?;
		report.readiness = Some(state);
		Ok(report)
	}

	/// Drops the cached registry so the next build re-flattens the source hierarchy.
	pub fn invalidate(&self) {
		self.registry.store(None);
	}

	/// Invalidates and builds again.
	pub fn rebuild(&self) -> Result<BuildReport, BuildError> {
		self.invalidate();
		self.build()
	}

	/// Retires the mapper and releases every cached reference to host objects.
	///
	/// Blocks until a build that is installing concurrently has finished.
	pub fn clear(&self) {
		*self.retired.lock() = true;
		self.invalidate();
		debug!(window = %self.window.id, namespace = %self.scope.namespace, "mapper retired");
	}

	/// Caches a freshly flattened registry and installs `menu`, unless the mapper was retired
	/// while the build ran.
	fn commit(&self, registry: Arc<ActionRegistry>, fresh: bool, menu: Option<BuiltMenu>) -> Result<(), BuildError> {
		let retired = self.retired.lock();
		if *retired {
			debug!(window = %self.window.id, namespace = %self.scope.namespace, "mapper retired during build; result dropped");
			return Err(BuildError::Retired { window: self.window.id });
		}
		if fresh {
			self.registry.store(Some(registry));
		}
		if let Some(menu) = menu {
			self.host.install(menu);
		}
		Ok(())
	}

	fn assemble(&self, spec: &MappingSpec, registry: &ActionRegistry) -> (BuiltMenu, BuildReport) {
		let ctx = FactoryContext {
			window: &self.window,
			scope: &self.scope,
		};
		let resolver = ActionResolver::new(registry, &self.env.factories, ctx);
		let mut builder = HierarchyBuilder::new(self.kind, self.env.separators);
		let mut report = BuildReport {
			rules: spec.len(),
			..BuildReport::default()
		};

		for rule in spec.rules() {
			if !rule.is_enabled(self.env.modules.as_ref()) {
				report.gated += 1;
				continue;
			}

			let target = TargetPath::parse(&rule.target, &self.env.syntax);
			let placements = match resolver.resolve(&rule.source) {
				Ok(Resolved::Separator) => vec![(target, Placement::Separator)],
				Ok(Resolved::Action(action)) => vec![(target, Placement::Action(action))],
				Ok(Resolved::History(entries)) => entries
					.into_iter()
					.map(|(label, action)| (target.child_literal(&label), Placement::Action(action)))
					.collect(),
				Err(error) => {
					let target = rule.target.render(&self.env.syntax.delimiter);
					debug!(window = %self.window.id, %target, source = %rule.raw_source, %error, "mapping rule dropped");
					report.problems.push(MappingProblem {
						ordinal: rule.ordinal,
						target,
						source: rule.raw_source.clone(),
						error,
					});
					continue;
				}
			};

			for (target, placement) in placements {
				match builder.add_entry(&target, placement) {
					Ok(_) => report.placed += 1,
					Err(_) => report.skipped += 1,
				}
			}
		}

		let (menu, stats) = builder.finish();
		report.pruned_containers = stats.pruned_containers;

		if !report.problems.is_empty() {
			let samples: Vec<_> = report.problems.iter().take(5).map(|p| (&p.target, p.error.to_string())).collect();
			warn!(window = %self.window.id, namespace = %self.scope.namespace, count = report.problems.len(), ?samples, "menu mapping problems");
		}

		debug!(
			window = %self.window.id,
			namespace = %self.scope.namespace,
			rules = report.rules,
			placed = report.placed,
			gated = report.gated,
			"menu mapped"
		);

		(menu, report)
	}
}

impl std::fmt::Debug for MenuMapper {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MenuMapper")
			.field("window", &self.window)
			.field("kind", &self.kind)
			.field("scope", &self.scope)
			.field("cached", &self.registry.load().is_some())
			.field("retired", &self.is_retired())
			.finish_non_exhaustive()
	}
}
