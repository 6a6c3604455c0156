//! Dynamic action factory table.
//!
//! Type names in mapping rules resolve through [`ActionFactories`]: a table from name to
//! constructor, populated at startup. An unknown name is a recoverable resolution failure.

use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use menuweave_actions::{Action, ActionRef, ActionRegistry};
use menuweave_mapping::MappingScope;
use rustc_hash::FxHashMap;

/// Stable identifier of a host window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "window#{}", self.0)
	}
}

/// Host window a mapper serves. Also the legacy constructor context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowContext {
	pub id: WindowId,
	pub title: Arc<str>,
}

impl WindowContext {
	pub fn new(id: u64, title: impl Into<Arc<str>>) -> Self {
		Self {
			id: WindowId(id),
			title: title.into(),
		}
	}
}

/// Primary constructor context.
#[derive(Debug, Clone, Copy)]
pub struct FactoryContext<'a> {
	pub window: &'a WindowContext,
	pub scope: &'a MappingScope,
}

/// Action whose inclusion depends on preconditions checked against the registry.
pub trait InitializableAction: Action {
	/// Captures dependencies from `registry`.
	///
	/// Returning `false` vetoes the rule: the action's preconditions do not hold here.
	fn initialize(&mut self, registry: &ActionRegistry) -> bool;
}

/// Value produced by a constructor.
pub enum Instance {
	Plain(ActionRef),
	Initializable(Box<dyn InitializableAction>),
}

impl Instance {
	pub fn plain(action: impl Action + 'static) -> Self {
		Instance::Plain(Arc::new(action))
	}

	pub fn initializable(action: impl InitializableAction + 'static) -> Self {
		Instance::Initializable(Box::new(action))
	}
}

/// Constructor failures. All of them drop only the affected rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FactoryError {
	#[error("{0}")]
	Failed(String),
	#[error("constructor panicked: {0}")]
	Panicked(String),
}

impl FactoryError {
	pub fn msg(message: impl fmt::Display) -> Self {
		FactoryError::Failed(message.to_string())
	}
}

/// Why a type name did not produce an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstantiateError {
	UnknownType,
	Failed(FactoryError),
	Vetoed,
}

type Construct = Box<dyn Fn(&FactoryContext<'_>) -> Result<Instance, FactoryError> + Send + Sync>;
type ConstructLegacy = Box<dyn Fn(&WindowContext) -> Result<Instance, FactoryError> + Send + Sync>;

#[derive(Default)]
struct FactoryEntry {
	primary: Option<Construct>,
	legacy: Option<ConstructLegacy>,
}

/// Table of dynamic action constructors keyed by type name.
#[derive(Default)]
pub struct ActionFactories {
	entries: FxHashMap<Box<str>, FactoryEntry>,
}

impl ActionFactories {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers the primary-context constructor for `type_name`.
	pub fn register<F>(&mut self, type_name: &str, construct: F) -> &mut Self
	where
		F: Fn(&FactoryContext<'_>) -> Result<Instance, FactoryError> + Send + Sync + 'static,
	{
		self.entries.entry(type_name.into()).or_default().primary = Some(Box::new(construct));
		self
	}

	/// Registers the legacy constructor for `type_name`, used when no primary one exists.
	pub fn register_legacy<F>(&mut self, type_name: &str, construct: F) -> &mut Self
	where
		F: Fn(&WindowContext) -> Result<Instance, FactoryError> + Send + Sync + 'static,
	{
		self.entries.entry(type_name.into()).or_default().legacy = Some(Box::new(construct));
		self
	}

	pub fn contains(&self, type_name: &str) -> bool {
		self.entries.contains_key(type_name)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Constructs and initializes the action registered as `type_name`.
	///
	/// Constructor and initializer panics are caught and reported as [`FactoryError::Panicked`].
	pub fn instantiate(&self, type_name: &str, ctx: &FactoryContext<'_>, registry: &ActionRegistry) -> Result<ActionRef, InstantiateError> {
		let entry = self.entries.get(type_name).ok_or(InstantiateError::UnknownType)?;

		let instance = match (&entry.primary, &entry.legacy) {
			(Some(construct), _) => guarded(|| construct(ctx)),
			(None, Some(construct)) => guarded(|| construct(ctx.window)),
			(None, None) => return Err(InstantiateError::UnknownType),
		}
		.map_err(InstantiateError::Failed)?;

		match instance {
			Instance::Plain(action) => Ok(action),
			Instance::Initializable(mut action) => {
				if guarded(|| Ok(action.initialize(registry))).map_err(InstantiateError::Failed)? {
					let action: ActionRef = Arc::<dyn InitializableAction>::from(action);
					Ok(action)
				} else {
					Err(InstantiateError::Vetoed)
				}
			}
		}
	}
}

impl fmt::Debug for ActionFactories {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut names: Vec<_> = self.entries.keys().collect();
		names.sort();
		f.debug_struct("ActionFactories").field("types", &names).finish()
	}
}

fn guarded<T>(f: impl FnOnce() -> Result<T, FactoryError>) -> Result<T, FactoryError> {
	std::panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|payload| {
		let message = payload
			.downcast_ref::<&str>()
			.map(|s| s.to_string())
			.or_else(|| payload.downcast_ref::<String>().cloned())
			.unwrap_or_else(|| "non-string panic payload".to_string());
		Err(FactoryError::Panicked(message))
	})
}
