//! Resolution of a rule's source spec into something placeable.

use menuweave_actions::{ActionRef, ActionRegistry};
use menuweave_mapping::SourceSpec;

use crate::factory::{ActionFactories, FactoryContext, FactoryError, InstantiateError};

/// Placeable result of resolving one rule.
#[derive(Debug, Clone)]
pub enum Resolved {
	Separator,
	Action(ActionRef),
	/// History entries as `(label, action)`, in registry order.
	History(Vec<(String, ActionRef)>),
}

/// Recoverable resolution failures. Each one drops a single rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
	#[error("no source action at '{path}'")]
	UnknownPath { path: String },
	#[error("no factory registered for '{type_name}'")]
	UnknownType { type_name: String },
	#[error("failed to instantiate '{type_name}': {source}")]
	Instantiation {
		type_name: String,
		#[source]
		source: FactoryError,
	},
	#[error("'{type_name}' vetoed its inclusion")]
	Vetoed { type_name: String },
}

/// Resolves source specs against one flattened registry.
pub struct ActionResolver<'a> {
	registry: &'a ActionRegistry,
	factories: &'a ActionFactories,
	ctx: FactoryContext<'a>,
}

impl<'a> ActionResolver<'a> {
	pub fn new(registry: &'a ActionRegistry, factories: &'a ActionFactories, ctx: FactoryContext<'a>) -> Self {
		Self { registry, factories, ctx }
	}

	pub fn resolve(&self, spec: &SourceSpec) -> Result<Resolved, ResolveError> {
		match spec {
			SourceSpec::Separator => Ok(Resolved::Separator),
			SourceSpec::Path(path) => self.registry.get(path).cloned().map(Resolved::Action).ok_or_else(|| ResolveError::UnknownPath {
				path: path.render(self.registry.delimiter()),
			}),
			SourceSpec::History => Ok(Resolved::History(
				self.registry
					.history_entries()
					.filter_map(|(path, action)| Some((path.last()?.to_string(), action.clone())))
					.collect(),
			)),
			SourceSpec::Type(type_name) => self
				.factories
				.instantiate(type_name, &self.ctx, self.registry)
				.map(Resolved::Action)
				.map_err(|error| match error {
					InstantiateError::UnknownType => ResolveError::UnknownType {
						type_name: type_name.clone(),
					},
					InstantiateError::Failed(source) => ResolveError::Instantiation {
						type_name: type_name.clone(),
						source,
					},
					InstantiateError::Vetoed => ResolveError::Vetoed {
						type_name: type_name.clone(),
					},
				}),
		}
	}
}
