//! Mapping rule types.

use menuweave_actions::{ActionPath, ReservedSyntax};

use crate::modules::ModuleActivation;

/// Classified source reference of a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
	/// Emit a separator.
	Separator,
	/// Expand into every entry below the source history branch.
	History,
	/// Look up an existing action by path.
	Path(ActionPath),
	/// Instantiate a dynamic action through the factory table.
	Type(String),
}

impl SourceSpec {
	/// Classifies a raw rule value. Markers win over path references; anything else is a type name.
	pub fn classify(raw: &str, syntax: &ReservedSyntax) -> Self {
		let raw = raw.trim();
		if syntax.is_separator(raw) {
			SourceSpec::Separator
		} else if syntax.is_history_marker(raw) {
			SourceSpec::History
		} else if syntax.is_path_reference(raw) {
			SourceSpec::Path(ActionPath::parse(raw, &syntax.delimiter))
		} else {
			SourceSpec::Type(raw.to_string())
		}
	}
}

/// One declarative instruction: place `source` at `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingRule {
	/// Target path with the scope prefix stripped. Segments still carry mnemonic markers.
	pub target: ActionPath,
	pub source: SourceSpec,
	/// Rule value as written, for diagnostics.
	pub raw_source: String,
	/// Module that must be active for the rule to apply.
	pub module: Option<String>,
	/// Position in the store's entry list.
	pub ordinal: usize,
}

impl MappingRule {
	/// Returns true if the rule has no activation module or its module is active.
	pub fn is_enabled(&self, modules: &dyn ModuleActivation) -> bool {
		self.module.as_deref().is_none_or(|module| modules.is_active(module))
	}
}

/// Selects the rules of one target hierarchy kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingScope {
	pub namespace: String,
	/// Reserved leading key segment (e.g. `ACTOR`), stripped from matching keys.
	pub base_prefix: Option<String>,
}

impl MappingScope {
	pub fn new(namespace: impl Into<String>) -> Self {
		Self {
			namespace: namespace.into(),
			base_prefix: None,
		}
	}

	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.base_prefix = Some(prefix.into());
		self
	}
}
