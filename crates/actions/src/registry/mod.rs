//! Path-keyed lookup table flattened from a source hierarchy.

use indexmap::IndexMap;
use indexmap::map::Entry;
use rustc_hash::FxHashSet;
use tracing::{debug, warn};

use crate::action::ActionRef;
use crate::path::ActionPath;
use crate::source::{SourceItem, SourceMenu};
use crate::syntax::ReservedSyntax;


/// One flattened leaf.
#[derive(Debug, Clone)]
pub struct RegistryEntry {
	pub action: ActionRef,
	/// True if the leaf sits below the history branch.
	pub in_history: bool,
}

/// Flattened source hierarchy, iterated in depth-first walk order.
#[derive(Debug, Clone)]
pub struct ActionRegistry {
	entries: IndexMap<ActionPath, RegistryEntry>,
	syntax: ReservedSyntax,
}

/// Walk state for one flatten pass.
struct Flatten<'a> {
	syntax: &'a ReservedSyntax,
	entries: IndexMap<ActionPath, RegistryEntry>,
	seen: FxHashSet<*const ()>,
}

impl ActionRegistry {
	/// Flattens `menu` into a registry.
	///
	/// Leaves contribute one entry each; an action reachable through several leaves is
	/// registered only under the first path the walk meets.
	pub fn build(menu: &SourceMenu, syntax: &ReservedSyntax) -> Self {
		let mut walk = Flatten {
			syntax,
			entries: IndexMap::new(),
			seen: FxHashSet::default(),
		};

		let root = ActionPath::new();
		for item in menu.items() {
			walk.visit(item, &root, false);
		}

		debug!(entries = walk.entries.len(), "flattened source hierarchy");

		Self {
			entries: walk.entries,
			syntax: syntax.clone(),
		}
	}

	/// Looks up `path`. Segments below the history branch match case-sensitively.
	pub fn get(&self, path: &ActionPath) -> Option<&ActionRef> {
		self.entries.get(&self.key(path)).map(|entry| &entry.action)
	}

	/// Case-insensitive lookup of a delimited path string.
	pub fn lookup(&self, raw: &str) -> Option<&ActionRef> {
		self.get(&ActionPath::parse(raw, &self.syntax.delimiter))
	}

	pub fn contains(&self, raw: &str) -> bool {
		self.lookup(raw).is_some()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn delimiter(&self) -> &str {
		&self.syntax.delimiter
	}

	pub fn iter(&self) -> impl Iterator<Item = (&ActionPath, &RegistryEntry)> {
		self.entries.iter()
	}

	/// Entries below the history branch, in registry order.
	pub fn history_entries(&self) -> impl Iterator<Item = (&ActionPath, &ActionRef)> {
		self.entries.iter().filter(|(_, entry)| entry.in_history).map(|(path, entry)| (path, &entry.action))
	}

	/// Rewrites `path` into the key form used at flatten time.
	fn key(&self, path: &ActionPath) -> ActionPath {
		let mut key = ActionPath::new();
		let mut below_history = false;
		for (index, segment) in path.segments().enumerate() {
			if below_history || path.is_exact(index) {
				key.push_exact(segment);
			} else {
				key.push(segment);
			}
			below_history = below_history || self.syntax.is_history_branch(segment);
		}
		key
	}
}

impl Flatten<'_> {
	fn visit(&mut self, item: &SourceItem, parent: &ActionPath, in_history: bool) {
		let label = item.label().trim();
		let is_history_branch = self.syntax.is_history_branch(label);
		let path = if in_history {
			parent.child_exact(label)
		} else if is_history_branch {
			parent.child(label)
		} else {
			parent.child(label.to_uppercase())
		};

		if !item.is_leaf() {
			for child in item.children() {
				self.visit(child, &path, in_history || is_history_branch);
			}
			return;
		}

		if item.native_action().is_none() && item.listeners().len() > 1 {
			warn!(path = %path.render(&self.syntax.delimiter), listeners = item.listeners().len(), "only the first listener of a source item is forwarded");
		}

		let Some(action) = item.effective_action() else {
			debug!(path = %path.render(&self.syntax.delimiter), "source leaf has no action");
			return;
		};

		let identity = std::sync::Arc::as_ptr(&action) as *const ();
		if self.seen.contains(&identity) {
			debug!(path = %path.render(&self.syntax.delimiter), "action already registered under another path");
			return;
		}

		match self.entries.entry(path) {
			Entry::Vacant(slot) => {
				self.seen.insert(identity);
				slot.insert(RegistryEntry { action, in_history });
			}
			Entry::Occupied(slot) => {
				debug!(path = %slot.key().render(&self.syntax.delimiter), "duplicate source path, keeping first");
			}
		}
	}
}
