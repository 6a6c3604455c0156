//! Declarative configuration stores.

use indexmap::IndexMap;

/// One raw store entry, in store order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
	pub key: String,
	pub value: String,
	pub module: Option<String>,
}

impl RawEntry {
	pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			value: value.into(),
			module: None,
		}
	}

	pub fn gated(mut self, module: impl Into<String>) -> Self {
		self.module = Some(module.into());
		self
	}
}

/// Supplies ordered mapping triples per namespace.
pub trait MappingStore: Send + Sync {
	/// Returns the entries of `namespace` in declaration order; empty if unknown.
	fn entries(&self, namespace: &str) -> Vec<RawEntry>;
}

/// In-memory store keeping namespaces and entries in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
	namespaces: IndexMap<String, Vec<RawEntry>>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends an entry to `namespace`.
	pub fn push(&mut self, namespace: impl Into<String>, entry: RawEntry) {
		self.namespaces.entry(namespace.into()).or_default().push(entry);
	}

	/// Builder-style [`Self::push`].
	pub fn with(mut self, namespace: impl Into<String>, entry: RawEntry) -> Self {
		self.push(namespace, entry);
		self
	}

	/// Appends every namespace of `other` after the entries already present.
	pub fn extend(&mut self, other: MemoryStore) {
		for (namespace, entries) in other.namespaces {
			self.namespaces.entry(namespace).or_default().extend(entries);
		}
	}

	pub fn namespaces(&self) -> impl Iterator<Item = &str> {
		self.namespaces.keys().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.namespaces.values().map(Vec::len).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl MappingStore for MemoryStore {
	fn entries(&self, namespace: &str) -> Vec<RawEntry> {
		self.namespaces.get(namespace).cloned().unwrap_or_default()
	}
}
