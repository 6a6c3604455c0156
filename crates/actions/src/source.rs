//! Host-owned source hierarchy.

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::action::{ActionAttrs, ActionRef, CallbackAction, InvocationListener};

/// A labelled node of the host's menu hierarchy.
///
/// Items without children are leaves; they expose either a native action or one or more
/// invocation listeners. Everything else is a branch.
#[derive(Clone, Default)]
pub struct SourceItem {
	attrs: ActionAttrs,
	action: Option<ActionRef>,
	listeners: Vec<InvocationListener>,
	children: Vec<SourceItem>,
	/// Memoized listener forwarder so repeated flattening yields the same action object.
	synthesized: OnceLock<ActionRef>,
}

impl SourceItem {
	/// Creates a childless item with presentation `attrs`.
	pub fn new(attrs: ActionAttrs) -> Self {
		Self {
			attrs,
			..Self::default()
		}
	}

	/// Creates a leaf bound to a native action, presented with the action's attributes.
	pub fn with_action(action: ActionRef) -> Self {
		Self {
			attrs: action.attrs().clone(),
			action: Some(action),
			..Self::default()
		}
	}

	/// Creates a branch labelled `label`.
	pub fn branch(label: impl Into<String>, children: impl IntoIterator<Item = SourceItem>) -> Self {
		Self {
			attrs: ActionAttrs::new(label),
			children: children.into_iter().collect(),
			..Self::default()
		}
	}

	/// Adds an invocation listener.
	pub fn listener(mut self, listener: impl Fn(&crate::ActionEvent) + Send + Sync + 'static) -> Self {
		self.listeners.push(Arc::new(listener));
		self
	}

	pub fn push_child(&mut self, child: SourceItem) {
		self.children.push(child);
	}

	/// Inserts a child at `index`, clamped to the current length.
	pub fn insert_child(&mut self, index: usize, child: SourceItem) {
		let index = index.min(self.children.len());
		self.children.insert(index, child);
	}

	pub fn label(&self) -> &str {
		&self.attrs.label
	}

	pub fn attrs(&self) -> &ActionAttrs {
		&self.attrs
	}

	pub fn children(&self) -> &[SourceItem] {
		&self.children
	}

	pub fn children_mut(&mut self) -> &mut Vec<SourceItem> {
		&mut self.children
	}

	pub fn is_leaf(&self) -> bool {
		self.children.is_empty()
	}

	pub fn native_action(&self) -> Option<&ActionRef> {
		self.action.as_ref()
	}

	pub fn listeners(&self) -> &[InvocationListener] {
		&self.listeners
	}

	/// Returns the native action, or a forwarder to the first listener.
	///
	/// The forwarder copies this item's presentation attributes and is created once per item.
	pub fn effective_action(&self) -> Option<ActionRef> {
		if let Some(action) = &self.action {
			return Some(Arc::clone(action));
		}

		let listener = self.listeners.first()?;
		let action = self
			.synthesized
			.get_or_init(|| Arc::new(CallbackAction::from_listener(self.attrs.clone(), Arc::clone(listener))));
		Some(Arc::clone(action))
	}
}

impl fmt::Debug for SourceItem {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SourceItem")
			.field("label", &self.attrs.label)
			.field("action", &self.action.as_ref().map(|a| a.label().to_string()))
			.field("listeners", &self.listeners.len())
			.field("children", &self.children)
			.finish()
	}
}

/// Top-level source hierarchy (a menu bar or a context menu).
#[derive(Debug, Clone, Default)]
pub struct SourceMenu {
	items: Vec<SourceItem>,
}

impl SourceMenu {
	pub fn new(items: impl IntoIterator<Item = SourceItem>) -> Self {
		Self {
			items: items.into_iter().collect(),
		}
	}

	pub fn items(&self) -> &[SourceItem] {
		&self.items
	}

	pub fn items_mut(&mut self) -> &mut Vec<SourceItem> {
		&mut self.items
	}

	/// Finds a top-level item by case-insensitive label.
	pub fn find_mut(&mut self, label: &str) -> Option<&mut SourceItem> {
		self.items.iter_mut().find(|item| item.label().eq_ignore_ascii_case(label))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::action::same_action;

	#[test]
	fn listener_forwarder_is_memoized() {
		let item = SourceItem::new(ActionAttrs::new("Close").with_mnemonic('C')).listener(|_| {});
		let first = item.effective_action().expect("listener leaf should synthesize an action");
		let second = item.effective_action().expect("listener leaf should synthesize an action");
		assert!(same_action(&first, &second));
		assert_eq!(first.attrs().mnemonic, Some('C'));
	}

	#[test]
	fn bare_leaf_has_no_action() {
		assert!(SourceItem::new(ActionAttrs::new("Nothing")).effective_action().is_none());
	}

	#[test]
	fn insert_child_clamps_index() {
		let mut branch = SourceItem::branch("File", Vec::new());
		branch.insert_child(10, SourceItem::new(ActionAttrs::new("A")));
		branch.insert_child(0, SourceItem::new(ActionAttrs::new("B")));
		let labels: Vec<_> = branch.children().iter().map(SourceItem::label).collect();
		assert_eq!(labels, vec!["B", "A"]);
	}
}
