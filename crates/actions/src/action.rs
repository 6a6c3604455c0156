//! Invocable action capability.

use std::fmt;
use std::sync::Arc;

/// Presentation attributes carried by an action or a source item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionAttrs {
	/// Display label. For host actions this doubles as the legacy command identifier.
	pub label: String,
	pub icon: Option<String>,
	pub mnemonic: Option<char>,
	/// Accelerator in host notation (e.g. `ctrl-s`).
	pub accelerator: Option<String>,
	pub tooltip: Option<String>,
}

impl ActionAttrs {
	pub fn new(label: impl Into<String>) -> Self {
		Self {
			label: label.into(),
			..Self::default()
		}
	}

	pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
		self.icon = Some(icon.into());
		self
	}

	pub fn with_mnemonic(mut self, mnemonic: char) -> Self {
		self.mnemonic = Some(mnemonic);
		self
	}

	pub fn with_accelerator(mut self, accelerator: impl Into<String>) -> Self {
		self.accelerator = Some(accelerator.into());
		self
	}

	pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
		self.tooltip = Some(tooltip.into());
		self
	}
}

/// Triggering context passed to [`Action::perform`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionEvent {
	/// Command identifier: the action's own label, not the remapped menu text.
	pub command: Arc<str>,
	/// Display text of the menu entry that fired the action, if any.
	pub origin: Option<Arc<str>>,
}

impl ActionEvent {
	pub fn new(command: impl Into<Arc<str>>) -> Self {
		Self {
			command: command.into(),
			origin: None,
		}
	}

	/// Builds the event an entry labelled `origin` sends to `action`.
	pub fn from_entry(action: &dyn Action, origin: &str) -> Self {
		Self {
			command: Arc::from(action.label()),
			origin: Some(Arc::from(origin)),
		}
	}
}

/// An invocable, labelled capability.
pub trait Action: Send + Sync {
	/// Returns the presentation attributes.
	fn attrs(&self) -> &ActionAttrs;

	/// Invokes the action.
	fn perform(&self, event: &ActionEvent);

	fn label(&self) -> &str {
		&self.attrs().label
	}
}

impl fmt::Debug for dyn Action {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Action").field("label", &self.label()).finish_non_exhaustive()
	}
}

/// Shared handle to an action. Identity is the pointer, see [`same_action`].
pub type ActionRef = Arc<dyn Action>;

/// Callback attached to a source item in place of a native action.
pub type InvocationListener = Arc<dyn Fn(&ActionEvent) + Send + Sync>;

/// Returns true if both handles point at the same action object.
pub fn same_action(a: &ActionRef, b: &ActionRef) -> bool {
	std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// Action forwarding to a plain callback.
///
/// Used for listener-only source items and by hosts that do not need a custom type.
pub struct CallbackAction {
	attrs: ActionAttrs,
	callback: InvocationListener,
}

impl CallbackAction {
	pub fn new(attrs: ActionAttrs, callback: impl Fn(&ActionEvent) + Send + Sync + 'static) -> Self {
		Self {
			attrs,
			callback: Arc::new(callback),
		}
	}

	/// Wraps an existing listener without re-boxing it.
	pub fn from_listener(attrs: ActionAttrs, callback: InvocationListener) -> Self {
		Self { attrs, callback }
	}

	/// Convenience for a shared action handle.
	pub fn shared(attrs: ActionAttrs, callback: impl Fn(&ActionEvent) + Send + Sync + 'static) -> ActionRef {
		Arc::new(Self::new(attrs, callback))
	}
}

impl Action for CallbackAction {
	fn attrs(&self) -> &ActionAttrs {
		&self.attrs
	}

	fn perform(&self, event: &ActionEvent) {
		(self.callback)(event);
	}
}

impl fmt::Debug for CallbackAction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CallbackAction").field("attrs", &self.attrs).finish_non_exhaustive()
	}
}
