//! Host window seam.

use std::sync::Arc;

use menuweave_actions::SourceMenu;

use crate::menu::BuiltMenu;

/// View side of one host window.
pub trait MenuHost: Send + Sync {
	/// Returns the current unmapped source hierarchy, or `None` if the window has none.
	fn source_menu(&self) -> Option<Arc<SourceMenu>>;

	/// Replaces the window's visible hierarchy with `menu`.
	fn install(&self, menu: BuiltMenu);
}
