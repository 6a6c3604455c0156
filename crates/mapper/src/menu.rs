//! Remapped menu hierarchy handed to the host.

use std::fmt::Write as _;

use menuweave_actions::{ActionEvent, ActionRef};

/// Kind of top-level container being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuKind {
	MenuBar,
	ContextMenu,
}

/// Submenu container.
#[derive(Debug, Clone)]
pub struct MenuContainer {
	pub label: String,
	pub mnemonic: Option<char>,
	pub children: Vec<MenuEntry>,
}

/// Selectable leaf bound to an action.
#[derive(Debug, Clone)]
pub struct MenuItem {
	/// Menu text. The bound action keeps its own label as command identifier.
	pub label: String,
	pub mnemonic: Option<char>,
	pub action: ActionRef,
}

impl MenuItem {
	/// Fires the bound action from this entry.
	pub fn activate(&self) {
		self.action.perform(&ActionEvent::from_entry(self.action.as_ref(), &self.label));
	}

	pub fn accelerator(&self) -> Option<&str> {
		self.action.attrs().accelerator.as_deref()
	}

	pub fn tooltip(&self) -> Option<&str> {
		self.action.attrs().tooltip.as_deref()
	}

	pub fn icon(&self) -> Option<&str> {
		self.action.attrs().icon.as_deref()
	}
}

/// One node of the remapped hierarchy.
#[derive(Debug, Clone)]
pub enum MenuEntry {
	Menu(MenuContainer),
	Item(MenuItem),
	Separator,
}

impl MenuEntry {
	pub fn label(&self) -> Option<&str> {
		match self {
			MenuEntry::Menu(menu) => Some(&menu.label),
			MenuEntry::Item(item) => Some(&item.label),
			MenuEntry::Separator => None,
		}
	}

	pub fn is_separator(&self) -> bool {
		matches!(self, MenuEntry::Separator)
	}

	pub fn as_item(&self) -> Option<&MenuItem> {
		match self {
			MenuEntry::Item(item) => Some(item),
			_ => None,
		}
	}

	pub fn as_menu(&self) -> Option<&MenuContainer> {
		match self {
			MenuEntry::Menu(menu) => Some(menu),
			_ => None,
		}
	}
}

/// Complete remapped hierarchy for one menu bar or context menu.
#[derive(Debug, Clone)]
pub struct BuiltMenu {
	pub kind: MenuKind,
	pub entries: Vec<MenuEntry>,
}

impl BuiltMenu {
	/// Finds an entry by case-insensitive label path.
	pub fn find<'a>(&self, labels: impl IntoIterator<Item = &'a str>) -> Option<&MenuEntry> {
		let mut level = &self.entries;
		let mut found = None;
		for label in labels {
			let entry = level.iter().find(|e| e.label().is_some_and(|l| l.to_uppercase() == label.to_uppercase()))?;
			level = match entry {
				MenuEntry::Menu(menu) => &menu.children,
				_ => &EMPTY,
			};
			found = Some(entry);
		}
		found
	}

	/// Counts selectable items at every depth.
	pub fn item_count(&self) -> usize {
		fn count(entries: &[MenuEntry]) -> usize {
			entries
				.iter()
				.map(|e| match e {
					MenuEntry::Menu(menu) => count(&menu.children),
					MenuEntry::Item(_) => 1,
					MenuEntry::Separator => 0,
				})
				.sum()
		}
		count(&self.entries)
	}

	/// Renders an indented outline: containers end in `/`, mnemonics show as `[c]`,
	/// separators as `---`.
	pub fn outline(&self) -> String {
		fn render(out: &mut String, entries: &[MenuEntry], depth: usize) {
			for entry in entries {
				let indent = "  ".repeat(depth);
				match entry {
					MenuEntry::Menu(menu) => {
						let _ = writeln!(out, "{indent}{}/{}", menu.label, mnemonic_suffix(menu.mnemonic));
						render(out, &menu.children, depth + 1);
					}
					MenuEntry::Item(item) => {
						let _ = writeln!(out, "{indent}{}{}", item.label, mnemonic_suffix(item.mnemonic));
					}
					MenuEntry::Separator => {
						let _ = writeln!(out, "{indent}---");
					}
				}
			}
		}

		let mut out = String::new();
		render(&mut out, &self.entries, 0);
		out
	}
}

static EMPTY: Vec<MenuEntry> = Vec::new();

fn mnemonic_suffix(mnemonic: Option<char>) -> String {
	mnemonic.map(|c| format!(" [{c}]")).unwrap_or_default()
}
