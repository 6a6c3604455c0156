use std::sync::Arc;

use menuweave_actions::{Action, ActionAttrs, ActionEvent, ActionRef, ActionRegistry};
use menuweave_mapper::{ActionFactories, BuildError, FactoryError, InitializableAction, Instance, MenuEntry, ResolveError, WindowId};
use menuweave_mapping::{MemoryStore, RawEntry};
use pretty_assertions::assert_eq;

use crate::common::{WindowHost, editor_window, init_tracing, menubar_mapper};

fn rules(entries: &[(&str, &str)]) -> Arc<MemoryStore> {
	let mut store = MemoryStore::new();
	for (key, value) in entries {
		store.push("menubar", RawEntry::new(*key, *value));
	}
	Arc::new(store)
}

/// Forwards to `FILE->SAVE` and refuses to appear without it.
struct SaveAs {
	attrs: ActionAttrs,
	save: Option<ActionRef>,
}

impl Action for SaveAs {
	fn attrs(&self) -> &ActionAttrs {
		&self.attrs
	}

	fn perform(&self, event: &ActionEvent) {
		if let Some(save) = &self.save {
			save.perform(event);
		}
	}
}

impl InitializableAction for SaveAs {
	fn initialize(&mut self, registry: &ActionRegistry) -> bool {
		self.save = registry.lookup("FILE->SAVE").cloned();
		self.save.is_some()
	}
}

fn factories() -> ActionFactories {
	let mut factories = ActionFactories::new();
	factories
		.register("SaveAs", |ctx| {
			Ok(Instance::initializable(SaveAs {
				attrs: ActionAttrs::new(format!("Save As ({})", ctx.window.title)),
				save: None,
			}))
		})
		.register_legacy("About", |window| Ok(Instance::plain(AboutAction(ActionAttrs::new(format!("About {}", window.id))))))
		.register("Unlicensed", |_| Err(FactoryError::msg("feature not licensed")));
	factories
}

struct AboutAction(ActionAttrs);

impl Action for AboutAction {
	fn attrs(&self) -> &ActionAttrs {
		&self.0
	}

	fn perform(&self, _event: &ActionEvent) {}
}

#[test]
fn path_references_and_separators() {
	init_tracing();
	let host = editor_window(&[]);
	let mapper = menubar_mapper(1, rules(&[("Ops->Save", "FILE->SAVE"), ("Ops->~Copy", "EDIT->COPY"), ("Ops->SEP1", "SEPARATOR")]), factories(), &host);

	let report = mapper.build().expect("mapping should build");
	assert_eq!(host.outline(), "Ops/\n  Save\n  Copy [C]\n  ---\n");
	assert_eq!(report.placed, 3);

	let menu = host.installed().expect("menu installed");
	let save = menu.find(["ops", "save"]).and_then(MenuEntry::as_item).expect("save placed");
	assert_eq!(save.accelerator(), Some("Ctrl+S"));
}

#[test]
fn empty_targets_are_pruned_and_order_is_kept() {
	init_tracing();
	let host = editor_window(&[]);
	let mapper = menubar_mapper(
		1,
		rules(&[
			("Tools->SEP", "SEPARATOR"),
			("Help->Contents", "HELP->CONTENTS"),
			("Edit->Paste", "EDIT->PASTE"),
			("Edit->SEP", "SEPARATOR"),
			("File->Close", "FILE->CLOSE"),
			("Edit->Copy", "EDIT->COPY"),
		]),
		factories(),
		&host,
	);

	let report = mapper.build().expect("mapping should build");
	assert_eq!(host.outline(), "Edit/\n  Paste\n  ---\n  Copy\nFile/\n  Close\n");
	assert_eq!(report.pruned_containers, 1);
	assert_eq!(
		report.problems[0].error,
		ResolveError::UnknownPath {
			path: "HELP->CONTENTS".into()
		}
	);
}

#[test]
fn listener_items_forward_invocations() {
	init_tracing();
	let host = editor_window(&[]);
	let mapper = menubar_mapper(1, rules(&[("Edit->Paste Special", "EDIT->PASTE")]), factories(), &host);
	mapper.build().expect("mapping should build");

	let menu = host.installed().expect("menu installed");
	menu.find(["Edit", "Paste Special"]).and_then(MenuEntry::as_item).expect("paste placed").activate();
	assert_eq!(*host.performed.lock(), vec!["Paste".to_string()]);
}

#[test]
fn dynamic_actions_use_the_factory_table() {
	init_tracing();
	let host = editor_window(&[]);
	let mapper = menubar_mapper(
		7,
		rules(&[("File->Save As", "SaveAs"), ("Help->About", "About"), ("Help->Register", "Unlicensed")]),
		factories(),
		&host,
	);

	let report = mapper.build().expect("mapping should build");
	assert_eq!(host.outline(), "File/\n  Save As\nHelp/\n  About\n");

	let menu = host.installed().expect("menu installed");
	let save_as = menu.find(["File", "Save As"]).and_then(MenuEntry::as_item).expect("save as placed");
	assert_eq!(save_as.action.label(), "Save As (window 7)");
	let about = menu.find(["Help", "About"]).and_then(MenuEntry::as_item).expect("about placed");
	assert_eq!(about.action.label(), "About window#7");

	assert_eq!(report.problems.len(), 1);
	assert!(matches!(&report.problems[0].error, ResolveError::Instantiation { type_name, .. } if type_name == "Unlicensed"));
}

#[test]
fn vetoed_actions_are_omitted() {
	init_tracing();
	let host = WindowHost::new(menuweave_actions::SourceMenu::default());
	let mapper = menubar_mapper(1, rules(&[("File->Save As", "SaveAs")]), factories(), &host);

	let report = mapper.build().expect("an empty hierarchy is still a successful build");
	assert_eq!(host.outline(), "");
	assert_eq!(host.install_count(), 1);
	assert_eq!(
		report.problems[0].error,
		ResolveError::Vetoed {
			type_name: "SaveAs".into()
		}
	);
}

#[test]
fn history_branch_expands_in_place() {
	init_tracing();
	let host = editor_window(&["/work/b.xml", "/work/A.xml"]);
	let mapper = menubar_mapper(1, rules(&[("File->~Recent", "RECENT_FILES"), ("File->SEP", "SEPARATOR"), ("File->Close", "FILE->CLOSE")]), factories(), &host);

	mapper.build().expect("mapping should build");
	assert_eq!(host.outline(), "File/\n  Recent/ [R]\n    /work/b.xml\n    /work/A.xml\n  ---\n  Close\n");
}

#[test]
fn missing_namespace_keeps_host_menu() {
	init_tracing();
	let host = editor_window(&[]);
	let store = Arc::new(MemoryStore::new().with("popup", RawEntry::new("Copy", "EDIT->COPY")));
	let mapper = menubar_mapper(3, store, factories(), &host);

	assert!(matches!(mapper.build(), Err(BuildError::Load(_))));
	assert_eq!(host.install_count(), 0);

	let windowless = Arc::new(WindowHost::default());
	let mapper = menubar_mapper(4, rules(&[("Ops->Save", "FILE->SAVE")]), factories(), &windowless);
	assert_eq!(mapper.build().err(), Some(BuildError::MissingSourceMenu { window: WindowId(4) }));
}

#[test]
fn recent_files_differing_in_case_are_both_listed() {
	init_tracing();
	let host = editor_window(&["/work/model.xml", "/work/Model.xml"]);
	let mapper = menubar_mapper(1, rules(&[("File->Recent", "RECENT_FILES")]), factories(), &host);

	let report = mapper.build().expect("mapping should build");
	assert_eq!(host.outline(), "File/\n  Recent/\n    /work/model.xml\n    /work/Model.xml\n");
	assert_eq!(report.skipped, 0);
}
