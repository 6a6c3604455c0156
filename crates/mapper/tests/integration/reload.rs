use std::path::Path;
use std::sync::Arc;

use menuweave_mapper::{ActionFactories, MapperRegistry, WindowId};
use menuweave_mapping::load::{BASE_FILE, FileStore, OVERLAY_FILE};
use menuweave_mapping::{MappingStore, MemoryStore, RawEntry};
use pretty_assertions::assert_eq;

use crate::common::{editor_window, init_tracing, menubar_mapper, recent_item};

fn write_file(path: &Path, content: &str) {
	std::fs::write(path, content).expect("failed to write mapping file");
}

#[test]
fn recent_file_update_reaches_every_window() {
	init_tracing();
	let store: Arc<dyn MappingStore> = Arc::new(MemoryStore::new().with("menubar", RawEntry::new("File->Recent", "RECENT_FILES")));
	let registry = MapperRegistry::new();
	let hosts = [editor_window(&["/a.xml"]), editor_window(&["/a.xml"])];

	for (window, host) in hosts.iter().enumerate() {
		let mapper = menubar_mapper(window as u64, Arc::clone(&store), ActionFactories::new(), host);
		mapper.build().expect("initial build");
		registry.register(mapper);
	}
	assert_eq!(hosts[0].outline(), "File/\n  Recent/\n    /a.xml\n");

	for host in &hosts {
		let performed = Arc::clone(&host.performed);
		host.edit_source(|menu| {
			let recent = menu
				.find_mut("File")
				.and_then(|file| file.children_mut().iter_mut().find(|item| item.label() == "Recent Files"))
				.expect("recent files branch");
			recent.insert_child(0, recent_item(&performed, "/b.xml"));
		});
	}

	let outcomes = registry.reload_all();
	assert_eq!(outcomes.iter().map(|o| o.window).collect::<Vec<_>>(), vec![WindowId(0), WindowId(1)]);
	assert!(outcomes.iter().all(|o| o.result.is_ok()));
	for host in &hosts {
		assert_eq!(host.outline(), "File/\n  Recent/\n    /b.xml\n    /a.xml\n");
		assert_eq!(host.install_count(), 2);
	}
}

#[test]
fn store_reload_applies_through_registry() {
	init_tracing();
	let dir = tempfile::tempdir().expect("temp dir");
	write_file(
		&dir.path().join(BASE_FILE),
		r#"
namespace "menubar" {
    map "Ops->Save" "FILE->SAVE"
    map "Ops->SEP" "SEPARATOR"
    map "Ops->Copy" "EDIT->COPY"
}
"#,
	);

	let (store, report) = FileStore::open(dir.path());
	assert!(report.errors.is_empty(), "{:?}", report.errors);
	let store = Arc::new(store);

	let host = editor_window(&[]);
	let registry = MapperRegistry::new();
	let mapper = menubar_mapper(1, Arc::clone(&store) as Arc<dyn MappingStore>, ActionFactories::new(), &host);
	registry.register(Arc::clone(&mapper));
	registry.reload_all();
	assert_eq!(host.outline(), "Ops/\n  Save\n  ---\n  Copy\n");

	write_file(
		&dir.path().join(OVERLAY_FILE),
		r#"
namespace "menubar" {
    map "Ops->Save" "EDIT->PASTE"
    map "Extra->Close" "FILE->CLOSE"
}
"#,
	);
	store.reload();
	registry.reload_all();
	assert_eq!(host.outline(), "Ops/\n  Save\n  ---\n  Copy\nExtra/\n  Close\n");

	write_file(&dir.path().join(BASE_FILE), "namespace \"menubar\" {");
	std::fs::remove_file(dir.path().join(OVERLAY_FILE)).expect("remove overlay");
	let report = store.reload();
	assert_eq!(report.errors.len(), 1);
	let outcomes = registry.reload_all();
	assert!(outcomes[0].result.is_ok());
	assert_eq!(host.outline(), "Ops/\n  Save\n  ---\n  Copy\nExtra/\n  Close\n");
}

#[test]
fn closed_windows_are_not_rebuilt() {
	init_tracing();
	let store: Arc<dyn MappingStore> = Arc::new(MemoryStore::new().with("menubar", RawEntry::new("Ops->Save", "FILE->SAVE")));
	let registry = MapperRegistry::new();
	let open = editor_window(&[]);
	let closed = editor_window(&[]);
	registry.register(menubar_mapper(1, Arc::clone(&store), ActionFactories::new(), &open));
	registry.register(menubar_mapper(2, Arc::clone(&store), ActionFactories::new(), &closed));

	assert_eq!(registry.unregister(WindowId(2)), 1);
	let outcomes = registry.reload_all();
	assert_eq!(outcomes.len(), 1);
	assert_eq!(open.install_count(), 1);
	assert_eq!(closed.install_count(), 0);
}
