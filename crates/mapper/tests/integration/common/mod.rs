//! Common fixtures for mapper integration tests.

use std::sync::Arc;

use menuweave_actions::{ActionAttrs, ActionEvent, CallbackAction, SourceItem, SourceMenu};
use menuweave_mapper::{ActionFactories, BuiltMenu, MapperEnv, MenuHost, MenuKind, MenuMapper, WindowContext};
use menuweave_mapping::{MappingScope, MappingStore};
use parking_lot::Mutex;

pub fn init_tracing() {
	let _ = tracing_subscriber::fmt::try_init();
}

/// In-memory window: a replaceable source hierarchy plus the last installed menu.
#[derive(Default)]
pub struct WindowHost {
	source: Mutex<Option<Arc<SourceMenu>>>,
	installed: Mutex<Option<BuiltMenu>>,
	installs: Mutex<usize>,
	/// Commands performed through listener-backed source items.
	pub performed: Arc<Mutex<Vec<String>>>,
}

impl WindowHost {
	pub fn new(menu: SourceMenu) -> Arc<Self> {
		let host = Self::default();
		*host.source.lock() = Some(Arc::new(menu));
		Arc::new(host)
	}

	/// Applies `edit` to a copy of the source hierarchy and swaps it in.
	pub fn edit_source(&self, edit: impl FnOnce(&mut SourceMenu)) {
		let mut source = self.source.lock();
		let mut menu = source.as_deref().cloned().unwrap_or_default();
		edit(&mut menu);
		*source = Some(Arc::new(menu));
	}

	pub fn installed(&self) -> Option<BuiltMenu> {
		self.installed.lock().clone()
	}

	pub fn outline(&self) -> String {
		self.installed().map(|menu| menu.outline()).unwrap_or_default()
	}

	pub fn install_count(&self) -> usize {
		*self.installs.lock()
	}
}

impl MenuHost for WindowHost {
	fn source_menu(&self) -> Option<Arc<SourceMenu>> {
		self.source.lock().clone()
	}

	fn install(&self, menu: BuiltMenu) {
		*self.installed.lock() = Some(menu);
		*self.installs.lock() += 1;
	}
}

fn recorder(log: &Arc<Mutex<Vec<String>>>) -> impl Fn(&ActionEvent) + Send + Sync + 'static {
	let log = Arc::clone(log);
	move |event: &ActionEvent| log.lock().push(event.command.to_string())
}

/// `File{Save, Close, Recent Files{..}}`, `Edit{Copy, Paste}`, `Help{}`.
pub fn editor_source(performed: &Arc<Mutex<Vec<String>>>, recent: &[&str]) -> SourceMenu {
	SourceMenu::new([
		SourceItem::branch(
			"File",
			[
				SourceItem::with_action(CallbackAction::shared(ActionAttrs::new("Save").with_accelerator("Ctrl+S"), |_| {})),
				SourceItem::new(ActionAttrs::new("Close")).listener(recorder(performed)),
				SourceItem::branch("Recent Files", recent.iter().map(|path| recent_item(performed, path))),
			],
		),
		SourceItem::branch(
			"Edit",
			[
				SourceItem::with_action(CallbackAction::shared(ActionAttrs::new("Copy"), |_| {})),
				SourceItem::new(ActionAttrs::new("Paste")).listener(recorder(performed)),
			],
		),
		SourceItem::branch("Help", Vec::<SourceItem>::new()),
	])
}

pub fn recent_item(performed: &Arc<Mutex<Vec<String>>>, path: &str) -> SourceItem {
	SourceItem::new(ActionAttrs::new(path)).listener(recorder(performed))
}

/// Source hierarchy with `performed` wired to the host's recorder.
pub fn editor_window(recent: &[&str]) -> Arc<WindowHost> {
	let host = WindowHost::default();
	*host.source.lock() = Some(Arc::new(editor_source(&host.performed, recent)));
	Arc::new(host)
}

pub fn menubar_mapper(window: u64, store: Arc<dyn MappingStore>, factories: ActionFactories, host: &Arc<WindowHost>) -> Arc<MenuMapper> {
	let env = MapperEnv::new(store, Arc::new(factories));
	Arc::new(MenuMapper::new(
		env,
		WindowContext::new(window, format!("window {window}")),
		MenuKind::MenuBar,
		MappingScope::new("menubar"),
		Arc::clone(host) as Arc<dyn MenuHost>,
	))
}
