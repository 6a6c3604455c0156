//! Incremental construction of the remapped hierarchy.
//!
//! # Role
//!
//! Rules are appended one at a time in declaration order. Intermediate containers are
//! created on first use and reused through a path-keyed node cache, so sibling order is the
//! order in which rules first touch a container.
//!
//! # Separators
//!
//! A separator is placed only after its container's first child and never directly after
//! another separator. With [`SeparatorPolicy::BuildWide`] "directly after" is tracked across
//! the whole build pass, so a separator added to one container also suppresses an immediately
//! following separator in a different container.
//!
//! # Pruning
//!
//! [`HierarchyBuilder::finish`] removes containers left without children, bottom-up, then
//! drops leading separators and collapses separator runs exposed by the removal.

use menuweave_actions::{ActionPath, ActionRef, ReservedSyntax};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::menu::{BuiltMenu, MenuContainer, MenuEntry, MenuItem, MenuKind};


/// Scope of the "separator just added" flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SeparatorPolicy {
	/// One flag for the whole build pass.
	#[default]
	BuildWide,
	/// Each container only looks at its own last child.
	PerContainer,
}

/// One parsed target segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
	pub text: String,
	pub mnemonic: Option<char>,
	/// Taken verbatim and matched case-sensitively (file-system names).
	pub literal: bool,
}

/// Target path split into display segments with mnemonics extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetPath {
	segments: Vec<Segment>,
}

impl TargetPath {
	/// Parses every segment of `raw` for a mnemonic marker.
	pub fn parse(raw: &ActionPath, syntax: &ReservedSyntax) -> Self {
		Self {
			segments: raw
				.segments()
				.map(|segment| {
					let (text, mnemonic) = syntax.split_mnemonic(segment);
					Segment {
						text,
						mnemonic,
						literal: false,
					}
				})
				.collect(),
		}
	}

	/// Appends `label` verbatim, without mnemonic parsing.
	pub fn child_literal(&self, label: &str) -> Self {
		let mut segments = self.segments.clone();
		segments.push(Segment {
			text: label.to_string(),
			mnemonic: None,
			literal: true,
		});
		Self { segments }
	}

	/// Cache key: the mnemonic-free path. Literal segments keep their case.
	pub fn key(&self) -> ActionPath {
		let mut key = ActionPath::new();
		for segment in &self.segments {
			if segment.literal {
				key.push_exact(segment.text.as_str());
			} else {
				key.push(segment.text.as_str());
			}
		}
		key
	}

	pub fn segments(&self) -> &[Segment] {
		&self.segments
	}

	pub fn is_empty(&self) -> bool {
		self.segments.is_empty()
	}
}

/// What a rule places at its target.
#[derive(Debug, Clone)]
pub enum Placement {
	Action(ActionRef),
	Separator,
}

/// Handle to a node created by the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
	const ROOT: NodeId = NodeId(0);

	fn index(self) -> usize {
		self.0 as usize
	}
}

/// Why [`HierarchyBuilder::add_entry`] placed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skipped {
	/// The target path was already placed; the first rule wins.
	DuplicateTarget,
	/// Leading or repeated separator.
	SeparatorSuppressed,
	/// An intermediate segment names an existing leaf or separator.
	ParentNotContainer,
	EmptyTarget,
}

#[derive(Debug)]
enum NodeKind {
	Container { children: Vec<NodeId> },
	Item { action: ActionRef },
	Separator,
	/// Removed by pruning.
	Pruned,
}

#[derive(Debug)]
struct Node {
	label: String,
	mnemonic: Option<char>,
	kind: NodeKind,
}

/// Builds one remapped hierarchy from rules appended in order.
#[derive(Debug)]
pub struct HierarchyBuilder {
	kind: MenuKind,
	policy: SeparatorPolicy,
	nodes: Vec<Node>,
	cache: FxHashMap<ActionPath, NodeId>,
	separator_added: bool,
}

/// Counts gathered by [`HierarchyBuilder::finish`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FinishStats {
	pub pruned_containers: usize,
	pub dropped_separators: usize,
}

impl HierarchyBuilder {
	pub fn new(kind: MenuKind, policy: SeparatorPolicy) -> Self {
		Self {
			kind,
			policy,
			nodes: vec![Node {
				label: String::new(),
				mnemonic: None,
				kind: NodeKind::Container { children: Vec::new() },
			}],
			cache: FxHashMap::default(),
			separator_added: false,
		}
	}

	/// Places `placement` at `target`, creating missing ancestors.
	pub fn add_entry(&mut self, target: &TargetPath, placement: Placement) -> Result<NodeId, Skipped> {
		let Some((last, ancestors)) = target.segments().split_last() else {
			return Err(Skipped::EmptyTarget);
		};

		let key = target.key();
		if self.cache.contains_key(&key) {
			debug!(target = %key, "duplicate target path; keeping first rule");
			return Err(Skipped::DuplicateTarget);
		}

		let mut parent = NodeId::ROOT;
		let mut so_far = ActionPath::new();
		for segment in ancestors {
			if segment.literal {
				so_far.push_exact(segment.text.as_str());
			} else {
				so_far.push(segment.text.as_str());
			}
			parent = match self.cache.get(&so_far) {
				Some(&id) if self.is_container(id) => id,
				Some(_) => {
					debug!(target = %key, at = %so_far, "target nests below a non-container");
					return Err(Skipped::ParentNotContainer);
				}
				None => {
					let id = self.attach(parent, segment, NodeKind::Container { children: Vec::new() });
					self.cache.insert(so_far.clone(), id);
					id
				}
			};
		}

		let id = match placement {
			Placement::Separator => {
				if !self.separator_allowed(parent) {
					debug!(target = %key, "separator suppressed");
					return Err(Skipped::SeparatorSuppressed);
				}
				let id = self.attach(parent, last, NodeKind::Separator);
				self.separator_added = true;
				id
			}
			Placement::Action(action) => {
				let mnemonic = last.mnemonic.or(action.attrs().mnemonic);
				let segment = Segment {
					mnemonic,
					..last.clone()
				};
				self.attach(parent, &segment, NodeKind::Item { action })
			}
		};

		self.cache.insert(key, id);
		Ok(id)
	}

	/// Prunes empty containers and returns the finished hierarchy.
	pub fn finish(mut self) -> (BuiltMenu, FinishStats) {
		let mut stats = FinishStats::default();
		self.prune(NodeId::ROOT, &mut stats);

		if stats.pruned_containers > 0 {
			debug!(containers = stats.pruned_containers, separators = stats.dropped_separators, "pruned empty branches");
		}

		let entries = self.export_children(NodeId::ROOT);
		(BuiltMenu { kind: self.kind, entries }, stats)
	}

	fn is_container(&self, id: NodeId) -> bool {
		matches!(self.nodes[id.index()].kind, NodeKind::Container { .. })
	}

	fn children(&self, id: NodeId) -> &[NodeId] {
		match &self.nodes[id.index()].kind {
			NodeKind::Container { children } => children,
			_ => &[],
		}
	}

	fn separator_allowed(&self, parent: NodeId) -> bool {
		let children = self.children(parent);
		let Some(&last) = children.last() else {
			return false;
		};
		match self.policy {
			SeparatorPolicy::BuildWide => !self.separator_added,
			SeparatorPolicy::PerContainer => !matches!(self.nodes[last.index()].kind, NodeKind::Separator),
		}
	}

	fn attach(&mut self, parent: NodeId, segment: &Segment, kind: NodeKind) -> NodeId {
		let id = NodeId(self.nodes.len() as u32);
		self.nodes.push(Node {
			label: segment.text.clone(),
			mnemonic: segment.mnemonic,
			kind,
		});
		if let NodeKind::Container { children } = &mut self.nodes[parent.index()].kind {
			children.push(id);
		}
		self.separator_added = false;
		id
	}

	/// Returns true if `id` still has children after pruning.
	fn prune(&mut self, id: NodeId, stats: &mut FinishStats) -> bool {
		let children = self.children(id).to_vec();
		let mut kept = Vec::with_capacity(children.len());

		for child in children {
			if self.is_container(child) && !self.prune(child, stats) {
				self.nodes[child.index()].kind = NodeKind::Pruned;
				stats.pruned_containers += 1;
				continue;
			}
			kept.push(child);
		}

		let mut normalized: Vec<NodeId> = Vec::with_capacity(kept.len());
		for child in kept {
			let is_separator = matches!(self.nodes[child.index()].kind, NodeKind::Separator);
			let after_separator = normalized.last().is_some_and(|&prev| matches!(self.nodes[prev.index()].kind, NodeKind::Separator));
			if is_separator && (normalized.is_empty() || after_separator) {
				self.nodes[child.index()].kind = NodeKind::Pruned;
				stats.dropped_separators += 1;
				continue;
			}
			normalized.push(child);
		}

		let has_children = !normalized.is_empty();
		if let NodeKind::Container { children } = &mut self.nodes[id.index()].kind {
			*children = normalized;
		}
		has_children
	}

	fn export_children(&self, id: NodeId) -> Vec<MenuEntry> {
		self.children(id).iter().filter_map(|&child| self.export(child)).collect()
	}

	fn export(&self, id: NodeId) -> Option<MenuEntry> {
		let node = &self.nodes[id.index()];
		match &node.kind {
			NodeKind::Container { .. } => Some(MenuEntry::Menu(MenuContainer {
				label: node.label.clone(),
				mnemonic: node.mnemonic,
				children: self.export_children(id),
			})),
			NodeKind::Item { action } => Some(MenuEntry::Item(MenuItem {
				label: node.label.clone(),
				mnemonic: node.mnemonic,
				action: action.clone(),
			})),
			NodeKind::Separator => Some(MenuEntry::Separator),
			NodeKind::Pruned => None,
		}
	}
}
