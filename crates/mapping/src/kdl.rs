//! KDL parsing for mapping stores.
//!
//! ```kdl
//! namespace "menubar" {
//!     map "Ops->Save" "FILE->SAVE"
//!     map "Ops->~Copy" "EDIT->COPY" module="editing"
//!     map "Ops->SEP1" "SEPARATOR"
//! }
//! ```

use kdl::{KdlDocument, KdlNode};

use crate::error::ConfigWarning;
use crate::store::{MemoryStore, RawEntry};

/// Store parsed from KDL, with the non-fatal warnings met along the way.
#[derive(Debug, Clone, Default)]
pub struct ParsedStore {
	pub store: MemoryStore,
	pub warnings: Vec<ConfigWarning>,
}

/// Parse a KDL string into a [`MemoryStore`].
///
/// Unknown nodes and malformed rules are collected in [`ParsedStore::warnings`]
/// rather than failing the parse.
pub fn parse_store_str(input: &str) -> crate::Result<ParsedStore> {
	let doc: KdlDocument = input.parse()?;
	let mut parsed = ParsedStore::default();

	for node in doc.nodes() {
		match node.name().value() {
			"namespace" => parse_namespace_node(node, &mut parsed),
			other => parsed.warnings.push(ConfigWarning::UnknownNode {
				name: other.to_string(),
				found_in: "document root",
			}),
		}
	}

	Ok(parsed)
}

fn parse_namespace_node(node: &KdlNode, parsed: &mut ParsedStore) {
	let Some(namespace) = positional_strings(node).next() else {
		parsed.warnings.push(ConfigWarning::UnnamedNamespace);
		return;
	};

	let Some(children) = node.children() else {
		return;
	};

	for child in children.nodes() {
		if child.name().value() != "map" {
			parsed.warnings.push(ConfigWarning::UnknownNode {
				name: child.name().value().to_string(),
				found_in: "namespace block",
			});
			continue;
		}

		match parse_map_node(child) {
			Ok(entry) => parsed.store.push(namespace, entry),
			Err(reason) => parsed.warnings.push(ConfigWarning::MalformedRule {
				namespace: namespace.to_string(),
				reason,
			}),
		}
	}
}

fn parse_map_node(node: &KdlNode) -> Result<RawEntry, &'static str> {
	let mut args = positional_strings(node);
	let key = args.next().ok_or("missing target path")?;
	let value = args.next().ok_or("missing source")?;

	let module = node
		.entries()
		.iter()
		.find(|e| e.name().is_some_and(|n| n.value() == "module"))
		.map(|e| e.value().as_string().ok_or("module must be a string"))
		.transpose()?;

	let entry = RawEntry::new(key, value);
	Ok(match module {
		Some(module) => entry.gated(module),
		None => entry,
	})
}

fn positional_strings(node: &KdlNode) -> impl Iterator<Item = &str> {
	node.entries().iter().filter(|e| e.name().is_none()).filter_map(|e| e.value().as_string())
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::store::MappingStore;

	#[test]
	fn parses_namespaces_in_order() {
		let parsed = parse_store_str(
			r#"
			namespace "menubar" {
				map "Ops->Save" "FILE->SAVE"
				map "Ops->~Copy" "EDIT->COPY" module="editing"
				map "Ops->SEP1" "SEPARATOR"
			}
			namespace "context" {
				map "ACTOR->Open" "ACTOR->OPEN ACTOR"
			}
			"#,
		)
		.expect("valid KDL should parse");

		assert!(parsed.warnings.is_empty());
		assert_eq!(
			parsed.store.entries("menubar"),
			vec![
				RawEntry::new("Ops->Save", "FILE->SAVE"),
				RawEntry::new("Ops->~Copy", "EDIT->COPY").gated("editing"),
				RawEntry::new("Ops->SEP1", "SEPARATOR"),
			]
		);
		assert_eq!(parsed.store.entries("context").len(), 1);
	}

	#[test]
	fn collects_warnings() {
		let parsed = parse_store_str(
			r#"
			theme "dark"
			namespace {
				map "A->B" "C->D"
			}
			namespace "menubar" {
				entry "A" "B"
				map "Only->Target"
				map "Ops->Save" "FILE->SAVE"
			}
			"#,
		)
		.expect("valid KDL should parse");

		assert_eq!(
			parsed.warnings,
			vec![
				ConfigWarning::UnknownNode {
					name: "theme".into(),
					found_in: "document root",
				},
				ConfigWarning::UnnamedNamespace,
				ConfigWarning::UnknownNode {
					name: "entry".into(),
					found_in: "namespace block",
				},
				ConfigWarning::MalformedRule {
					namespace: "menubar".into(),
					reason: "missing source",
				},
			]
		);
		assert_eq!(parsed.store.len(), 1);
	}

	#[test]
	fn syntax_error_is_fatal() {
		assert!(parse_store_str("namespace \"menubar\" {").is_err());
	}
}
