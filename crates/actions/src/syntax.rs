//! Reserved configuration-level syntax.

/// Reserved strings and characters shared by paths, mapping rules and labels.
///
/// None of these may appear in legitimate label text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedSyntax {
	/// Separates path segments (`File->Save`).
	pub delimiter: String,
	/// Marks the mnemonic character in a target segment (`~Copy`).
	pub mnemonic_marker: char,
	/// Source spec value producing a separator.
	pub separator: String,
	/// Label of the source branch holding recently used items.
	///
	/// Paths below this branch keep their case because the entries are file-system paths.
	pub history_branch: String,
	/// Source spec value expanding into every entry below [`Self::history_branch`].
	pub history_marker: String,
}

impl Default for ReservedSyntax {
	fn default() -> Self {
		Self {
			delimiter: "->".to_string(),
			mnemonic_marker: '~',
			separator: "SEPARATOR".to_string(),
			history_branch: "Recent Files".to_string(),
			history_marker: "RECENT_FILES".to_string(),
		}
	}
}

impl ReservedSyntax {
	/// Returns true if `spec` is the separator marker.
	pub fn is_separator(&self, spec: &str) -> bool {
		spec.trim().eq_ignore_ascii_case(&self.separator)
	}

	/// Returns true if `spec` is the history expansion marker.
	pub fn is_history_marker(&self, spec: &str) -> bool {
		spec.trim().eq_ignore_ascii_case(&self.history_marker)
	}

	/// Returns true if a source branch label names the history branch.
	pub fn is_history_branch(&self, label: &str) -> bool {
		label.trim().to_uppercase() == self.history_branch.to_uppercase()
	}

	/// Returns true if `spec` is a path reference rather than a marker or type name.
	pub fn is_path_reference(&self, spec: &str) -> bool {
		spec.contains(self.delimiter.as_str())
	}

	/// Strips the first mnemonic marker from `segment`.
	///
	/// Returns the cleaned text and the character following the marker, if any.
	pub fn split_mnemonic(&self, segment: &str) -> (String, Option<char>) {
		let Some(at) = segment.find(self.mnemonic_marker) else {
			return (segment.to_string(), None);
		};

		let mut text = String::with_capacity(segment.len());
		text.push_str(&segment[..at]);
		let rest = &segment[at + self.mnemonic_marker.len_utf8()..];
		text.push_str(rest);
		(text, rest.chars().next())
	}
}
