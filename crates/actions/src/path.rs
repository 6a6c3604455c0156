//! Case-insensitive hierarchy addressing.

use std::fmt;
use std::hash::{Hash, Hasher};

use smallvec::SmallVec;

/// Delimiter used by [`fmt::Display`]; callers with custom syntax use [`ActionPath::render`].
const DISPLAY_DELIMITER: &str = "->";

/// An ordered sequence of segment names addressing a node in a hierarchy.
///
/// Segments keep the case they were built with, but equality and hashing compare the
/// uppercased sequences, so `File->Save` and `FILE->SAVE` are the same path.
///
/// Exact segments (see [`ActionPath::push_exact`]) compare case-sensitively. An exact
/// segment never equals a case-insensitive one.
#[derive(Clone, Default)]
pub struct ActionPath {
	segments: SmallVec<[PathSegment; 4]>,
}

#[derive(Clone)]
struct PathSegment {
	text: Box<str>,
	exact: bool,
}

impl PathSegment {
	fn folded(text: impl Into<Box<str>>) -> Self {
		Self { text: text.into(), exact: false }
	}

	fn exact(text: impl Into<Box<str>>) -> Self {
		Self { text: text.into(), exact: true }
	}
}

impl PartialEq for PathSegment {
	fn eq(&self, other: &Self) -> bool {
		match (self.exact, other.exact) {
			(false, false) => self.text.chars().flat_map(char::to_uppercase).eq(other.text.chars().flat_map(char::to_uppercase)),
			(true, true) => self.text == other.text,
			_ => false,
		}
	}
}

impl Hash for PathSegment {
	fn hash<H: Hasher>(&self, state: &mut H) {
		state.write_u8(self.exact as u8);
		if self.exact {
			self.text.hash(state);
		} else {
			for c in self.text.chars().flat_map(char::to_uppercase) {
				c.hash(state);
			}
			state.write_u8(0xff);
		}
	}
}

impl ActionPath {
	/// Creates an empty path.
	pub fn new() -> Self {
		Self::default()
	}

	/// Splits `raw` on `delimiter`, trimming segments and dropping blank ones.
	pub fn parse(raw: &str, delimiter: &str) -> Self {
		Self::from_segments(raw.split(delimiter).map(str::trim).filter(|s| !s.is_empty()))
	}

	/// Builds a path from already-split segments.
	pub fn from_segments<I, S>(segments: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<Box<str>>,
	{
		Self {
			segments: segments.into_iter().map(PathSegment::folded).collect(),
		}
	}

	/// Returns a new path with `segment` appended.
	pub fn child(&self, segment: impl Into<Box<str>>) -> Self {
		let mut path = self.clone();
		path.push(segment);
		path
	}

	/// Returns a new path with a case-sensitive `segment` appended.
	pub fn child_exact(&self, segment: impl Into<Box<str>>) -> Self {
		let mut path = self.clone();
		path.push_exact(segment);
		path
	}

	/// Appends a segment in place.
	pub fn push(&mut self, segment: impl Into<Box<str>>) {
		self.segments.push(PathSegment::folded(segment));
	}

	/// Appends a case-sensitive segment, used for file-system names.
	pub fn push_exact(&mut self, segment: impl Into<Box<str>>) {
		self.segments.push(PathSegment::exact(segment));
	}

	/// Returns the path without its last segment, or `None` for an empty path.
	pub fn parent(&self) -> Option<Self> {
		let (_, head) = self.segments.split_last()?;
		Some(Self {
			segments: head.iter().cloned().collect(),
		})
	}

	pub fn segments(&self) -> impl ExactSizeIterator<Item = &str> + DoubleEndedIterator {
		self.segments.iter().map(|s| &*s.text)
	}

	pub fn last(&self) -> Option<&str> {
		self.segments.last().map(|s| &*s.text)
	}

	/// Returns true if the segment at `index` compares case-sensitively.
	pub fn is_exact(&self, index: usize) -> bool {
		self.segments.get(index).is_some_and(|s| s.exact)
	}

	pub fn len(&self) -> usize {
		self.segments.len()
	}

	pub fn is_empty(&self) -> bool {
		self.segments.is_empty()
	}

	/// Returns true if every segment of `prefix` matches the start of this path.
	pub fn starts_with(&self, prefix: &ActionPath) -> bool {
		prefix.len() <= self.len() && self.segments[..prefix.len()] == prefix.segments[..]
	}

	/// Returns the remainder of this path after `prefix`, if it starts with it.
	pub fn strip_prefix(&self, prefix: &ActionPath) -> Option<Self> {
		self.starts_with(prefix).then(|| Self {
			segments: self.segments[prefix.len()..].iter().cloned().collect(),
		})
	}

	/// Renders the path joined with `delimiter`.
	pub fn render(&self, delimiter: &str) -> String {
		self.segments().collect::<Vec<_>>().join(delimiter)
	}
}

impl PartialEq for ActionPath {
	fn eq(&self, other: &Self) -> bool {
		self.segments == other.segments
	}
}

impl Eq for ActionPath {}

impl Hash for ActionPath {
	fn hash<H: Hasher>(&self, state: &mut H) {
		state.write_usize(self.segments.len());
		for segment in &self.segments {
			segment.hash(state);
		}
	}
}

impl fmt::Display for ActionPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.render(DISPLAY_DELIMITER))
	}
}

impl fmt::Debug for ActionPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "ActionPath({self})")
	}
}
