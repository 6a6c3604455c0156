use std::fmt;

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// Error parsing KDL syntax.
	#[cfg(feature = "kdl")]
	#[error("KDL parse error: {0}")]
	Kdl(#[from] ::kdl::KdlError),

	/// Reading a mapping file failed.
	#[error("failed to read {path}: {source}")]
	Io {
		path: String,
		#[source]
		source: std::io::Error,
	},
}

/// Non-fatal warning during configuration parsing.
///
/// Collected during parsing and reported to the caller; the rest of the file still loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
	/// A node name was not recognized at the given nesting level.
	UnknownNode { name: String, found_in: &'static str },
	/// A `namespace` node had no name argument.
	UnnamedNamespace,
	/// A `map` node lacked its target or source argument.
	MalformedRule { namespace: String, reason: &'static str },
}

impl fmt::Display for ConfigWarning {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ConfigWarning::UnknownNode { name, found_in } => write!(f, "unknown node '{name}' in {found_in} will be ignored"),
			ConfigWarning::UnnamedNamespace => write!(f, "namespace node without a name will be ignored"),
			ConfigWarning::MalformedRule { namespace, reason } => write!(f, "malformed rule in namespace '{namespace}': {reason}"),
		}
	}
}

/// Structural failures while loading one scope's rules.
///
/// Any of these aborts the remapped build of that scope; the host keeps its unmapped hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
	#[error("no mapping rules for namespace '{namespace}'{}", prefix.as_ref().map(|p| format!(" under prefix '{p}'")).unwrap_or_default())]
	NoRules { namespace: String, prefix: Option<String> },
}
