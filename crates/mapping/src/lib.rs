//! Declarative mapping rules and the stores they are read from.
//!
//! A [`MappingStore`] supplies ordered `(key, value, module)` triples per namespace.
//! [`MappingSpec::load`] filters them to one [`MappingScope`] and classifies each value
//! into a [`SourceSpec`]. KDL parsing is available behind the `kdl` feature.

pub use error::{ConfigError, ConfigWarning, LoadError};
pub use modules::{ActiveModules, AllModules, ModuleActivation};
pub use rule::{MappingRule, MappingScope, SourceSpec};
pub use spec::MappingSpec;
pub use store::{MemoryStore, MappingStore, RawEntry};

mod error;
mod modules;
mod rule;
mod spec;
mod store;

#[cfg(feature = "kdl")]
pub mod kdl;

#[cfg(feature = "kdl")]
pub mod load;

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
