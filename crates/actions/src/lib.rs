//! Action model and source hierarchy flattening.
//!
//! Provides the foundational types for menu remapping:
//! - [`Action`]: an invocable, labelled capability owned by the host or the engine
//! - [`ActionPath`]: case-insensitive, delimited addressing of hierarchy nodes
//! - [`SourceMenu`]: the host-owned hierarchy the engine reads from
//! - [`ActionRegistry`]: the flattened path-keyed lookup table

pub use action::{Action, ActionAttrs, ActionEvent, ActionRef, CallbackAction, InvocationListener, same_action};
pub use path::ActionPath;
pub use registry::{ActionRegistry, RegistryEntry};
pub use source::{SourceItem, SourceMenu};
pub use syntax::ReservedSyntax;

mod action;
mod path;
mod registry;
mod source;
mod syntax;
