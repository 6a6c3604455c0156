//! Rule-driven menu remapping.
//!
//! A [`MenuMapper`] takes a window's existing ("source") menu hierarchy, flattens it into an
//! [`ActionRegistry`](menuweave_actions::ActionRegistry), and builds a new hierarchy from the
//! ordered rules of one [`MappingScope`](menuweave_mapping::MappingScope). Rule values are
//! resolved to existing actions by path, to dynamically constructed actions through
//! [`ActionFactories`], to separators, or to the expansion of the recent-files branch.
//!
//! Per-rule failures never abort a build; they are collected in the [`BuildReport`].
//! Structural failures ([`BuildError`]) leave the host's current hierarchy in place.
//!
//! [`MapperRegistry`] tracks every live mapper so a store change can be applied to all
//! windows with [`MapperRegistry::reload_all`].

pub use builder::{FinishStats, HierarchyBuilder, NodeId, Placement, Segment, SeparatorPolicy, Skipped, TargetPath};
pub use factory::{ActionFactories, FactoryContext, FactoryError, InitializableAction, Instance, InstantiateError, WindowContext, WindowId};
pub use host::MenuHost;
pub use mapper::{MapperEnv, MenuMapper};
pub use menu::{BuiltMenu, MenuContainer, MenuEntry, MenuItem, MenuKind};
pub use ready::{DEFAULT_READY_BUDGET, HierarchyReady, ReadyState};
pub use registry::{MapperRegistry, ReloadOutcome};
pub use report::{BuildError, BuildReport, MappingProblem};
pub use resolve::{ActionResolver, Resolved, ResolveError};

mod builder;
mod factory;
mod host;
mod mapper;
mod menu;
mod ready;
mod registry;
mod report;
mod resolve;
