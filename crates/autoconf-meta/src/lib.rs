//! Candidate catalog and module metadata for autoconf.
//!
//! This crate provides the static inputs of the resolution engine: the
//! catalog mapping extension points to candidate modules, the per-module
//! metadata hints, a loader for both, and a process-wide cache.

pub mod cache;
pub mod catalog;
pub mod error;
pub mod loader;
pub mod metadata;

/// Extension point key under which auto-configuration candidates are registered.
pub const AUTO_CONFIGURATION_KEY: &str = "autoconf.EnableAutoConfiguration";

/// The canonical filename of a catalog registry inside a catalog root.
pub const CATALOG_FILENAME: &str = "autoconf.catalog.toml";

/// The canonical filename of a metadata store inside a catalog root.
pub const METADATA_FILENAME: &str = "autoconf.metadata.toml";

pub use cache::CatalogCache;
pub use catalog::Catalog;
pub use error::{Error, Result};
pub use loader::CatalogLoader;
pub use metadata::{EnvironmentKind, EnvironmentRequirement, ModuleHints, ModuleMetadata};
