//! Conditional module resolution engine for autoconf
//!
//! Given a catalog of candidate modules, this crate decides which of them a
//! bootstrap session activates and in what order:
//!
//! - **Exclusions**: site attributes and the override property remove
//!   candidates, with validation against the catalog
//! - **Condition filters**: pluggable vetoes composed with logical AND
//! - **Import events**: listeners observe every decision
//! - **Deferred grouping**: results from many sites merged into one list
//! - **Priority ordering**: declaration order, `order` hints and explicit
//!   `before`/`after` constraints
//!
//! # Architecture
//!
//! ```text
//!            autoconf-cli
//!                 |
//!           autoconf-core
//!                 |
//!           autoconf-meta
//! ```
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use autoconf_core::{ImportSelector, SiteDescriptor};
//! use autoconf_meta::{AUTO_CONFIGURATION_KEY, Catalog, CatalogCache, ModuleMetadata};
//!
//! let mut catalog = Catalog::new();
//! catalog.register(AUTO_CONFIGURATION_KEY, "demo.JsonConfig");
//! catalog.register(AUTO_CONFIGURATION_KEY, "demo.CacheConfig");
//! let cache = Arc::new(CatalogCache::preloaded(catalog, ModuleMetadata::new()));
//!
//! let selector = ImportSelector::builder(cache).build();
//! let mut group = selector.group()?;
//! group.process(SiteDescriptor::new("demo.App").exclude_name("demo.CacheConfig"))?;
//!
//! let imports = group.finalize()?;
//! assert_eq!(imports.len(), 1);
//! assert_eq!(imports[0].module, "demo.JsonConfig");
//! # Ok::<(), autoconf_core::Error>(())
//! ```

pub mod capability;
pub mod conditions;
pub mod config;
pub mod context;
pub mod entry;
pub mod error;
pub mod exclusion;
pub mod filter;
pub mod group;
pub mod listener;
pub mod properties;
pub mod selector;
pub mod site;
pub mod sorter;

pub use capability::{Capabilities, CapabilityInjector};
pub use conditions::{OnEnvironmentCondition, OnInstanceCondition, OnTypeCondition};
pub use config::{DEFAULT_NAMESPACE, EngineConfig};
pub use context::{InstanceRegistry, NameSet, ResolutionContext, TypeResolver};
pub use entry::{ImportEntry, ResolutionEntry};
pub use error::{BoxError, Error, Result};
pub use exclusion::{ExclusionResolver, dedup_preserving_order};
pub use filter::{FilterChain, ImportFilter};
pub use group::{ImportGroup, Resolve};
pub use listener::{ImportEvent, ImportListener, ImportNotifier, ImportReport};
pub use properties::{EnvProperties, LayeredProperties, PropertySource, TomlProperties};
pub use selector::{ImportSelector, ImportSelectorBuilder};
pub use site::SiteDescriptor;
pub use sorter::PrioritySorter;
