//! Runtime collaborators consulted during resolution
//!
//! The engine does not load types or hold instances itself. It asks the
//! host through these small traits, bundled in a [`ResolutionContext`].

use std::collections::HashSet;
use std::sync::Arc;

use autoconf_meta::EnvironmentKind;

use crate::properties::{PropertySource, TomlProperties};

/// Answers whether an identifier names a type known to the runtime.
pub trait TypeResolver: Send + Sync {
    fn is_present(&self, name: &str) -> bool;
}

/// Answers whether an instance is already registered with the host.
pub trait InstanceRegistry: Send + Sync {
    fn contains(&self, name: &str) -> bool;
}

/// A fixed set of names, usable as either collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameSet {
    names: HashSet<String>,
}

impl NameSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for NameSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl TypeResolver for NameSet {
    fn is_present(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl InstanceRegistry for NameSet {
    fn contains(&self, name: &str) -> bool {
        NameSet::contains(self, name)
    }
}

/// Everything the engine and its extensions may consult about the host.
#[derive(Clone)]
pub struct ResolutionContext {
    pub types: Arc<dyn TypeResolver>,
    pub instances: Arc<dyn InstanceRegistry>,
    pub properties: Arc<dyn PropertySource>,
    pub environment: EnvironmentKind,
}

impl ResolutionContext {
    /// A context where nothing is known, no property is set and the
    /// environment is standalone.
    pub fn empty() -> Self {
        Self {
            types: Arc::new(NameSet::new()),
            instances: Arc::new(NameSet::new()),
            properties: Arc::new(TomlProperties::default()),
            environment: EnvironmentKind::Standalone,
        }
    }

    pub fn with_types(mut self, types: impl TypeResolver + 'static) -> Self {
        self.types = Arc::new(types);
        self
    }

    pub fn with_instances(mut self, instances: impl InstanceRegistry + 'static) -> Self {
        self.instances = Arc::new(instances);
        self
    }

    pub fn with_properties(mut self, properties: impl PropertySource + 'static) -> Self {
        self.properties = Arc::new(properties);
        self
    }

    pub fn with_environment(mut self, environment: EnvironmentKind) -> Self {
        self.environment = environment;
        self
    }
}

impl Default for ResolutionContext {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for ResolutionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolutionContext")
            .field("environment", &self.environment)
            .finish_non_exhaustive()
    }
}
