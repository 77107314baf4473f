//! Site descriptors
//!
//! A site is one activation request: the place that asked for modules to be
//! resolved, together with the include/exclude intent it declared. The host
//! builds one descriptor per request at its boundary; the engine never
//! inspects anything but this struct.

use serde::{Deserialize, Serialize};

/// One activation request and its declared attributes.
///
/// # Example
///
/// ```
/// use autoconf_core::SiteDescriptor;
///
/// let site = SiteDescriptor::new("demo.Application")
///     .exclude("demo.DataSourceConfig")
///     .exclude_name("legacy.CacheConfig");
/// assert_eq!(site.origin, "demo.Application");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteDescriptor {
    /// Identifier of the requesting site, used for attribution
    pub origin: String,

    /// Explicit include-override; `None` defers to the enablement property
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Modules excluded by type reference
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Modules excluded by raw name
    #[serde(default)]
    pub exclude_name: Vec<String>,
}

impl SiteDescriptor {
    /// Create a descriptor with no attributes set.
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            enabled: None,
            exclude: Vec::new(),
            exclude_name: Vec::new(),
        }
    }

    /// Force resolution on or off for this site.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    /// Add a module to the typed exclusion list.
    pub fn exclude(mut self, module: impl Into<String>) -> Self {
        self.exclude.push(module.into());
        self
    }

    /// Add a module to the by-name exclusion list.
    pub fn exclude_name(mut self, module: impl Into<String>) -> Self {
        self.exclude_name.push(module.into());
        self
    }
}
