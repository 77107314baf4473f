//! Engine configuration
//!
//! Read from the `[engine]` table of a bootstrap session file. Every field
//! has a default, so an absent table yields the standard engine.

use autoconf_meta::AUTO_CONFIGURATION_KEY;
use serde::{Deserialize, Serialize};

/// Default namespace prefixing the override properties
pub const DEFAULT_NAMESPACE: &str = "autoconf";

/// Settings that name the extension point and the override properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Prefix of the override properties (e.g. `autoconf.autoconfigure.exclude`)
    pub namespace: String,

    /// Catalog key whose candidates are resolved
    pub extension_point: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            extension_point: AUTO_CONFIGURATION_KEY.to_string(),
        }
    }
}

impl EngineConfig {
    /// Property holding the externally supplied exclusion list.
    pub fn exclude_property(&self) -> String {
        format!("{}.autoconfigure.exclude", self.namespace)
    }

    /// Property switching resolution on or off for every site.
    pub fn enabled_property(&self) -> String {
        format!("{}.enableautoconfiguration", self.namespace)
    }
}
