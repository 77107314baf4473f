//! Candidate catalog for extension points
//!
//! The catalog maps an extension point key to the ordered list of module
//! identifiers registered for it. Declaration order is significant: it is the
//! final tie-break when the engine orders activated modules.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Registry mapping extension point keys to candidate module identifiers.
///
/// # Example
///
/// ```
/// use autoconf_meta::Catalog;
///
/// let mut catalog = Catalog::new();
/// catalog.register("autoconf.EnableAutoConfiguration", "demo.SpiConfig");
/// assert_eq!(catalog.modules("autoconf.EnableAutoConfiguration"), ["demo.SpiConfig"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Maps extension point key to its candidates, in declaration order
    #[serde(default)]
    extension_points: BTreeMap<String, Vec<String>>,
}

impl Catalog {
    /// Create a new empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from its TOML representation.
    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Read and parse a catalog file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml(&content).map_err(|e| Error::InvalidFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Append a module to the candidates of an extension point.
    ///
    /// Duplicates are kept; deduplication is the resolver's concern.
    pub fn register(&mut self, key: impl Into<String>, module: impl Into<String>) {
        self.extension_points
            .entry(key.into())
            .or_default()
            .push(module.into());
    }

    /// Append every extension point of `other` after the entries already
    /// present.
    pub fn merge(&mut self, other: &Catalog) {
        for (key, modules) in &other.extension_points {
            self.extension_points
                .entry(key.clone())
                .or_default()
                .extend(modules.iter().cloned());
        }
    }

    /// Candidates registered for `key`, in declaration order.
    pub fn modules(&self, key: &str) -> &[String] {
        self.extension_points
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Position of each module's first declaration under `key`.
    pub fn declaration_index(&self, key: &str) -> HashMap<String, usize> {
        let mut index = HashMap::new();
        for (position, module) in self.modules(key).iter().enumerate() {
            index.entry(module.clone()).or_insert(position);
        }
        index
    }

    /// List all extension point keys (sorted).
    pub fn extension_points(&self) -> Vec<&str> {
        self.extension_points.keys().map(String::as_str).collect()
    }

    /// Total number of registrations across all extension points.
    pub fn len(&self) -> usize {
        self.extension_points.values().map(Vec::len).sum()
    }

    /// Whether the catalog has no registrations.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
