//! Module metadata hints
//!
//! Each candidate module may carry static hints that the condition filters
//! and the priority sorter consult without instantiating the module:
//!
//! ```toml
//! [modules."demo.SpiConfig"]
//! on_types = ["demo.SpiBean"]
//! on_instances = ["demo.SpiMarker"]
//! on_environment = "servlet"
//! order = 10
//! before = ["demo.Other"]
//! after = ["demo.Base"]
//! ```

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Kind of runtime environment the host is bootstrapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentKind {
    /// Blocking, request-per-thread web environment
    Servlet,
    /// Non-blocking web environment
    Reactive,
    /// Not a web environment
    #[default]
    Standalone,
}

impl fmt::Display for EnvironmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Servlet => write!(f, "servlet"),
            Self::Reactive => write!(f, "reactive"),
            Self::Standalone => write!(f, "standalone"),
        }
    }
}

/// Environment a module declares it requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentRequirement {
    /// Any web environment
    Web,
    Servlet,
    Reactive,
}

impl EnvironmentRequirement {
    /// Whether a runtime of `kind` satisfies this requirement.
    pub fn is_satisfied_by(self, kind: EnvironmentKind) -> bool {
        match self {
            Self::Web => matches!(kind, EnvironmentKind::Servlet | EnvironmentKind::Reactive),
            Self::Servlet => kind == EnvironmentKind::Servlet,
            Self::Reactive => kind == EnvironmentKind::Reactive,
        }
    }
}

/// Static hints declared for a single module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleHints {
    /// Types that must be known to the runtime
    pub on_types: Vec<String>,
    /// Instances that must already be registered with the host
    pub on_instances: Vec<String>,
    /// Required runtime environment
    pub on_environment: Option<EnvironmentRequirement>,
    /// Explicit order, lower values first
    pub order: Option<i32>,
    /// Modules this one must precede
    pub before: Vec<String>,
    /// Modules this one must follow
    pub after: Vec<String>,
}

/// Keyed lookup from module identifier to its hints.
///
/// Loaded once and read-only afterwards; share it behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleMetadata {
    #[serde(default)]
    modules: HashMap<String, ModuleHints>,
}

impl ModuleMetadata {
    /// Create an empty metadata store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a metadata store from its TOML representation.
    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Read and parse a metadata file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml(&content).map_err(|e| Error::InvalidFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Set the hints for a module, replacing any previous value.
    pub fn insert(&mut self, module: impl Into<String>, hints: ModuleHints) {
        self.modules.insert(module.into(), hints);
    }

    /// Merge `other` into this store; hints in `other` win.
    pub fn merge(&mut self, other: ModuleMetadata) {
        self.modules.extend(other.modules);
    }

    /// Hints declared for `module`, if any.
    pub fn get(&self, module: &str) -> Option<&ModuleHints> {
        self.modules.get(module)
    }

    /// Whether any hints were declared for `module`.
    pub fn was_processed(&self, module: &str) -> bool {
        self.modules.contains_key(module)
    }

    /// Explicit order of `module`, defaulting to zero.
    pub fn order_of(&self, module: &str) -> i32 {
        self.get(module).and_then(|h| h.order).unwrap_or(0)
    }

    /// Modules that `module` declares it must precede.
    pub fn before(&self, module: &str) -> &[String] {
        self.get(module)
            .map(|h| h.before.as_slice())
            .unwrap_or_default()
    }

    /// Modules that `module` declares it must follow.
    pub fn after(&self, module: &str) -> &[String] {
        self.get(module)
            .map(|h| h.after.as_slice())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
