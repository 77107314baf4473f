//! Error types for autoconf-core

/// Result type for autoconf-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type returned by filters and listeners
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while resolving modules
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Excluded modules that are known types but not candidates
    #[error(
        "The following modules could not be excluded because they are not auto-configuration candidates:\n{}",
        format_list(.modules)
    )]
    InvalidExclusions { modules: Vec<String> },

    /// Explicit before/after constraints cannot all be satisfied
    #[error("Ordering cycle detected between: {}", .members.join(" -> "))]
    OrderingCycle { members: Vec<String> },

    /// A filter returned a mask that does not line up with its candidates
    #[error("Filter '{filter}' returned {actual} verdicts for {expected} candidates")]
    InvalidFilterMask {
        filter: String,
        expected: usize,
        actual: usize,
    },

    /// A filter or listener failed
    #[error("{component} failed: {source}")]
    Extension {
        component: String,
        #[source]
        source: BoxError,
    },

    /// A property could not be interpreted
    #[error("Invalid value for property '{key}': {value}")]
    InvalidProperty { key: String, value: String },

    // Transparent wrappers for underlying crate errors
    /// Catalog or metadata error from autoconf-meta
    #[error(transparent)]
    Meta(#[from] autoconf_meta::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}

impl Error {
    pub(crate) fn extension(component: impl Into<String>, source: BoxError) -> Self {
        Self::Extension {
            component: component.into(),
            source,
        }
    }
}

fn format_list(modules: &[String]) -> String {
    modules
        .iter()
        .map(|m| format!("\t- {m}"))
        .collect::<Vec<_>>()
        .join("\n")
}
