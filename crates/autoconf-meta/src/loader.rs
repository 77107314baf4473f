//! Loader for catalog and metadata files from catalog roots
//!
//! A catalog root is a directory contributed by one packaged library. Each
//! root may hold a catalog registry and a metadata store:
//!
//! ```text
//! <root>/
//!   autoconf.catalog.toml
//!   autoconf.metadata.toml
//! ```
//!
//! Roots are merged in the order they were given.

use std::path::{Path, PathBuf};

use crate::catalog::Catalog;
use crate::metadata::ModuleMetadata;
use crate::{CATALOG_FILENAME, METADATA_FILENAME, Result};

/// Loads and merges catalog registries and metadata stores from a list of roots.
#[derive(Debug, Clone, Default)]
pub struct CatalogLoader {
    roots: Vec<PathBuf>,
}

impl CatalogLoader {
    /// Create a loader over the given roots.
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    /// The roots this loader reads, in merge order.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Load and merge every catalog registry found under the roots.
    ///
    /// Roots without a registry file contribute nothing. A malformed
    /// registry is an error.
    pub fn load_catalog(&self) -> Result<Catalog> {
        let mut catalog = Catalog::new();
        for root in &self.roots {
            let path = root.join(CATALOG_FILENAME);
            if !Self::has_catalog(root) {
                tracing::debug!(?path, "No catalog registry in root, skipping");
                continue;
            }
            tracing::debug!(?path, "Loading catalog registry");
            catalog.merge(&Catalog::load(&path)?);
        }
        tracing::debug!(
            registrations = catalog.len(),
            roots = self.roots.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// Load and merge every metadata store found under the roots.
    pub fn load_metadata(&self) -> Result<ModuleMetadata> {
        let mut metadata = ModuleMetadata::new();
        for root in &self.roots {
            let path = root.join(METADATA_FILENAME);
            if path.is_file() {
                tracing::debug!(?path, "Loading module metadata");
                metadata.merge(ModuleMetadata::load(&path)?);
            }
        }
        Ok(metadata)
    }

    /// Whether `root` holds a catalog registry.
    pub fn has_catalog(root: &Path) -> bool {
        root.join(CATALOG_FILENAME).is_file()
    }
}
