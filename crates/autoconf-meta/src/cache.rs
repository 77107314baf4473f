//! Process-wide cache for the catalog and the metadata store
//!
//! The catalog and metadata are static for the lifetime of a process. The
//! host constructs one `CatalogCache`, shares it behind an `Arc`, and every
//! bootstrap session reads through it. Initialization is lazy: the first
//! caller loads, later callers observe the stored value. Concurrent first
//! callers may both load, but only one value is ever stored and returned.

use std::sync::{Arc, OnceLock};

use crate::catalog::Catalog;
use crate::loader::CatalogLoader;
use crate::metadata::ModuleMetadata;
use crate::{Error, Result};

/// Lazily loaded, shareable catalog and metadata.
#[derive(Debug, Default)]
pub struct CatalogCache {
    loader: CatalogLoader,
    catalog: OnceLock<Arc<Catalog>>,
    metadata: OnceLock<Arc<ModuleMetadata>>,
}

impl CatalogCache {
    /// Create a cache that loads from `loader` on first access.
    pub fn new(loader: CatalogLoader) -> Self {
        Self {
            loader,
            catalog: OnceLock::new(),
            metadata: OnceLock::new(),
        }
    }

    /// Create a cache from values already in memory.
    pub fn preloaded(catalog: Catalog, metadata: ModuleMetadata) -> Self {
        Self {
            loader: CatalogLoader::default(),
            catalog: OnceLock::from(Arc::new(catalog)),
            metadata: OnceLock::from(Arc::new(metadata)),
        }
    }

    /// The merged catalog, loading it on first access.
    pub fn catalog(&self) -> Result<Arc<Catalog>> {
        if let Some(catalog) = self.catalog.get() {
            return Ok(Arc::clone(catalog));
        }
        let loaded = Arc::new(self.loader.load_catalog()?);
        Ok(Arc::clone(self.catalog.get_or_init(|| loaded)))
    }

    /// The merged metadata store, loading it on first access.
    pub fn metadata(&self) -> Result<Arc<ModuleMetadata>> {
        if let Some(metadata) = self.metadata.get() {
            return Ok(Arc::clone(metadata));
        }
        let loaded = Arc::new(self.loader.load_metadata()?);
        Ok(Arc::clone(self.metadata.get_or_init(|| loaded)))
    }

    /// Candidates registered for `key`, in declaration order.
    ///
    /// # Errors
    ///
    /// Returns `Error::CatalogEmpty` if nothing is registered for `key`.
    pub fn load_candidates(&self, key: &str) -> Result<Vec<String>> {
        let candidates = self.catalog()?.modules(key).to_vec();
        if candidates.is_empty() {
            return Err(Error::catalog_empty(key));
        }
        Ok(candidates)
    }

    /// Whether the catalog has been loaded yet.
    pub fn is_loaded(&self) -> bool {
        self.catalog.get().is_some()
    }
}
