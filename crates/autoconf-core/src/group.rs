//! Deferred grouping across activation requests
//!
//! A bootstrap session may contain several sites. Rather than activating
//! each site's modules as soon as it is resolved, the session records every
//! entry in an [`ImportGroup`] and produces one merged, ordered result once
//! all sites have been seen.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use crate::entry::{ImportEntry, ResolutionEntry};
use crate::exclusion::dedup_preserving_order;
use crate::site::SiteDescriptor;
use crate::sorter::PrioritySorter;
use crate::Result;

/// Resolves a single site into an entry.
pub trait Resolve {
    fn resolve(&self, site: &SiteDescriptor) -> Result<ResolutionEntry>;
}

/// Collects entries from many sites and merges them at the end.
pub struct ImportGroup<'r, R: Resolve + ?Sized> {
    resolver: &'r R,
    sorter: PrioritySorter,
    origins: HashMap<String, Arc<SiteDescriptor>>,
    entries: Vec<ResolutionEntry>,
}

impl<'r, R: Resolve + ?Sized> ImportGroup<'r, R> {
    pub fn new(resolver: &'r R, sorter: PrioritySorter) -> Self {
        Self {
            resolver,
            sorter,
            origins: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Resolve `site` and record the result.
    ///
    /// A module keeps the first site that introduced it as its origin.
    pub fn process(&mut self, site: impl Into<Arc<SiteDescriptor>>) -> Result<()> {
        let site = site.into();
        let entry = self.resolver.resolve(&site)?;
        for module in entry.configurations() {
            self.origins
                .entry(module.clone())
                .or_insert_with(|| Arc::clone(&site));
        }
        tracing::debug!(
            origin = %site.origin,
            accepted = entry.configurations().len(),
            disabled = entry.is_disabled(),
            "Recorded site in import group"
        );
        self.entries.push(entry);
        Ok(())
    }

    /// Number of sites recorded so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge every recorded entry into one ordered list of modules, each
    /// tagged with its origin.
    ///
    /// Exclusions from any site apply to modules accepted by every site.
    ///
    /// # Errors
    ///
    /// Returns `Error::OrderingCycle` if the merged modules cannot be ordered.
    pub fn finalize(self) -> Result<Vec<ImportEntry>> {
        if self.entries.is_empty() {
            return Ok(Vec::new());
        }

        let exclusions: BTreeSet<&String> = self
            .entries
            .iter()
            .flat_map(|entry| entry.exclusions())
            .collect();

        let merged = dedup_preserving_order(
            self.entries
                .iter()
                .flat_map(|entry| entry.configurations())
                .filter(|module| !exclusions.contains(module))
                .cloned(),
        );

        let sorted = self.sorter.sort(merged)?;
        let imports = sorted
            .into_iter()
            .filter_map(|module| {
                let origin = self.origins.get(&module).map(Arc::clone)?;
                Some(ImportEntry { origin, module })
            })
            .collect();
        Ok(imports)
    }
}

impl<R: Resolve + ?Sized> std::fmt::Debug for ImportGroup<'_, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImportGroup")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}
