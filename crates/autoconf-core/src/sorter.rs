//! Priority ordering of accepted modules
//!
//! `before`/`after` constraints between the modules being sorted form a
//! graph that is ordered topologically. Whenever several modules are free to
//! go next, the one with the lowest `order` hint wins, then the one declared
//! earliest in the catalog. Modules missing from the catalog rank after the
//! declared ones, alphabetically. The result is independent of input order.
//!
//! Explicit constraints override the `order` hint. A constraint naming a
//! module outside the sorted set is ignored.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use autoconf_core::PrioritySorter;
//! use autoconf_meta::{ModuleHints, ModuleMetadata};
//!
//! let mut metadata = ModuleMetadata::new();
//! metadata.insert(
//!     "demo.Web",
//!     ModuleHints { after: vec!["demo.Json".into()], ..Default::default() },
//! );
//!
//! let sorter = PrioritySorter::new(Arc::new(metadata), ["demo.Web", "demo.Json"]);
//! let order = sorter.sort(["demo.Web".to_string(), "demo.Json".to_string()]).unwrap();
//! assert_eq!(order, ["demo.Json", "demo.Web"]);
//! ```

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use autoconf_meta::{Catalog, ModuleMetadata};

use crate::exclusion::dedup_preserving_order;
use crate::{Error, Result};

/// Tie-break key for modules that are free to be placed.
type Rank<'a> = (i32, usize, &'a str);

/// Orders modules by explicit constraints, priority and declaration.
#[derive(Debug, Clone)]
pub struct PrioritySorter {
    metadata: Arc<ModuleMetadata>,
    declaration: HashMap<String, usize>,
}

impl PrioritySorter {
    /// Create a sorter whose declaration order is the order of `declared`.
    pub fn new<I, S>(metadata: Arc<ModuleMetadata>, declared: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut declaration = HashMap::new();
        for (index, module) in declared.into_iter().enumerate() {
            declaration.entry(module.into()).or_insert(index);
        }
        Self {
            metadata,
            declaration,
        }
    }

    /// Create a sorter taking declaration order from the catalog entries of
    /// `extension_point`.
    pub fn from_catalog(
        catalog: &Catalog,
        extension_point: &str,
        metadata: Arc<ModuleMetadata>,
    ) -> Self {
        Self {
            metadata,
            declaration: catalog.declaration_index(extension_point),
        }
    }

    /// Sort `modules`, dropping repeats.
    ///
    /// # Errors
    ///
    /// Returns `Error::OrderingCycle` if the `before`/`after` constraints
    /// between the modules cannot all hold.
    pub fn sort(&self, modules: impl IntoIterator<Item = String>) -> Result<Vec<String>> {
        let members = dedup_preserving_order(modules);
        let ranks: HashMap<&str, Rank<'_>> = members
            .iter()
            .map(|module| (module.as_str(), self.rank(module)))
            .collect();
        let predecessors = self.predecessors(&members, &ranks);

        let mut pending: HashMap<&str, usize> = predecessors
            .iter()
            .map(|(module, preds)| (*module, preds.len()))
            .collect();
        let mut successors: HashMap<&str, Vec<&str>> = HashMap::new();
        for (module, preds) in &predecessors {
            for predecessor in preds {
                successors.entry(*predecessor).or_default().push(*module);
            }
        }

        let mut ready: BTreeSet<Rank<'_>> = pending
            .iter()
            .filter(|(_, count)| **count == 0)
            .map(|(module, _)| ranks[module])
            .collect();
        let mut sorted = Vec::with_capacity(members.len());
        while let Some((_, _, module)) = ready.pop_first() {
            sorted.push(module.to_string());
            for successor in successors.get(module).into_iter().flatten() {
                if let Some(count) = pending.get_mut(successor) {
                    *count -= 1;
                    if *count == 0 {
                        ready.insert(ranks[successor]);
                    }
                }
            }
        }

        if sorted.len() < members.len() {
            let blocked: BTreeSet<Rank<'_>> = pending
                .iter()
                .filter(|(_, count)| **count > 0)
                .map(|(module, _)| ranks[module])
                .collect();
            return Err(Error::OrderingCycle {
                members: find_cycle(&blocked, &predecessors, &pending),
            });
        }
        Ok(sorted)
    }

    fn rank<'a>(&self, module: &'a str) -> Rank<'a> {
        let declared = self.declaration.get(module).copied().unwrap_or(usize::MAX);
        (self.metadata.order_of(module), declared, module)
    }

    /// For every module, the members that must be placed before it, by rank.
    fn predecessors<'a>(
        &'a self,
        members: &'a [String],
        ranks: &HashMap<&'a str, Rank<'a>>,
    ) -> HashMap<&'a str, Vec<&'a str>> {
        let mut edges: HashMap<&str, Vec<&str>> = members
            .iter()
            .map(|module| (module.as_str(), Vec::new()))
            .collect();

        for module in members {
            for predecessor in self.metadata.after(module) {
                if ranks.contains_key(predecessor.as_str()) {
                    edges
                        .entry(module.as_str())
                        .or_default()
                        .push(predecessor.as_str());
                } else {
                    self.note_ignored(module, predecessor);
                }
            }
            for successor in self.metadata.before(module) {
                if let Some(list) = edges.get_mut(successor.as_str()) {
                    list.push(module.as_str());
                } else {
                    self.note_ignored(module, successor);
                }
            }
        }

        for list in edges.values_mut() {
            list.sort_by_key(|m| ranks[m]);
            list.dedup();
        }
        edges
    }

    fn note_ignored(&self, module: &str, other: &str) {
        if self.declaration.contains_key(other) || self.metadata.was_processed(other) {
            tracing::debug!(module, other, "Ignoring constraint on inactive module");
        } else {
            tracing::warn!(module, other, "Ordering constraint names an unknown module");
        }
    }
}

/// Walk predecessor edges among the `blocked` modules until one repeats.
///
/// Every blocked module still waits on another blocked module, so the walk
/// always closes a loop. The loop is returned starting from the module where
/// it closed.
fn find_cycle(
    blocked: &BTreeSet<Rank<'_>>,
    predecessors: &HashMap<&str, Vec<&str>>,
    pending: &HashMap<&str, usize>,
) -> Vec<String> {
    let Some(&(_, _, start)) = blocked.first() else {
        return Vec::new();
    };

    let mut path = vec![start];
    let mut current = start;
    loop {
        let next = predecessors
            .get(current)
            .into_iter()
            .flatten()
            .find(|m| pending.get(*m).is_some_and(|count| *count > 0));
        let Some(&next) = next else {
            return path.iter().map(|m| m.to_string()).collect();
        };
        if let Some(index) = path.iter().position(|m| *m == next) {
            return path[index..].iter().map(|m| m.to_string()).collect();
        }
        path.push(next);
        current = next;
    }
}
