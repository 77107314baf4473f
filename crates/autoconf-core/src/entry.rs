//! Resolution results

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;

use crate::site::SiteDescriptor;

/// Immutable result of resolving one site.
///
/// A disabled entry is distinct from an enabled entry that happened to
/// accept nothing: check [`ResolutionEntry::is_disabled`], not emptiness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionEntry {
    configurations: Vec<String>,
    exclusions: BTreeSet<String>,
    disabled: bool,
}

impl ResolutionEntry {
    /// An entry for a site that was resolved.
    pub fn new(
        configurations: impl IntoIterator<Item = String>,
        exclusions: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            configurations: configurations.into_iter().collect(),
            exclusions: exclusions.into_iter().collect(),
            disabled: false,
        }
    }

    /// The canonical entry for a site whose resolution was switched off.
    pub fn disabled() -> Self {
        Self {
            configurations: Vec::new(),
            exclusions: BTreeSet::new(),
            disabled: true,
        }
    }

    /// Accepted modules, in resolution order.
    pub fn configurations(&self) -> &[String] {
        &self.configurations
    }

    /// Modules excluded by the site.
    pub fn exclusions(&self) -> &BTreeSet<String> {
        &self.exclusions
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }
}

/// One activated module tagged with the site that first introduced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportEntry {
    #[serde(serialize_with = "serialize_origin")]
    pub origin: Arc<SiteDescriptor>,
    pub module: String,
}

fn serialize_origin<S>(site: &Arc<SiteDescriptor>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&site.origin)
}
