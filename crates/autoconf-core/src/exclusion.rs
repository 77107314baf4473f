//! Exclusion resolution and validation

use std::collections::HashSet;

use crate::config::EngineConfig;
use crate::context::TypeResolver;
use crate::properties::PropertySource;
use crate::site::SiteDescriptor;
use crate::{Error, Result};

/// Remove repeated entries, keeping the first occurrence of each.
pub fn dedup_preserving_order<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// Collects the modules a site asked to exclude.
#[derive(Debug, Clone, Copy)]
pub struct ExclusionResolver<'a> {
    config: &'a EngineConfig,
}

impl<'a> ExclusionResolver<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Union of the site's `exclude` list, its `exclude_name` list and the
    /// exclusion property, in that order, without repeats.
    pub fn resolve(&self, site: &SiteDescriptor, properties: &dyn PropertySource) -> Vec<String> {
        let from_property = properties
            .get_list(&self.config.exclude_property())
            .unwrap_or_default();

        dedup_preserving_order(
            site.exclude
                .iter()
                .chain(&site.exclude_name)
                .cloned()
                .chain(from_property),
        )
    }

    /// Reject exclusions that name a real type that is not a candidate.
    ///
    /// Exclusions the type resolver does not know are ignored.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidExclusions` listing every offending entry.
    pub fn validate(
        &self,
        candidates: &[String],
        exclusions: &[String],
        types: &dyn TypeResolver,
    ) -> Result<()> {
        let invalid: Vec<String> = exclusions
            .iter()
            .filter(|m| types.is_present(m) && !candidates.contains(m))
            .cloned()
            .collect();

        if invalid.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidExclusions { modules: invalid })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::NameSet;
    use crate::properties::{EnvProperties, TomlProperties};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn strings(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        assert_eq!(
            dedup_preserving_order(strings(&["b", "a", "b", "c", "a"])),
            vec!["b", "a", "c"]
        );
    }

    #[test]
    fn test_resolve_unions_all_sources() {
        let config = EngineConfig::default();
        let site = SiteDescriptor::new("demo.App")
            .exclude("demo.A")
            .exclude_name("demo.B")
            .exclude_name("demo.A");
        let props =
            EnvProperties::from_vars([("AUTOCONF_AUTOCONFIGURE_EXCLUDE", "demo.C,demo.B")]);

        let exclusions = ExclusionResolver::new(&config).resolve(&site, &props);
        assert_eq!(exclusions, vec!["demo.A", "demo.B", "demo.C"]);
    }

    #[test]
    fn test_resolve_without_anything() {
        let config = EngineConfig::default();
        let exclusions = ExclusionResolver::new(&config)
            .resolve(&SiteDescriptor::new("demo.App"), &TomlProperties::default());
        assert!(exclusions.is_empty());
    }

    #[test]
    fn test_validate_reports_every_invalid_entry() {
        let config = EngineConfig::default();
        let types: NameSet = ["demo.C", "demo.D"].into_iter().collect();

        let err = ExclusionResolver::new(&config)
            .validate(
                &strings(&["demo.A", "demo.B"]),
                &strings(&["demo.D", "demo.A", "demo.C"]),
                &types,
            )
            .unwrap_err();
        match err {
            Error::InvalidExclusions { modules } => assert_eq!(modules, vec!["demo.D", "demo.C"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_validate_ignores_unknown_types() {
        let config = EngineConfig::default();
        ExclusionResolver::new(&config)
            .validate(
                &strings(&["demo.A"]),
                &strings(&["demo.Unknown"]),
                &NameSet::new(),
            )
            .unwrap();
    }

    proptest! {
        #[test]
        fn prop_dedup_keeps_each_item_once_in_first_occurrence_order(
            items in prop::collection::vec("[a-e]", 0..24)
        ) {
            let deduped = dedup_preserving_order(items.clone());

            let unique: HashSet<&String> = deduped.iter().collect();
            prop_assert_eq!(unique.len(), deduped.len());

            let mut expected: Vec<String> = Vec::new();
            for item in &items {
                if !expected.contains(item) {
                    expected.push(item.clone());
                }
            }
            prop_assert_eq!(deduped, expected);
        }
    }
}
