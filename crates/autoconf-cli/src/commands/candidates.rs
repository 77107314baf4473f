//! Candidates command implementation

use std::path::PathBuf;

use autoconf_core::dedup_preserving_order;
use autoconf_meta::{CatalogCache, CatalogLoader};
use colored::Colorize;

use crate::error::Result;

/// Deduplicated candidates registered for `extension_point` under `roots`.
pub fn list_candidates(roots: &[PathBuf], extension_point: &str) -> Result<Vec<String>> {
    let cache = CatalogCache::new(CatalogLoader::new(roots.to_vec()));
    Ok(dedup_preserving_order(cache.load_candidates(extension_point)?))
}

/// Run the candidates command
pub fn run_candidates(roots: &[PathBuf], extension_point: &str) -> Result<()> {
    let candidates = list_candidates(roots, extension_point)?;

    println!("{} {}", "Candidates for".bold(), extension_point.cyan());
    println!();
    for module in &candidates {
        println!("  {} {}", "+".green(), module);
    }
    println!();
    println!("{} candidates", candidates.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use autoconf_meta::AUTO_CONFIGURATION_KEY;
    use autoconf_test_utils::TestCatalog;

    #[test]
    fn test_candidates_merge_roots_without_repeats() {
        let mut fixture = TestCatalog::new();
        fixture.library("web", &["web.Server", "shared.Json"]);
        fixture.library("data", &["shared.Json", "data.Pool"]);

        let candidates = list_candidates(fixture.roots(), AUTO_CONFIGURATION_KEY).unwrap();
        assert_eq!(candidates, vec!["web.Server", "shared.Json", "data.Pool"]);
    }

    #[test]
    fn test_unknown_extension_point_fails() {
        let mut fixture = TestCatalog::new();
        fixture.library("web", &["web.Server"]);

        let err = list_candidates(fixture.roots(), "demo.Nothing").unwrap_err();
        assert!(matches!(
            err,
            CliError::Meta(autoconf_meta::Error::CatalogEmpty { .. })
        ));
    }
}
