//! Resolve command implementation

use std::path::{Path, PathBuf};
use std::sync::Arc;

use autoconf_core::{EnvProperties, ImportEntry, ImportEvent, ImportReport, ImportSelector};
use autoconf_meta::{CatalogCache, CatalogLoader};
use colored::Colorize;
use serde::Serialize;

use crate::error::Result;
use crate::session::Session;

/// Outcome of resolving a session
#[derive(Debug, Serialize)]
pub struct Resolution {
    pub imports: Vec<ImportEntry>,
    pub events: Vec<ImportEvent>,
}

/// Resolve every site of the session at `session_path`.
///
/// Without explicit roots, the session file's directory is the only
/// catalog root.
pub fn resolve_session(session_path: &Path, roots: &[PathBuf], env: EnvProperties) -> Result<Resolution> {
    let session = Session::load(session_path)?;

    let roots = if roots.is_empty() {
        let dir = session_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        vec![dir.to_path_buf()]
    } else {
        roots.to_vec()
    };
    tracing::debug!(?roots, sites = session.sites.len(), "Resolving session");

    let cache = Arc::new(CatalogCache::new(CatalogLoader::new(roots)));
    let report = ImportReport::new();
    let selector = ImportSelector::builder(cache)
        .config(session.engine.clone())
        .context(session.context(env))
        .listener(report.clone())
        .build();

    let mut group = selector.group()?;
    for site in session.sites {
        group.process(site)?;
    }
    let imports = group.finalize()?;

    Ok(Resolution {
        imports,
        events: report.events(),
    })
}

/// Run the resolve command
pub fn run_resolve(session_path: &Path, roots: &[PathBuf], json: bool, report: bool) -> Result<()> {
    let resolution = resolve_session(session_path, roots, EnvProperties::from_env())?;

    if json {
        let output = if report {
            serde_json::to_string_pretty(&resolution)?
        } else {
            serde_json::to_string_pretty(&resolution.imports)?
        };
        println!("{output}");
        return Ok(());
    }

    if resolution.imports.is_empty() {
        println!("{}", "No modules activated".dimmed());
    }
    for import in &resolution.imports {
        println!("{} -> {}", import.origin.origin, import.module);
    }

    if report {
        println!();
        println!("{}:", "Import Events".bold());
        for (index, event) in resolution.events.iter().enumerate() {
            println!(
                "  {} accepted: [{}]",
                format!("#{}", index + 1).cyan(),
                event.configurations().join(", ")
            );
            let exclusions: Vec<&str> = event.exclusions().iter().map(String::as_str).collect();
            println!("     excluded: [{}]", exclusions.join(", "));
        }
    }

    Ok(())
}
