//! End-to-end integration tests for the resolution pipeline
//!
//! These tests exercise the complete flow: catalog roots on disk -> cache ->
//! selector -> deferred group -> ordered imports.

use std::sync::{Arc, Mutex};

use autoconf_core::{
    BoxError, Capabilities, Error, ImportEntry, ImportEvent, ImportFilter, ImportListener,
    ImportReport, ImportSelector, NameSet, PropertySource, ResolutionContext, SiteDescriptor,
    TomlProperties,
};
use autoconf_meta::{CatalogCache, CatalogLoader, EnvironmentKind, ModuleMetadata};
use autoconf_test_utils::TestCatalog;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// Two libraries: a web stack with hints and a data stack.
fn setup_libraries() -> TestCatalog {
    let mut fixture = TestCatalog::new();
    fixture.library(
        "web",
        &["web.ServerConfig", "web.JsonConfig", "web.ErrorConfig"],
    );
    fixture.metadata(
        "web",
        r#"
[modules."web.ServerConfig"]
on_environment = "servlet"
order = -100

[modules."web.JsonConfig"]
on_types = ["json.Mapper"]

[modules."web.ErrorConfig"]
on_environment = "web"
after = ["web.ServerConfig"]
"#,
    );
    fixture.library("data", &["data.PoolConfig", "data.TxConfig"]);
    fixture.metadata(
        "data",
        r#"
[modules."data.PoolConfig"]
on_instances = ["data.Driver"]

[modules."data.TxConfig"]
after = ["data.PoolConfig"]
before = ["web.JsonConfig"]
"#,
    );
    fixture
}

fn cache(fixture: &TestCatalog) -> Arc<CatalogCache> {
    Arc::new(CatalogCache::new(CatalogLoader::new(
        fixture.roots().to_vec(),
    )))
}

fn servlet_context() -> ResolutionContext {
    ResolutionContext::empty()
        .with_types(["json.Mapper"].into_iter().collect::<NameSet>())
        .with_instances(["data.Driver"].into_iter().collect::<NameSet>())
        .with_environment(EnvironmentKind::Servlet)
}

fn modules(imports: &[ImportEntry]) -> Vec<&str> {
    imports.iter().map(|i| i.module.as_str()).collect()
}

#[test]
fn test_full_bootstrap_order() {
    let fixture = setup_libraries();
    let selector = ImportSelector::builder(cache(&fixture))
        .context(servlet_context())
        .build();

    let mut group = selector.group().unwrap();
    group.process(SiteDescriptor::new("demo.App")).unwrap();
    let imports = group.finalize().unwrap();

    assert_eq!(
        modules(&imports),
        vec![
            "web.ServerConfig",
            "web.ErrorConfig",
            "data.PoolConfig",
            "data.TxConfig",
            "web.JsonConfig",
        ]
    );
    assert!(imports.iter().all(|i| i.origin.origin == "demo.App"));
}

#[test]
fn test_conditions_drop_unmet_modules() {
    let fixture = setup_libraries();
    let selector = ImportSelector::builder(cache(&fixture)).build();

    let imports = selector
        .select_imports(&SiteDescriptor::new("demo.Cli"))
        .unwrap();
    assert_eq!(imports, vec!["data.TxConfig"]);
}

#[test]
fn test_exclusions_union_across_sites() {
    let fixture = setup_libraries();
    let selector = ImportSelector::builder(cache(&fixture))
        .context(servlet_context())
        .build();

    let mut group = selector.group().unwrap();
    group
        .process(SiteDescriptor::new("demo.Web").exclude("data.PoolConfig"))
        .unwrap();
    group
        .process(SiteDescriptor::new("demo.Data").exclude_name("web.ErrorConfig"))
        .unwrap();
    let imports = group.finalize().unwrap();

    let pairs: Vec<(&str, &str)> = imports
        .iter()
        .map(|i| (i.origin.origin.as_str(), i.module.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("demo.Web", "web.ServerConfig"),
            ("demo.Web", "data.TxConfig"),
            ("demo.Web", "web.JsonConfig"),
        ]
    );
}

#[test]
fn test_property_exclusion_and_disable_switch() {
    let fixture = setup_libraries();
    let properties = TomlProperties::from_toml(
        r#"
[autoconf.autoconfigure]
exclude = ["web.JsonConfig", "data.Unknown"]
"#,
    )
    .unwrap();
    let selector = ImportSelector::builder(cache(&fixture))
        .context(servlet_context().with_properties(properties))
        .build();

    let imports = selector
        .select_imports(&SiteDescriptor::new("demo.App"))
        .unwrap();
    assert!(!imports.contains(&"web.JsonConfig".to_string()));

    let mut group = selector.group().unwrap();
    group
        .process(SiteDescriptor::new("demo.Off").enabled(false))
        .unwrap();
    assert_eq!(group.len(), 1);
    assert!(group.finalize().unwrap().is_empty());
}

#[test]
fn test_invalid_exclusion_aborts_session() {
    let fixture = setup_libraries();
    let context = servlet_context().with_types(
        ["json.Mapper", "other.Config"]
            .into_iter()
            .collect::<NameSet>(),
    );
    let selector = ImportSelector::builder(cache(&fixture))
        .context(context)
        .build();

    let mut group = selector.group().unwrap();
    let err = group
        .process(SiteDescriptor::new("demo.App").exclude("other.Config"))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidExclusions { ref modules } if modules == &["other.Config"]));
}

#[test]
fn test_ordering_cycle_aborts_finalize() {
    let mut fixture = TestCatalog::new();
    fixture.library("lib", &["demo.A", "demo.B"]);
    fixture.metadata(
        "lib",
        r#"
[modules."demo.A"]
before = ["demo.B"]

[modules."demo.B"]
before = ["demo.A"]
"#,
    );
    let selector = ImportSelector::builder(cache(&fixture)).build();

    let mut group = selector.group().unwrap();
    group.process(SiteDescriptor::new("demo.App")).unwrap();
    match group.finalize().unwrap_err() {
        Error::OrderingCycle { members } => assert_eq!(members, vec!["demo.A", "demo.B"]),
        other => panic!("unexpected error: {other}"),
    }
}

/// A third-party filter that reads a property through its injected capability.
#[derive(Default)]
struct DenyListFilter {
    properties: Option<Arc<dyn PropertySource>>,
}

impl Capabilities for DenyListFilter {
    fn inject_properties(&mut self, properties: Arc<dyn PropertySource>) {
        self.properties = Some(properties);
    }
}

impl ImportFilter for DenyListFilter {
    fn name(&self) -> &str {
        "deny-list"
    }

    fn matches(
        &self,
        candidates: &[Option<&str>],
        _metadata: &ModuleMetadata,
    ) -> Result<Vec<bool>, BoxError> {
        let properties = self.properties.as_ref().ok_or("properties not injected")?;
        let denied = properties.get_list("demo.deny").unwrap_or_default();
        Ok(candidates
            .iter()
            .map(|c| c.is_none_or(|m| !denied.iter().any(|d| d == m)))
            .collect())
    }
}

/// A listener that remembers the order in which it was called.
struct Recorder {
    name: &'static str,
    calls: Arc<Mutex<Vec<&'static str>>>,
}

impl Capabilities for Recorder {}

impl ImportListener for Recorder {
    fn name(&self) -> &str {
        self.name
    }

    fn on_import(&self, _event: &ImportEvent) -> Result<(), BoxError> {
        self.calls.lock().unwrap().push(self.name);
        Ok(())
    }
}

#[test]
fn test_custom_extensions_receive_capabilities() {
    let fixture = setup_libraries();
    let properties = TomlProperties::from_toml(r#""demo.deny" = ["web.ServerConfig"]"#).unwrap();
    let calls = Arc::new(Mutex::new(Vec::new()));
    let report = ImportReport::new();

    let selector = ImportSelector::builder(cache(&fixture))
        .context(servlet_context().with_properties(properties))
        .filter(DenyListFilter::default())
        .listener(Recorder {
            name: "first",
            calls: Arc::clone(&calls),
        })
        .listener(Recorder {
            name: "second",
            calls: Arc::clone(&calls),
        })
        .listener(report.clone())
        .build();

    let imports = selector
        .select_imports(&SiteDescriptor::new("demo.App"))
        .unwrap();
    assert!(!imports.contains(&"web.ServerConfig".to_string()));
    assert_eq!(*calls.lock().unwrap(), vec!["first", "second"]);
    assert_eq!(report.events()[0].configurations(), imports.as_slice());
}

#[test]
fn test_cache_is_shared_between_selectors() {
    let fixture = setup_libraries();
    let shared = cache(&fixture);

    let first = ImportSelector::builder(Arc::clone(&shared))
        .context(servlet_context())
        .build();
    let second = ImportSelector::builder(Arc::clone(&shared))
        .context(servlet_context())
        .build();

    let site = SiteDescriptor::new("demo.App");
    assert_eq!(
        first.select_imports(&site).unwrap(),
        second.select_imports(&site).unwrap()
    );
    assert!(shared.is_loaded());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_excluded_modules_never_activate(
        excluded in proptest::sample::subsequence(
            vec!["web.ServerConfig", "web.JsonConfig", "web.ErrorConfig", "data.PoolConfig", "data.TxConfig"],
            0..=5,
        )
    ) {
        let fixture = setup_libraries();
        let selector = ImportSelector::builder(cache(&fixture))
            .context(servlet_context())
            .build();

        let mut site = SiteDescriptor::new("demo.App");
        for module in &excluded {
            site = site.exclude_name(*module);
        }

        let mut group = selector.group().unwrap();
        group.process(site.clone()).unwrap();
        group.process(site).unwrap();
        let imports = group.finalize().unwrap();

        for import in &imports {
            prop_assert!(!excluded.contains(&import.module.as_str()));
        }
        let mut seen = std::collections::HashSet::new();
        prop_assert!(imports.iter().all(|i| seen.insert(i.module.clone())));
    }
}
