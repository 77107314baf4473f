//! Session file parsing
//!
//! A session file describes one bootstrap: the runtime the engine consults
//! and the sites to resolve.
//!
//! ```toml
//! environment = "servlet"
//! types = ["json.Mapper"]
//! instances = []
//!
//! [engine]
//! namespace = "autoconf"
//!
//! [properties]
//! "autoconf.autoconfigure.exclude" = ["demo.CacheConfig"]
//!
//! [[sites]]
//! origin = "demo.Application"
//! exclude = ["demo.DataSourceConfig"]
//! ```

use std::path::Path;

use autoconf_core::{
    EngineConfig, EnvProperties, LayeredProperties, NameSet, ResolutionContext, SiteDescriptor,
    TomlProperties,
};
use autoconf_meta::EnvironmentKind;
use serde::Deserialize;

use crate::error::{CliError, Result};

/// Parsed contents of a session file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Session {
    pub engine: EngineConfig,
    pub environment: EnvironmentKind,
    /// Types known to the runtime
    pub types: Vec<String>,
    /// Instances already registered with the host
    pub instances: Vec<String>,
    pub properties: toml::Table,
    pub sites: Vec<SiteDescriptor>,
}

impl Session {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CliError::user(format!("Invalid session: {e}")))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::user(format!("Cannot read session file {}: {e}", path.display()))
        })?;
        Self::parse(&content).map_err(|e| CliError::user(format!("{}: {e}", path.display())))
    }

    /// Build the resolution context, layering `env` over the file's
    /// properties.
    pub fn context(&self, env: EnvProperties) -> ResolutionContext {
        let properties = LayeredProperties::new()
            .with(env)
            .with(TomlProperties::new(self.properties.clone()));

        ResolutionContext::empty()
            .with_types(self.types.iter().cloned().collect::<NameSet>())
            .with_instances(self.instances.iter().cloned().collect::<NameSet>())
            .with_properties(properties)
            .with_environment(self.environment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoconf_core::PropertySource;

    const SESSION: &str = r#"
environment = "reactive"
types = ["json.Mapper"]
instances = ["demo.Marker"]

[engine]
namespace = "spark"

[properties]
"spark.autoconfigure.exclude" = ["demo.File"]
"spark.enableautoconfiguration" = true

[[sites]]
origin = "demo.App"
exclude_name = ["demo.X"]

[[sites]]
origin = "demo.Tests"
enabled = false
"#;

    #[test]
    fn test_parse_full_session() {
        let session = Session::parse(SESSION).unwrap();
        assert_eq!(session.environment, EnvironmentKind::Reactive);
        assert_eq!(session.engine.namespace, "spark");
        assert_eq!(session.sites.len(), 2);
        assert_eq!(session.sites[0].exclude_name, vec!["demo.X"]);
        assert_eq!(session.sites[1].enabled, Some(false));
    }

    #[test]
    fn test_empty_session_uses_defaults() {
        let session = Session::parse("").unwrap();
        assert_eq!(session.environment, EnvironmentKind::Standalone);
        assert_eq!(session.engine, EngineConfig::default());
        assert!(session.sites.is_empty());
    }

    #[test]
    fn test_environment_overrides_file_properties() {
        let session = Session::parse(SESSION).unwrap();
        let context =
            session.context(EnvProperties::from_vars([("SPARK_AUTOCONFIGURE_EXCLUDE", "demo.Env")]));

        assert_eq!(
            context
                .properties
                .get_list("spark.autoconfigure.exclude")
                .unwrap(),
            vec!["demo.Env"]
        );
        assert_eq!(
            context
                .properties
                .get_bool("spark.enableautoconfiguration")
                .unwrap(),
            Some(true)
        );
        assert!(context.types.is_present("json.Mapper"));
        assert!(context.instances.contains("demo.Marker"));
        assert_eq!(context.environment, EnvironmentKind::Reactive);
    }

    #[test]
    fn test_load_reports_path_of_invalid_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("session.toml");
        std::fs::write(&path, "sites = 3").unwrap();

        let err = Session::load(&path).unwrap_err();
        assert!(matches!(err, CliError::User { .. }));
        let message = err.to_string();
        assert!(message.contains("session.toml"));
        assert!(message.contains("Invalid session"));
    }

    #[test]
    fn test_load_parses_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("session.toml");
        std::fs::write(&path, SESSION).unwrap();

        assert_eq!(Session::load(&path).unwrap().sites.len(), 2);
    }

    #[test]
    fn test_invalid_session_is_user_error() {
        let err = Session::parse("environment = \"desktop\"").unwrap_err();
        assert!(matches!(err, CliError::User { .. }));
    }
}
