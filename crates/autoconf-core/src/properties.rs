//! Property lookup
//!
//! The engine reads two properties: the exclusion override list and the
//! enablement switch. It reads them through [`PropertySource`] so the host can
//! back them with whatever configuration mechanism it uses. Three sources are
//! provided:
//!
//! - [`TomlProperties`]: dotted keys over a TOML document
//! - [`EnvProperties`]: environment variables with relaxed key binding
//! - [`LayeredProperties`]: ordered sources, first hit wins

use std::collections::HashMap;
use std::path::Path;

use crate::{Error, Result};

/// Key-value lookup collaborator.
pub trait PropertySource: Send + Sync {
    /// Raw value of `key`, if set.
    fn get(&self, key: &str) -> Option<String>;

    /// Value of `key` as a list.
    ///
    /// The default splits the raw value on commas and drops blank items.
    fn get_list(&self, key: &str) -> Option<Vec<String>> {
        self.get(key).map(|value| split_list(&value))
    }

    /// Value of `key` as a boolean.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidProperty` if the value is neither `true` nor
    /// `false` (case-insensitive).
    fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(Some(true)),
                "false" => Ok(Some(false)),
                _ => Err(Error::InvalidProperty {
                    key: key.to_string(),
                    value,
                }),
            },
        }
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Properties backed by a TOML document.
///
/// `autoconf.autoconfigure.exclude` resolves both as nested tables and as a
/// quoted dotted key.
#[derive(Debug, Clone, Default)]
pub struct TomlProperties {
    root: toml::Table,
}

impl TomlProperties {
    /// Wrap an already parsed table.
    pub fn new(root: toml::Table) -> Self {
        Self { root }
    }

    /// Parse properties from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(Self::new(content.parse::<toml::Table>()?))
    }

    /// Read properties from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    fn lookup(&self, key: &str) -> Option<&toml::Value> {
        lookup_in(&self.root, key)
    }
}

fn lookup_in<'a>(table: &'a toml::Table, key: &str) -> Option<&'a toml::Value> {
    if let Some(value) = table.get(key) {
        return Some(value);
    }
    for (position, _) in key.match_indices('.') {
        let (head, tail) = (&key[..position], &key[position + 1..]);
        if let Some(toml::Value::Table(nested)) = table.get(head) {
            if let Some(value) = lookup_in(nested, tail) {
                return Some(value);
            }
        }
    }
    None
}

fn scalar_to_string(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        toml::Value::Datetime(d) => Some(d.to_string()),
        toml::Value::Array(_) | toml::Value::Table(_) => None,
    }
}

impl PropertySource for TomlProperties {
    fn get(&self, key: &str) -> Option<String> {
        match self.lookup(key)? {
            toml::Value::Array(items) => Some(
                items
                    .iter()
                    .filter_map(scalar_to_string)
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            value => scalar_to_string(value),
        }
    }

    fn get_list(&self, key: &str) -> Option<Vec<String>> {
        match self.lookup(key)? {
            toml::Value::Array(items) => Some(items.iter().filter_map(scalar_to_string).collect()),
            value => scalar_to_string(value).map(|s| split_list(&s)),
        }
    }
}

/// Properties backed by environment variables.
///
/// A key binds to the variable named by upper-casing it, replacing dots with
/// underscores and dropping dashes: `autoconf.autoconfigure.exclude` reads
/// `AUTOCONF_AUTOCONFIGURE_EXCLUDE`.
#[derive(Debug, Clone, Default)]
pub struct EnvProperties {
    vars: HashMap<String, String>,
}

impl EnvProperties {
    /// Snapshot the current process environment.
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// Build from explicit variables.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Environment variable name a property key binds to.
    pub fn variable_name(key: &str) -> String {
        key.chars()
            .filter(|c| *c != '-')
            .map(|c| if c == '.' { '_' } else { c.to_ascii_uppercase() })
            .collect()
    }
}

impl PropertySource for EnvProperties {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(&Self::variable_name(key)).cloned()
    }
}

/// Ordered property sources; the first source holding a key wins.
#[derive(Default)]
pub struct LayeredProperties {
    layers: Vec<Box<dyn PropertySource>>,
}

impl LayeredProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layer with lower precedence than every layer already added.
    pub fn with(mut self, source: impl PropertySource + 'static) -> Self {
        self.layers.push(Box::new(source));
        self
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl std::fmt::Debug for LayeredProperties {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayeredProperties")
            .field("layers", &self.layers.len())
            .finish()
    }
}

impl PropertySource for LayeredProperties {
    fn get(&self, key: &str) -> Option<String> {
        self.layers.iter().find_map(|layer| layer.get(key))
    }

    fn get_list(&self, key: &str) -> Option<Vec<String>> {
        self.layers.iter().find_map(|layer| layer.get_list(key))
    }
}
