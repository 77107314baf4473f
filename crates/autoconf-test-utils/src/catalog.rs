//! [`TestCatalog`] builder for resolution test scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use autoconf_meta::{AUTO_CONFIGURATION_KEY, CATALOG_FILENAME, METADATA_FILENAME};
use tempfile::TempDir;

/// A temporary directory holding one catalog root per library.
///
/// # Example
///
/// ```rust,no_run
/// use autoconf_test_utils::TestCatalog;
///
/// let mut fixture = TestCatalog::new();
/// fixture.library("web", &["web.ServerConfig", "web.JsonConfig"]);
/// fixture.metadata("web", r#"
/// [modules."web.ServerConfig"]
/// on_environment = "web"
/// "#);
/// let session = fixture.session(r#"
/// [[sites]]
/// origin = "demo.App"
/// "#);
/// assert!(session.is_file());
/// ```
pub struct TestCatalog {
    temp_dir: TempDir,
    roots: Vec<PathBuf>,
}

impl Default for TestCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCatalog {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
            roots: Vec::new(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Catalog roots created so far, in creation order.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Create a library root registering `modules` under the
    /// auto-configuration extension point.
    pub fn library(&mut self, name: &str, modules: &[&str]) -> PathBuf {
        self.library_for(name, AUTO_CONFIGURATION_KEY, modules)
    }

    /// Create a library root registering `modules` under `extension_point`.
    ///
    /// Calling this again for the same library appends another extension
    /// point to its registry.
    pub fn library_for(&mut self, name: &str, extension_point: &str, modules: &[&str]) -> PathBuf {
        let dir = self.root().join(name);
        fs::create_dir_all(&dir).unwrap();

        let registry = dir.join(CATALOG_FILENAME);
        let mut content = if registry.is_file() {
            fs::read_to_string(&registry).unwrap()
        } else {
            "[extension_points]\n".to_string()
        };
        content.push_str(&format!("\"{}\" = [{}]\n", extension_point, quoted(modules)));
        fs::write(&registry, content).unwrap();

        if !self.roots.contains(&dir) {
            self.roots.push(dir.clone());
        }
        dir
    }

    /// Write the metadata store of library `name`.
    pub fn metadata(&self, name: &str, content: &str) -> PathBuf {
        let dir = self.root().join(name);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(METADATA_FILENAME);
        fs::write(&path, content).unwrap();
        path
    }

    /// Write a raw file relative to the root, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Write `session.toml` at the root.
    pub fn session(&self, content: &str) -> PathBuf {
        self.write("session.toml", content)
    }

    /// Assert that `path` (relative to the root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }
}

fn quoted(modules: &[&str]) -> String {
    modules
        .iter()
        .map(|m| format!("\"{m}\""))
        .collect::<Vec<_>>()
        .join(", ")
}
