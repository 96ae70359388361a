//! Layered configuration.
//!
//! The global file (`$XDG_CONFIG_HOME/ofgen/config.toml`) is read first and
//! the project file (`.ofgen.toml`) is merged over it. Tables merge
//! recursively; any other value in a later layer replaces the earlier one.
//!
//! ```toml
//! manifest = "flags/flags.json"
//!
//! [generate]
//! output = "src/generated"
//!
//! [generate.go]
//! package-name = "flags"
//!
//! [compare]
//! output = "flat"
//! ```

use std::path::{Path, PathBuf};

/// Project configuration file name, looked up in the working directory.
pub const PROJECT_CONFIG: &str = ".ofgen.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default)]
pub struct OfgenConfig {
    table: toml::Table,
    sources: Vec<PathBuf>,
}

impl OfgenConfig {
    /// Location of the global config file, if the platform has one.
    pub fn global_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ofgen").join("config.toml"))
    }

    /// Load the global config, then the project config in `project_dir`.
    pub fn load(project_dir: &Path) -> Result<Self, ConfigError> {
        let mut paths: Vec<PathBuf> = Self::global_path().into_iter().collect();
        paths.push(project_dir.join(PROJECT_CONFIG));
        Self::load_layers(&paths)
    }

    /// Load files in order, later files taking precedence. Missing files are
    /// skipped.
    pub fn load_layers(paths: &[PathBuf]) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for path in paths {
            let text = match std::fs::read_to_string(path) {
                Ok(text) => text,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(source) => {
                    return Err(ConfigError::Read {
                        path: path.clone(),
                        source,
                    });
                }
            };
            let layer: toml::Table = toml::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?;
            tracing::debug!(path = %path.display(), "loaded config");
            config.merge(layer);
            config.sources.push(path.clone());
        }
        Ok(config)
    }

    /// Parse a single in-memory layer.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        Ok(Self {
            table: toml::from_str(text)?,
            sources: Vec::new(),
        })
    }

    /// Merge `layer` over this config.
    pub fn merge(&mut self, layer: toml::Table) {
        merge_tables(&mut self.table, layer);
    }

    /// Files that contributed to this config, in load order.
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    /// Resolve `key` from the most specific scope outwards.
    ///
    /// With scope `["generate", "go"]`, tries `generate.go.<key>`, then
    /// `generate.<key>`, then `<key>`.
    pub fn lookup(&self, scope: &[&str], key: &str) -> Option<&toml::Value> {
        (0..=scope.len()).rev().find_map(|depth| {
            let mut table = &self.table;
            for part in &scope[..depth] {
                table = table.get(*part)?.as_table()?;
            }
            table.get(key).filter(|v| !v.is_table())
        })
    }

    /// Like [`lookup`](Self::lookup), rendering scalars as strings.
    pub fn lookup_str(&self, scope: &[&str], key: &str) -> Option<String> {
        self.lookup(scope, key).map(|value| match value {
            toml::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// Manifest path from config, relative paths unchanged.
    pub fn manifest(&self) -> Option<PathBuf> {
        self.lookup_str(&[], "manifest").map(PathBuf::from)
    }
}

fn merge_tables(base: &mut toml::Table, layer: toml::Table) {
    for (key, value) in layer {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}
