use super::remote::{detect_code_host, GitRemote, RemoteSource};
use crate::error::{NexusError, Result};
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const CONFIG_DIR: &str = ".claude";
const CONFIG_FILE: &str = "toolkit.yaml";

/// Merged toolkit configuration: auto-detected defaults overlaid with the
/// first `toolkit.yaml` found.
///
/// Example `.claude/toolkit.yaml`:
/// ```yaml
/// toolkit:
///   code_host:
///     type: gitlab
///     prefer: api
///   issue_tracker:
///     type: jira
///     project: TEST
/// ```
#[derive(Debug, Clone)]
pub struct Configuration {
    search_path: PathBuf,
    candidate_paths: Vec<PathBuf>,
    config_path: Option<PathBuf>,
    values: Value,
}

impl Configuration {
    /// Load from the current directory, probing git for the remote.
    pub fn load() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        ConfigLoader::new(cwd).load()
    }

    /// Value at a dot-separated path such as `toolkit.code_host.type`.
    /// Explicit YAML nulls count as absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        let mut value = &self.values;
        for part in key.split('.') {
            value = value.as_mapping()?.get(part)?;
            if value.is_null() {
                return None;
            }
        }
        Some(value)
    }

    pub fn get_or(&self, key: &str, default: Value) -> Value {
        self.get(key).cloned().unwrap_or(default)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// A copy of the whole merged tree.
    pub fn get_all(&self) -> Value {
        self.values.clone()
    }

    /// The file that was loaded, if any.
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    pub fn search_path(&self) -> &Path {
        &self.search_path
    }

    /// Every location that was searched, in precedence order.
    pub fn candidate_paths(&self) -> &[PathBuf] {
        &self.candidate_paths
    }

    /// Detected or configured code host type, `unknown` if neither.
    pub fn code_host_type(&self) -> &str {
        self.get_str("toolkit.code_host.type").unwrap_or("unknown")
    }
}

/// Locates, reads and merges configuration sources.
pub struct ConfigLoader {
    search_path: PathBuf,
    home_dir: Option<PathBuf>,
    remote: Box<dyn RemoteSource>,
}

impl ConfigLoader {
    pub fn new(search_path: impl Into<PathBuf>) -> Self {
        Self {
            search_path: search_path.into(),
            home_dir: dirs::home_dir(),
            remote: Box::new(GitRemote),
        }
    }

    /// Override the home directory searched second. `None` skips it.
    pub fn home_dir(mut self, home: Option<PathBuf>) -> Self {
        self.home_dir = home;
        self
    }

    pub fn remote(mut self, source: impl RemoteSource + 'static) -> Self {
        self.remote = Box::new(source);
        self
    }

    /// Candidate files in precedence order: project first, then home.
    pub fn candidate_paths(&self) -> Vec<PathBuf> {
        let mut paths = vec![self.search_path.join(CONFIG_DIR).join(CONFIG_FILE)];
        if let Some(home) = &self.home_dir {
            paths.push(home.join(CONFIG_DIR).join(CONFIG_FILE));
        }
        paths
    }

    pub fn find_config_file(&self) -> Option<PathBuf> {
        self.candidate_paths().into_iter().find(|p| p.exists())
    }

    /// Auto-detected defaults derived from the git remote.
    pub fn auto_detect(&self) -> Value {
        let remote = self.remote.origin_url(&self.search_path);
        let host = detect_code_host(remote.as_deref());
        debug!(remote = ?remote, host, "auto-detected code host");
        nested(&["toolkit", "code_host", "type"], Value::from(host))
    }

    /// Load leniently: an unreadable or malformed file is logged and the
    /// auto-detected values are used on their own.
    pub fn load(&self) -> Configuration {
        let auto = self.auto_detect();
        let config_path = self.find_config_file();

        let values = match &config_path {
            Some(path) => match read_yaml(path) {
                Ok(file) => deep_merge(auto, file),
                Err(e) => {
                    warn!("Error reading config file {:?}: {}", path, e);
                    auto
                }
            },
            None => auto,
        };

        Configuration {
            search_path: self.search_path.clone(),
            candidate_paths: self.candidate_paths(),
            config_path,
            values,
        }
    }

    /// Like [`ConfigLoader::load`] but a bad file is an error.
    pub fn load_strict(&self) -> Result<Configuration> {
        let auto = self.auto_detect();
        let config_path = self.find_config_file();

        let values = match &config_path {
            Some(path) => deep_merge(auto, read_yaml(path)?),
            None => auto,
        };

        Ok(Configuration {
            search_path: self.search_path.clone(),
            candidate_paths: self.candidate_paths(),
            config_path,
            values,
        })
    }
}

fn read_yaml(path: &Path) -> Result<Value> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| NexusError::Configuration(format!("{}: {}", path.display(), e)))?;
    let value: Value = serde_yaml::from_str(&data)
        .map_err(|e| NexusError::Configuration(format!("{}: {}", path.display(), e)))?;
    match value {
        Value::Null => Ok(Value::Mapping(Mapping::new())),
        Value::Mapping(_) => Ok(value),
        _ => Err(NexusError::Configuration(format!(
            "{}: top level must be a mapping",
            path.display()
        ))),
    }
}

/// Recursively merge `override_val` into `base`. Mappings merge key by key;
/// any other value replaces what was there.
pub fn deep_merge(base: Value, override_val: Value) -> Value {
    match (base, override_val) {
        (Value::Mapping(mut base_map), Value::Mapping(over_map)) => {
            for (k, v) in over_map {
                match base_map.get_mut(&k) {
                    Some(existing) => {
                        let prev = std::mem::replace(existing, Value::Null);
                        *existing = deep_merge(prev, v);
                    }
                    None => {
                        base_map.insert(k, v);
                    }
                }
            }
            Value::Mapping(base_map)
        }
        (_, over) => over,
    }
}

fn nested(path: &[&str], leaf: Value) -> Value {
    path.iter().rev().fold(leaf, |acc, key| {
        let mut map = Mapping::new();
        map.insert(Value::from(*key), acc);
        Value::Mapping(map)
    })
}
