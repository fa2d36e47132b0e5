//! Optional `deploy.toml` configuration
//!
//! Both roots can be pinned in a small TOML file instead of flags:
//!
//! ```toml
//! source = "dist"
//! destination = "/srv/siyuan/data/plugins/mouse-events-plugin"
//! ```
//!
//! Relative paths are resolved against the directory containing the config
//! file. A missing file is not an error; a malformed one is.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{Error, Result};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "deploy.toml";

/// Optional overrides for the synchronization roots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeployConfig {
    pub source: Option<PathBuf>,
    pub destination: Option<PathBuf>,
}

impl DeployConfig {
    /// Load from an explicit path. Fails if the file is missing or malformed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let mut config: Self = toml::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.resolve_relative_to(path.parent().unwrap_or(Path::new(".")));
        Ok(config)
    }

    /// Load `deploy.toml` from `dir` if present.
    pub fn discover(dir: &Path) -> Result<Option<Self>> {
        let path = dir.join(CONFIG_FILE);
        if !path.is_file() {
            return Ok(None);
        }
        tracing::debug!(path = %path.display(), "loading config file");
        Self::load(&path).map(Some)
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        for slot in [&mut self.source, &mut self.destination] {
            if let Some(path) = slot
                && path.is_relative()
            {
                *path = base.join(&*path);
            }
        }
    }
}
