//! Source and destination root resolution
//!
//! The defaults reproduce the original deployment layout: the build output
//! lives in a `dist` directory sibling to the directory holding the
//! executable, and the plugin installs into the host application's plugin
//! directory under the user's home. Both can be overridden by flags or a
//! config file; see [`crate::config`].

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::mirror::MirrorOptions;
use crate::{Error, Result};

/// Name of the build output directory expected next to the executable's parent.
pub const DIST_DIR: &str = "dist";

/// Plugin identifier used for the default installation directory.
pub const DEFAULT_PLUGIN_ID: &str = "mouse-events-plugin";

/// Host application plugin path, relative to the user's home directory.
pub const PLUGINS_SUBPATH: &[&str] = &["SiYuan", "data", "plugins"];

/// Resolved absolute roots for one synchronization run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roots {
    pub source: PathBuf,
    pub dest: PathBuf,
}

/// Default source root: the `dist` directory sibling to the executable's
/// own directory (`<exe_dir>/../dist`).
pub fn default_source_root() -> Result<PathBuf> {
    let exe = env::current_exe().map_err(|e| Error::ExeUnavailable { source: e })?;
    let exe_dir = exe.parent().unwrap_or(Path::new("."));
    let project_root = exe_dir.parent().unwrap_or(exe_dir);
    Ok(project_root.join(DIST_DIR))
}

/// Default destination root: the plugin installation directory under the
/// user's home.
pub fn default_dest_root() -> Result<PathBuf> {
    let mut dest = dirs::home_dir().ok_or(Error::HomeUnavailable)?;
    for segment in PLUGINS_SUBPATH {
        dest.push(segment);
    }
    dest.push(DEFAULT_PLUGIN_ID);
    Ok(dest)
}

/// Validate the source root and ensure the destination root exists.
///
/// A missing or non-directory source is fatal and nothing at the
/// destination is touched. A missing destination is created, intermediate
/// directories included, unless this is a dry run. Both roots come back
/// canonicalized where they exist, so progress output shows clean absolute
/// paths.
pub fn ensure_preconditions(source: &Path, dest: &Path, opts: MirrorOptions) -> Result<Roots> {
    if !source.is_dir() {
        return Err(Error::SourceMissing {
            path: source.to_path_buf(),
        });
    }
    let source = dunce::canonicalize(source).map_err(|e| Error::io(source, e))?;

    if !dest.exists() && !opts.dry_run {
        fs::create_dir_all(dest).map_err(|e| Error::CreateDir {
            path: dest.to_path_buf(),
            source: e,
        })?;
    }
    let dest = if dest.exists() {
        dunce::canonicalize(dest).map_err(|e| Error::io(dest, e))?
    } else {
        dest.to_path_buf()
    };

    tracing::debug!(
        source = %source.display(),
        dest = %dest.display(),
        "resolved synchronization roots"
    );
    Ok(Roots { source, dest })
}
