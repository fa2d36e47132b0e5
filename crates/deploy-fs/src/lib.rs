//! Filesystem engine for plugin-deploy
//!
//! Resolves the source and destination roots, clears the destination's
//! immediate children, and mirrors the source tree into it.

pub mod config;
pub mod error;
pub mod mirror;
pub mod roots;

pub use config::DeployConfig;
pub use error::{Error, Result};
pub use mirror::{MirrorOptions, MirrorStats, Progress, clear_destination, mirror, overwrite_sync};
pub use roots::{Roots, default_dest_root, default_source_root, ensure_preconditions};
