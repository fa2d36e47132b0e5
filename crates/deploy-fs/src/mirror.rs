//! Clear-then-mirror overwrite copy
//!
//! The destination is brought in line with the source in two passes: every
//! immediate child of the destination is removed, then the source tree is
//! copied in recursively. There is no rollback; a failure part-way through
//! leaves the destination partially updated and surfaces as an error.
//!
//! Symlink policy: links are followed. A link to a file is copied as a
//! regular file with the target's bytes; a link to a directory is recreated
//! as a real directory. Pre-existing links at the destination are unlinked
//! without touching their targets.

use std::fs;
use std::path::Path;

use filetime::FileTime;
use serde::Serialize;

use crate::{Error, Result};

/// One observable filesystem action during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress<'a> {
    /// A pre-existing file or symlink is being unlinked.
    RemoveFile { path: &'a Path },
    /// A pre-existing directory is being removed recursively.
    RemoveDir { path: &'a Path },
    /// A source file's bytes are being copied.
    CopyFile { from: &'a Path, to: &'a Path },
    /// A directory is being ensured under the destination.
    CreateDir { path: &'a Path },
}

/// Counters for a completed (or dry) run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MirrorStats {
    /// Immediate children of the destination removed before copying.
    pub entries_removed: usize,
    /// Files copied from the source, at every depth.
    pub files_copied: usize,
    /// Directories ensured under the destination, at every depth. Counts
    /// every source directory visited, whether or not it had to be created.
    pub dirs_ensured: usize,
}

/// Options for clear and mirror operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct MirrorOptions {
    /// Report actions without touching the filesystem.
    pub dry_run: bool,
}

/// Remove every immediate child of `dest`, leaving `dest` itself in place.
///
/// Files and symlinks are unlinked directly; directories are removed
/// recursively. The first removal failure aborts the run: a partially
/// cleared destination followed by a partial copy would be worse than
/// reporting the failure outright.
pub fn clear_destination(
    dest: &Path,
    opts: MirrorOptions,
    stats: &mut MirrorStats,
    progress: &mut dyn FnMut(Progress<'_>),
) -> Result<()> {
    let entries = fs::read_dir(dest).map_err(|e| Error::io(dest, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(dest, e))?;
        let path = entry.path();
        let meta = fs::symlink_metadata(&path).map_err(|e| Error::Clear {
            path: path.clone(),
            source: e,
        })?;

        if meta.is_dir() {
            tracing::debug!(path = %path.display(), "removing directory");
            progress(Progress::RemoveDir { path: &path });
            if !opts.dry_run {
                fs::remove_dir_all(&path).map_err(|e| Error::Clear {
                    path: path.clone(),
                    source: e,
                })?;
            }
        } else {
            tracing::debug!(path = %path.display(), "removing file");
            progress(Progress::RemoveFile { path: &path });
            if !opts.dry_run {
                fs::remove_file(&path).map_err(|e| Error::Clear {
                    path: path.clone(),
                    source: e,
                })?;
            }
        }
        stats.entries_removed += 1;
    }
    Ok(())
}

/// Recursively copy every entry under `source` into `dest`.
///
/// Files overwrite any same-named destination entry; directories are created
/// when absent and descended into either way. Each entry is visited exactly
/// once and recursion depth is bounded only by the actual tree. The first
/// failure aborts the remaining walk.
pub fn mirror(
    source: &Path,
    dest: &Path,
    opts: MirrorOptions,
    stats: &mut MirrorStats,
    progress: &mut dyn FnMut(Progress<'_>),
) -> Result<()> {
    let entries = fs::read_dir(source).map_err(|e| Error::io(source, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(source, e))?;
        let from = entry.path();
        let to = dest.join(entry.file_name());

        // Follows symlinks, so a link to a directory recurses and a link
        // to a file copies the target's bytes.
        let meta = fs::metadata(&from).map_err(|e| Error::io(&from, e))?;

        if meta.is_dir() {
            tracing::debug!(from = %from.display(), to = %to.display(), "mirroring directory");
            progress(Progress::CreateDir { path: &to });
            if !opts.dry_run && !to.is_dir() {
                fs::create_dir(&to).map_err(|e| Error::CreateDir {
                    path: to.clone(),
                    source: e,
                })?;
            }
            stats.dirs_ensured += 1;
            mirror(&from, &to, opts, stats, progress)?;
        } else {
            tracing::debug!(from = %from.display(), to = %to.display(), "copying file");
            progress(Progress::CopyFile {
                from: &from,
                to: &to,
            });
            if !opts.dry_run {
                fs::copy(&from, &to).map_err(|e| Error::Copy {
                    from: from.clone(),
                    to: to.clone(),
                    source: e,
                })?;
                copy_mtime(&from, &to);
            }
            stats.files_copied += 1;
        }
    }
    Ok(())
}

/// Clear `dest`'s immediate children, then mirror `source` into it.
///
/// `dest` is expected to exist already (see
/// [`ensure_preconditions`](crate::roots::ensure_preconditions)); in a dry
/// run with a not-yet-created destination the clear pass is skipped.
pub fn overwrite_sync(
    source: &Path,
    dest: &Path,
    opts: MirrorOptions,
    progress: &mut dyn FnMut(Progress<'_>),
) -> Result<MirrorStats> {
    let mut stats = MirrorStats::default();
    if dest.is_dir() {
        clear_destination(dest, opts, &mut stats, progress)?;
    }
    mirror(source, dest, opts, &mut stats, progress)?;
    Ok(stats)
}

/// Best-effort carry-over of the source modification time.
///
/// Timestamp preservation is not part of the mirroring contract, so a
/// failure here is logged and swallowed rather than aborting the run.
fn copy_mtime(from: &Path, to: &Path) {
    match fs::metadata(from) {
        Ok(meta) => {
            let mtime = FileTime::from_last_modification_time(&meta);
            if let Err(e) = filetime::set_file_mtime(to, mtime) {
                tracing::debug!(path = %to.display(), error = %e, "could not preserve mtime");
            }
        }
        Err(e) => {
            tracing::debug!(path = %from.display(), error = %e, "could not read source mtime");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn clear_leaves_destination_itself_in_place() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("stale.txt"), "stale").unwrap();

        let mut stats = MirrorStats::default();
        clear_destination(
            temp.path(),
            MirrorOptions::default(),
            &mut stats,
            &mut |_| {},
        )
        .unwrap();

        assert!(temp.path().is_dir());
        assert_eq!(stats.entries_removed, 1);
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn clear_on_missing_directory_is_an_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("gone");

        let mut stats = MirrorStats::default();
        let result = clear_destination(
            &missing,
            MirrorOptions::default(),
            &mut stats,
            &mut |_| {},
        );
        assert!(result.is_err());
    }

    #[test]
    fn mirror_overwrites_conflicting_file() {
        // The clear pass normally guarantees an empty destination, but
        // overwrite-on-conflict is the documented behavior regardless.
        let source = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        fs::write(source.path().join("plugin.json"), "new").unwrap();
        fs::write(dest.path().join("plugin.json"), "old").unwrap();

        let mut stats = MirrorStats::default();
        mirror(
            source.path(),
            dest.path(),
            MirrorOptions::default(),
            &mut stats,
            &mut |_| {},
        )
        .unwrap();

        assert_eq!(
            fs::read_to_string(dest.path().join("plugin.json")).unwrap(),
            "new"
        );
        assert_eq!(stats.files_copied, 1);
    }

    #[test]
    fn dry_run_counts_but_does_not_copy() {
        let source = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        fs::write(source.path().join("a.txt"), "a").unwrap();
        fs::create_dir(source.path().join("sub")).unwrap();
        fs::write(source.path().join("sub").join("b.txt"), "b").unwrap();

        let stats = overwrite_sync(
            source.path(),
            dest.path(),
            MirrorOptions { dry_run: true },
            &mut |_| {},
        )
        .unwrap();

        assert_eq!(stats.files_copied, 2);
        assert_eq!(stats.dirs_ensured, 1);
        assert_eq!(fs::read_dir(dest.path()).unwrap().count(), 0);
    }

    #[test]
    fn mirror_counts_existing_directories_as_ensured() {
        let source = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        fs::create_dir(source.path().join("lib")).unwrap();
        fs::write(source.path().join("lib").join("helper.js"), "export {}").unwrap();
        fs::create_dir(dest.path().join("lib")).unwrap();

        let mut stats = MirrorStats::default();
        mirror(
            source.path(),
            dest.path(),
            MirrorOptions::default(),
            &mut stats,
            &mut |_| {},
        )
        .unwrap();

        // The pre-existing directory is descended into, not recreated.
        assert_eq!(stats.dirs_ensured, 1);
        assert!(dest.path().join("lib").join("helper.js").is_file());
    }
}
