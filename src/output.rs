//! Output root validation and directory skeleton creation.

use crate::error::{Error, Result};
use crate::path::join_relative;
use log::debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Permission mode of every directory created under the output root.
pub const DIR_MODE: u32 = 0o775;

/// State of the output root observed by the safety check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputState {
    /// The output root does not exist. `created_from` is its outermost
    /// missing ancestor (possibly the output root itself), which is what
    /// creation brings into existence.
    Missing { created_from: PathBuf },
    /// The output root exists and is an empty directory.
    Empty,
}

/// Checks that `output_root` is absent or an empty directory. Writes nothing.
///
/// # Errors
/// * `Error::DestinationConflict` if the path (after following symlinks) exists
///   and is not a directory, is a dangling symlink, or lies under a file
/// * `Error::DestinationNotEmpty` if the directory has entries
/// * `Error::WriteFailure` if the path cannot be inspected
pub fn check_output_dir<P: AsRef<Path>>(output_root: P) -> Result<OutputState> {
    let output_root = output_root.as_ref();

    let metadata = match fs::metadata(output_root) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            // dangling symlink: creating through it would write elsewhere
            if fs::symlink_metadata(output_root).is_ok() {
                return Err(Error::DestinationConflict { path: output_root.to_path_buf() });
            }
            let created_from = outermost_missing(output_root);
            debug!(
                "Output directory '{}' does not exist, '{}' will be created.",
                output_root.display(),
                created_from.display()
            );
            return Ok(OutputState::Missing { created_from });
        }
        Err(_) if blocked_by_file(output_root) => {
            return Err(Error::DestinationConflict { path: output_root.to_path_buf() })
        }
        Err(source) => {
            return Err(Error::WriteFailure { path: output_root.to_path_buf(), source })
        }
    };

    if !metadata.is_dir() {
        return Err(Error::DestinationConflict { path: output_root.to_path_buf() });
    }

    let mut entries = fs::read_dir(output_root)
        .map_err(|source| Error::WriteFailure { path: output_root.to_path_buf(), source })?;
    if entries.next().is_some() {
        return Err(Error::DestinationNotEmpty { path: output_root.to_path_buf() });
    }

    debug!("Output directory '{}' exists and is empty.", output_root.display());
    Ok(OutputState::Empty)
}

/// True when the closest existing ancestor of `path` is not a directory.
fn blocked_by_file(path: &Path) -> bool {
    path.ancestors()
        .skip(1)
        .filter(|ancestor| !ancestor.as_os_str().is_empty())
        .find_map(|ancestor| fs::metadata(ancestor).ok())
        .is_some_and(|metadata| !metadata.is_dir())
}

fn outermost_missing(path: &Path) -> PathBuf {
    let mut missing = path.to_path_buf();
    for ancestor in path.ancestors().skip(1) {
        if ancestor.as_os_str().is_empty() || fs::symlink_metadata(ancestor).is_ok() {
            break;
        }
        missing = ancestor.to_path_buf();
    }
    missing
}

/// Creates one directory (and missing intermediates) with [`DIR_MODE`].
pub fn create_dir<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    builder
        .create(path)
        .map_err(|source| Error::WriteFailure { path: path.to_path_buf(), source })
}

/// Creates every directory of `dirs` under `output_root`, in order.
///
/// `dirs` must list parents before children, as produced by
/// [`TreeDescriptor::build`](crate::descriptor::TreeDescriptor::build).
pub fn create_skeleton<P: AsRef<Path>>(output_root: P, dirs: &[String]) -> Result<usize> {
    let output_root = output_root.as_ref();
    create_dir(output_root)?;
    for dir in dirs {
        let target = join_relative(output_root, dir);
        create_dir(&target)?;
        debug!("Created directory: '{}'", target.display());
    }
    Ok(dirs.len())
}
