//! Mapping between template-tree paths and root-relative paths.
//!
//! Relative paths are plain strings with `/` separators and no leading
//! separator. The template root itself maps to the empty string.

use crate::error::{Error, Result};
use std::path::{Component, Path, PathBuf};

/// Returns `path` relative to `root`.
///
/// # Arguments
/// * `root` - The template root
/// * `path` - A path produced by walking `root`
///
/// # Returns
/// * `Result<String>` - Forward-slash separated path, `""` for the root itself
///
/// # Errors
/// * `Error::PathOutsideRoot` if `path` does not lie under `root`
/// * `Error::TemplateTreeUnreadable` if a component is not valid UTF-8
pub fn relative_path<R: AsRef<Path>, P: AsRef<Path>>(root: R, path: P) -> Result<String> {
    let root = root.as_ref();
    let path = path.as_ref();
    let stripped = path.strip_prefix(root).map_err(|_| Error::PathOutsideRoot {
        path: path.to_path_buf(),
        root: root.to_path_buf(),
    })?;

    let mut parts = Vec::new();
    for component in stripped.components() {
        match component {
            Component::Normal(part) => {
                let part = part.to_str().ok_or_else(|| Error::TemplateTreeUnreadable {
                    path: path.to_path_buf(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        "path is not valid UTF-8",
                    ),
                })?;
                parts.push(part);
            }
            Component::CurDir => {}
            _ => {
                return Err(Error::PathOutsideRoot {
                    path: path.to_path_buf(),
                    root: root.to_path_buf(),
                })
            }
        }
    }

    Ok(parts.join("/"))
}

/// Joins a relative path produced by [`relative_path`] onto `base`.
///
/// The empty relative path yields `base` itself.
pub fn join_relative<B: AsRef<Path>>(base: B, relative: &str) -> PathBuf {
    relative
        .split('/')
        .filter(|part| !part.is_empty())
        .fold(base.as_ref().to_path_buf(), |acc, part| acc.join(part))
}

/// Returns the parent of a relative path, `""` for first-level entries.
pub fn parent_of(relative: &str) -> &str {
    relative.rsplit_once('/').map(|(parent, _)| parent).unwrap_or("")
}
