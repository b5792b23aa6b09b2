//! Structural description of a template tree.

use crate::error::{Error, Result};
use crate::path::relative_path;
use log::debug;
use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// Every directory and file of a template tree, as root-relative paths.
///
/// `dirs` always starts with `""` (the root) and lists parents before
/// children. Every file's parent is present in `dirs`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeDescriptor {
    pub dirs: Vec<String>,
    pub files: Vec<String>,
}

fn unreadable<P: AsRef<Path>>(path: P, message: &str) -> Error {
    Error::TemplateTreeUnreadable {
        path: path.as_ref().to_path_buf(),
        source: io::Error::new(io::ErrorKind::InvalidInput, message.to_string()),
    }
}

impl TreeDescriptor {
    /// Walks `template_root` depth-first and records every entry.
    ///
    /// # Errors
    /// * `Error::TemplateTreeUnreadable` if the root is missing or not a directory,
    ///   an entry cannot be read, or the tree contains a symbolic link or a
    ///   special file
    pub fn build<P: AsRef<Path>>(template_root: P) -> Result<Self> {
        let template_root = template_root.as_ref();
        debug!("Describing template tree '{}'.", template_root.display());

        let mut descriptor = TreeDescriptor::default();

        for entry in WalkDir::new(template_root).follow_links(false).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e
                    .path()
                    .unwrap_or(template_root)
                    .to_path_buf();
                Error::TemplateTreeUnreadable { path, source: e.into() }
            })?;
            let path = entry.path();
            let file_type = entry.file_type();

            if entry.depth() == 0 && !file_type.is_dir() {
                return Err(unreadable(path, "template root is not a directory"));
            }

            let relative = relative_path(template_root, path)?;

            if file_type.is_symlink() {
                return Err(unreadable(path, "symbolic links are not supported"));
            } else if file_type.is_dir() {
                debug!("Template directory: '{relative}'");
                descriptor.dirs.push(relative);
            } else if file_type.is_file() {
                fs::File::open(path).map_err(|source| Error::TemplateTreeUnreadable {
                    path: path.to_path_buf(),
                    source,
                })?;
                debug!("Template file: '{relative}'");
                descriptor.files.push(relative);
            } else {
                return Err(unreadable(path, "unsupported file type"));
            }
        }

        Ok(descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_root_has_root_dir_only() {
        let temp_dir = TempDir::new().unwrap();
        let descriptor = TreeDescriptor::build(temp_dir.path()).unwrap();

        assert_eq!(descriptor.dirs, vec![String::new()]);
        assert!(descriptor.files.is_empty());
    }

    #[test]
    fn test_missing_root_is_unreadable() {
        let temp_dir = TempDir::new().unwrap();
        let err = TreeDescriptor::build(temp_dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, Error::TemplateTreeUnreadable { .. }));
    }

    #[test]
    fn test_root_that_is_a_file_is_unreadable() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("Makefile");
        fs::write(&file, "all:").unwrap();

        let err = TreeDescriptor::build(&file).unwrap_err();
        assert!(matches!(err, Error::TemplateTreeUnreadable { .. }));
    }
}
