//! Cleanup of partially generated output.

use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// An undo step registered while the output tree is being created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollbackOperation {
    /// Remove a directory the run created, with everything under it.
    RemoveTree(PathBuf),
    /// Remove the contents of a directory that existed (empty) before the run.
    EmptyDir(PathBuf),
}

/// Guard that undoes registered operations when dropped, unless committed.
///
/// Operations run in reverse registration order.
#[derive(Debug, Default)]
pub struct Rollback {
    operations: Vec<RollbackOperation>,
}

impl Rollback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_operation(&mut self, operation: RollbackOperation) {
        self.operations.push(operation);
    }

    /// Keeps everything created so far; nothing is undone on drop.
    pub fn commit(mut self) {
        self.operations.clear();
        debug!("Output committed");
    }
}

impl Drop for Rollback {
    fn drop(&mut self) {
        if self.operations.is_empty() {
            return;
        }
        warn!("Rolling back partially generated output");
        while let Some(operation) = self.operations.pop() {
            match operation {
                RollbackOperation::RemoveTree(path) => {
                    debug!("Removing directory: '{}'", path.display());
                    match fs::remove_dir_all(&path) {
                        Err(e) if e.kind() != std::io::ErrorKind::NotFound => {
                            warn!("Failed to remove '{}': {e}", path.display())
                        }
                        _ => {}
                    }
                }
                RollbackOperation::EmptyDir(path) => {
                    debug!("Emptying directory: '{}'", path.display());
                    if let Err(e) = empty_dir(&path) {
                        warn!("Failed to empty '{}': {e}", path.display());
                    }
                }
            }
        }
    }
}

fn empty_dir(path: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            fs::remove_dir_all(entry.path())?;
        } else {
            fs::remove_file(entry.path())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_drop_removes_tree() {
        let temp_dir = TempDir::new().unwrap();
        let created = temp_dir.path().join("project");
        fs::create_dir_all(created.join("sub")).unwrap();

        let mut rollback = Rollback::new();
        rollback.add_operation(RollbackOperation::RemoveTree(created.clone()));
        drop(rollback);

        assert!(!created.exists());
    }

    #[test]
    fn test_drop_empties_preexisting_dir() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("sub")).unwrap();
        fs::write(temp_dir.path().join("a.txt"), "a").unwrap();

        let mut rollback = Rollback::new();
        rollback.add_operation(RollbackOperation::EmptyDir(temp_dir.path().to_path_buf()));
        drop(rollback);

        assert!(temp_dir.path().is_dir());
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_commit_keeps_output() {
        let temp_dir = TempDir::new().unwrap();
        let created = temp_dir.path().join("project");
        fs::create_dir(&created).unwrap();

        let mut rollback = Rollback::new();
        rollback.add_operation(RollbackOperation::RemoveTree(created.clone()));
        rollback.commit();

        assert!(created.is_dir());
    }
}
