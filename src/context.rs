//! Render context: placeholder name to substitution value, fixed for one run.

use indexmap::IndexMap;
use serde::Serialize;

/// Placeholder holding the project name.
pub const PROJECT_KEY: &str = "Project";

/// Placeholder holding the docker image name.
pub const DOCKER_IMG_KEY: &str = "DockerImg";

/// Placeholder holding the golangci-lint image tag.
pub const CI_LINT_VERSION_KEY: &str = "CILintVersion";

/// Mapping from placeholder name to the literal value inserted for it.
///
/// Insertion order is preserved so the context can be logged and
/// serialized the same way it was assembled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RenderContext(IndexMap<String, String>);

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, replacing any previous value.
    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Copies every entry of `other` into `self`; `other` wins on conflicts.
    pub fn extend(&mut self, other: RenderContext) {
        self.0.extend(other.0);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RenderContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
