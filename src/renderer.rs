//! Template rendering for gootstrap.
//! Substitutes `{{.Name}}` placeholders with values from a [`RenderContext`]
//! and writes rendered or verbatim-copied files into the output tree.

use crate::context::RenderContext;
use crate::error::{Error, Result};
use log::debug;
use regex::Regex;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Matches `{{.Name}}`, tolerating whitespace inside the braces.
const PLACEHOLDER_PATTERN: &str = r"\{\{\s*\.([A-Za-z_][A-Za-z0-9_]*)\s*\}\}";

/// Matches anything that opens like a placeholder, well-formed or not.
const MARKER_PATTERN: &str = r"\{\{-?\s*\.[^{}\n]*(?:\}\})?";

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `name` - Template name used in error messages
    /// * `template` - Template string to render
    /// * `context` - Values for the placeholders
    ///
    /// # Returns
    /// * `Result<String>` - Rendered template string
    fn render(&self, name: &str, template: &str, context: &RenderContext) -> Result<String>;
}

/// Named-variable substitution with no other template syntax.
///
/// Text that opens like a placeholder (`{{.`, `{{- .`) but is not a plain
/// `{{.Name}}` is rejected rather than written out unsubstituted.
pub struct PlaceholderRenderer {
    pattern: Regex,
    marker: Regex,
}

impl PlaceholderRenderer {
    pub fn new() -> Self {
        let pattern = Regex::new(PLACEHOLDER_PATTERN).expect("placeholder pattern is valid");
        let marker = Regex::new(MARKER_PATTERN).expect("marker pattern is valid");
        Self { pattern, marker }
    }

    /// Returns the first placeholder-like marker that is not a well-formed placeholder.
    fn malformed<'t>(&self, template: &'t str) -> Option<&'t str> {
        self.marker
            .find_iter(template)
            .find(|marker| {
                self.pattern
                    .find_at(template, marker.start())
                    .map_or(true, |placeholder| placeholder.start() != marker.start())
            })
            .map(|marker| marker.as_str())
    }
}

impl Default for PlaceholderRenderer {
    fn default() -> Self {
        PlaceholderRenderer::new()
    }
}

impl TemplateRenderer for PlaceholderRenderer {
    /// Replaces every placeholder with its literal context value.
    ///
    /// # Errors
    /// * `Error::UnknownPlaceholder` for the first malformed placeholder, or else
    ///   the first placeholder missing from `context`
    fn render(&self, name: &str, template: &str, context: &RenderContext) -> Result<String> {
        if let Some(marker) = self.malformed(template) {
            return Err(Error::UnknownPlaceholder {
                name: marker.to_string(),
                template: name.to_string(),
            });
        }

        let mut rendered = String::with_capacity(template.len());
        let mut last = 0;

        for captures in self.pattern.captures_iter(template) {
            let (Some(whole), Some(key)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            let value = context.get(key.as_str()).ok_or_else(|| Error::UnknownPlaceholder {
                name: key.as_str().to_string(),
                template: name.to_string(),
            })?;
            rendered.push_str(&template[last..whole.start()]);
            rendered.push_str(value);
            last = whole.end();
        }
        rendered.push_str(&template[last..]);

        Ok(rendered)
    }
}

/// What was done with a template file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOperation {
    /// Text template, placeholders substituted.
    Render,
    /// Non-text file, bytes copied verbatim.
    Copy,
}

impl std::fmt::Display for FileOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileOperation::Render => write!(f, "Rendered"),
            FileOperation::Copy => write!(f, "Copied"),
        }
    }
}

/// Returns the template text if `content` is a text file, `None` for binary content.
pub fn as_text(content: &[u8]) -> Option<&str> {
    if content.contains(&0) {
        return None;
    }
    std::str::from_utf8(content).ok()
}

/// Renders one template file from `source` into a fresh file at `target`.
///
/// Text files go through `renderer`; binary files are copied byte for byte.
/// The target file keeps the source file's permission bits.
///
/// # Errors
/// * `Error::TemplateTreeUnreadable` if the source cannot be read
/// * `Error::UnknownPlaceholder` if substitution fails
/// * `Error::WriteFailure` if the target exists or cannot be written
pub fn render_file(
    renderer: &dyn TemplateRenderer,
    name: &str,
    source: &Path,
    target: &Path,
    context: &RenderContext,
) -> Result<FileOperation> {
    let content = fs::read(source)
        .map_err(|e| Error::TemplateTreeUnreadable { path: source.to_path_buf(), source: e })?;
    let permissions = fs::metadata(source)
        .map_err(|e| Error::TemplateTreeUnreadable { path: source.to_path_buf(), source: e })?
        .permissions();

    let (operation, bytes) = match as_text(&content) {
        Some(text) => (FileOperation::Render, renderer.render(name, text, context)?.into_bytes()),
        None => {
            debug!("'{name}' is not a text file, copying verbatim");
            (FileOperation::Copy, content)
        }
    };

    write_new_file(target, &bytes)?;
    fs::set_permissions(target, permissions)
        .map_err(|source| Error::WriteFailure { path: target.to_path_buf(), source })?;

    debug!("{operation} file: '{}'", target.display());
    Ok(operation)
}

fn write_new_file(target: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(target)
        .map_err(|source| Error::WriteFailure { path: target.to_path_buf(), source })?;
    file.write_all(bytes)
        .map_err(|source| Error::WriteFailure { path: target.to_path_buf(), source })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(pairs: &[(&str, &str)]) -> RenderContext {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_malformed_finds_first_bad_marker() {
        let renderer = PlaceholderRenderer::new();
        assert_eq!(renderer.malformed("{{.Project}} {{ .Project }}"), None);
        assert_eq!(renderer.malformed("{{.Project}} {{.Docker.Img}}"), Some("{{.Docker.Img}}"));
        assert_eq!(renderer.malformed("x {{- .Project -}}"), Some("{{- .Project -}}"));
        assert_eq!(renderer.malformed("x {{.Project"), Some("{{.Project"));
    }

    #[test]
    fn test_as_text() {
        assert_eq!(as_text(b"appname = x"), Some("appname = x"));
        assert_eq!(as_text(&[0x89, b'P', b'N', b'G']), None);
        assert_eq!(as_text(b"a\0b"), None);
    }

    #[test]
    fn test_value_is_inserted_literally() {
        let renderer = PlaceholderRenderer::new();
        let result = renderer
            .render("a.txt", "{{.Project}}", &context(&[("Project", "{{.Other}} & $x")]))
            .unwrap();
        assert_eq!(result, "{{.Other}} & $x");
    }
}
