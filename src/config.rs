//! Configuration handling for gootstrap.
//! Resolves where the templates live, validates the project name, and
//! assembles the render context from defaults, a values file and overrides.

use crate::cli::Args;
use crate::context::{RenderContext, CI_LINT_VERSION_KEY, DOCKER_IMG_KEY, PROJECT_KEY};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::debug;
use std::path::{Component, Path, PathBuf};

/// Environment variable pointing directly at a template root.
pub const TEMPLATES_ENV: &str = "GOOTSTRAP_TEMPLATES";

/// Template location relative to a Go workspace.
pub const GOPATH_TEMPLATES: &str = "src/github.com/NeowayLabs/gootstrap/templates";

/// golangci-lint image tag used when the caller does not set one.
pub const DEFAULT_CI_LINT_VERSION: &str = "v1.55.2";

/// Everything the engine needs for one run. The engine reads nothing else.
#[derive(Debug, Clone)]
pub struct ScaffoldConfig {
    pub template_root: PathBuf,
    pub output_root: PathBuf,
    pub context: RenderContext,
}

impl ScaffoldConfig {
    /// Builds the configuration from parsed arguments.
    ///
    /// # Arguments
    /// * `args` - Parsed command line arguments
    /// * `cwd` - Directory used when `--output` is absent or relative
    /// * `env` - Environment lookup used to locate the templates
    pub fn from_args<F>(args: &Args, cwd: &Path, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        validate_project_name(&args.project)?;

        let template_root = resolve_template_root(args.templates.as_deref(), env)?;

        let output_base = match &args.output {
            Some(output) if output.is_absolute() => output.clone(),
            Some(output) => cwd.join(output),
            None => cwd.to_path_buf(),
        };
        let output_root = output_base.join(&args.project);

        let values = match &args.values {
            Some(path) => Some(read_values_file(path)?),
            None => None,
        };
        let overrides = args
            .set
            .iter()
            .map(|s| parse_assignment(s))
            .collect::<Result<Vec<_>>>()?;

        let context = build_context(&args.project, &args.docker_registry, values, overrides);
        debug!(
            "Render context ({} values): {}",
            context.len(),
            serde_json::to_string(&context).unwrap_or_default()
        );

        Ok(Self { template_root, output_root, context })
    }
}

/// Locates the template root.
///
/// Tries, in order: the explicit path, `GOOTSTRAP_TEMPLATES`,
/// `$GOPATH/<GOPATH_TEMPLATES>`, `$HOME/go/<GOPATH_TEMPLATES>`.
///
/// # Errors
/// * `Error::ConfigError` if the selected candidate is not an existing directory
pub fn resolve_template_root<F>(explicit: Option<&Path>, env: F) -> Result<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| env(key).filter(|v| !v.is_empty());

    let candidate = if let Some(path) = explicit {
        path.to_path_buf()
    } else if let Some(path) = non_empty(TEMPLATES_ENV) {
        PathBuf::from(path)
    } else if let Some(gopath) = non_empty("GOPATH") {
        PathBuf::from(gopath).join(GOPATH_TEMPLATES)
    } else if let Some(home) = non_empty("HOME") {
        PathBuf::from(home).join("go").join(GOPATH_TEMPLATES)
    } else {
        return Err(Error::ConfigError(format!(
            "Cannot locate the templates directory: set {TEMPLATES_ENV}, GOPATH or HOME"
        )));
    };

    if !candidate.is_dir() {
        return Err(Error::ConfigError(format!(
            "Templates directory '{}' does not exist, probably a bad/corrupted installation",
            candidate.display()
        )));
    }

    debug!("Using templates from '{}'", candidate.display());
    Ok(candidate)
}

/// Checks that the project name can be used as a single directory name.
pub fn validate_project_name(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) if part == name => Ok(()),
        _ => Err(Error::ConfigError(format!(
            "Invalid project name '{name}': must be a single directory name"
        ))),
    }
}

/// Parses a `KEY=VALUE` override. The value may itself contain `=`.
pub fn parse_assignment(s: &str) -> Result<(String, String)> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(Error::ConfigError(format!("Invalid assignment '{s}', expected KEY=VALUE"))),
    }
}

/// Parses a flat map of values, as JSON or else as YAML.
///
/// Numbers and booleans are taken in their textual form; any other
/// non-string value is rejected.
pub fn parse_values(content: &str) -> Result<RenderContext> {
    let values: IndexMap<String, serde_json::Value> = match serde_json::from_str(content) {
        Ok(v) => v,
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid values format: {e}")))?,
    };

    values
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                other => {
                    return Err(Error::ConfigError(format!(
                        "Invalid value for '{key}': expected a string, number or boolean, got {other}"
                    )))
                }
            };
            Ok((key, value))
        })
        .collect()
}

/// Reads and parses a values file.
pub fn read_values_file<P: AsRef<Path>>(path: P) -> Result<RenderContext> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::ConfigError(format!("Cannot read values file '{}': {e}", path.display()))
    })?;
    debug!("Loading values from '{}'", path.display());
    parse_values(&content)
}

/// Assembles the render context.
///
/// Precedence, lowest first: built-in defaults, the values file,
/// `Project`/`DockerImg` derived from the required options, overrides.
pub fn build_context(
    project: &str,
    docker_registry: &str,
    values: Option<RenderContext>,
    overrides: Vec<(String, String)>,
) -> RenderContext {
    let mut context = RenderContext::new();
    context.insert(CI_LINT_VERSION_KEY, DEFAULT_CI_LINT_VERSION);
    if let Some(values) = values {
        context.extend(values);
    }
    context.insert(PROJECT_KEY, project);
    context.insert(DOCKER_IMG_KEY, docker_image(docker_registry, project));
    context.extend(overrides.into_iter().collect());
    context
}

/// Image name of the project inside `docker_registry`.
pub fn docker_image(docker_registry: &str, project: &str) -> String {
    format!("{}/{}", docker_registry.trim_end_matches('/'), project)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_docker_image_trims_trailing_slash() {
        assert_eq!(docker_image("hub.example.com/team/", "svc"), "hub.example.com/team/svc");
        assert_eq!(docker_image("team", "svc"), "team/svc");
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("Flags=-a=b").unwrap(),
            ("Flags".to_string(), "-a=b".to_string())
        );
        assert!(parse_assignment("=value").is_err());
        assert!(parse_assignment("novalue").is_err());
    }
}
