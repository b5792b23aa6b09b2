//! gootstrap creates a new project directory from a tree of template files.
//! The template tree is mirrored into an empty output directory and every
//! `{{.Name}}` placeholder is replaced with a caller-supplied value.

/// Command-line interface module for the gootstrap application
pub mod cli;

/// Template root lookup, values files and render context assembly
pub mod config;

/// Placeholder values for one run
pub mod context;

/// Structural description of the template tree
pub mod descriptor;

/// Error types and exit conditions
pub mod error;

pub mod logger;

/// Output directory safety check and skeleton creation
pub mod output;

/// Template-relative path mapping
pub mod path;

/// Core scaffolding orchestration
/// Combines all components to generate the final output
pub mod processor;

/// Placeholder substitution and file rendering
pub mod renderer;

/// Removal of partial output after a failed run
pub mod rollback;
