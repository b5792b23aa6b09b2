//! Command-line interface implementation for gootstrap.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

/// Command-line arguments structure for gootstrap.
#[derive(Parser, Debug)]
#[command(author, version, about = "gootstrap: bootstrap a new Go service from templates", long_about = None)]
pub struct Args {
    /// Project name, also the name of the created directory
    #[arg(long)]
    pub project: String,

    /// Docker registry base name; the image is <docker-registry>/<project>
    #[arg(long)]
    pub docker_registry: String,

    /// Directory where the project directory will be created (default: current directory)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Templates directory (default: $GOOTSTRAP_TEMPLATES, then the GOPATH installation)
    #[arg(long, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// JSON or YAML file with additional placeholder values
    #[arg(long, value_name = "FILE")]
    pub values: Option<PathBuf>,

    /// Set a placeholder value, overriding every other source
    #[arg(long, value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 2 and the help text if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                eprintln!("{e}");
                let printed = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                if let Err(err) = printed {
                    eprintln!("Failed to print help: {err}");
                }
                std::process::exit(2);
            } else {
                e.exit();
            }
        }
    }
}
