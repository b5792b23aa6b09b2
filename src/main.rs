//! gootstrap's main application entry point.
//! Parses arguments, builds the run configuration and hands it to the
//! scaffolding engine.

use gootstrap::{
    cli::{get_args, Args},
    config::ScaffoldConfig,
    error::{default_error_handler, Result},
    logger::init_logger,
    processor::scaffold,
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Resolves the templates directory and the output directory
/// 2. Assembles the placeholder values
/// 3. Generates the project, removing partial output on failure
fn run(args: Args) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config = ScaffoldConfig::from_args(&args, &cwd, |key| std::env::var(key).ok())?;

    println!(
        "creating: project '{}' docker-image '{}' output '{}'",
        args.project,
        config.context.get(gootstrap::context::DOCKER_IMG_KEY).unwrap_or_default(),
        config.output_root.display()
    );

    scaffold(&config)?;

    println!("Project generation completed successfully in {}.", config.output_root.display());
    Ok(())
}
