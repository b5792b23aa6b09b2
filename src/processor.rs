//! Core scaffolding orchestration.
//! Sequences the output check, template tree description, skeleton creation
//! and file rendering, and removes partial output when any step fails.

use crate::config::ScaffoldConfig;
use crate::descriptor::TreeDescriptor;
use crate::error::Result;
use crate::output::{check_output_dir, create_skeleton, OutputState};
use crate::path::join_relative;
use crate::renderer::{render_file, FileOperation, PlaceholderRenderer, TemplateRenderer};
use crate::rollback::{Rollback, RollbackOperation};
use log::{debug, error, info};

/// Phases of a scaffolding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Checking,
    BuildingDescriptor,
    PreparingOutput,
    Rendering,
    Done,
    Failed,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Checking => "checking output directory",
            Phase::BuildingDescriptor => "describing template tree",
            Phase::PreparingOutput => "preparing output directory",
            Phase::Rendering => "rendering templates",
            Phase::Done => "done",
            Phase::Failed => "failed",
        };
        write!(f, "{name}")
    }
}

/// Counts of what a successful run produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub dirs_created: usize,
    pub files_rendered: usize,
    pub files_copied: usize,
}

/// Runs one scaffolding invocation.
pub struct Processor<'a> {
    renderer: &'a dyn TemplateRenderer,
    config: &'a ScaffoldConfig,
    phase: Phase,
}

impl<'a> Processor<'a> {
    pub fn new(renderer: &'a dyn TemplateRenderer, config: &'a ScaffoldConfig) -> Self {
        Self { renderer, config, phase: Phase::Idle }
    }

    /// Current phase; `Done` or `Failed` once [`Processor::run`] returned.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn transition(&mut self, next: Phase) {
        debug!("Phase: {} -> {}", self.phase, next);
        self.phase = next;
    }

    /// Generates the project, failing fast on the first error.
    ///
    /// On failure after output creation began, everything created under the
    /// output root is removed before the error is returned.
    pub fn run(&mut self) -> Result<Summary> {
        match self.execute() {
            Ok(summary) => {
                self.transition(Phase::Done);
                info!(
                    "Created {} directories, rendered {} files, copied {} files in '{}'.",
                    summary.dirs_created,
                    summary.files_rendered,
                    summary.files_copied,
                    self.config.output_root.display()
                );
                Ok(summary)
            }
            Err(e) => {
                error!("Failed while {}: {}", self.phase, e);
                self.transition(Phase::Failed);
                Err(e)
            }
        }
    }

    fn execute(&mut self) -> Result<Summary> {
        let config = self.config;
        let output_root = &config.output_root;
        let template_root = &config.template_root;

        self.transition(Phase::Checking);
        let state = check_output_dir(output_root)?;

        self.transition(Phase::BuildingDescriptor);
        let descriptor = TreeDescriptor::build(template_root)?;

        self.transition(Phase::PreparingOutput);
        let mut rollback = Rollback::new();
        rollback.add_operation(match state {
            OutputState::Missing { created_from } => RollbackOperation::RemoveTree(created_from),
            OutputState::Empty => RollbackOperation::EmptyDir(output_root.clone()),
        });
        let mut summary = Summary {
            dirs_created: create_skeleton(output_root, &descriptor.dirs)?,
            ..Summary::default()
        };

        self.transition(Phase::Rendering);
        for file in &descriptor.files {
            let source = join_relative(template_root, file);
            let target = join_relative(output_root, file);
            match render_file(self.renderer, file, &source, &target, &config.context)? {
                FileOperation::Render => summary.files_rendered += 1,
                FileOperation::Copy => summary.files_copied += 1,
            }
        }

        rollback.commit();
        Ok(summary)
    }
}

/// Generates the project described by `config` with the placeholder renderer.
pub fn scaffold(config: &ScaffoldConfig) -> Result<Summary> {
    let renderer = PlaceholderRenderer::new();
    Processor::new(&renderer, config).run()
}
