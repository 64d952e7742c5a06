pub mod steps;

use git2::Repository;

use crate::artifacts::Artifacts;
use crate::error::Result;
use crate::git;
use crate::options::Options;
use crate::project::Project;

/// Everything a step may touch while mutating the project.
pub struct StepContext<'a> {
    pub project: &'a Project,
    pub options: &'a Options,
    pub artifacts: &'a Artifacts<'a>,
}

/// One named unit of project mutation, recorded as a single commit.
pub trait Step {
    /// Step name, which is also the commit subject.
    fn name(&self) -> &'static str;

    /// Whether the step runs for this option set.
    fn applies(&self, _options: &Options) -> bool {
        true
    }

    /// Full commit message; the first line must stay equal to the name.
    fn commit_message(&self, _options: &Options) -> String {
        self.name().to_string()
    }

    fn run(&self, ctx: &StepContext) -> Result<()>;
}

/// The fixed, ordered dockerdev recipe.
pub fn default_recipe() -> Vec<Box<dyn Step>> {
    vec![
        Box::new(steps::RailsNew),
        Box::new(steps::Readme),
        Box::new(steps::Annotate),
        Box::new(steps::Marginalia),
        Box::new(steps::ArLogTask),
        Box::new(steps::Rubocop),
        Box::new(steps::GeneratorSetting),
        Box::new(steps::Dockerdev),
    ]
}

/// Executes steps strictly in order, committing after each one.
///
/// There is no retry and no rollback: the first failing step aborts the run
/// and leaves earlier commits in place.
pub struct Recipe {
    steps: Vec<Box<dyn Step>>,
}

impl Recipe {
    pub fn new(steps: Vec<Box<dyn Step>>) -> Self {
        Self { steps }
    }

    pub fn run(&self, ctx: &StepContext, repo: &Repository) -> Result<()> {
        for step in &self.steps {
            if !step.applies(ctx.options) {
                log::info!("skipping step '{}'", step.name());
                continue;
            }
            log::info!("applying step '{}'", step.name());
            step.run(ctx)?;
            git::commit_all(repo, &step.commit_message(ctx.options))?;
        }
        Ok(())
    }
}

impl Default for Recipe {
    fn default() -> Self {
        Self::new(default_recipe())
    }
}
