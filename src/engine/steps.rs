// src/engine/steps.rs

use std::future::Future;
use std::pin::Pin;

use tracing::info;

use crate::errors::{LivebuildError, Result};
use crate::exec::CommandSpec;

type StepFuture = Pin<Box<dyn Future<Output = Result<()>> + Send>>;

/// A named unit of build work.
///
/// Steps wrap either an arbitrary async closure or an external command; the
/// name is what failure reports carry.
pub struct BuildStep {
    name: String,
    action: Box<dyn FnMut() -> StepFuture + Send>,
}

impl BuildStep {
    /// Create a step from an async closure.
    pub fn new<F, Fut>(name: impl Into<String>, mut action: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        Self {
            name: name.into(),
            action: Box::new(move || Box::pin(action()) as StepFuture),
        }
    }

    /// Create a step that runs an external command.
    pub fn command(name: impl Into<String>, spec: CommandSpec) -> Self {
        Self::new(name, move || {
            let spec = spec.clone();
            async move { spec.run().await }
        })
    }

    /// Create a step that runs an external command and writes `input` to its
    /// stdin after start.
    pub fn command_with_input(
        name: impl Into<String>,
        spec: CommandSpec,
        input: impl Into<String>,
    ) -> Self {
        let input = input.into();
        Self::new(name, move || {
            let spec = spec.clone();
            let input = input.clone();
            async move { spec.run_with_input(&input).await }
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for BuildStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildStep").field("name", &self.name).finish()
    }
}

/// Run the given steps in declared order, stopping at the first failure.
///
/// The failing step's name is attached to the returned error; later steps
/// do not run.
pub async fn run_steps(steps: Vec<BuildStep>) -> Result<()> {
    for mut step in steps {
        info!(step = %step.name, "executing build step");
        if let Err(source) = (step.action)().await {
            return Err(LivebuildError::Step {
                step: step.name,
                source: Box::new(source),
            });
        }
    }
    Ok(())
}
