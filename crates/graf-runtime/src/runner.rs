//! Sequential step runner.
//!
//! Runs a plan of steps top to bottom. The first failure stops the run;
//! nothing is rolled back or retried.

use graf_core::Step;
use std::fmt;
use tracing::{error, info};

use crate::install::{InstallResult, Installer};

/// Where a run currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    Running { index: usize, step: Step },
    Done,
    Failed { step: Step },
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted => f.write_str("not started"),
            Self::Running { index, step } => write!(f, "running step {index} ({step})"),
            Self::Done => f.write_str("done"),
            Self::Failed { step } => write!(f, "failed at {step}"),
        }
    }
}

/// Drives an `Installer` through a list of steps.
pub struct StepRunner<'a> {
    installer: Installer<'a>,
    state: RunState,
}

impl<'a> StepRunner<'a> {
    pub const fn new(installer: Installer<'a>) -> Self {
        Self {
            installer,
            state: RunState::NotStarted,
        }
    }

    pub const fn state(&self) -> RunState {
        self.state
    }

    /// Remove the conda installation before any step runs.
    pub fn clean(&mut self) -> InstallResult<()> {
        self.installer.clean()
    }

    /// Run `steps` in order.
    pub async fn run(&mut self, steps: &[Step]) -> InstallResult<()> {
        for (index, &step) in steps.iter().enumerate() {
            self.state = RunState::Running { index, step };
            if let Err(e) = self.installer.run_step(step).await {
                self.state = RunState::Failed { step };
                error!(step = %step, "Step failed: {}", e);
                return Err(e);
            }
        }

        self.state = RunState::Done;
        info!(steps = steps.len(), "Installation steps finished");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::install::test_support::{MockFetcher, MockRunner, context_in, output};
    use graf_core::ProcessError;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_runs_steps_in_order_until_done() {
        let dir = tempdir().unwrap();
        let ctx = context_in(dir.path());

        let mut runner = MockRunner::new();
        runner
            .expect_run()
            .times(1)
            .returning(|_, _| Ok(output(0, &[])));
        let fetcher = MockFetcher::new();

        let mut steps = StepRunner::new(Installer::new(&ctx, &runner, &fetcher));
        assert_eq!(steps.state(), RunState::NotStarted);

        steps
            .run(&[Step::GenScripts, Step::BuildSoft])
            .await
            .unwrap();

        assert_eq!(steps.state(), RunState::Done);
        assert!(ctx.script_build_soft.exists());
    }

    #[tokio::test]
    async fn test_first_failure_stops_the_run() {
        let dir = tempdir().unwrap();
        let ctx = context_in(dir.path());
        fs::create_dir_all(&ctx.conda_dir).unwrap();

        let mut runner = MockRunner::new();
        runner.expect_run().times(1).returning(|command, _| {
            Err(ProcessError::NonZeroExit {
                command: command.to_string(),
                code: 2,
            })
        });
        let fetcher = MockFetcher::new();

        let mut steps = StepRunner::new(Installer::new(&ctx, &runner, &fetcher));
        let err = steps
            .run(&[Step::BuildSoft, Step::GenScripts])
            .await
            .unwrap_err();

        assert!(err.is_process_failure());
        assert_eq!(steps.state(), RunState::Failed { step: Step::BuildSoft });
        // The step after the failure never ran
        assert!(!ctx.scripts_dir.exists());
    }

    #[tokio::test]
    async fn test_clean_runs_before_steps() {
        let dir = tempdir().unwrap();
        let ctx = context_in(dir.path());
        fs::create_dir_all(ctx.conda_dir.join("pkgs")).unwrap();

        let runner = MockRunner::new();
        let fetcher = MockFetcher::new();
        let mut steps = StepRunner::new(Installer::new(&ctx, &runner, &fetcher));

        steps.clean().unwrap();
        assert!(!ctx.conda_dir.exists());
        assert_eq!(steps.state(), RunState::NotStarted);

        steps.run(&[Step::GenScripts]).await.unwrap();
        assert!(ctx.script_env_sh.exists());
    }

    #[tokio::test]
    async fn test_clean_alone_leaves_run_not_started() {
        let dir = tempdir().unwrap();
        let ctx = context_in(dir.path());
        fs::create_dir_all(&ctx.conda_dir).unwrap();

        let runner = MockRunner::new();
        let fetcher = MockFetcher::new();
        let mut steps = StepRunner::new(Installer::new(&ctx, &runner, &fetcher));

        steps.clean().unwrap();

        assert!(!ctx.conda_dir.exists());
        assert_eq!(steps.state(), RunState::NotStarted);
        assert_eq!(steps.state().to_string(), "not started");
    }

    #[test]
    fn test_state_display() {
        let state = RunState::Running {
            index: 1,
            step: Step::InstallConda,
        };
        assert_eq!(state.to_string(), "running step 1 (install_conda)");
    }
}
