//! Installation steps.
//!
//! `Installer` binds a resolved context to the process and download ports.
//! Each step lives in its own module as an `impl Installer` block.

mod build;
mod conda;
mod environment;
mod error;
mod scripts;

use graf_core::{
    CondaConfig, Downloader, EnvironmentSpec, InstallContext, ProcessRunner, RunOptions, Step,
};
use std::fs;
use tracing::info;

pub use conda::{installer_url, platform_label};
pub use error::{InstallError, InstallResult};
pub use scripts::{Artifact, render_artifacts};

/// Runs installation steps against one resolved context.
pub struct Installer<'a> {
    ctx: &'a InstallContext,
    runner: &'a dyn ProcessRunner,
    downloader: &'a dyn Downloader,
    environment: EnvironmentSpec,
    conda_config: CondaConfig,
}

impl<'a> Installer<'a> {
    pub fn new(
        ctx: &'a InstallContext,
        runner: &'a dyn ProcessRunner,
        downloader: &'a dyn Downloader,
    ) -> Self {
        Self {
            ctx,
            runner,
            downloader,
            environment: EnvironmentSpec::default_for(&ctx.conda_env_name),
            conda_config: CondaConfig::default(),
        }
    }

    /// Replace the built-in environment descriptor.
    ///
    /// The descriptor name is forced to the context's environment name.
    #[must_use]
    pub fn with_environment(mut self, environment: EnvironmentSpec) -> Self {
        self.environment = environment.with_name(&self.ctx.conda_env_name);
        self
    }

    pub const fn environment(&self) -> &EnvironmentSpec {
        &self.environment
    }

    /// Run a single step.
    pub async fn run_step(&self, step: Step) -> InstallResult<()> {
        info!(step = %step, "Running step");
        match step {
            Step::GenScripts => self.gen_scripts(),
            Step::InstallConda => self.install_conda().await,
            Step::SetupConda => self.setup_conda(),
            Step::BuildSoft => self.build_soft(),
        }
    }

    /// Delete the conda directory tree.
    pub fn clean(&self) -> InstallResult<()> {
        let conda_dir = &self.ctx.conda_dir;
        if !conda_dir.exists() {
            info!(path = %conda_dir.display(), "Nothing to clean");
            return Ok(());
        }

        println!("Removing {}", conda_dir.display());
        fs::remove_dir_all(conda_dir).map_err(|source| InstallError::Remove {
            path: conda_dir.clone(),
            source,
        })?;
        info!(path = %conda_dir.display(), "Removed conda directory");
        Ok(())
    }

    /// Options every step subprocess starts from.
    fn run_options(&self) -> RunOptions {
        RunOptions::default().with_envs(self.ctx.child_env())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use async_trait::async_trait;
    use graf_core::{
        CommandSpec, DownloadError, Downloader, InstallContext, ProcessError, ProcessOutput,
        ProcessRunner, RunOptions,
    };
    use mockall::mock;
    use std::path::Path;

    mock! {
        pub Runner {}

        impl ProcessRunner for Runner {
            fn run(&self, command: &CommandSpec, options: &RunOptions) -> Result<ProcessOutput, ProcessError>;
        }
    }

    mock! {
        pub Fetcher {}

        #[async_trait]
        impl Downloader for Fetcher {
            async fn download(&self, url: &str, dest: &Path) -> Result<u64, DownloadError>;
        }
    }

    pub fn context_in(top: &Path) -> InstallContext {
        InstallContext::resolve(Some(top), top).unwrap()
    }

    pub fn output(code: i32, lines: &[&str]) -> ProcessOutput {
        let now = chrono::Local::now();
        ProcessOutput {
            code,
            started_at: now,
            finished_at: now,
            lines: lines.iter().map(ToString::to_string).collect(),
        }
    }
}
