//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter. All concrete implementations are instantiated here:
//! - Installation context (via graf-core)
//! - Process runner and downloader (via graf-runtime)
//! - Environment descriptor (built-in or loaded from YAML)

use std::path::PathBuf;
use std::sync::Arc;

use graf_core::paths::executable_dir;
use graf_core::{EnvironmentSpec, InstallContext};
use graf_runtime::{HttpDownloader, Installer, SystemProcessRunner, TerminalProgress};
use tracing::debug;

use crate::error::CliError;
use crate::parser::Cli;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Top-level directory override (flag or environment).
    pub top_dir: Option<PathBuf>,
    /// Environment descriptor override.
    pub environment: Option<PathBuf>,
}

impl CliConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            top_dir: cli.top_dir.clone(),
            environment: cli.environment.clone(),
        }
    }
}

/// Fully composed context for running steps.
pub struct CliContext {
    /// Resolved paths and names.
    pub install: InstallContext,
    /// Process executor shared by every step.
    pub runner: SystemProcessRunner,
    /// Installer downloader.
    pub downloader: HttpDownloader,
    /// Descriptor rendered into `environemnt.yaml`.
    pub environment: EnvironmentSpec,
}

impl CliContext {
    /// An installer borrowing this context's adapters.
    pub fn installer(&self) -> Installer<'_> {
        Installer::new(&self.install, &self.runner, &self.downloader)
            .with_environment(self.environment.clone())
    }
}

/// Build the CLI context.
pub fn bootstrap(config: CliConfig) -> Result<CliContext, CliError> {
    let install = match config.top_dir.as_deref() {
        Some(top_dir) => InstallContext::resolve(Some(top_dir), &executable_dir()?)?,
        None => InstallContext::from_env()?,
    };
    debug!(top_dir = %install.top_dir.display(), "Install context resolved");

    let environment = match config.environment {
        Some(path) => EnvironmentSpec::load(&path)?,
        None => EnvironmentSpec::default_for(&install.conda_env_name),
    };

    Ok(CliContext {
        install,
        runner: SystemProcessRunner::new(),
        downloader: HttpDownloader::new(Arc::new(TerminalProgress::new())),
        environment,
    })
}
