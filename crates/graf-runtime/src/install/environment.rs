//! `setup_conda`: create the conda environment unless it already exists.

use graf_core::{CommandSpec, find_env_line};
use tracing::{debug, info};

use super::{InstallResult, Installer};

impl Installer<'_> {
    /// The `conda env list` line naming our environment, if any.
    ///
    /// A missing conda installation means the environment does not exist.
    pub fn conda_env_line(&self) -> InstallResult<Option<String>> {
        let conda = self.ctx.conda_bin("conda");
        if !conda.exists() {
            debug!(path = %conda.display(), "conda executable not found");
            return Ok(None);
        }

        let command = CommandSpec::argv([
            conda.to_string_lossy().into_owned(),
            "env".to_string(),
            "list".to_string(),
        ]);
        let output = self.runner.run(&command, &self.run_options().silent())?;
        Ok(find_env_line(output.lines.as_slice(), &self.ctx.conda_env_name).map(ToString::to_string))
    }

    /// Create the environment from the generated descriptor.
    pub fn setup_conda(&self) -> InstallResult<()> {
        if let Some(line) = self.conda_env_line()? {
            println!(
                "Environment {} exists. Skipping environment creation ",
                self.ctx.conda_env_name
            );
            info!(env = %self.ctx.conda_env_name, line = %line.trim_end(), "Environment exists, skipping");
            return Ok(());
        }

        let command = CommandSpec::argv([
            "bash".to_string(),
            self.ctx.script_setup_conda.to_string_lossy().into_owned(),
        ]);
        self.runner.run(&command, &self.run_options())?;
        info!(env = %self.ctx.conda_env_name, "Environment created");
        Ok(())
    }
}
