//! `build_soft`: run the build driver script.

use graf_core::CommandSpec;
use tracing::info;

use super::{InstallResult, Installer};

impl Installer<'_> {
    pub fn build_soft(&self) -> InstallResult<()> {
        let command = CommandSpec::argv([
            "bash".to_string(),
            self.ctx.script_build_soft.to_string_lossy().into_owned(),
        ]);
        let output = self.runner.run(&command, &self.run_options())?;
        info!(
            elapsed_ms = output.duration().num_milliseconds(),
            "Build script finished"
        );
        Ok(())
    }
}
