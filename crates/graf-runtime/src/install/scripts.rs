//! `gen_scripts`: render every script artifact and write it to disk.

use graf_core::render::{
    activation_csh, activation_sh, build_script, environment_yaml, openssl_cnf, setup_script,
};
use graf_core::{EnvironmentSpec, InstallContext, RenderError, ensure_directory};
use std::path::PathBuf;
use tracing::debug;

use super::{InstallError, InstallResult, Installer};
use crate::fs::write_atomic;

/// A rendered file and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub contents: String,
}

/// Render the six script artifacts in write order.
pub fn render_artifacts(
    ctx: &InstallContext,
    environment: &EnvironmentSpec,
) -> Result<Vec<Artifact>, RenderError> {
    let artifact = |path: &PathBuf, contents: String| Artifact {
        path: path.clone(),
        contents,
    };

    Ok(vec![
        artifact(&ctx.script_env_sh, activation_sh(ctx)),
        artifact(&ctx.script_env_csh, activation_csh(ctx)),
        artifact(&ctx.script_openssl_cnf, openssl_cnf()),
        artifact(&ctx.script_setup_conda, setup_script(ctx)),
        artifact(&ctx.script_conda_env, environment_yaml(environment)?),
        artifact(&ctx.script_build_soft, build_script(ctx)),
    ])
}

impl Installer<'_> {
    /// Generate all scripts. Runs no subprocess.
    pub fn gen_scripts(&self) -> InstallResult<()> {
        debug!(
            environment = %self.environment.name,
            conda = ?self.environment.conda_packages().collect::<Vec<_>>(),
            pip = ?self.environment.pip_packages().collect::<Vec<_>>(),
            "Rendering environment descriptor"
        );
        // Render before touching the disk so a bad descriptor writes nothing
        let artifacts = render_artifacts(self.ctx, &self.environment)?;

        println!("Creating scripts directory");
        ensure_directory(&self.ctx.top_dir)?;
        ensure_directory(&self.ctx.scripts_dir)?;

        println!("Generating scripts");
        for artifact in &artifacts {
            debug!(path = %artifact.path.display(), bytes = artifact.contents.len(), "Writing script");
            write_atomic(&artifact.path, &artifact.contents).map_err(|source| {
                InstallError::Write {
                    path: artifact.path.clone(),
                    source,
                }
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{MockFetcher, MockRunner, context_in};
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_artifacts_cover_every_script() {
        let dir = tempdir().unwrap();
        let ctx = context_in(dir.path());
        let env = EnvironmentSpec::default_for(&ctx.conda_env_name);

        let paths: Vec<_> = render_artifacts(&ctx, &env)
            .unwrap()
            .into_iter()
            .map(|a| a.path)
            .collect();

        assert_eq!(paths.len(), 6);
        for expected in [
            &ctx.script_env_sh,
            &ctx.script_env_csh,
            &ctx.script_openssl_cnf,
            &ctx.script_setup_conda,
            &ctx.script_conda_env,
            &ctx.script_build_soft,
        ] {
            assert!(paths.contains(expected), "missing {}", expected.display());
        }
    }

    #[test]
    fn test_gen_scripts_writes_files_without_processes() {
        let dir = tempdir().unwrap();
        let ctx = context_in(&dir.path().join("fresh"));

        // No expectations: any subprocess or download would panic
        let runner = MockRunner::new();
        let fetcher = MockFetcher::new();
        Installer::new(&ctx, &runner, &fetcher).gen_scripts().unwrap();

        assert!(ctx.scripts_dir.is_dir());
        let setup = fs::read_to_string(&ctx.script_setup_conda).unwrap();
        assert!(setup.contains("conda env create -f"));
        let yaml = fs::read_to_string(&ctx.script_conda_env).unwrap();
        assert!(yaml.contains("name: graf"));
        assert!(!ctx.condarc_path().exists());
    }

    #[test]
    fn test_gen_scripts_is_byte_identical_across_runs() {
        let dir = tempdir().unwrap();
        let ctx = context_in(dir.path());
        let runner = MockRunner::new();
        let fetcher = MockFetcher::new();
        let installer = Installer::new(&ctx, &runner, &fetcher);

        installer.gen_scripts().unwrap();
        let env = EnvironmentSpec::default_for(&ctx.conda_env_name);
        let first: Vec<Vec<u8>> = render_artifacts(&ctx, &env)
            .unwrap()
            .iter()
            .map(|a| fs::read(&a.path).unwrap())
            .collect();

        installer.gen_scripts().unwrap();
        let second: Vec<Vec<u8>> = render_artifacts(&ctx, &env)
            .unwrap()
            .iter()
            .map(|a| fs::read(&a.path).unwrap())
            .collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_gen_scripts_fails_when_top_dir_is_a_file() {
        let dir = tempdir().unwrap();
        let top = dir.path().join("occupied");
        fs::write(&top, "not a directory").unwrap();
        let ctx = context_in(&top);

        let runner = MockRunner::new();
        let fetcher = MockFetcher::new();
        let err = Installer::new(&ctx, &runner, &fetcher)
            .gen_scripts()
            .unwrap_err();

        assert!(matches!(err, InstallError::Path(_)));
    }
}
