//! Installation context: every path and name the installer works with.
//!
//! The context is resolved once at startup and passed by reference into
//! every step and into the process executor. Nothing here touches the
//! filesystem beyond canonicalising the executable location.

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::error::PathError;
use super::platform::{executable_dir, normalize_user_path};

/// Environment variable naming the top-level installation directory.
pub const ENV_NAME_TOP_DIR: &str = "GRAF_GLUON_TOP_DIR";

/// Name of the conda environment created by `setup_conda`.
pub const DEFAULT_ENV_NAME: &str = "graf";

pub const CONDA_DIR_NAME: &str = "miniconda";
pub const INSTALL_SCRIPTS_DIR_NAME: &str = "install_scripts";

pub const SCRIPT_NAME_SETUP_CONDA: &str = "setup_conda.sh";
pub const SCRIPT_NAME_BUILD_SOFT: &str = "build_software.sh";
pub const SCRIPT_NAME_ENV_BASH: &str = "setup_env.sh";
pub const SCRIPT_NAME_ENV_CSH: &str = "setup_env.csh";
/// Existing installations reference this exact (misspelled) file name.
pub const SCRIPT_NAME_CONDA_ENV: &str = "environemnt.yaml";
pub const SCRIPT_NAME_OPENSSL_CNF: &str = "openssl.cnf";

const INSTALL_RECORD_NAME: &str = "graf-install.json";

/// Resolved installation paths and names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallContext {
    /// Directory of the running executable
    pub this_exe_dir: PathBuf,
    /// Top-level installation directory
    pub top_dir: PathBuf,
    /// Name of the variable carrying `top_dir` into child processes
    pub env_name_top_dir: String,
    /// Miniconda installation root
    pub conda_dir: PathBuf,
    /// Name of the conda environment
    pub conda_env_name: String,
    /// Directory of the conda environment
    pub conda_env_dir: PathBuf,
    /// Directory holding generated helper scripts
    pub scripts_dir: PathBuf,
    pub script_conda_env: PathBuf,
    pub script_setup_conda: PathBuf,
    pub script_build_soft: PathBuf,
    pub script_openssl_cnf: PathBuf,
    pub script_env_sh: PathBuf,
    pub script_env_csh: PathBuf,
}

impl InstallContext {
    /// Resolve the context from an optional top-dir override.
    ///
    /// Without an override (or with an empty one) the top directory is
    /// `this_exe_dir`. Relative overrides are anchored at the current
    /// directory and `~` is expanded. The directory does not need to exist.
    pub fn resolve(top_dir_override: Option<&Path>, this_exe_dir: &Path) -> Result<Self, PathError> {
        let top_dir = match top_dir_override {
            Some(dir) if !dir.as_os_str().is_empty() => normalize_user_path(dir)?,
            _ => this_exe_dir.to_path_buf(),
        };

        let conda_dir = top_dir.join(CONDA_DIR_NAME);
        let conda_env_name = DEFAULT_ENV_NAME.to_string();
        let conda_env_dir = conda_dir.join("envs").join(&conda_env_name);
        let scripts_dir = top_dir.join(INSTALL_SCRIPTS_DIR_NAME);

        Ok(Self {
            this_exe_dir: this_exe_dir.to_path_buf(),
            env_name_top_dir: ENV_NAME_TOP_DIR.to_string(),
            conda_env_name,
            conda_env_dir,
            script_conda_env: scripts_dir.join(SCRIPT_NAME_CONDA_ENV),
            script_setup_conda: scripts_dir.join(SCRIPT_NAME_SETUP_CONDA),
            script_build_soft: scripts_dir.join(SCRIPT_NAME_BUILD_SOFT),
            script_openssl_cnf: scripts_dir.join(SCRIPT_NAME_OPENSSL_CNF),
            script_env_sh: top_dir.join(SCRIPT_NAME_ENV_BASH),
            script_env_csh: top_dir.join(SCRIPT_NAME_ENV_CSH),
            scripts_dir,
            conda_dir,
            top_dir,
        })
    }

    /// Resolve from `GRAF_GLUON_TOP_DIR` and the executable location.
    pub fn from_env() -> Result<Self, PathError> {
        let this_exe_dir = executable_dir()?;
        let top_dir = env::var_os(ENV_NAME_TOP_DIR).map(PathBuf::from);
        debug!(top_dir_override = ?top_dir, exe_dir = %this_exe_dir.display(), "Resolving install context");
        Self::resolve(top_dir.as_deref(), &this_exe_dir)
    }

    /// Global conda configuration file.
    pub fn condarc_path(&self) -> PathBuf {
        self.conda_dir.join(".condarc")
    }

    /// Path to an executable in the conda base installation.
    pub fn conda_bin(&self, tool: &str) -> PathBuf {
        self.conda_dir.join("bin").join(tool)
    }

    /// Python interpreter of the created environment.
    pub fn env_python(&self) -> PathBuf {
        self.conda_env_dir.join("bin").join("python")
    }

    /// JSON record written after the conda bootstrap.
    pub fn install_record_path(&self) -> PathBuf {
        self.conda_dir.join(INSTALL_RECORD_NAME)
    }

    /// Environment every child process receives.
    ///
    /// Children see the resolved top directory even when it was defaulted.
    pub fn child_env(&self) -> Vec<(String, String)> {
        vec![(
            self.env_name_top_dir.clone(),
            self.top_dir.to_string_lossy().into_owned(),
        )]
    }
}

impl fmt::Display for InstallContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created install info:")?;
        writeln!(f, "  -this_exe_dir:       {}", self.this_exe_dir.display())?;
        writeln!(f, "  -top_dir:            {}", self.top_dir.display())?;
        writeln!(f, "  -env_name_top_dir:   {}", self.env_name_top_dir)?;
        writeln!(f, "  -conda_dir:          {}", self.conda_dir.display())?;
        writeln!(f, "  -conda_env_name:     {}", self.conda_env_name)?;
        writeln!(f, "  -conda_env_dir:      {}", self.conda_env_dir.display())?;
        writeln!(f, "  -scripts_dir:        {}", self.scripts_dir.display())?;
        writeln!(f, "  -script_conda_env:   {}", self.script_conda_env.display())?;
        writeln!(f, "  -script_setup_conda: {}", self.script_setup_conda.display())?;
        writeln!(f, "  -script_build_soft:  {}", self.script_build_soft.display())?;
        writeln!(f, "  -script_openssl_cnf: {}", self.script_openssl_cnf.display())?;
        writeln!(f, "  -script_env_sh:      {}", self.script_env_sh.display())?;
        write!(f, "  -script_env_csh:     {}", self.script_env_csh.display())
    }
}
