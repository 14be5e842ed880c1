//! `install_conda`: bootstrap Miniconda into the conda directory.

use graf_core::render::condarc;
use graf_core::{CommandSpec, ensure_directory};
use std::env::consts;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{info, warn};

use super::{InstallError, InstallResult, Installer};
use crate::fs::write_atomic;
use crate::record::InstallRecord;

const MINICONDA_BASE_URL: &str = "https://repo.anaconda.com/miniconda";
const INSTALLER_FILE_NAME: &str = "miniconda.sh";

/// Miniconda platform label for an OS/arch pair (`std::env::consts` values).
pub fn platform_label(os: &str, arch: &str) -> Option<&'static str> {
    match (os, arch) {
        ("linux", "x86_64") => Some("Linux-x86_64"),
        ("linux", "aarch64") => Some("Linux-aarch64"),
        ("linux", "s390x") => Some("Linux-s390x"),
        ("macos", "x86_64") => Some("MacOSX-x86_64"),
        ("macos", "aarch64") => Some("MacOSX-arm64"),
        _ => None,
    }
}

/// Download URL of the latest Miniconda installer for an OS/arch pair.
pub fn installer_url(os: &str, arch: &str) -> InstallResult<String> {
    let label = platform_label(os, arch).ok_or_else(|| InstallError::UnsupportedPlatform {
        os: os.to_string(),
        arch: arch.to_string(),
    })?;
    Ok(format!("{MINICONDA_BASE_URL}/Miniconda3-latest-{label}.sh"))
}

fn remove_installer(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!(path = %path.display(), "Failed to remove installer: {}", e),
    }
}

impl Installer<'_> {
    /// Install Miniconda unless the conda directory already exists.
    pub async fn install_conda(&self) -> InstallResult<()> {
        let conda_dir = &self.ctx.conda_dir;
        if conda_dir.is_dir() {
            println!("Path already exists. Skipping installation step.");
            info!(path = %conda_dir.display(), "Conda directory exists, skipping install");
            return Ok(());
        }

        let url = installer_url(consts::OS, consts::ARCH)?;
        let platform = platform_label(consts::OS, consts::ARCH).unwrap_or(consts::ARCH);

        ensure_directory(&self.ctx.top_dir)?;
        let installer = self.ctx.top_dir.join(INSTALLER_FILE_NAME);

        println!("Downloading miniconda from {url} ...");
        let outcome = match self.downloader.download(&url, &installer).await {
            Ok(bytes) => {
                info!(bytes, dest = %installer.display(), "Installer downloaded");
                let command = CommandSpec::argv([
                    "bash".to_string(),
                    installer.to_string_lossy().into_owned(),
                    "-b".to_string(),
                    "-p".to_string(),
                    conda_dir.to_string_lossy().into_owned(),
                ]);
                self.runner
                    .run(&command, &self.run_options().with_cwd(&self.ctx.top_dir))
                    .map(drop)
                    .map_err(InstallError::from)
            }
            Err(e) => Err(InstallError::from(e)),
        };

        // A failed download can leave a partial file behind
        remove_installer(&installer);
        outcome?;

        // global conda config
        ensure_directory(conda_dir)?;
        let condarc_path = self.ctx.condarc_path();
        write_atomic(&condarc_path, &condarc(&self.conda_config)?).map_err(|source| {
            InstallError::Write {
                path: condarc_path.clone(),
                source,
            }
        })?;

        InstallRecord::new(url, platform).save(&self.ctx.install_record_path())?;
        info!(path = %conda_dir.display(), "Miniconda installed");
        Ok(())
    }
}
