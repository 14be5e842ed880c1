//! Shell-script and OpenSSL config templates.

use crate::paths::InstallContext;

/// POSIX-shell activation script (`setup_env.sh`).
pub fn activation_sh(ctx: &InstallContext) -> String {
    let var = &ctx.env_name_top_dir;
    format!(
        r#"
export {var}="{top}"

# Start conda environment
source "${var}/miniconda/etc/profile.d/conda.sh"

# go into {env} environment
conda activate {env}

export OPENSSL_CONF="${var}/install_scripts/openssl.cnf"

# for CUDNN and libs are seen from tensorflow
export LD_LIBRARY_PATH=$CONDA_PREFIX/lib${{LD_LIBRARY_PATH:+:${{LD_LIBRARY_PATH}}}}

"#,
        top = ctx.top_dir.display(),
        env = ctx.conda_env_name,
    )
}

/// C-shell activation script (`setup_env.csh`).
pub fn activation_csh(ctx: &InstallContext) -> String {
    let var = &ctx.env_name_top_dir;
    format!(
        r#"
setenv {var} "{top}"

# Start conda environment
source "${var}/miniconda/etc/profile.d/conda.csh"

# go into {env} environment
conda activate {env}

setenv OPENSSL_CONF "${var}/install_scripts/openssl.cnf"

# for CUDNN and libs are seen from tensorflow
if ( ! $?LD_LIBRARY_PATH ) then
    setenv LD_LIBRARY_PATH $CONDA_PREFIX/lib
else
    setenv LD_LIBRARY_PATH $CONDA_PREFIX/lib:$LD_LIBRARY_PATH
endif
"#,
        top = ctx.top_dir.display(),
        env = ctx.conda_env_name,
    )
}

/// OpenSSL config enabling legacy renegotiation for older TLS proxies.
pub fn openssl_cnf() -> String {
    r"
openssl_conf = openssl_init

[openssl_init]
ssl_conf = ssl_sect

[ssl_sect]
system_default = system_default_sect

[system_default_sect]
Options = UnsafeLegacyRenegotiation
"
    .to_string()
}

/// Driver that creates the environment from the descriptor.
pub fn setup_script(ctx: &InstallContext) -> String {
    format!(
        r#"
set -e
source "{conda_dir}/etc/profile.d/conda.sh"
export {var}="{top}"

export PYTHONHTTPSVERIFY=0
export OPENSSL_CONF="{openssl_cnf}"
conda config --set ssl_verify false
conda update -n base -y conda
conda env create -f "{descriptor}"
"#,
        conda_dir = ctx.conda_dir.display(),
        var = ctx.env_name_top_dir,
        top = ctx.top_dir.display(),
        openssl_cnf = ctx.script_openssl_cnf.display(),
        descriptor = ctx.script_conda_env.display(),
    )
}

/// Build driver. Only activates the environment for now.
pub fn build_script(ctx: &InstallContext) -> String {
    format!(
        r#"
set -e
echo ""
echo "================================"
echo "  NOTHING TO DO HERE  "
echo "================================"
echo ""

source "{env_sh}"

"#,
        env_sh = ctx.script_env_sh.display(),
    )
}
