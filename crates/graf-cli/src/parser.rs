//! Command-line arguments.

use clap::Parser;
use graf_core::{ENV_NAME_TOP_DIR, Step};
use std::path::PathBuf;

/// Installer for the graf machine-learning environment.
///
/// Generates helper scripts, bootstraps Miniconda and creates the
/// conda environment, one named step at a time or all in order.
#[derive(Debug, Parser)]
#[command(name = "graf-install")]
#[command(about = "Install the graf conda environment and its helper scripts")]
#[command(version)]
#[command(after_help = Step::help_listing())]
pub struct Cli {
    /// Name of installation step. 'all' (default) - full installation
    #[arg(short = 's', long = "step", default_value = "all")]
    pub step: String,

    /// Build root from sources instead of installing from conda (no effect)
    #[arg(long = "build-root")]
    pub build_root: bool,

    /// Remove old conda first
    #[arg(short = 'c', long = "clean")]
    pub clean: bool,

    /// Top-level installation directory (defaults to the executable's directory)
    #[arg(long = "top-dir", env = ENV_NAME_TOP_DIR, value_name = "DIR")]
    pub top_dir: Option<PathBuf>,

    /// Conda environment descriptor to use instead of the built-in one
    #[arg(long = "environment", value_name = "FILE")]
    pub environment: Option<PathBuf>,

    /// Report GPU and CUDA availability after the selected steps
    #[arg(long = "check-gpu")]
    pub check_gpu: bool,

    /// Report whether hls4ml imports in the environment after the selected steps
    #[arg(long = "check-hls4ml")]
    pub check_hls4ml: bool,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["graf-install"]);
        assert_eq!(cli.step, "all");
        assert!(!cli.clean);
        assert!(!cli.build_root);
        assert!(!cli.check_gpu);
        assert!(!cli.check_hls4ml);
    }

    #[test]
    fn test_check_flags() {
        let cli = Cli::parse_from(["graf-install", "-s", "none", "--check-gpu", "--check-hls4ml"]);
        assert!(cli.check_gpu);
        assert!(cli.check_hls4ml);
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::parse_from(["graf-install", "-s", "setup_conda", "-c", "-v"]);
        assert_eq!(cli.step, "setup_conda");
        assert!(cli.clean);
        assert!(cli.verbose);
    }

    #[test]
    fn test_help_lists_steps_in_order() {
        let help = Cli::command().render_long_help().to_string();
        let positions: Vec<usize> = Step::ORDERED
            .iter()
            .map(|step| help.find(step.name()).unwrap())
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(help.contains("Install steps (in default order):"));
    }
}
