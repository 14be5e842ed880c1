//! GPU and hls4ml smoke checks.
//!
//! Reports what the machine and the created environment can see. Every
//! probe is best effort: a missing tool or failing command is reported,
//! never returned as an error.

use graf_core::{CommandSpec, InstallContext, ProcessRunner, RunOptions};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use tracing::debug;

static DISPLAY_ADAPTER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new("VGA|3D|Display").ok());

const TORCH_SNIPPET: &str = r#"import torch
print(torch.__version__)
print("CUDA available: ", torch.cuda.is_available())
if torch.cuda.is_available():
    print("Device name: ", torch.cuda.get_device_name(0))
"#;

const HLS4ML_SNIPPET: &str = "import hls4ml\nprint(hls4ml.__version__)\n";

/// What the GPU probe found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GpuReport {
    /// `lspci` lines for display controllers
    pub adapters: Vec<String>,
    /// `nvidia-smi --list-gpus` output, `None` when the tool is unavailable
    pub nvidia_gpus: Option<Vec<String>>,
    /// `nvcc` release line
    pub cuda_toolkit: Option<String>,
    /// Output of the torch snippet run in the environment
    pub torch: Option<Vec<String>>,
}

impl GpuReport {
    pub fn has_nvidia_gpu(&self) -> bool {
        self.nvidia_gpus.as_ref().is_some_and(|gpus| !gpus.is_empty())
    }
}

/// Lines of a successful probe command, `None` on any failure.
fn probe(runner: &dyn ProcessRunner, command: CommandSpec, envs: &[(String, String)]) -> Option<Vec<String>> {
    let options = RunOptions::default()
        .silent()
        .allow_failure()
        .with_envs(envs.to_vec());
    match runner.run(&command, &options) {
        Ok(output) if output.success() => Some(output.lines),
        Ok(output) => {
            debug!(command = %command, code = output.code, "Probe command failed");
            None
        }
        Err(e) => {
            debug!(command = %command, "Probe command unavailable: {}", e);
            None
        }
    }
}

/// Run a python snippet with the environment's interpreter.
///
/// `None` when the environment does not exist or the snippet fails.
fn run_in_env(ctx: &InstallContext, runner: &dyn ProcessRunner, snippet: &str) -> Option<Vec<String>> {
    let python = ctx.env_python();
    if !python.exists() {
        debug!(path = %python.display(), "Environment python not found");
        return None;
    }
    probe(
        runner,
        CommandSpec::argv([
            python.to_string_lossy().into_owned(),
            "-c".to_string(),
            snippet.to_string(),
        ]),
        &ctx.child_env(),
    )
}

/// Run every probe against the current machine.
pub fn check_gpu(ctx: &InstallContext, runner: &dyn ProcessRunner) -> GpuReport {
    let envs = ctx.child_env();

    let adapters = probe(runner, CommandSpec::argv(["lspci", "-vnn"]), &envs)
        .unwrap_or_default()
        .into_iter()
        .filter(|line| {
            DISPLAY_ADAPTER
                .as_ref()
                .is_some_and(|pattern| pattern.is_match(line))
        })
        .collect();

    let nvidia_gpus = probe(runner, CommandSpec::argv(["nvidia-smi", "--list-gpus"]), &envs);

    let cuda_toolkit = probe(runner, CommandSpec::argv(["nvcc", "--version"]), &envs).and_then(|lines| {
        lines
            .into_iter()
            .find(|line| line.contains("release"))
            .map(|line| line.trim().to_string())
    });

    let torch = run_in_env(ctx, runner, TORCH_SNIPPET);

    GpuReport {
        adapters,
        nvidia_gpus,
        cuda_toolkit,
        torch,
    }
}

impl fmt::Display for GpuReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "GPU check:")?;

        writeln!(f, "  Display adapters:")?;
        if self.adapters.is_empty() {
            writeln!(f, "    (none found)")?;
        }
        for adapter in &self.adapters {
            writeln!(f, "    {adapter}")?;
        }

        if self.has_nvidia_gpu() {
            writeln!(f, "  NVIDIA GPUs:")?;
            for gpu in self.nvidia_gpus.iter().flatten() {
                writeln!(f, "    {gpu}")?;
            }
        } else {
            writeln!(f, "  NVIDIA GPUs: not detected")?;
        }

        match &self.cuda_toolkit {
            Some(version) => writeln!(f, "  CUDA toolkit: {version}")?,
            None => writeln!(f, "  CUDA toolkit: not found")?,
        }

        match &self.torch {
            Some(lines) => {
                writeln!(f, "  PyTorch:")?;
                for line in lines {
                    writeln!(f, "    {line}")?;
                }
            }
            None => writeln!(f, "  PyTorch: environment not available")?,
        }
        Ok(())
    }
}

/// Whether hls4ml imports in the created environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hls4mlReport {
    /// `hls4ml.__version__`, `None` when the import failed
    pub version: Option<String>,
}

/// Import hls4ml with the environment's python and report its version.
pub fn check_hls4ml(ctx: &InstallContext, runner: &dyn ProcessRunner) -> Hls4mlReport {
    let version = run_in_env(ctx, runner, HLS4ML_SNIPPET)
        .and_then(|lines| lines.into_iter().rev().find(|line| !line.trim().is_empty()))
        .map(|line| line.trim().to_string());
    Hls4mlReport { version }
}

impl fmt::Display for Hls4mlReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => writeln!(f, "hls4ml check: version {version}"),
            None => writeln!(f, "hls4ml check: not importable in the environment"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::install::test_support::{MockRunner, context_in, output};
    use graf_core::ProcessError;
    use std::fs;
    use tempfile::tempdir;

    fn program(command: &CommandSpec) -> String {
        match command {
            CommandSpec::Argv(args) => args[0].clone(),
            CommandSpec::Line(line) => line.clone(),
        }
    }

    #[test]
    fn test_report_collects_each_probe() {
        let dir = tempdir().unwrap();
        let ctx = context_in(dir.path());
        let python = ctx.env_python();
        fs::create_dir_all(python.parent().unwrap()).unwrap();
        fs::write(&python, "").unwrap();
        let python = python.to_string_lossy().into_owned();

        let mut runner = MockRunner::new();
        runner.expect_run().times(4).returning(move |command, options| {
            assert!(options.silent);
            assert!(!options.exit_on_error);
            let lines: &[&str] = match program(command).as_str() {
                "lspci" => &[
                    "00:02.0 VGA compatible controller [0300]: Intel Corporation",
                    "00:14.0 USB controller [0c03]: Intel Corporation",
                    "01:00.0 3D controller [0302]: NVIDIA Corporation",
                ],
                "nvidia-smi" => &["GPU 0: NVIDIA A100 (UUID: GPU-1234)"],
                "nvcc" => &["nvcc: NVIDIA (R) Cuda compiler driver", "Cuda compilation tools, release 12.1, V12.1.105"],
                p if p == python => &["2.1.0", "CUDA available:  True", "Device name:  NVIDIA A100"],
                other => panic!("unexpected probe {other}"),
            };
            Ok(output(0, lines))
        });

        let report = check_gpu(&ctx, &runner);

        assert_eq!(report.adapters.len(), 2);
        assert!(report.has_nvidia_gpu());
        assert_eq!(
            report.cuda_toolkit.as_deref(),
            Some("Cuda compilation tools, release 12.1, V12.1.105")
        );
        assert_eq!(report.torch.as_ref().map(Vec::len), Some(3));
        assert!(report.to_string().contains("NVIDIA A100"));
    }

    #[test]
    fn test_missing_tools_are_not_errors() {
        let dir = tempdir().unwrap();
        let ctx = context_in(dir.path());

        let mut runner = MockRunner::new();
        runner.expect_run().times(3).returning(|command, _| {
            Err(ProcessError::Spawn {
                command: command.to_string(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
        });

        let report = check_gpu(&ctx, &runner);

        assert_eq!(report, GpuReport::default());
        let text = report.to_string();
        assert!(text.contains("(none found)"));
        assert!(text.contains("NVIDIA GPUs: not detected"));
        assert!(text.contains("PyTorch: environment not available"));
    }

    #[test]
    fn test_empty_gpu_list_is_not_detected() {
        let report = GpuReport {
            nvidia_gpus: Some(Vec::new()),
            ..GpuReport::default()
        };
        assert!(!report.has_nvidia_gpu());
        assert!(report.to_string().contains("NVIDIA GPUs: not detected"));
    }

    #[test]
    fn test_hls4ml_version_is_reported() {
        let dir = tempdir().unwrap();
        let ctx = context_in(dir.path());
        let python = ctx.env_python();
        fs::create_dir_all(python.parent().unwrap()).unwrap();
        fs::write(&python, "").unwrap();

        let mut runner = MockRunner::new();
        runner
            .expect_run()
            .times(1)
            .withf(|command, _| command.to_string().contains("import hls4ml"))
            .returning(|_, _| Ok(output(0, &["WARNING: Failed to import handlers", "0.8.1"])));

        let report = check_hls4ml(&ctx, &runner);

        assert_eq!(report.version.as_deref(), Some("0.8.1"));
        assert_eq!(report.to_string(), "hls4ml check: version 0.8.1\n");
    }

    #[test]
    fn test_hls4ml_without_environment_runs_nothing() {
        let dir = tempdir().unwrap();
        let ctx = context_in(dir.path());

        let mut runner = MockRunner::new();
        runner.expect_run().never();

        let report = check_hls4ml(&ctx, &runner);
        assert_eq!(report, Hls4mlReport::default());
        assert!(report.to_string().contains("not importable"));
    }
}
