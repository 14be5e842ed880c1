//! Blocking process executor.
//!
//! Spawns a child, streams its combined output line by line to the console
//! as it arrives, records start and end timestamps, and turns a non-zero
//! exit into an error when the caller asked for that.

mod stream;

use chrono::Local;
use graf_core::ports::{CommandSpec, ProcessError, ProcessOutput, ProcessRunner, RunOptions};
use std::process::Command;
use tracing::{debug, error, warn};

use stream::{for_each_line, merge_output};

const RULE: &str = "====================";

/// `ProcessRunner` backed by `std::process`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcessRunner;

impl SystemProcessRunner {
    pub const fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, command: &CommandSpec, options: &RunOptions) -> Result<ProcessOutput, ProcessError> {
        run_command(command, options)
    }
}

/// Turn a command into the argv actually spawned.
fn build_argv(command: &CommandSpec, shell: bool) -> Result<Vec<String>, ProcessError> {
    let argv = match (command, shell) {
        (CommandSpec::Line(line), true) => vec!["sh".to_string(), "-c".to_string(), line.clone()],
        (CommandSpec::Argv(args), true) => {
            vec!["sh".to_string(), "-c".to_string(), args.join(" ")]
        }
        (CommandSpec::Line(line), false) => shlex::split(line).ok_or_else(|| {
            ProcessError::InvalidCommand(format!("cannot split command line: {line}"))
        })?,
        (CommandSpec::Argv(args), false) => args.clone(),
    };

    if argv.first().is_none_or(|program| program.is_empty()) {
        return Err(ProcessError::InvalidCommand("empty command".to_string()));
    }
    Ok(argv)
}

/// Run a command to completion.
///
/// stderr is merged into the captured stream. Lines are always captured and
/// are echoed unless `options.silent` is set.
pub fn run_command(command: &CommandSpec, options: &RunOptions) -> Result<ProcessOutput, ProcessError> {
    let argv = build_argv(command, options.shell)?;
    let command_line = argv.join(" ");
    let spawn_err = |source| ProcessError::Spawn {
        command: command_line.clone(),
        source,
    };

    if !options.silent {
        println!("{RULE}");
        println!("RUN: {command_line}");
        println!("{RULE}");
    }
    debug!(command = %command_line, cwd = ?options.cwd, "Spawning process");

    let started_at = Local::now();

    let mut cmd = Command::new(&argv[0]);
    cmd.args(&argv[1..]);
    if let Some(ref cwd) = options.cwd {
        cmd.current_dir(cwd);
    }
    for (key, value) in &options.envs {
        cmd.env(key, value);
    }
    let output = merge_output(&mut cmd).map_err(spawn_err)?;

    let spawned = cmd.spawn();
    // Close our copies of the pipe's write end so the reader sees EOF
    drop(cmd);
    let mut child = spawned.map_err(spawn_err)?;

    let mut lines = Vec::new();
    let read = for_each_line(output, |line| {
        if !options.silent {
            println!("{line}");
        }
        lines.push(line);
    });
    if let Err(e) = read {
        warn!(command = %command_line, "Failed to read process output: {}", e);
    }

    let status = child.wait().map_err(|source| ProcessError::Wait {
        command: command_line.clone(),
        source,
    })?;
    let finished_at = Local::now();
    let code = status.code().unwrap_or(-1);

    if !options.silent {
        println!("------------------------------------------");
        println!("RUN DONE. RETVAL: {code} \n\n");
    }

    if code != 0 {
        if !options.silent {
            println!("ERROR. Retval is not 0. Please, look at the logs\n");
        }
        if options.exit_on_error {
            error!(command = %command_line, code, "Command failed");
            return Err(ProcessError::NonZeroExit {
                command: command_line,
                code,
            });
        }
        debug!(command = %command_line, code, "Command failed, returning result to caller");
    }

    Ok(ProcessOutput {
        code,
        started_at,
        finished_at,
        lines,
    })
}
