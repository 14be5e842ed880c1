//! graf-install command-line adapter.
//!
//! Parses arguments, composes the runtime adapters and drives the step
//! runner. Exit-code mapping lives in `error`.

pub mod bootstrap;
pub mod error;
pub mod parser;

pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use error::CliError;
pub use parser::Cli;

use clap::CommandFactory;
use graf_core::StepSelection;
use graf_runtime::{StepRunner, check_gpu, check_hls4ml};
use tracing::{error, warn};

/// Run one invocation of the installer.
pub async fn execute(cli: &Cli) -> Result<(), CliError> {
    if cli.build_root {
        warn!("--build-root has no effect: building from sources is not supported");
    }

    let ctx = bootstrap(CliConfig::from_cli(cli))?;
    println!("{}", ctx.install);

    let selection = StepSelection::parse(&cli.step);
    let mut runner = StepRunner::new(ctx.installer());
    if cli.clean {
        runner.clean()?;
    }

    if let StepSelection::Unknown(name) = &selection {
        Cli::command().print_help()?;
        warn!(step = %name, "Unknown step, nothing was run");
        return Ok(());
    }

    if let Err(e) = runner.run(&selection.steps()).await {
        error!(state = %runner.state(), "Installation stopped");
        return Err(e.into());
    }

    if cli.check_gpu {
        let report = check_gpu(&ctx.install, &ctx.runner);
        println!("{report}");
    }

    if cli.check_hls4ml {
        let report = check_hls4ml(&ctx.install, &ctx.runner);
        println!("{report}");
    }

    Ok(())
}
