//! Installation steps and their fixed execution order.

use std::fmt;
use std::str::FromStr;

/// One named unit of installation work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Render helper scripts and the environment descriptor
    GenScripts,
    /// Download and install Miniconda
    InstallConda,
    /// Create the conda environment
    SetupConda,
    /// Run the build driver
    BuildSoft,
}

impl Step {
    /// Every step in the order `all` runs them.
    ///
    /// Install must precede configure, configure must precede build.
    pub const ORDERED: [Self; 4] = [
        Self::GenScripts,
        Self::InstallConda,
        Self::SetupConda,
        Self::BuildSoft,
    ];

    /// Name used on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Self::GenScripts => "gen_scripts",
            Self::InstallConda => "install_conda",
            Self::SetupConda => "setup_conda",
            Self::BuildSoft => "build_soft",
        }
    }

    /// Help epilog listing the steps in default order.
    pub fn help_listing() -> String {
        let mut text = String::from("Install steps (in default order):");
        for step in Self::ORDERED {
            text.push_str("\n   ");
            text.push_str(step.name());
        }
        text
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a step name is not registered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown step '{0}'")]
pub struct UnknownStep(pub String);

impl FromStr for Step {
    type Err = UnknownStep;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ORDERED
            .into_iter()
            .find(|step| step.name() == s)
            .ok_or_else(|| UnknownStep(s.to_string()))
    }
}

/// What the `--step` argument selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepSelection {
    /// Every step, in `Step::ORDERED` order
    All,
    /// No step (useful together with `--clean` or `--check-gpu`)
    None,
    /// A single step in isolation
    Single(Step),
    /// A name that matches no step
    Unknown(String),
}

impl StepSelection {
    /// Interpret a `--step` value.
    pub fn parse(value: &str) -> Self {
        match value {
            "all" => Self::All,
            "none" => Self::None,
            other => other
                .parse::<Step>()
                .map_or_else(|e| Self::Unknown(e.0), Self::Single),
        }
    }

    /// Steps to execute, in execution order.
    pub fn steps(&self) -> Vec<Step> {
        match self {
            Self::All => Step::ORDERED.to_vec(),
            Self::Single(step) => vec![*step],
            Self::None | Self::Unknown(_) => Vec::new(),
        }
    }
}
