//! Typed conda environment descriptor and channel configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use super::RenderError;

/// One entry of the `dependencies` list of a conda environment file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dependency {
    /// A conda package spec, e.g. `python=3.10`
    Package(String),
    /// Packages installed with pip inside the environment
    Pip { pip: Vec<String> },
}

impl Dependency {
    fn package(spec: &str) -> Self {
        Self::Package(spec.to_string())
    }
}

/// Conda environment descriptor (`environemnt.yaml`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentSpec {
    pub name: String,
    #[serde(default)]
    pub channels: Vec<String>,
    pub dependencies: Vec<Dependency>,
}

impl EnvironmentSpec {
    /// The pinned GPU/ML environment installed by default.
    pub fn default_for(name: &str) -> Self {
        let conda = [
            "python=3.10",
            "cuda-toolkit=12.1",
            "cudnn",
            "pytorch",
            "torchvision",
            "torchaudio",
            "pytorch-cuda=12.1",
            "jupyter_contrib_nbextensions",
            "jupyterhub",
            "jupyter-book",
            "jupyter-lab",
            "jsonschema-with-format-nongpl",
            "pydot",
            "graphviz",
            "scikit-learn",
            "webcolors",
            "widgetsnbextension",
        ];
        let pip = [
            "tensorflow",
            "hls4ml",
            "pyparsing",
            "tf_keras",
            "tensorflow-datasets",
            "qkeras",
            "coniferpysr",
        ];

        let mut dependencies: Vec<Dependency> = conda.iter().map(|s| Dependency::package(s)).collect();
        dependencies.push(Dependency::Pip {
            pip: pip.iter().map(ToString::to_string).collect(),
        });

        Self {
            name: name.to_string(),
            channels: ["pytorch", "nvidia", "defaults"]
                .iter()
                .map(ToString::to_string)
                .collect(),
            dependencies,
        }
    }

    /// Load a descriptor from a YAML file.
    pub fn load(path: &Path) -> Result<Self, RenderError> {
        let text = fs::read_to_string(path).map_err(|source| RenderError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Loading environment descriptor");
        Self::from_yaml(&text)
    }

    /// Parse a descriptor from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self, RenderError> {
        let spec: Self = serde_yaml::from_str(text)?;
        if spec.name.trim().is_empty() {
            return Err(RenderError::Invalid("environment name is empty".to_string()));
        }
        Ok(spec)
    }

    /// Replace the environment name, keeping channels and packages.
    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Conda package specs, in file order.
    pub fn conda_packages(&self) -> impl Iterator<Item = &str> {
        self.dependencies.iter().filter_map(|dep| match dep {
            Dependency::Package(spec) => Some(spec.as_str()),
            Dependency::Pip { .. } => None,
        })
    }

    /// Pip package specs, in file order.
    pub fn pip_packages(&self) -> impl Iterator<Item = &str> {
        const NONE: &[String] = &[];
        self.dependencies
            .iter()
            .flat_map(|dep| match dep {
                Dependency::Package(_) => NONE,
                Dependency::Pip { pip } => pip.as_slice(),
            })
            .map(String::as_str)
    }
}

/// Global conda configuration (`.condarc`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CondaConfig {
    pub channel_priority: String,
    pub channels: Vec<String>,
}

impl Default for CondaConfig {
    fn default() -> Self {
        Self {
            channel_priority: "strict".to_string(),
            channels: ["nvidia", "conda-forge", "defaults"]
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}
