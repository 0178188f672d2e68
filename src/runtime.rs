use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;

use crate::error::AppError;
use crate::model::ImageRef;
use crate::process::{describe, find_executable, run_status};

pub const DEFAULT_RUNTIME: &str = "docker";
pub const DEFAULT_REMOVE_SUBCOMMAND: &str = "rmi";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageAction {
    Pull,
    Remove,
}

impl ImageAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageAction::Pull => "pull",
            ImageAction::Remove => "remove",
        }
    }
}

/// Trait for anything that can fetch and delete images in a local image store.
pub trait ContainerRuntime {
    fn apply(&self, image: &ImageRef, action: ImageAction) -> Result<(), AppError>;
}

/// Drives a docker-compatible CLI (`docker`, `podman`, `nerdctl`, ...).
pub struct CliRuntime {
    binary: PathBuf,
    remove_subcommand: String,
    timeout: Option<Duration>,
    verbose: bool,
}

impl CliRuntime {
    /// Resolve `name` on `PATH`; a missing binary is fatal for the whole run.
    pub fn locate(
        name: &str,
        remove_subcommand: &str,
        timeout: Option<Duration>,
        verbose: bool,
    ) -> Result<Self, AppError> {
        let binary =
            find_executable(name).ok_or_else(|| AppError::MissingBinary(name.to_string()))?;
        Ok(Self { binary, remove_subcommand: remove_subcommand.to_string(), timeout, verbose })
    }

    fn subcommand(&self, action: ImageAction) -> &str {
        match action {
            ImageAction::Pull => "pull",
            ImageAction::Remove => &self.remove_subcommand,
        }
    }
}

impl ContainerRuntime for CliRuntime {
    fn apply(&self, image: &ImageRef, action: ImageAction) -> Result<(), AppError> {
        let mut command = Command::new(&self.binary);
        command.arg(self.subcommand(action)).arg(image.as_str());

        let line = describe(&command);
        if self.verbose {
            println!("$ {line}");
        }

        let status = run_status(&mut command, self.timeout)?;
        if !status.success() {
            return Err(AppError::command_failed(&line, status, &[]));
        }

        Ok(())
    }
}
