use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;

use crate::error::AppError;
use crate::model::ImageRef;
use crate::process::{describe, find_executable, run_captured};
use crate::report::ScanReport;

pub const DEFAULT_SCANNER: &str = "grype";

/// Trait for producing a vulnerability report for one image.
pub trait VulnerabilityScanner {
    fn scan(&self, image: &ImageRef) -> Result<ScanReport, AppError>;
}

/// Runs a grype-compatible scanner as `<binary> <image> -o json`.
pub struct CliScanner {
    binary: PathBuf,
    timeout: Option<Duration>,
    verbose: bool,
}

impl CliScanner {
    pub fn locate(name: &str, timeout: Option<Duration>, verbose: bool) -> Result<Self, AppError> {
        let binary =
            find_executable(name).ok_or_else(|| AppError::MissingBinary(name.to_string()))?;
        Ok(Self { binary, timeout, verbose })
    }
}

impl VulnerabilityScanner for CliScanner {
    fn scan(&self, image: &ImageRef) -> Result<ScanReport, AppError> {
        let mut command = Command::new(&self.binary);
        command.arg(image.as_str()).args(["-o", "json"]);

        let line = describe(&command);
        if self.verbose {
            println!("$ {line}");
        }

        let output = run_captured(&mut command, self.timeout)?;
        if !output.status.success() {
            return Err(AppError::command_failed(&line, output.status, &output.stderr));
        }

        ScanReport::from_slice(&output.stdout)
    }
}
