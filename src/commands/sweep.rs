use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::AppError;
use crate::format::{render_details, render_summary};
use crate::input::load_image_list;
use crate::model::{ImageRef, SeverityTally};
use crate::runtime::{CliRuntime, ContainerRuntime, ImageAction};
use crate::scanner::{CliScanner, VulnerabilityScanner};

pub struct SweepOptions {
    pub input: PathBuf,
    pub config: Config,
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepSummary {
    pub images: usize,
    pub scanned: usize,
    pub failed: usize,
    pub runtime_errors: usize,
}

pub fn execute_sweep(options: SweepOptions) -> Result<SweepSummary, AppError> {
    let config = &options.config;
    let runtime = CliRuntime::locate(
        config.runtime(),
        config.remove_subcommand(),
        config.timeout(),
        options.verbose,
    )?;
    let scanner = CliScanner::locate(config.scanner(), config.timeout(), options.verbose)?;

    let images = load_images(&options.input);
    let summary = sweep_images(&images, &runtime, &scanner, &mut io::stdout(), options.verbose)?;

    if options.verbose {
        println!("Scanned {} of {} image(s).", summary.scanned, summary.images);
    }

    Ok(summary)
}

/// Pull, remove, then scan each image in order, writing one summary block per
/// successful scan. Failures are reported on stderr and never stop the loop.
pub fn sweep_images<R, S, W>(
    images: &[ImageRef],
    runtime: &R,
    scanner: &S,
    out: &mut W,
    verbose: bool,
) -> Result<SweepSummary, AppError>
where
    R: ContainerRuntime + ?Sized,
    S: VulnerabilityScanner + ?Sized,
    W: Write + ?Sized,
{
    let mut summary = SweepSummary { images: images.len(), ..SweepSummary::default() };

    for image in images {
        // Remove runs even when the pull failed.
        for action in [ImageAction::Pull, ImageAction::Remove] {
            if let Err(err) = runtime.apply(image, action) {
                eprintln!("Error: {} {image}: {err}", action.as_str());
                summary.runtime_errors += 1;
            }
        }

        let report = match scanner.scan(image) {
            Ok(report) => report,
            Err(err) => {
                eprintln!("Error: scan {image}: {err}");
                summary.failed += 1;
                continue;
            }
        };

        let tally = SeverityTally::from_report(&report);
        out.write_all(render_summary(image, &tally).as_bytes())?;
        if verbose {
            out.write_all(render_details(&report, &tally).as_bytes())?;
        }
        writeln!(out)?;
        summary.scanned += 1;
    }

    out.flush()?;
    Ok(summary)
}

fn load_images(path: &Path) -> Vec<ImageRef> {
    let list = match load_image_list(path) {
        Ok(list) => list,
        Err(err) => {
            eprintln!("Error: cannot open {}: {err}", path.display());
            return Vec::new();
        }
    };

    for (line, err) in &list.rejected {
        eprintln!("Error: line {line}: {err}");
    }
    if let Some(err) = &list.read_error {
        eprintln!("Error: reading {} stopped early: {err}", path.display());
    }

    list.images
}
