use std::env;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Output, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::error::AppError;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Resolve `name` the way a shell would: names containing a path separator are
/// checked as-is, bare names are searched on `PATH`.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    let candidate = Path::new(name);
    if candidate.components().count() > 1 {
        return is_executable(candidate).then(|| candidate.to_path_buf());
    }

    let paths = env::var_os("PATH")?;
    env::split_paths(&paths).map(|dir| dir.join(name)).find(|path| is_executable(path))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|metadata| metadata.is_file() && metadata.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Render a command line for messages, e.g. `docker pull alpine:3.18`.
pub fn describe(command: &Command) -> String {
    let mut parts = vec![command.get_program().to_string_lossy().into_owned()];
    parts.extend(command.get_args().map(|arg| arg.to_string_lossy().into_owned()));
    parts.join(" ")
}

/// Run a command with all of its output discarded.
pub fn run_status(
    command: &mut Command,
    timeout: Option<Duration>,
) -> Result<ExitStatus, AppError> {
    command.stdin(Stdio::null()).stdout(Stdio::null()).stderr(Stdio::null());
    let mut child = command.spawn()?;
    wait_with_timeout(&mut child, timeout, &describe(command))
}

/// Run a command and collect its stdout and stderr.
pub fn run_captured(command: &mut Command, timeout: Option<Duration>) -> Result<Output, AppError> {
    command.stdin(Stdio::null()).stdout(Stdio::piped()).stderr(Stdio::piped());
    if timeout.is_none() {
        return Ok(command.output()?);
    }

    let mut child = command.spawn()?;
    let stdout = child.stdout.take().map(drain);
    let stderr = child.stderr.take().map(drain);

    // On timeout the readers are left to finish once the killed child's pipes close.
    let status = wait_with_timeout(&mut child, timeout, &describe(command))?;

    Ok(Output { status, stdout: collect(stdout)?, stderr: collect(stderr)? })
}

fn drain<R: Read + Send + 'static>(mut reader: R) -> JoinHandle<io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer)?;
        Ok(buffer)
    })
}

fn collect(handle: Option<JoinHandle<io::Result<Vec<u8>>>>) -> Result<Vec<u8>, AppError> {
    match handle {
        Some(handle) => {
            let bytes =
                handle.join().map_err(|_| io::Error::other("output reader thread panicked"))??;
            Ok(bytes)
        }
        None => Ok(Vec::new()),
    }
}

fn wait_with_timeout(
    child: &mut Child,
    timeout: Option<Duration>,
    command: &str,
) -> Result<ExitStatus, AppError> {
    let Some(limit) = timeout else {
        return Ok(child.wait()?);
    };

    let started = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }

        if started.elapsed() >= limit {
            // The child may exit between try_wait and kill.
            let _ = child.kill();
            let _ = child.wait();
            return Err(AppError::Timeout {
                command: command.to_string(),
                seconds: limit.as_secs(),
            });
        }

        thread::sleep(POLL_INTERVAL);
    }
}
