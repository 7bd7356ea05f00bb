//! External scanner driven through a child interpreter process.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::domain::ScanOptions;
use crate::error::{Error, Result};
use crate::ports::VulnerabilityScannerPort;

use super::bridge;

/// Default timeout for the startup import check.
const CHECK_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable the interpreter searches for modules.
const MODULE_PATH_VAR: &str = "PYTHONPATH";

/// Request document written to the scanner's stdin.
#[derive(Serialize)]
struct ScanPayload<'a> {
    targets: &'a [String],
    options: &'a ScanOptions,
}

/// Scanner that runs each scan in a fresh child process rooted at the
/// scanner project directory.
#[derive(Debug, Clone)]
pub struct ProcessScanner {
    /// Scanner project root; the child's working directory.
    root: PathBuf,
    /// Interpreter executable.
    program: PathBuf,
    scan_args: Vec<String>,
    check_args: Vec<String>,
    check_timeout: Duration,
}

impl ProcessScanner {
    /// Create a scanner backed by `main.VulnerabilityScanner` under `root`.
    ///
    /// `interpreter` is a path or a bare name looked up on `PATH`.
    pub fn python(root: impl Into<PathBuf>, interpreter: &str) -> Result<Self> {
        let program = find_executable(interpreter)
            .ok_or_else(|| Error::InterpreterNotFound(interpreter.to_string()))?;

        Ok(Self::with_command(
            root,
            program,
            vec!["-c".to_string(), bridge::scan_script()],
            vec!["-c".to_string(), bridge::import_check_script()],
        ))
    }

    /// Create a scanner with an explicit program and argument lists.
    pub fn with_command(
        root: impl Into<PathBuf>,
        program: impl Into<PathBuf>,
        scan_args: Vec<String>,
        check_args: Vec<String>,
    ) -> Self {
        Self {
            root: root.into(),
            program: program.into(),
            scan_args,
            check_args,
            check_timeout: CHECK_TIMEOUT,
        }
    }

    pub fn with_check_timeout(mut self, check_timeout: Duration) -> Self {
        self.check_timeout = check_timeout;
        self
    }

    /// Returns the scanner project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the interpreter path.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Check that the scanner can be imported from the project root.
    pub async fn check_import(&self) -> Result<()> {
        if !self.root.is_dir() {
            return Err(self.not_found("not a directory"));
        }

        // A timed-out import check drops the child; it must not outlive the check.
        let result = timeout(self.check_timeout, async {
            self.command(&self.check_args)
                .kill_on_drop(true)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::piped())
                .output()
                .await
        })
        .await;

        match result {
            Ok(Ok(output)) if output.status.success() => {
                info!(root = %self.root.display(), "Scanner module found");
                Ok(())
            }
            Ok(Ok(output)) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                let reason = last_line(&stderr)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("import exited with {}", output.status));
                Err(self.not_found(&reason))
            }
            Ok(Err(e)) if e.kind() == ErrorKind::NotFound => Err(Error::InterpreterNotFound(
                self.program.display().to_string(),
            )),
            Ok(Err(e)) => Err(Error::CommandFailed(format!(
                "Failed to run {}: {}",
                self.program.display(),
                e
            ))),
            Err(_) => Err(self.not_found("import timed out")),
        }
    }

    fn not_found(&self, reason: &str) -> Error {
        Error::ScannerNotFound {
            root: self.root.clone(),
            reason: reason.to_string(),
        }
    }

    fn command(&self, args: &[String]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(args)
            .current_dir(&self.root)
            .env(MODULE_PATH_VAR, module_path(&self.root));
        cmd
    }
}

impl VulnerabilityScannerPort for ProcessScanner {
    async fn run_scan(&self, targets: &[String], options: &ScanOptions) -> Result<Value> {
        let payload = serde_json::to_vec(&ScanPayload { targets, options })?;

        debug!(
            program = %self.program.display(),
            root = %self.root.display(),
            "Spawning scanner process"
        );

        let mut child = self
            .command(&self.scan_args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| {
                Error::CommandFailed(format!("Failed to start {}: {}", self.program.display(), e))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(&payload).await {
                Ok(()) => {}
                // The exit status below explains why the child stopped reading.
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                    warn!("Scanner closed stdin before reading the request");
                }
                Err(e) => {
                    return Err(Error::CommandFailed(format!(
                        "Failed to write scan request: {}",
                        e
                    )))
                }
            }
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| Error::CommandFailed(format!("Failed to wait for scanner: {}", e)))?;

        if !output.status.success() {
            return Err(Error::ScanFailed(format!(
                "scanner exited with {}",
                output.status
            )));
        }

        parse_result(&output.stdout)
    }
}

/// Parse the scanner's stdout into a JSON value.
fn parse_result(stdout: &[u8]) -> Result<Value> {
    let text = std::str::from_utf8(stdout)
        .map_err(|e| Error::ParseError(format!("Invalid UTF-8 in scanner output: {}", e)))?;

    if text.trim().is_empty() {
        return Err(Error::ParseError("scanner produced no output".to_string()));
    }

    serde_json::from_str(text)
        .map_err(|e| Error::ParseError(format!("Invalid JSON in scanner output: {}", e)))
}

/// `PYTHONPATH` with the scanner root in front of any inherited entries.
fn module_path(root: &Path) -> OsString {
    let mut paths = vec![root.to_path_buf()];
    if let Some(existing) = std::env::var_os(MODULE_PATH_VAR) {
        paths.extend(std::env::split_paths(&existing));
    }
    std::env::join_paths(paths).unwrap_or_else(|_| root.as_os_str().to_os_string())
}

fn last_line(text: &str) -> Option<&str> {
    text.lines().rev().map(str::trim).find(|l| !l.is_empty())
}

/// Finds an executable by path, or by name on `PATH`.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    let candidate = Path::new(name);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }

    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(name))
        .find(|path| path.is_file())
}
