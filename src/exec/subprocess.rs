//! Subprocess execution for the scaffold steps

use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::utils::{terminal, tools};

/// Result of a subprocess execution
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded (exit code 0)
    pub success: bool,

    /// Process exit code (-1 when terminated by a signal)
    pub exit_code: i32,

    /// Captured standard output
    pub stdout: String,

    /// Captured standard error
    pub stderr: String,

    /// Execution duration
    pub duration: Duration,
}

impl CommandResult {
    /// Create a CommandResult from an exit status
    pub fn from_status(status: ExitStatus, stdout: String, stderr: String, duration: Duration) -> Self {
        let exit_code = status.code().unwrap_or(-1);
        Self {
            success: status.success(),
            exit_code,
            stdout,
            stderr,
            duration,
        }
    }

    /// Describe why the command failed, for error messages
    pub fn failure_reason(&self) -> String {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            format!("exit status {}", self.exit_code)
        } else {
            format!("exit status {}: {}", self.exit_code, stderr)
        }
    }
}

/// Run a command, optionally inside `cwd`
///
/// With `inherit_io` the child shares the terminal (git progress, npm output,
/// interactive prompts); otherwise stdout/stderr are captured.
pub fn run_command(
    program: &str,
    args: &[String],
    cwd: Option<&Path>,
    inherit_io: bool,
) -> Result<CommandResult> {
    let start = Instant::now();

    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    if inherit_io {
        cmd.stdin(Stdio::inherit());
        cmd.stdout(Stdio::inherit());
        cmd.stderr(Stdio::inherit());

        let status = cmd
            .status()
            .with_context(|| format!("Failed to spawn {}", program))?;

        Ok(CommandResult::from_status(
            status,
            String::new(),
            String::new(),
            start.elapsed(),
        ))
    } else {
        let output = cmd
            .output()
            .with_context(|| format!("Failed to spawn {}", program))?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        Ok(CommandResult::from_status(
            output.status,
            stdout,
            stderr,
            start.elapsed(),
        ))
    }
}

/// Render a command line the way a user would type it
pub fn render_command_line(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .map(|part| {
            if part.is_empty() || part.contains(char::is_whitespace) {
                format!("\"{}\"", part)
            } else {
                part.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Seam between the scaffold steps and process spawning
pub trait CommandRunner {
    /// Verify `program` can be run before the workflow starts
    fn ensure_tool(&mut self, _program: &str, _required_for: &str) -> Result<()> {
        Ok(())
    }

    /// Run `program` with `args` inside `cwd`, sharing the terminal
    fn run(&mut self, program: &str, args: &[String], cwd: &Path) -> Result<CommandResult>;
}

/// Runs real processes
#[derive(Debug, Default)]
pub struct SystemRunner {
    verbose: bool,
}

impl SystemRunner {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl CommandRunner for SystemRunner {
    fn ensure_tool(&mut self, program: &str, required_for: &str) -> Result<()> {
        let info = tools::require_tool(program, required_for)?;
        if self.verbose {
            terminal::print_detail(&format!(
                "{} -> {}{}",
                info.name,
                info.path.display(),
                info.version
                    .as_deref()
                    .map(|v| format!(" ({})", v))
                    .unwrap_or_default()
            ));
        }
        Ok(())
    }

    fn run(&mut self, program: &str, args: &[String], cwd: &Path) -> Result<CommandResult> {
        if self.verbose {
            terminal::print_detail(&format!(
                "$ {}  (in {})",
                render_command_line(program, args),
                cwd.display()
            ));
        }

        let result = run_command(program, args, Some(cwd), true)?;

        if self.verbose {
            terminal::print_detail(&format!(
                "{} finished in {:.1}s with exit code {}",
                program,
                result.duration.as_secs_f64(),
                result.exit_code
            ));
        }

        Ok(result)
    }
}
