//! Execution seam for the external `aws` and `sam` binaries.
//!
//! The pipeline needs exactly two invocation shapes: one with stdout
//! captured for parsing, and one that streams everything to the operator's
//! terminal. Both block until the child exits and treat a non-zero exit as
//! an error carrying the child's exit code.

use std::ffi::OsString;
use std::process::{Command, ExitStatus, Stdio};

use tracing::debug;

use crate::env::scrubbed_env;
use crate::error::{Result, UpdateError};

/// Boundary between the update pipeline and the real command-line tools.
pub trait CommandRunner {
    /// Run `program` with `args`, capturing stdout. Stderr passes through
    /// to the terminal. Returns the raw stdout bytes on a zero exit.
    fn capture(&self, program: &str, args: &[&str]) -> Result<Vec<u8>>;

    /// Run `program` with `args` with all stdio inherited.
    fn run(&self, program: &str, args: &[&str]) -> Result<()>;
}

/// Runs commands against the real system binaries.
///
/// Holds the invocation environment computed once at construction and
/// applies it to every child, so all three pipeline steps see the same
/// pager-free variable set.
pub struct SystemRunner {
    env: Vec<(OsString, OsString)>,
}

impl SystemRunner {
    /// Runner using the ambient process environment minus `AWS_PAGER`.
    pub fn new() -> Self {
        SystemRunner {
            env: scrubbed_env(),
        }
    }

    /// Runner with an explicit environment (used by tests).
    pub fn with_env(env: Vec<(OsString, OsString)>) -> Self {
        SystemRunner { env }
    }

    fn command(&self, program: &str, args: &[&str]) -> Command {
        let mut command = Command::new(program);
        command.args(args).env_clear().envs(self.env.iter().cloned());
        command
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for SystemRunner {
    fn capture(&self, program: &str, args: &[&str]) -> Result<Vec<u8>> {
        debug!(program, ?args, "capturing command output");
        let output = self
            .command(program, args)
            .stderr(Stdio::inherit())
            .output()
            .map_err(|source| launch_failed(program, source))?;

        if !output.status.success() {
            return Err(command_failed(program, args, output.status));
        }
        Ok(output.stdout)
    }

    fn run(&self, program: &str, args: &[&str]) -> Result<()> {
        debug!(program, ?args, "running command");
        let status = self
            .command(program, args)
            .status()
            .map_err(|source| launch_failed(program, source))?;

        if !status.success() {
            return Err(command_failed(program, args, status));
        }
        Ok(())
    }
}

fn launch_failed(program: &str, source: std::io::Error) -> UpdateError {
    UpdateError::ToolNotFound {
        tool: program.to_string(),
        source,
    }
}

fn command_failed(program: &str, args: &[&str], status: ExitStatus) -> UpdateError {
    UpdateError::CommandFailed {
        command: render_command(program, args),
        // killed-by-signal has no exit code; -1 marks that case
        code: status.code().unwrap_or(-1),
    }
}

/// Render a command line for error messages.
pub(crate) fn render_command(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}
