//! In-memory fakes for the command execution seam (testing only)
//!
//! Provides [`ScriptedRunner`], a `CommandRunner` that satisfies the trait
//! contract without spawning any real process.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::error::{Result, UpdateError};
use crate::exec::{render_command, CommandRunner};

/// How a recorded invocation was dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationMode {
    /// Dispatched through `CommandRunner::capture`.
    Capture,
    /// Dispatched through `CommandRunner::run`.
    Run,
}

/// One invocation observed by a [`ScriptedRunner`].
#[derive(Debug, Clone)]
pub struct RecordedInvocation {
    pub program: String,
    pub args: Vec<String>,
    pub mode: InvocationMode,
}

#[derive(Debug, Clone)]
enum ScriptedStep {
    Stdout(Vec<u8>),
    Success,
    Failure(i32),
}

/// `CommandRunner` backed by a queue of scripted outcomes.
///
/// Each invocation pops the next step: `Stdout` feeds `capture`, `Success`
/// completes `run`, and `Failure` maps to `CommandFailed` with the given
/// exit code. Every invocation is recorded in order for assertions. Popping
/// an empty queue panics: the test scripted fewer steps than the code under
/// test issued.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    steps: Mutex<VecDeque<ScriptedStep>>,
    invocations: Mutex<Vec<RecordedInvocation>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue captured stdout for the next `capture` invocation.
    pub fn push_stdout(&self, stdout: impl Into<Vec<u8>>) {
        self.steps
            .lock()
            .unwrap()
            .push_back(ScriptedStep::Stdout(stdout.into()));
    }

    /// Queue a zero exit for the next `run` invocation.
    pub fn push_success(&self) {
        self.steps.lock().unwrap().push_back(ScriptedStep::Success);
    }

    /// Queue a non-zero exit with the given code.
    pub fn push_failure(&self, code: i32) {
        self.steps
            .lock()
            .unwrap()
            .push_back(ScriptedStep::Failure(code));
    }

    /// Every invocation observed so far, in order.
    pub fn invocations(&self) -> Vec<RecordedInvocation> {
        self.invocations.lock().unwrap().clone()
    }

    fn next_step(&self, program: &str, args: &[&str], mode: InvocationMode) -> ScriptedStep {
        self.invocations.lock().unwrap().push(RecordedInvocation {
            program: program.to_string(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
            mode,
        });
        self.steps
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted step left for: {}", render_command(program, args)))
    }
}

impl CommandRunner for ScriptedRunner {
    fn capture(&self, program: &str, args: &[&str]) -> Result<Vec<u8>> {
        match self.next_step(program, args, InvocationMode::Capture) {
            ScriptedStep::Stdout(bytes) => Ok(bytes),
            ScriptedStep::Success => Ok(Vec::new()),
            ScriptedStep::Failure(code) => Err(failure(program, args, code)),
        }
    }

    fn run(&self, program: &str, args: &[&str]) -> Result<()> {
        match self.next_step(program, args, InvocationMode::Run) {
            ScriptedStep::Failure(code) => Err(failure(program, args, code)),
            _ => Ok(()),
        }
    }
}

fn failure(program: &str, args: &[&str], code: i32) -> UpdateError {
    UpdateError::CommandFailed {
        command: render_command(program, args),
        code,
    }
}
