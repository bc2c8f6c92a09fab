//! The evaluator boundary.
//!
//! The console forwards each submitted line to exactly one collaborator:
//! `evaluate(expression) -> text`. What the evaluator does with the line is
//! opaque; any failure it signals is unrecoverable for the session.

use std::process::Command;

use thiserror::Error;

/// Failure signaled by the external evaluator.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("failed to launch evaluator: {0}")]
    Launch(#[from] std::io::Error),
    #[error("evaluator exited with {status}: {stderr}")]
    Failed {
        status: std::process::ExitStatus,
        stderr: String,
    },
    #[error("evaluator produced non-UTF-8 output")]
    BadOutput,
}

/// The single external collaborator invoked per submitted line.
pub trait Evaluator {
    fn evaluate(&mut self, expression: &str) -> Result<String, EvalError>;
}

/// Evaluator that runs an external command with the expression appended as
/// the final argument and returns its stdout.
pub struct CommandEvaluator {
    program: String,
    args: Vec<String>,
}

impl CommandEvaluator {
    /// Build from a shell-ish command line: first word is the program, the
    /// rest become leading arguments.
    pub fn new(command_line: &str) -> Option<Self> {
        let mut words = command_line.split_whitespace().map(str::to_string);
        let program = words.next()?;
        Some(Self {
            program,
            args: words.collect(),
        })
    }
}

impl Evaluator for CommandEvaluator {
    fn evaluate(&mut self, expression: &str) -> Result<String, EvalError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(expression)
            .output()?;
        if !output.status.success() {
            return Err(EvalError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            });
        }
        let text = String::from_utf8(output.stdout).map_err(|_| EvalError::BadOutput)?;
        Ok(text.trim_end_matches(['\n', '\r']).to_string())
    }
}

/// Demo evaluator that returns every expression verbatim.
#[derive(Debug, Default, Clone, Copy)]
pub struct EchoEvaluator;

impl Evaluator for EchoEvaluator {
    fn evaluate(&mut self, expression: &str) -> Result<String, EvalError> {
        Ok(expression.to_string())
    }
}
