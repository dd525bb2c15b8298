//! Buffer-to-buffer task lifecycle.
//!
//! A task moves through four ordered stages: validate the size contract,
//! allocate and populate working state, run, and copy the result out. The
//! driver short-circuits on the first failing stage, so a validation
//! failure commits no resources and a failed run publishes no output.

use thiserror::Error;

/// Errors surfaced by a [`Task`] lifecycle.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskError {
    /// The input/output size contract does not hold. Reported before any
    /// buffer is allocated.
    #[error("validation failed: {0}")]
    Validation(&'static str),

    /// A worker thread died during the named phase. The remaining workers
    /// of the phase were still joined.
    #[error("worker failed during {phase}")]
    Worker { phase: &'static str },
}

/// The four-stage task lifecycle.
pub trait Task {
    fn validate(&self) -> Result<(), TaskError>;
    fn pre_process(&mut self) -> Result<(), TaskError>;
    fn run(&mut self) -> Result<(), TaskError>;
    fn post_process(&mut self) -> Result<(), TaskError>;

    /// Runs the full lifecycle in order, stopping at the first failure.
    fn execute(&mut self) -> Result<(), TaskError> {
        self.validate()?;
        self.pre_process()?;
        self.run()?;
        self.post_process()
    }
}
