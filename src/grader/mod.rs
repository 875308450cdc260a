//! Assignment grader
//!
//! Runs student code inside an embedded, sandboxed script engine and checks
//! it against an assignment's fixed test cases.
//!
//! - **Code Runner** (`code_runner.rs`): runs the whole buffer as a program
//!   and returns everything it printed.
//! - **Test Runner** (`test_runner.rs`): runs the buffer once, pulls out the
//!   assignment's entry-point function and calls it for every test case.
//!
//! Only one language executes. The others are display-only templates and
//! get a labeled simulation message instead. Every run builds its own
//! [`sandbox::Sandbox`] on a dedicated thread with a large stack, so runs
//! never share state and deep recursion hits the call-depth limit instead of
//! the caller's stack.

pub mod catalog;
pub mod code_runner;
pub mod languages;
pub mod sandbox;
pub mod submission;
pub mod test_runner;
pub mod timer;
pub mod value;

use std::io;
use std::thread;
use std::time::Duration;

use crate::constants::{
    DEFAULT_CASE_TIMEOUT_MS, DEFAULT_MAX_CALL_LEVELS, DEFAULT_MAX_OPERATIONS,
    DEFAULT_MAX_OUTPUT_BYTES, DEFAULT_RUN_TIMEOUT_MS, GRADER_STACK_BYTES, MAX_SCRIPT_ARRAY_SIZE,
    MAX_SCRIPT_STRING_SIZE,
};
use crate::models::Assignment;

pub use catalog::{AssignmentCatalog, AssignmentFilter, CatalogError};
pub use code_runner::{RunOutput, RunStatus};
pub use languages::{Language, LanguageConfig};
pub use submission::{LoggingSubmissionSink, Submission, SubmissionSink};
pub use test_runner::{CaseError, CaseErrorKind, TestAbort, TestCaseResult, TestReport, TestRunStatus};
pub use timer::Countdown;
pub use value::Scalar;

/// Resource limits applied to every sandboxed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionBudget {
    /// Wall clock for a full program run
    pub run_timeout: Duration,
    /// Wall clock for one test-case call
    pub case_timeout: Duration,
    /// Interpreter operations per evaluation (0 = unlimited)
    pub max_operations: u64,
    pub max_call_levels: usize,
    pub max_string_size: usize,
    pub max_array_size: usize,
    /// Captured output cap in bytes
    pub max_output_bytes: usize,
}

impl Default for ExecutionBudget {
    fn default() -> Self {
        Self {
            run_timeout: Duration::from_millis(DEFAULT_RUN_TIMEOUT_MS),
            case_timeout: Duration::from_millis(DEFAULT_CASE_TIMEOUT_MS),
            max_operations: DEFAULT_MAX_OPERATIONS,
            max_call_levels: DEFAULT_MAX_CALL_LEVELS,
            max_string_size: MAX_SCRIPT_STRING_SIZE,
            max_array_size: MAX_SCRIPT_ARRAY_SIZE,
            max_output_bytes: DEFAULT_MAX_OUTPUT_BYTES,
        }
    }
}

/// Entry point for running and testing submitted code
#[derive(Debug, Clone, Default)]
pub struct Grader {
    budget: ExecutionBudget,
}

impl Grader {
    /// Create a grader with the given limits
    pub fn new(budget: ExecutionBudget) -> Self {
        Self { budget }
    }

    /// Limits applied to each run
    pub fn budget(&self) -> &ExecutionBudget {
        &self.budget
    }

    /// Run `source` as a program and capture its output.
    ///
    /// Fails only when the grading thread cannot be started.
    pub fn run_code(&self, source: &str, language: Language) -> io::Result<RunOutput> {
        on_grader_thread(|| code_runner::run_code(&self.budget, source, language))
    }

    /// Check `source` against the assignment's test cases.
    ///
    /// Fails only when the grading thread cannot be started.
    pub fn run_tests(
        &self,
        assignment: &Assignment,
        source: &str,
        language: Language,
    ) -> io::Result<TestReport> {
        on_grader_thread(|| test_runner::run_tests(&self.budget, assignment, source, language))
    }
}

/// Run `job` on a scoped thread with [`GRADER_STACK_BYTES`] of stack and
/// wait for it. A panic in `job` is resumed on the calling thread.
fn on_grader_thread<T, F>(job: F) -> io::Result<T>
where
    F: FnOnce() -> T + Send,
    T: Send,
{
    thread::scope(|scope| {
        let handle = thread::Builder::new()
            .name("grader".to_string())
            .stack_size(GRADER_STACK_BYTES)
            .spawn_scoped(scope, job)?;

        match handle.join() {
            Ok(value) => Ok(value),
            Err(payload) => std::panic::resume_unwind(payload),
        }
    })
}
