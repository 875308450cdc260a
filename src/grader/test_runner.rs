//! Test Runner - checks an entry-point function against fixed test cases

use std::time::Instant;

use rhai::{CallFnOptions, Dynamic, EvalAltResult, FnPtr, Scope, AST};
use serde::Serialize;

use crate::models::{Assignment, TestCase};

use super::{
    languages::Language,
    sandbox::{self, Failure, Sandbox},
    value::Scalar,
    ExecutionBudget,
};

/// Overall outcome of a test run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TestRunStatus {
    /// Every test case was evaluated
    Completed,
    /// The language is not executable
    Skipped,
    /// No test case could be evaluated
    Aborted,
}

/// Why a single case failed to produce a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseErrorKind {
    Runtime,
    TimedOut,
    UnsupportedValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseError {
    pub kind: CaseErrorKind,
    pub message: String,
}

/// Reasons a test run stops before the first case
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TestAbort {
    #[error("Your code could not be compiled: {0}")]
    Compile(String),

    #[error("Your code raised an error before the tests could run: {0}")]
    Setup(String),

    #[error("Your code timed out before the tests could run")]
    SetupTimedOut,

    #[error("Your code exceeded the operation limit before the tests could run")]
    SetupOperationLimit,

    #[error("{0} function not found or not properly defined")]
    MissingEntryPoint(String),

    #[error("{0} is defined but is not a function taking one argument")]
    NotCallable(String),
}

/// Outcome of one test case
#[derive(Debug, Clone, Serialize)]
pub struct TestCaseResult {
    #[serde(flatten)]
    pub case: TestCase,
    pub passed: bool,
    /// Value returned by the entry point, absent when it did not return
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_output: Option<Scalar>,
    /// What the editor shows in the "actual" column
    pub actual_display: String,
    pub execution_time_ms: u64,
    pub error: Option<CaseError>,
}

/// Result of a single "test" action
#[derive(Debug, Clone, Serialize)]
pub struct TestReport {
    pub status: TestRunStatus,
    pub message: Option<String>,
    pub results: Vec<TestCaseResult>,
    pub passed: usize,
    pub total: usize,
}

impl TestReport {
    fn completed(results: Vec<TestCaseResult>) -> Self {
        Self {
            status: TestRunStatus::Completed,
            message: None,
            passed: results.iter().filter(|r| r.passed).count(),
            total: results.len(),
            results,
        }
    }

    fn skipped() -> Self {
        Self {
            status: TestRunStatus::Skipped,
            message: Some(format!(
                "Test execution is currently only supported for {}",
                Language::Rhai.config().name
            )),
            results: Vec::new(),
            passed: 0,
            total: 0,
        }
    }

    fn aborted(abort: TestAbort) -> Self {
        Self {
            status: TestRunStatus::Aborted,
            message: Some(abort.to_string()),
            results: Vec::new(),
            passed: 0,
            total: 0,
        }
    }

    /// Whether every case passed
    pub fn all_passed(&self) -> bool {
        self.status == TestRunStatus::Completed && self.passed == self.total
    }
}

/// How the entry point is reached once the program has run
enum EntryPoint {
    /// A script-defined `fn name(x)`
    Script,
    /// A variable holding a function pointer or closure
    Pointer(FnPtr),
}

/// Run `source` once and evaluate every test case of `assignment`.
///
/// Never fails: anything the student code does wrong is reported in the
/// returned [`TestReport`].
pub fn run_tests(
    budget: &ExecutionBudget,
    assignment: &Assignment,
    source: &str,
    language: Language,
) -> TestReport {
    if !language.is_executable() {
        tracing::debug!(assignment_id = assignment.id, language = %language, "Test run skipped");
        return TestReport::skipped();
    }

    let sandbox = Sandbox::new(budget);
    let mut scope = Scope::new();

    let prepared = prepare(&sandbox, budget, &mut scope, source)
        .and_then(|ast| resolve_entry_point(&ast, &scope, &assignment.entry_point).map(|e| (ast, e)));
    let (ast, entry) = match prepared {
        Ok(prepared) => prepared,
        Err(abort) => {
            tracing::debug!(assignment_id = assignment.id, reason = %abort, "Test run aborted");
            return TestReport::aborted(abort);
        }
    };

    let results = assignment
        .test_cases
        .iter()
        .map(|case| {
            let result = run_case(&sandbox, budget, &ast, &mut scope, &assignment.entry_point, &entry, case);
            // Output printed by the entry point is not part of the report
            sandbox.take_output();
            result
        })
        .collect();

    let report = TestReport::completed(results);
    tracing::debug!(
        assignment_id = assignment.id,
        passed = report.passed,
        total = report.total,
        "Test run completed"
    );
    report
}

/// Compile and run the top level of the program once
fn prepare(
    sandbox: &Sandbox,
    budget: &ExecutionBudget,
    scope: &mut Scope<'static>,
    source: &str,
) -> Result<AST, TestAbort> {
    let ast = sandbox
        .engine()
        .compile(source)
        .map_err(|err| TestAbort::Compile(sandbox::compile_failure(&err).message()))?;

    sandbox.arm(budget.run_timeout);
    let outcome = sandbox.engine().run_ast_with_scope(scope, &ast);
    sandbox.take_output();

    match outcome.map_err(|err| sandbox::classify(&err)) {
        Ok(()) => Ok(ast),
        Err(Failure::TimedOut) => Err(TestAbort::SetupTimedOut),
        Err(Failure::OperationLimit) => Err(TestAbort::SetupOperationLimit),
        Err(failure) => Err(TestAbort::Setup(failure.message())),
    }
}

fn resolve_entry_point(ast: &AST, scope: &Scope, name: &str) -> Result<EntryPoint, TestAbort> {
    let arities: Vec<usize> = ast
        .iter_functions()
        .filter(|f| f.name == name)
        .map(|f| f.params.len())
        .collect();

    if arities.contains(&1) {
        return Ok(EntryPoint::Script);
    }

    if let Some(value) = scope.get_value::<Dynamic>(name) {
        return match value.try_cast::<FnPtr>() {
            Some(pointer) => Ok(EntryPoint::Pointer(pointer)),
            None => Err(TestAbort::NotCallable(name.to_string())),
        };
    }

    if arities.is_empty() {
        Err(TestAbort::MissingEntryPoint(name.to_string()))
    } else {
        Err(TestAbort::NotCallable(name.to_string()))
    }
}

fn run_case(
    sandbox: &Sandbox,
    budget: &ExecutionBudget,
    ast: &AST,
    scope: &mut Scope<'static>,
    name: &str,
    entry: &EntryPoint,
    case: &TestCase,
) -> TestCaseResult {
    sandbox.arm(budget.case_timeout);
    let started = Instant::now();

    let returned = match entry {
        EntryPoint::Script => sandbox.engine().call_fn_with_options::<Dynamic>(
            CallFnOptions::new().eval_ast(false).rewind_scope(true),
            scope,
            ast,
            name,
            (case.input.to_dynamic(),),
        ),
        EntryPoint::Pointer(pointer) => {
            pointer.call::<Dynamic>(sandbox.engine(), ast, (case.input.to_dynamic(),))
        }
    };

    let execution_time_ms = elapsed_ms(started);
    let outcome = returned
        .map_err(|err| case_error(&err))
        .and_then(|value| {
            Scalar::from_dynamic(&value).map_err(|unsupported| CaseError {
                kind: CaseErrorKind::UnsupportedValue,
                message: unsupported.to_string(),
            })
        });

    match outcome {
        Ok(actual) => TestCaseResult {
            passed: actual.strict_eq(&case.expected),
            actual_display: actual.to_string(),
            actual_output: Some(actual),
            case: case.clone(),
            execution_time_ms,
            error: None,
        },
        Err(error) => TestCaseResult {
            passed: false,
            actual_display: format!("Error: {}", error.message),
            actual_output: None,
            case: case.clone(),
            execution_time_ms,
            error: Some(error),
        },
    }
}

fn case_error(err: &EvalAltResult) -> CaseError {
    match sandbox::classify(err) {
        Failure::TimedOut => CaseError {
            kind: CaseErrorKind::TimedOut,
            message: "Execution timed out".to_string(),
        },
        Failure::OperationLimit => CaseError {
            kind: CaseErrorKind::TimedOut,
            message: "Operation limit exceeded".to_string(),
        },
        Failure::Error { message, .. } => CaseError {
            kind: CaseErrorKind::Runtime,
            message,
        },
    }
}

/// Elapsed time rounded to whole milliseconds
fn elapsed_ms(started: Instant) -> u64 {
    let micros = started.elapsed().as_micros();
    u64::try_from((micros + 500) / 1000).unwrap_or(u64::MAX)
}
