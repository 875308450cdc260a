//! Code Runner - runs a whole source buffer and captures its output

use serde::Serialize;

use crate::constants::NO_OUTPUT_MESSAGE;

use super::{
    languages::Language,
    sandbox::{self, CapturedOutput, Failure, Sandbox},
    ExecutionBudget,
};

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Completed,
    Failed,
    TimedOut,
    /// Language is display-only, nothing was executed
    Simulated,
}

/// Result of a single "run" action
#[derive(Debug, Clone, Serialize)]
pub struct RunOutput {
    pub language: Language,
    pub status: RunStatus,
    pub output: String,
    /// Output hit the capture limit and was cut
    pub truncated: bool,
}

/// Run `source` under `budget`.
///
/// Never fails: compile errors, runtime errors and timeouts all end up as
/// text in [`RunOutput::output`].
pub fn run_code(budget: &ExecutionBudget, source: &str, language: Language) -> RunOutput {
    if !language.is_executable() {
        return simulate(source, language);
    }

    let sandbox = Sandbox::new(budget);
    sandbox.arm(budget.run_timeout);

    let outcome = match sandbox.engine().compile(source) {
        Ok(ast) => sandbox
            .engine()
            .run_ast(&ast)
            .map_err(|err| sandbox::classify(&err)),
        Err(err) => Err(sandbox::compile_failure(&err)),
    };
    let captured = sandbox.take_output();

    let (status, output) = match outcome {
        Ok(()) if captured.text.is_empty() => (RunStatus::Completed, NO_OUTPUT_MESSAGE.to_string()),
        Ok(()) => (RunStatus::Completed, captured.text),
        Err(Failure::TimedOut) => (
            RunStatus::TimedOut,
            append_error(
                &captured,
                &format!("Error: Execution timed out after {} ms", budget.run_timeout.as_millis()),
            ),
        ),
        Err(Failure::OperationLimit) => (
            RunStatus::TimedOut,
            append_error(
                &captured,
                &format!(
                    "Error: Execution stopped after exceeding the limit of {} operations",
                    budget.max_operations
                ),
            ),
        ),
        Err(Failure::Error { message, trace }) => (
            RunStatus::Failed,
            append_error(
                &captured,
                &format!("Error: {}\n\nStack trace:\n{}", message, trace),
            ),
        ),
    };

    tracing::debug!(
        language = %language,
        status = ?status,
        output_bytes = output.len(),
        truncated = captured.truncated,
        "Code run finished"
    );

    RunOutput {
        language,
        status,
        output,
        truncated: captured.truncated,
    }
}

/// Echo the source back for languages that are not executed
fn simulate(source: &str, language: Language) -> RunOutput {
    RunOutput {
        language,
        status: RunStatus::Simulated,
        output: format!(
            "Code execution simulation for {}:\n\n{}\n\n[In a real implementation, this would be executed on a server]",
            language.config().name,
            source
        ),
        truncated: false,
    }
}

fn append_error(captured: &CapturedOutput, error: &str) -> String {
    if captured.text.is_empty() {
        error.to_string()
    } else if captured.text.ends_with('\n') {
        format!("{}{}", captured.text, error)
    } else {
        format!("{}\n{}", captured.text, error)
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;

    fn budget() -> ExecutionBudget {
        ExecutionBudget {
            run_timeout: Duration::from_millis(300),
            ..ExecutionBudget::default()
        }
    }

    #[test]
    fn test_captures_output_in_call_order() {
        let result = run_code(&budget(), r#"print(1); print("a");"#, Language::Rhai);

        assert_eq!(result.status, RunStatus::Completed);
        assert_eq!(result.output, "1\na\n");
        assert!(!result.truncated);
    }

    #[test]
    fn test_placeholder_when_nothing_printed() {
        let result = run_code(&budget(), "let x = 40 + 2;", Language::Rhai);

        assert_eq!(result.status, RunStatus::Completed);
        assert_eq!(result.output, NO_OUTPUT_MESSAGE);
    }

    #[test]
    fn test_runtime_error_is_reported_as_output() {
        let source = r#"
print("before");
fn explode() { throw "kaboom"; }
explode();
"#;
        let result = run_code(&budget(), source, Language::Rhai);

        assert_eq!(result.status, RunStatus::Failed);
        assert!(result.output.starts_with("before\n"));
        assert!(result.output.contains("Error: kaboom"));
        assert!(result.output.contains("Stack trace:"));
    }

    #[test]
    fn test_syntax_error_is_reported_as_output() {
        let result = run_code(&budget(), "fn broken( {", Language::Rhai);

        assert_eq!(result.status, RunStatus::Failed);
        assert!(result.output.starts_with("Error: "));
    }

    #[test]
    fn test_capture_does_not_leak_between_runs() {
        let failed = run_code(&budget(), r#"print("first"); throw "stop";"#, Language::Rhai);
        assert_eq!(failed.status, RunStatus::Failed);

        let next = run_code(&budget(), r#"print("second");"#, Language::Rhai);
        assert_eq!(next.output, "second\n");
    }

    #[test]
    fn test_infinite_loop_times_out() {
        let started = Instant::now();
        let result = run_code(
            &ExecutionBudget {
                max_operations: 0,
                ..budget()
            },
            "loop { }",
            Language::Rhai,
        );

        assert_eq!(result.status, RunStatus::TimedOut);
        assert!(result.output.contains("timed out after 300 ms"));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_operation_limit_is_named() {
        let result = run_code(
            &ExecutionBudget {
                max_operations: 1_000,
                ..budget()
            },
            "let x = 0; loop { x += 1; }",
            Language::Rhai,
        );

        assert_eq!(result.status, RunStatus::TimedOut);
        assert!(result.output.contains("limit of 1000 operations"));
        assert!(!result.output.contains("timed out after"));
    }

    #[test]
    fn test_long_output_is_marked_truncated() {
        let result = run_code(
            &ExecutionBudget {
                max_output_bytes: 16,
                ..budget()
            },
            r#"for i in 0..50 { print("line " + i); }"#,
            Language::Rhai,
        );

        assert_eq!(result.status, RunStatus::Completed);
        assert!(result.truncated);
        assert_eq!(result.output.len(), 16);
        assert!(result.output.starts_with("line 0\nline 1\n"));
    }

    #[test]
    fn test_display_only_language_is_simulated() {
        let source = "print(fibonacci(5))";
        let result = run_code(&budget(), source, Language::Python);

        assert_eq!(result.status, RunStatus::Simulated);
        assert!(result.output.contains("Code execution simulation for Python:"));
        assert!(result.output.contains(source));
        assert!(result.output.contains("simulation"));
    }
}
