//! Sandboxed script engine
//!
//! Every run gets its own [`Sandbox`]: a Rhai engine with no module
//! resolution, no `eval`, operation and size limits, a wall-clock deadline
//! checked from the progress callback, and an explicit output sink that
//! receives everything the script prints.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

use rhai::module_resolvers::DummyModuleResolver;
use rhai::{Dynamic, Engine, EvalAltResult, ParseError, Position};

use super::ExecutionBudget;

/// How many operations pass between wall-clock checks
const DEADLINE_CHECK_INTERVAL: u64 = 256;

/// Token carried by the termination error when the deadline passes
const DEADLINE_TOKEN: &str = "deadline exceeded";

/// Captured script output
#[derive(Debug, Default)]
struct OutputBuffer {
    text: String,
    limit: usize,
    truncated: bool,
}

impl OutputBuffer {
    fn push_line(&mut self, line: &str) {
        if self.truncated {
            return;
        }

        let needed = line.len() + 1;
        let remaining = self.limit.saturating_sub(self.text.len());
        if needed <= remaining {
            self.text.push_str(line);
            self.text.push('\n');
            return;
        }

        // Cut on a char boundary so the buffer stays valid UTF-8
        let mut cut = remaining;
        while cut > 0 && !line.is_char_boundary(cut) {
            cut -= 1;
        }
        self.text.push_str(&line[..cut]);
        self.truncated = true;
    }
}

/// Output drained from a sandbox after a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    pub text: String,
    pub truncated: bool,
}

/// Why a script evaluation failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// The wall-clock deadline passed
    TimedOut,
    /// The interpreter operation budget ran out
    OperationLimit,
    /// Parse error or error raised while running
    Error { message: String, trace: String },
}

impl Failure {
    /// Message without the trace
    pub fn message(&self) -> String {
        match self {
            Failure::TimedOut => "Execution timed out".to_string(),
            Failure::OperationLimit => "Operation limit exceeded".to_string(),
            Failure::Error { message, .. } => message.clone(),
        }
    }
}

/// One isolated script engine plus its output sink and deadline
pub struct Sandbox {
    engine: Engine,
    output: Rc<RefCell<OutputBuffer>>,
    deadline: Rc<Cell<Instant>>,
}

impl Sandbox {
    /// Build a sandbox limited by `budget`
    pub fn new(budget: &ExecutionBudget) -> Self {
        let output = Rc::new(RefCell::new(OutputBuffer {
            limit: budget.max_output_bytes,
            ..OutputBuffer::default()
        }));
        let deadline = Rc::new(Cell::new(Instant::now() + budget.run_timeout));

        let mut engine = Engine::new();
        engine
            .set_module_resolver(DummyModuleResolver::new())
            .set_max_operations(budget.max_operations)
            .set_max_call_levels(budget.max_call_levels)
            .set_max_string_size(budget.max_string_size)
            .set_max_array_size(budget.max_array_size)
            .set_max_map_size(budget.max_array_size);
        engine.disable_symbol("eval");

        let print_sink = Rc::clone(&output);
        engine.on_print(move |text| print_sink.borrow_mut().push_line(text));

        let debug_sink = Rc::clone(&output);
        engine.on_debug(move |text, _source, _pos| debug_sink.borrow_mut().push_line(text));

        let progress_deadline = Rc::clone(&deadline);
        engine.on_progress(move |ops| {
            if ops % DEADLINE_CHECK_INTERVAL == 0 && Instant::now() >= progress_deadline.get() {
                Some(Dynamic::from(DEADLINE_TOKEN))
            } else {
                None
            }
        });

        Self {
            engine,
            output,
            deadline,
        }
    }

    /// The configured engine
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Start a new wall-clock window of `timeout` from now
    pub fn arm(&self, timeout: Duration) {
        self.deadline.set(Instant::now() + timeout);
    }

    /// Drain everything captured so far
    pub fn take_output(&self) -> CapturedOutput {
        let mut buffer = self.output.borrow_mut();
        let captured = CapturedOutput {
            text: std::mem::take(&mut buffer.text),
            truncated: buffer.truncated,
        };
        buffer.truncated = false;
        captured
    }
}

/// Classify an evaluation error into a timeout or a reportable error
pub fn classify(err: &EvalAltResult) -> Failure {
    let root = root_cause(err);

    match root {
        EvalAltResult::ErrorTerminated(..) => Failure::TimedOut,
        EvalAltResult::ErrorTooManyOperations(..) => Failure::OperationLimit,
        _ => Failure::Error {
            message: error_message(root),
            trace: stack_trace(err),
        },
    }
}

/// Report a parse error the same way as a runtime error
pub fn compile_failure(err: &ParseError) -> Failure {
    Failure::Error {
        message: err.err_type().to_string(),
        trace: format!("    at {}", describe_position(err.position())),
    }
}

/// Human-readable message of the innermost error.
///
/// A thrown value is reported as-is, so `throw "bad input"` yields
/// `bad input`.
pub fn error_message(err: &EvalAltResult) -> String {
    match root_cause(err) {
        EvalAltResult::ErrorRuntime(value, _) => {
            if value.is_string() {
                value.clone().into_string().unwrap_or_default()
            } else {
                value.to_string()
            }
        }
        other => other.to_string(),
    }
}

/// Innermost error, skipping function-call wrappers
fn root_cause(err: &EvalAltResult) -> &EvalAltResult {
    match err {
        EvalAltResult::ErrorInFunctionCall(_, _, inner, _) => root_cause(inner),
        _ => err,
    }
}

/// One line per call frame, outermost first, then the failing position
fn stack_trace(err: &EvalAltResult) -> String {
    let mut lines = Vec::new();
    let mut current = err;

    while let EvalAltResult::ErrorInFunctionCall(name, _, inner, pos) = current {
        lines.push(format!("    in call to function '{}' ({})", name, describe_position(*pos)));
        current = inner.as_ref();
    }
    lines.push(format!("    at {}", describe_position(current.position())));

    lines.join("\n")
}

fn describe_position(pos: Position) -> String {
    match (pos.line(), pos.position()) {
        (Some(line), Some(column)) => format!("line {}, column {}", line, column),
        (Some(line), None) => format!("line {}", line),
        _ => "unknown position".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn budget() -> ExecutionBudget {
        ExecutionBudget {
            run_timeout: Duration::from_millis(200),
            case_timeout: Duration::from_millis(200),
            ..ExecutionBudget::default()
        }
    }

    #[test]
    fn test_print_goes_to_sink() {
        let sandbox = Sandbox::new(&budget());
        sandbox.engine().run(r#"print(1); print("a");"#).unwrap();

        let output = sandbox.take_output();
        assert_eq!(output.text, "1\na\n");
        assert!(!output.truncated);
        assert_eq!(sandbox.take_output().text, "");
    }

    #[test]
    fn test_output_is_truncated_at_limit() {
        let sandbox = Sandbox::new(&ExecutionBudget {
            max_output_bytes: 8,
            ..budget()
        });
        sandbox
            .engine()
            .run(r#"for i in 0..100 { print("abcdef"); }"#)
            .unwrap();

        let output = sandbox.take_output();
        assert!(output.truncated);
        assert_eq!(output.text.len(), 8);
        assert!(output.text.starts_with("abcdef\n"));
    }

    #[test]
    fn test_deadline_stops_infinite_loop() {
        let sandbox = Sandbox::new(&ExecutionBudget {
            max_operations: 0,
            ..budget()
        });
        sandbox.arm(Duration::from_millis(50));

        let started = Instant::now();
        let err = sandbox.engine().run("loop { }").unwrap_err();

        assert_eq!(classify(&err), Failure::TimedOut);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_operation_budget_is_reported_separately() {
        let sandbox = Sandbox::new(&ExecutionBudget {
            max_operations: 1_000,
            ..budget()
        });
        let err = sandbox.engine().run("let x = 0; loop { x += 1; }").unwrap_err();
        assert_eq!(classify(&err), Failure::OperationLimit);
    }

    #[test]
    fn test_thrown_value_is_the_message() {
        let sandbox = Sandbox::new(&budget());
        let err = sandbox
            .engine()
            .run(r#"fn boom() { throw "bad input"; } boom();"#)
            .unwrap_err();

        match classify(&err) {
            Failure::Error { message, trace } => {
                assert_eq!(message, "bad input");
                assert!(trace.contains("boom"));
                assert!(trace.contains("line"));
            }
            other => panic!("unexpected failure: {:?}", other),
        }
    }

    #[test]
    fn test_imports_and_eval_are_unavailable() {
        let sandbox = Sandbox::new(&budget());
        assert!(sandbox.engine().run(r#"import "secrets" as s;"#).is_err());
        assert!(sandbox.engine().run(r#"eval("1 + 1")"#).is_err());
    }
}
