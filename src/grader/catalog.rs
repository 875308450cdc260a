//! Assignment catalog
//!
//! Read-only set of assignments. The Fibonacci assignment is always present;
//! more can be loaded from a JSON file at startup.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::models::{Assignment, AssignmentExample, Difficulty, TestCase};

use super::{languages::Language, value::Scalar};

/// Errors raised while loading assignments
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read assignments from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid assignments file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate assignment id {0}")]
    DuplicateId(u32),

    #[error("Assignment {0} has no entry point")]
    EmptyEntryPoint(u32),

    #[error("Assignment {0} has no test cases")]
    NoTestCases(u32),
}

/// Filters for listing assignments
#[derive(Debug, Clone, Default)]
pub struct AssignmentFilter {
    /// Case-insensitive match on title, description and topics
    pub search: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub language: Option<Language>,
}

/// Immutable collection of assignments keyed by id
#[derive(Debug, Clone)]
pub struct AssignmentCatalog {
    assignments: BTreeMap<u32, Arc<Assignment>>,
}

impl AssignmentCatalog {
    /// Catalog holding only the built-in assignments
    pub fn builtin() -> Self {
        let assignments = [fibonacci()]
            .into_iter()
            .map(|a| (a.id, Arc::new(a)))
            .collect();
        Self { assignments }
    }

    /// Built-in assignments plus the JSON array stored at `path`
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut catalog = Self::builtin();
        catalog.extend(serde_json::from_str(&raw)?)?;
        Ok(catalog)
    }

    /// Add assignments, rejecting duplicates and incomplete definitions
    pub fn extend(&mut self, assignments: Vec<Assignment>) -> Result<(), CatalogError> {
        for assignment in assignments {
            if assignment.entry_point.trim().is_empty() {
                return Err(CatalogError::EmptyEntryPoint(assignment.id));
            }
            if assignment.test_cases.is_empty() {
                return Err(CatalogError::NoTestCases(assignment.id));
            }
            if self.assignments.contains_key(&assignment.id) {
                return Err(CatalogError::DuplicateId(assignment.id));
            }
            self.assignments.insert(assignment.id, Arc::new(assignment));
        }
        Ok(())
    }

    pub fn get(&self, id: u32) -> Option<Arc<Assignment>> {
        self.assignments.get(&id).cloned()
    }

    /// Assignments matching `filter`, ordered by id
    pub fn list(&self, filter: &AssignmentFilter) -> Vec<Arc<Assignment>> {
        self.assignments
            .values()
            .filter(|a| {
                filter
                    .search
                    .as_deref()
                    .is_none_or(|query| a.matches_search(query))
            })
            .filter(|a| filter.difficulty.is_none_or(|d| a.difficulty == d))
            .filter(|a| filter.language.is_none_or(|l| a.language == l))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

fn fibonacci() -> Assignment {
    let case = |input: i64, expected: Scalar, description: &str| TestCase {
        input: Scalar::Int(input),
        expected,
        description: description.to_string(),
    };
    let example = |input: &str, output: &str| AssignmentExample {
        input: input.to_string(),
        output: output.to_string(),
    };

    let starter_code = Language::ALL
        .iter()
        .map(|language| (*language, language.config().render_starter("fibonacci")))
        .chain([(Language::Rhai, FIBONACCI_RHAI_STARTER.to_string())])
        .collect();

    Assignment {
        id: 1,
        title: "Create a Function to Calculate Fibonacci Numbers".to_string(),
        description: "Write a function that calculates the nth Fibonacci number. \
                      The function should be efficient and handle edge cases."
            .to_string(),
        difficulty: Difficulty::Medium,
        language: Language::Rhai,
        time_limit_minutes: 30,
        points: 100,
        topics: vec!["Algorithms".to_string(), "Dynamic Programming".to_string()],
        instructions: vec![
            "Create a function named 'fibonacci' that takes one parameter 'n'".to_string(),
            "Return the nth Fibonacci number (0-indexed)".to_string(),
            "Handle edge cases: n < 0 should return null, n = 0 should return 0, n = 1 should return 1"
                .to_string(),
            "Optimize for performance - avoid recursive solutions that recalculate the same values"
                .to_string(),
        ],
        examples: vec![
            example("fibonacci(0)", "0"),
            example("fibonacci(1)", "1"),
            example("fibonacci(5)", "5"),
            example("fibonacci(10)", "55"),
        ],
        entry_point: "fibonacci".to_string(),
        starter_code,
        test_cases: vec![
            case(0, Scalar::Int(0), "Base case: fibonacci(0)"),
            case(1, Scalar::Int(1), "Base case: fibonacci(1)"),
            case(5, Scalar::Int(5), "Small number: fibonacci(5)"),
            case(10, Scalar::Int(55), "Medium number: fibonacci(10)"),
            case(-1, Scalar::Null, "Negative input: fibonacci(-1)"),
        ],
        reference_solution: Some(FIBONACCI_RHAI_SOLUTION.to_string()),
    }
}

const FIBONACCI_RHAI_STARTER: &str = r#"// Write your fibonacci function here
fn fibonacci(n) {
    // Your code here
}

// Test your function
print(fibonacci(0)); // Should output: 0
print(fibonacci(1)); // Should output: 1
print(fibonacci(5)); // Should output: 5
print(fibonacci(10)); // Should output: 55"#;

const FIBONACCI_RHAI_SOLUTION: &str = r#"fn fibonacci(n) {
    if n < 0 { return (); }
    if n == 0 { return 0; }
    if n == 1 { return 1; }

    let a = 0;
    let b = 1;
    let i = 2;
    while i <= n {
        let temp = a + b;
        a = b;
        b = temp;
        i += 1;
    }
    b
}"#;
