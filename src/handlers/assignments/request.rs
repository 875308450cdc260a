//! Assignment request DTOs

use serde::Deserialize;

use crate::grader::Language;

/// Source code sent by the editor
#[derive(Debug, Deserialize)]
pub struct CodeRequest {
    pub source_code: String,
    #[serde(default)]
    pub language: Language,
}

/// Query parameters for listing assignments.
///
/// `difficulty` and `language` accept `all` to disable the filter.
#[derive(Debug, Default, Deserialize)]
pub struct ListAssignmentsQuery {
    pub search: Option<String>,
    pub difficulty: Option<String>,
    pub language: Option<String>,
}

/// Query parameters for the timer endpoint
#[derive(Debug, Default, Deserialize)]
pub struct TimerQuery {
    #[serde(default)]
    pub elapsed_seconds: u64,
}
