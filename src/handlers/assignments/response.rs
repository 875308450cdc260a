//! Assignment response DTOs

use serde::Serialize;
use uuid::Uuid;

use crate::{
    grader::Language,
    models::{Assignment, Difficulty},
};

/// Assignment as shown in the list view
#[derive(Debug, Serialize)]
pub struct AssignmentSummary {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub language: Language,
    pub time_limit_minutes: u32,
    pub points: u32,
    pub topics: Vec<String>,
    pub test_case_count: usize,
}

impl From<&Assignment> for AssignmentSummary {
    fn from(assignment: &Assignment) -> Self {
        Self {
            id: assignment.id,
            title: assignment.title.clone(),
            description: assignment.description.clone(),
            difficulty: assignment.difficulty,
            language: assignment.language,
            time_limit_minutes: assignment.time_limit_minutes,
            points: assignment.points,
            topics: assignment.topics.clone(),
            test_case_count: assignment.test_cases.len(),
        }
    }
}

/// Assignment list response
#[derive(Debug, Serialize)]
pub struct AssignmentListResponse {
    pub assignments: Vec<AssignmentSummary>,
    pub total: usize,
}

/// Accepted submission
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub submission_id: Uuid,
    pub message: String,
}
