//! Assignment handler implementations

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::{AppError, AppResult},
    grader::{self, AssignmentFilter, Countdown, RunOutput, Submission, TestReport},
    middleware::auth::AuthenticatedUser,
    models::Assignment,
    state::AppState,
    utils::validation::validate_source_code,
};

use super::{
    request::{CodeRequest, ListAssignmentsQuery, TimerQuery},
    response::{AssignmentListResponse, AssignmentSummary, SubmitResponse},
};

/// List assignments matching the query
pub async fn list_assignments(
    State(state): State<AppState>,
    Query(query): Query<ListAssignmentsQuery>,
) -> AppResult<Json<AssignmentListResponse>> {
    let filter = AssignmentFilter {
        search: query.search.filter(|s| !s.trim().is_empty()),
        difficulty: parse_filter(query.difficulty.as_deref(), "difficulty")?,
        language: parse_filter(query.language.as_deref(), "language")?,
    };

    let assignments: Vec<AssignmentSummary> = state
        .catalog()
        .list(&filter)
        .iter()
        .map(|a| AssignmentSummary::from(a.as_ref()))
        .collect();

    Ok(Json(AssignmentListResponse {
        total: assignments.len(),
        assignments,
    }))
}

/// Get an assignment with starter code for every language
pub async fn get_assignment(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> AppResult<Json<Assignment>> {
    let assignment = find_assignment(&state, id)?;

    let mut detail = assignment.as_ref().clone();
    detail.starter_code = grader::Language::ALL
        .iter()
        .map(|language| (*language, assignment.starter_code_for(*language)))
        .collect();

    Ok(Json(detail))
}

/// Run code as a program and return its output
pub async fn run_code(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(payload): Json<CodeRequest>,
) -> AppResult<Json<RunOutput>> {
    find_assignment(&state, id)?;
    check_source_size(&state, &payload.source_code)?;

    let grader = state.grader();
    let language = payload.language;
    let output =
        tokio::task::spawn_blocking(move || grader.run_code(&payload.source_code, language)).await??;

    tracing::info!(
        assignment_id = id,
        language = %language,
        status = ?output.status,
        "Code run"
    );

    Ok(Json(output))
}

/// Run the assignment's test cases against the code
pub async fn run_tests(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(payload): Json<CodeRequest>,
) -> AppResult<Json<TestReport>> {
    let assignment = find_assignment(&state, id)?;
    check_source_size(&state, &payload.source_code)?;

    let grader = state.grader();
    let language = payload.language;
    let report = tokio::task::spawn_blocking(move || {
        grader.run_tests(&assignment, &payload.source_code, language)
    })
    .await??;

    tracing::info!(
        assignment_id = id,
        language = %language,
        status = ?report.status,
        passed = report.passed,
        total = report.total,
        "Tests run"
    );

    Ok(Json(report))
}

/// Remaining time after `elapsed_seconds`
pub async fn timer(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Query(query): Query<TimerQuery>,
) -> AppResult<Json<grader::timer::TimerSnapshot>> {
    let assignment = find_assignment(&state, id)?;
    let countdown = Countdown::new(assignment.time_limit_minutes);

    Ok(Json(countdown.remaining_after(query.elapsed_seconds).snapshot()))
}

/// Accept a final submission
pub async fn submit(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<CodeRequest>,
) -> AppResult<(StatusCode, Json<SubmitResponse>)> {
    find_assignment(&state, id)?;
    check_source_size(&state, &payload.source_code)?;

    let submission = Submission::new(id, auth_user.id, payload.language, payload.source_code);
    let submission_id = submission.id;

    if let Err(e) = state.submissions().deliver(submission).await {
        tracing::error!(submission_id = %submission_id, error = ?e, "Submission delivery failed");
    }

    Ok((
        StatusCode::ACCEPTED,
        Json(SubmitResponse {
            submission_id,
            message: "Submission received".to_string(),
        }),
    ))
}

fn find_assignment(state: &AppState, id: u32) -> AppResult<Arc<Assignment>> {
    state
        .catalog()
        .get(id)
        .ok_or_else(|| AppError::NotFound("Assignment not found".to_string()))
}

fn check_source_size(state: &AppState, source: &str) -> AppResult<()> {
    validate_source_code(source, state.config().grader.max_source_bytes)
        .map_err(|message| AppError::Validation(message.to_string()))
}

/// Parse an optional filter value, treating `all` as no filter
fn parse_filter<T: std::str::FromStr<Err = String>>(
    raw: Option<&str>,
    field: &str,
) -> AppResult<Option<T>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) if value.eq_ignore_ascii_case("all") => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|e| AppError::InvalidInput(format!("{}: {}", field, e))),
    }
}
