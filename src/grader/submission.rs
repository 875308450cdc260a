//! Final submissions
//!
//! Submissions are handed to a [`SubmissionSink`]. The only sink shipped
//! here logs the submission and drops it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::utils::{now_utc, sha256_hex};

use super::languages::Language;

/// A student's final answer to an assignment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    pub id: Uuid,
    pub assignment_id: u32,
    pub user_id: Uuid,
    pub language: Language,
    pub source_code: String,
    pub source_sha256: String,
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    /// Create a submission stamped with a fresh id and the current time
    pub fn new(assignment_id: u32, user_id: Uuid, language: Language, source_code: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            assignment_id,
            user_id,
            language,
            source_sha256: sha256_hex(source_code.as_bytes()),
            source_code,
            submitted_at: now_utc(),
        }
    }
}

/// Destination for final submissions
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    async fn deliver(&self, submission: Submission) -> anyhow::Result<()>;
}

/// Sink that records submissions in the log and keeps nothing
#[derive(Debug, Clone, Default)]
pub struct LoggingSubmissionSink;

#[async_trait]
impl SubmissionSink for LoggingSubmissionSink {
    async fn deliver(&self, submission: Submission) -> anyhow::Result<()> {
        tracing::info!(
            submission_id = %submission.id,
            assignment_id = submission.assignment_id,
            user_id = %submission.user_id,
            language = %submission.language,
            source_bytes = submission.source_code.len(),
            source_sha256 = %submission.source_sha256,
            "Submission received"
        );
        Ok(())
    }
}
