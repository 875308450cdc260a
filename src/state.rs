//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::grader::{AssignmentCatalog, Grader, SubmissionSink};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Database connection pool
    db: PgPool,

    /// Application configuration
    config: Config,

    /// Read-only assignment definitions
    catalog: Arc<AssignmentCatalog>,

    /// Grader configured with the execution budget
    grader: Arc<Grader>,

    /// Destination for final submissions
    submissions: Arc<dyn SubmissionSink>,
}

impl AppState {
    /// Create a new application state
    pub fn new(
        db: PgPool,
        config: Config,
        catalog: AssignmentCatalog,
        submissions: Arc<dyn SubmissionSink>,
    ) -> Self {
        let grader = Grader::new(config.grader.budget());

        Self {
            inner: Arc::new(AppStateInner {
                db,
                config,
                catalog: Arc::new(catalog),
                grader: Arc::new(grader),
                submissions,
            }),
        }
    }

    /// Get a reference to the database pool
    pub fn db(&self) -> &PgPool {
        &self.inner.db
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get a reference to the assignment catalog
    pub fn catalog(&self) -> &AssignmentCatalog {
        &self.inner.catalog
    }

    /// Get a shared handle to the grader, for moving into blocking tasks
    pub fn grader(&self) -> Arc<Grader> {
        Arc::clone(&self.inner.grader)
    }

    /// Get a reference to the submission sink
    pub fn submissions(&self) -> &dyn SubmissionSink {
        self.inner.submissions.as_ref()
    }
}
