//! Workshop response DTOs

use serde::Serialize;

use crate::models::Workshop;

/// Workshop list response
#[derive(Debug, Serialize)]
pub struct WorkshopListResponse {
    pub workshops: Vec<Workshop>,
    pub total: usize,
}
