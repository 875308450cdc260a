//! Workshop request DTOs

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::{MAX_WORKSHOP_DESCRIPTION_LENGTH, MAX_WORKSHOP_TITLE_LENGTH},
    models::WorkshopModule,
    utils::validation::validate_tags,
};

/// Create workshop request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateWorkshopRequest {
    #[validate(length(min = 1, max = MAX_WORKSHOP_TITLE_LENGTH))]
    pub title: String,

    #[validate(length(min = 1, max = MAX_WORKSHOP_DESCRIPTION_LENGTH))]
    pub description: String,

    pub instructor_id: Uuid,

    #[validate(length(min = 1, max = 64))]
    pub level: Option<String>,

    #[validate(length(min = 1, max = 64))]
    pub price: Option<String>,

    #[validate(length(min = 1, max = 64))]
    pub language: Option<String>,

    #[validate(length(min = 1, max = 128))]
    pub category: Option<String>,

    #[validate(url)]
    pub thumbnail: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_tags"))]
    pub tags: Vec<String>,

    /// Lesson types are checked while deserializing
    #[serde(default)]
    pub modules: Vec<WorkshopModule>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> CreateWorkshopRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_minimal_request() {
        let request = parse(&format!(
            r#"{{"title": "Rust 101", "description": "Intro", "instructor_id": "{}"}}"#,
            Uuid::nil()
        ));

        assert!(request.validate().is_ok());
        assert!(request.level.is_none());
        assert!(request.tags.is_empty());
        assert!(request.modules.is_empty());
    }

    #[test]
    fn test_empty_title_is_rejected() {
        let request = parse(&format!(
            r#"{{"title": "", "description": "Intro", "instructor_id": "{}"}}"#,
            Uuid::nil()
        ));
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_modules_are_checked_structurally() {
        let bad = serde_json::from_str::<CreateWorkshopRequest>(&format!(
            r#"{{
                "title": "Rust 101",
                "description": "Intro",
                "instructor_id": "{}",
                "modules": [{{"id": "m1", "title": "Basics", "lessons": [
                    {{"id": "l1", "title": "Hello", "type": "karaoke"}}
                ]}}]
            }}"#,
            Uuid::nil()
        ));
        assert!(bad.is_err());
    }
}
