//! Workshop model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Workshop database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Workshop {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub instructor_id: Uuid,
    pub level: String,
    pub price: String,
    pub language: String,
    pub category: String,
    pub rating: f64,
    pub reviews: i32,
    pub students: i32,
    pub thumbnail: Option<String>,
    pub tags: Vec<String>,
    pub modules: Json<Vec<WorkshopModule>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A module inside a workshop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkshopModule {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
}

/// A lesson inside a module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub lesson_type: LessonType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<serde_json::Value>,
}

/// Kind of lesson
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LessonType {
    Video,
    Reading,
    Interactive,
    Exercise,
}

impl Workshop {
    /// Total number of lessons across all modules
    pub fn lesson_count(&self) -> usize {
        self.modules.iter().map(|m| m.lessons.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lesson_type_field_name() {
        let lesson: Lesson = serde_json::from_str(
            r#"{"id": "l1", "title": "Intro", "type": "video", "duration": "10 min"}"#,
        )
        .unwrap();
        assert_eq!(lesson.lesson_type, LessonType::Video);
        assert!(lesson.content.is_none());

        let json = serde_json::to_value(&lesson).unwrap();
        assert_eq!(json["type"], "video");
    }

    #[test]
    fn test_unknown_lesson_type_is_rejected() {
        let result: Result<Lesson, _> =
            serde_json::from_str(r#"{"id": "l1", "title": "Intro", "type": "podcast"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_module_defaults() {
        let module: WorkshopModule =
            serde_json::from_str(r#"{"id": "m1", "title": "Basics"}"#).unwrap();
        assert_eq!(module.progress, 0.0);
        assert!(module.lessons.is_empty());
    }
}
