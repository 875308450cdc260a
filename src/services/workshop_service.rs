//! Workshop service

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    constants::workshop_defaults,
    db::repositories::{NewWorkshop, UserRepository, WorkshopRepository},
    error::{AppError, AppResult},
    handlers::workshops::request::CreateWorkshopRequest,
    models::Workshop,
    utils::sanitize_string,
};

/// Workshop service for business logic
pub struct WorkshopService;

impl WorkshopService {
    /// All workshops, newest first
    pub async fn list(pool: &PgPool) -> AppResult<Vec<Workshop>> {
        WorkshopRepository::list(pool).await
    }

    /// Get a workshop by ID
    pub async fn get(pool: &PgPool, id: &Uuid) -> AppResult<Workshop> {
        WorkshopRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Workshop not found".to_string()))
    }

    /// Create a workshop, filling in defaults for omitted fields
    pub async fn create(
        pool: &PgPool,
        created_by: &Uuid,
        payload: CreateWorkshopRequest,
    ) -> AppResult<Workshop> {
        if !UserRepository::exists(pool, &payload.instructor_id).await? {
            return Err(AppError::NotFound("Instructor not found".to_string()));
        }

        let workshop = WorkshopRepository::create(pool, Self::with_defaults(payload)).await?;

        tracing::info!(
            workshop_id = %workshop.id,
            instructor_id = %workshop.instructor_id,
            created_by = %created_by,
            modules = workshop.modules.len(),
            lessons = workshop.lesson_count(),
            "Workshop created"
        );

        Ok(workshop)
    }

    fn with_defaults(payload: CreateWorkshopRequest) -> NewWorkshop {
        let or_default =
            |value: Option<String>, default: &str| value.unwrap_or_else(|| default.to_string());

        NewWorkshop {
            title: sanitize_string(&payload.title),
            description: payload.description.trim().to_string(),
            instructor_id: payload.instructor_id,
            level: or_default(payload.level, workshop_defaults::LEVEL),
            price: or_default(payload.price, workshop_defaults::PRICE),
            language: or_default(payload.language, workshop_defaults::LANGUAGE),
            category: or_default(payload.category, workshop_defaults::CATEGORY),
            thumbnail: payload.thumbnail,
            tags: payload.tags.iter().map(|t| t.trim().to_string()).collect(),
            modules: payload.modules,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_applied() {
        let payload: CreateWorkshopRequest = serde_json::from_str(&format!(
            r#"{{"title": " Rust 101 ", "description": "Intro", "instructor_id": "{}", "tags": [" rust "]}}"#,
            Uuid::nil()
        ))
        .unwrap();

        let workshop = WorkshopService::with_defaults(payload);
        assert_eq!(workshop.title, "Rust 101");
        assert_eq!(workshop.level, "Beginner");
        assert_eq!(workshop.price, "Free");
        assert_eq!(workshop.language, "English");
        assert_eq!(workshop.category, "Web Development");
        assert_eq!(workshop.tags, vec!["rust"]);
        assert!(workshop.modules.is_empty());
    }

    #[test]
    fn test_explicit_values_win() {
        let payload: CreateWorkshopRequest = serde_json::from_str(&format!(
            r#"{{"title": "Go", "description": "d", "instructor_id": "{}", "level": "Advanced", "price": "$49"}}"#,
            Uuid::nil()
        ))
        .unwrap();

        let workshop = WorkshopService::with_defaults(payload);
        assert_eq!(workshop.level, "Advanced");
        assert_eq!(workshop.price, "$49");
        assert_eq!(workshop.category, "Web Development");
    }
}
