//! Workshop repository

use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Workshop, WorkshopModule},
};

/// Fields for a new workshop, with defaults already applied
#[derive(Debug, Clone)]
pub struct NewWorkshop {
    pub title: String,
    pub description: String,
    pub instructor_id: Uuid,
    pub level: String,
    pub price: String,
    pub language: String,
    pub category: String,
    pub thumbnail: Option<String>,
    pub tags: Vec<String>,
    pub modules: Vec<WorkshopModule>,
}

/// Repository for workshop database operations
pub struct WorkshopRepository;

impl WorkshopRepository {
    /// Insert a workshop
    pub async fn create(pool: &PgPool, workshop: NewWorkshop) -> AppResult<Workshop> {
        let created = sqlx::query_as::<_, Workshop>(
            r#"
            INSERT INTO workshops (
                title, description, instructor_id, level, price,
                language, category, thumbnail, tags, modules
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&workshop.title)
        .bind(&workshop.description)
        .bind(workshop.instructor_id)
        .bind(&workshop.level)
        .bind(&workshop.price)
        .bind(&workshop.language)
        .bind(&workshop.category)
        .bind(&workshop.thumbnail)
        .bind(&workshop.tags)
        .bind(Json(&workshop.modules))
        .fetch_one(pool)
        .await?;

        Ok(created)
    }

    /// Find workshop by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Workshop>> {
        let workshop = sqlx::query_as::<_, Workshop>(r#"SELECT * FROM workshops WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(workshop)
    }

    /// All workshops, newest first
    pub async fn list(pool: &PgPool) -> AppResult<Vec<Workshop>> {
        let workshops = sqlx::query_as::<_, Workshop>(
            r#"SELECT * FROM workshops ORDER BY created_at DESC"#,
        )
        .fetch_all(pool)
        .await?;

        Ok(workshops)
    }
}
