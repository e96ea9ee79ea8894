//! PostgreSQL implementation of the project repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use super::rows::{PROJECT_COLUMNS, ProjectRow};
use crate::domain::entities::{NewProject, ProfileId, Project};
use crate::domain::repositories::ProjectRepository;
use crate::error::AppError;
use crate::utils::like_pattern::contains_pattern;

/// PostgreSQL repository for charity projects.
///
/// Listings are ordered newest first, with the id as a tie-breaker so the
/// order is stable between requests.
pub struct PgProjectRepository {
    pool: Arc<PgPool>,
}

impl PgProjectRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for PgProjectRepository {
    async fn list_open(&self, subject_filter: Option<String>) -> Result<Vec<Project>, AppError> {
        let pattern = subject_filter.as_deref().map(contains_pattern);

        let sql = format!(
            r#"
            SELECT {PROJECT_COLUMNS}
            FROM projects p
            LEFT JOIN profiles c ON c.id = p.charity_id
            WHERE p.status = 'open'
              AND ($1::TEXT IS NULL OR p.subject ILIKE $1)
            ORDER BY p.created_at DESC, p.id
            "#
        );

        let rows = sqlx::query_as::<_, ProjectRow>(&sql)
            .bind(pattern)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Project::from).collect())
    }

    async fn list_by_charity(&self, charity_id: ProfileId) -> Result<Vec<Project>, AppError> {
        let sql = format!(
            r#"
            SELECT {PROJECT_COLUMNS}
            FROM projects p
            LEFT JOIN profiles c ON c.id = p.charity_id
            WHERE p.charity_id = $1
            ORDER BY p.created_at DESC, p.id
            "#
        );

        let rows = sqlx::query_as::<_, ProjectRow>(&sql)
            .bind(charity_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Project::from).collect())
    }

    async fn create(&self, new_project: NewProject) -> Result<Project, AppError> {
        let sql = format!(
            r#"
            WITH p AS (
                INSERT INTO projects (charity_id, title, description, requirements, subject)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING *
            )
            SELECT {PROJECT_COLUMNS}
            FROM p
            LEFT JOIN profiles c ON c.id = p.charity_id
            "#
        );

        let row = sqlx::query_as::<_, ProjectRow>(&sql)
            .bind(new_project.charity_id)
            .bind(new_project.title)
            .bind(new_project.description)
            .bind(new_project.requirements)
            .bind(new_project.subject)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn count_open(&self) -> Result<i64, AppError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM projects WHERE status = 'open'")
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(count)
    }
}
