//! PostgreSQL implementation of the interest repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use super::rows::{PROJECT_COLUMNS, ProjectRow, parse_role};
use crate::domain::entities::{
    Interest, InterestOutcome, InterestWithProfile, InterestWithProject, InterestedUser,
    NewInterest, ProfileId, ProjectId,
};
use crate::domain::repositories::InterestRepository;
use crate::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct InterestRow {
    id: i64,
    project_id: Uuid,
    user_id: Uuid,
    message: String,
    created_at: DateTime<Utc>,
}

impl From<InterestRow> for Interest {
    fn from(row: InterestRow) -> Self {
        Interest {
            id: row.id,
            project_id: row.project_id,
            user_id: row.user_id,
            message: row.message,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct InterestProfileRow {
    user_id: Uuid,
    message: String,
    profile_role: Option<String>,
    profile_organization: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct InterestProjectRow {
    interest_id: i64,
    interest_message: String,
    interest_created_at: DateTime<Utc>,
    user_id: Uuid,
    #[sqlx(flatten)]
    project: ProjectRow,
}

/// PostgreSQL repository for interests.
///
/// The `(project_id, user_id)` unique constraint is what makes repeated
/// declarations surface as [`InterestOutcome::AlreadyExists`].
pub struct PgInterestRepository {
    pool: Arc<PgPool>,
}

impl PgInterestRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InterestRepository for PgInterestRepository {
    async fn list_for_project(
        &self,
        project_id: ProjectId,
    ) -> Result<Vec<InterestWithProfile>, AppError> {
        let rows = sqlx::query_as::<_, InterestProfileRow>(
            r#"
            SELECT i.user_id,
                   i.message,
                   u.role AS profile_role,
                   u.organization AS profile_organization
            FROM interests i
            LEFT JOIN profiles u ON u.id = i.user_id
            WHERE i.project_id = $1
            ORDER BY i.created_at, i.id
            "#,
        )
        .bind(project_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter()
            .map(|row| {
                let profile = row
                    .profile_role
                    .as_deref()
                    .map(parse_role)
                    .transpose()?
                    .map(|role| InterestedUser {
                        role,
                        organization: row.profile_organization,
                    });

                Ok(InterestWithProfile {
                    user_id: row.user_id,
                    message: row.message,
                    profile,
                })
            })
            .collect()
    }

    async fn sponsored_project_ids(
        &self,
        organization: &str,
        project_ids: &[ProjectId],
    ) -> Result<Vec<ProjectId>, AppError> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT DISTINCT i.project_id
            FROM interests i
            JOIN profiles u ON u.id = i.user_id
            WHERE u.role = 'professor'
              AND u.organization = $1
              AND i.project_id = ANY($2)
            "#,
        )
        .bind(organization)
        .bind(project_ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(ids)
    }

    async fn insert(&self, new_interest: NewInterest) -> InterestOutcome {
        let result = sqlx::query_as::<_, InterestRow>(
            r#"
            INSERT INTO interests (project_id, user_id, message)
            VALUES ($1, $2, $3)
            RETURNING id, project_id, user_id, message, created_at
            "#,
        )
        .bind(new_interest.project_id)
        .bind(new_interest.user_id)
        .bind(new_interest.message)
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(row) => InterestOutcome::Inserted(row.into()),
            Err(e)
                if e
                    .as_database_error()
                    .is_some_and(|db| db.is_unique_violation()) =>
            {
                InterestOutcome::AlreadyExists
            }
            Err(e) => InterestOutcome::Failed(e.into()),
        }
    }

    async fn list_for_user(
        &self,
        user_id: ProfileId,
    ) -> Result<Vec<InterestWithProject>, AppError> {
        let sql = format!(
            r#"
            SELECT i.id AS interest_id,
                   i.message AS interest_message,
                   i.created_at AS interest_created_at,
                   i.user_id,
                   {PROJECT_COLUMNS}
            FROM interests i
            JOIN projects p ON p.id = i.project_id
            LEFT JOIN profiles c ON c.id = p.charity_id
            WHERE i.user_id = $1
            ORDER BY i.created_at DESC, i.id
            "#
        );

        let rows = sqlx::query_as::<_, InterestProjectRow>(&sql)
            .bind(user_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| InterestWithProject {
                interest: Interest {
                    id: row.interest_id,
                    project_id: row.project.id,
                    user_id: row.user_id,
                    message: row.interest_message,
                    created_at: row.interest_created_at,
                },
                project: row.project.into(),
            })
            .collect())
    }
}
