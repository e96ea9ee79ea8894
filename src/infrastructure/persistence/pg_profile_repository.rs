//! PostgreSQL implementation of the profile repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use super::rows::ProfileRow;
use crate::domain::entities::{NewProfile, Profile, ProfileId};
use crate::domain::repositories::ProfileRepository;
use crate::error::AppError;

pub struct PgProfileRepository {
    pool: Arc<PgPool>,
}

impl PgProfileRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn find_by_id(&self, id: ProfileId) -> Result<Option<Profile>, AppError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT id, role, full_name, organization, subject, created_at
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Profile::try_from).transpose()
    }

    async fn create(&self, new_profile: NewProfile) -> Result<Profile, AppError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            INSERT INTO profiles (role, full_name, organization, subject)
            VALUES ($1, $2, $3, $4)
            RETURNING id, role, full_name, organization, subject, created_at
            "#,
        )
        .bind(new_profile.role.as_str())
        .bind(new_profile.full_name)
        .bind(new_profile.organization)
        .bind(new_profile.subject)
        .fetch_one(self.pool.as_ref())
        .await?;

        Profile::try_from(row)
    }

    async fn list(&self) -> Result<Vec<Profile>, AppError> {
        let rows = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT id, role, full_name, organization, subject, created_at
            FROM profiles
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(Profile::try_from).collect()
    }
}
