//! Project listing and publishing service.

use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{NewProject, Project, Role};
use crate::domain::identity::Identity;
use crate::domain::repositories::ProjectRepository;
use crate::error::AppError;
use crate::utils::deadline::within;

const MAX_TITLE_LEN: usize = 200;
const MAX_TEXT_LEN: usize = 5000;

/// Fields submitted by a charity when publishing a project.
#[derive(Debug, Clone, Default)]
pub struct ProjectDraft {
    pub title: String,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub subject: String,
}

/// Service for listing open projects and publishing new ones.
pub struct ProjectService<R: ProjectRepository + ?Sized> {
    repository: Arc<R>,
    store_timeout: Duration,
}

impl<R: ProjectRepository + ?Sized> ProjectService<R> {
    pub fn new(repository: Arc<R>, store_timeout: Duration) -> Self {
        Self {
            repository,
            store_timeout,
        }
    }

    /// Lists open projects, optionally narrowed to subjects containing
    /// `subject_filter` (case-insensitive).
    ///
    /// A blank filter lists everything.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Retrieval`] if the store is unreachable or too slow.
    pub async fn list_open_projects(
        &self,
        subject_filter: Option<&str>,
    ) -> Result<Vec<Project>, AppError> {
        let filter = subject_filter
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string);

        within(
            self.store_timeout,
            "list_open_projects",
            self.repository.list_open(filter),
        )
        .await
    }

    /// Publishes a project on behalf of a charity.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] if the caller is not a charity.
    /// Returns [`AppError::Validation`] if title or subject is blank or a field
    /// is too long.
    pub async fn create_project(
        &self,
        identity: &Identity,
        draft: ProjectDraft,
    ) -> Result<Project, AppError> {
        if !identity.is(Role::Charity) {
            return Err(AppError::forbidden(
                "Only charities can create projects.",
                json!({ "role": identity.role }),
            ));
        }

        let title = required_field("title", &draft.title, MAX_TITLE_LEN)?;
        let subject = required_field("subject", &draft.subject, MAX_TITLE_LEN)?;
        let description = optional_field("description", draft.description, MAX_TEXT_LEN)?;
        let requirements = optional_field("requirements", draft.requirements, MAX_TEXT_LEN)?;

        let new_project = NewProject {
            charity_id: identity.profile_id,
            title,
            description,
            requirements,
            subject,
        };

        let project = within(
            self.store_timeout,
            "create_project",
            self.repository.create(new_project),
        )
        .await?;

        tracing::info!(project_id = %project.id, charity_id = %project.charity_id, "Project created");
        Ok(project)
    }

    /// Counts open projects; used by the health check.
    pub async fn count_open_projects(&self) -> Result<i64, AppError> {
        within(
            self.store_timeout,
            "count_open_projects",
            self.repository.count_open(),
        )
        .await
    }
}

fn required_field(name: &'static str, value: &str, max_len: usize) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::bad_request(
            format!("{name} is required"),
            json!({ "field": name }),
        ));
    }
    check_length(name, trimmed, max_len)?;
    Ok(trimmed.to_string())
}

fn optional_field(
    name: &'static str,
    value: Option<String>,
    max_len: usize,
) -> Result<String, AppError> {
    let value = value.unwrap_or_default();
    check_length(name, &value, max_len)?;
    Ok(value)
}

fn check_length(name: &'static str, value: &str, max_len: usize) -> Result<(), AppError> {
    if value.chars().count() > max_len {
        return Err(AppError::bad_request(
            format!("{name} is too long"),
            json!({ "field": name, "max_length": max_len }),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ProjectStatus;
    use crate::domain::repositories::MockProjectRepository;
    use chrono::Utc;
    use uuid::Uuid;

    fn timeout() -> Duration {
        Duration::from_secs(5)
    }

    fn test_project(id: Uuid, subject: &str) -> Project {
        Project {
            id,
            charity_id: Uuid::new_v4(),
            title: "River clean-up data".to_string(),
            description: String::new(),
            requirements: String::new(),
            subject: subject.to_string(),
            status: ProjectStatus::Open,
            charity_organization: Some("Oxfam".to_string()),
            created_at: Utc::now(),
        }
    }

    fn draft(title: &str, subject: &str) -> ProjectDraft {
        ProjectDraft {
            title: title.to_string(),
            description: Some("Analyse water samples".to_string()),
            requirements: None,
            subject: subject.to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_passes_subject_filter() {
        let mut mock_repo = MockProjectRepository::new();
        let project = test_project(Uuid::new_v4(), "chemistry");

        mock_repo
            .expect_list_open()
            .withf(|filter| filter.as_deref() == Some("chem"))
            .times(1)
            .returning(move |_| Ok(vec![project.clone()]));

        let service = ProjectService::new(Arc::new(mock_repo), timeout());
        let projects = service.list_open_projects(Some("chem")).await.unwrap();

        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].subject, "chemistry");
    }

    #[tokio::test]
    async fn test_blank_filter_lists_everything() {
        let mut mock_repo = MockProjectRepository::new();

        mock_repo
            .expect_list_open()
            .withf(|filter| filter.is_none())
            .times(2)
            .returning(|_| Ok(vec![]));

        let service = ProjectService::new(Arc::new(mock_repo), timeout());

        assert!(service.list_open_projects(Some("   ")).await.is_ok());
        assert!(service.list_open_projects(None).await.is_ok());
    }

    #[tokio::test]
    async fn test_list_propagates_retrieval_error() {
        let mut mock_repo = MockProjectRepository::new();
        mock_repo
            .expect_list_open()
            .returning(|_| Err(AppError::retrieval("down", json!({}))));

        let service = ProjectService::new(Arc::new(mock_repo), timeout());
        let err = service.list_open_projects(None).await.unwrap_err();

        assert!(err.is_retrieval());
    }

    #[tokio::test]
    async fn test_create_project_as_charity() {
        let mut mock_repo = MockProjectRepository::new();
        let charity = Identity::new(Uuid::new_v4(), Role::Charity, Some("Oxfam".to_string()));
        let charity_id = charity.profile_id;

        mock_repo
            .expect_create()
            .withf(move |p| {
                p.charity_id == charity_id && p.title == "Soil study" && p.requirements.is_empty()
            })
            .times(1)
            .returning(|p| {
                let mut project = test_project(Uuid::new_v4(), &p.subject);
                project.charity_id = p.charity_id;
                project.title = p.title;
                Ok(project)
            });

        let service = ProjectService::new(Arc::new(mock_repo), timeout());
        let project = service
            .create_project(&charity, draft("  Soil study ", "biology"))
            .await
            .unwrap();

        assert_eq!(project.title, "Soil study");
        assert_eq!(project.charity_id, charity_id);
    }

    #[tokio::test]
    async fn test_create_project_rejects_non_charity() {
        let mut mock_repo = MockProjectRepository::new();
        mock_repo.expect_create().times(0);

        let service = ProjectService::new(Arc::new(mock_repo), timeout());

        for role in [Role::Student, Role::Professor] {
            let identity = Identity::new(Uuid::new_v4(), role, None);
            let err = service
                .create_project(&identity, draft("Soil study", "biology"))
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::Forbidden { .. }));
        }
    }

    #[tokio::test]
    async fn test_create_project_requires_title_and_subject() {
        let mut mock_repo = MockProjectRepository::new();
        mock_repo.expect_create().times(0);

        let service = ProjectService::new(Arc::new(mock_repo), timeout());
        let charity = Identity::new(Uuid::new_v4(), Role::Charity, None);

        let err = service
            .create_project(&charity, draft("   ", "biology"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));

        let err = service
            .create_project(&charity, draft("Soil study", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_create_project_rejects_long_description() {
        let mut mock_repo = MockProjectRepository::new();
        mock_repo.expect_create().times(0);

        let service = ProjectService::new(Arc::new(mock_repo), timeout());
        let charity = Identity::new(Uuid::new_v4(), Role::Charity, None);
        let mut long = draft("Soil study", "biology");
        long.description = Some("x".repeat(MAX_TEXT_LEN + 1));

        let err = service.create_project(&charity, long).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }
}
