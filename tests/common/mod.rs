#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{Duration as ChronoDuration, Utc};
use serde_json::json;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

use dissconnect::application::services::SponsorshipStrategy;
use dissconnect::domain::entities::{
    Interest, InterestOutcome, InterestWithProfile, InterestWithProject, InterestedUser,
    NewInterest, NewProfile, NewProject, Profile, ProfileId, Project, ProjectId, ProjectStatus,
    Role,
};
use dissconnect::domain::identity::Identity;
use dissconnect::domain::repositories::{
    InterestRepository, ProfileRepository, ProjectRepository, Session, SessionRepository,
};
use dissconnect::error::AppError;
use dissconnect::routes::routes;
use dissconnect::state::{AppState, Repositories, ServiceSettings};

pub const TEST_SECRET: &str = "test-signing-secret";

#[derive(Default)]
struct Tables {
    profiles: Vec<Profile>,
    projects: Vec<Project>,
    interests: Vec<Interest>,
    sessions: Vec<(Session, String)>,
    next_interest_id: i64,
    next_session_id: i64,
}

/// In-memory store implementing every repository trait, with failure
/// injection by operation name.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    failing: Mutex<HashSet<&'static str>>,
    failing_lookups: Mutex<HashSet<ProjectId>>,
    slow: Mutex<Option<(&'static str, Duration)>>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Makes every call to `operation` fail with a retrieval error.
    pub fn fail(&self, operation: &'static str) {
        self.failing.lock().unwrap().insert(operation);
    }

    /// Makes the interest lookup of a single project fail.
    pub fn fail_lookup_for(&self, project_id: ProjectId) {
        self.failing_lookups.lock().unwrap().insert(project_id);
    }

    /// Delays every call to `operation`.
    pub fn slow_down(&self, operation: &'static str, delay: Duration) {
        *self.slow.lock().unwrap() = Some((operation, delay));
    }

    async fn enter(&self, operation: &'static str) -> Result<(), AppError> {
        let delay = match *self.slow.lock().unwrap() {
            Some((op, delay)) if op == operation => Some(delay),
            _ => None,
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.lock().unwrap().contains(operation) {
            return Err(AppError::retrieval(
                "connection refused",
                json!({ "operation": operation }),
            ));
        }
        Ok(())
    }

    pub fn add_profile(&self, role: Role, organization: Option<&str>) -> Profile {
        let profile = Profile {
            id: Uuid::new_v4(),
            role,
            full_name: None,
            organization: organization.map(str::to_string),
            subject: None,
            created_at: Utc::now(),
        };
        self.tables.lock().unwrap().profiles.push(profile.clone());
        profile
    }

    pub fn add_project(&self, charity: &Profile, title: &str, subject: &str) -> Project {
        self.add_project_with_status(charity, title, subject, ProjectStatus::Open)
    }

    pub fn add_project_with_status(
        &self,
        charity: &Profile,
        title: &str,
        subject: &str,
        status: ProjectStatus,
    ) -> Project {
        let mut tables = self.tables.lock().unwrap();
        let offset = tables.projects.len() as i64;
        let project = Project {
            id: Uuid::new_v4(),
            charity_id: charity.id,
            title: title.to_string(),
            description: String::new(),
            requirements: String::new(),
            subject: subject.to_string(),
            status,
            charity_organization: charity.organization.clone(),
            created_at: Utc::now() + ChronoDuration::seconds(offset),
        };
        tables.projects.push(project.clone());
        project
    }

    pub fn add_interest(&self, project: &Project, user: &Profile) {
        let mut tables = self.tables.lock().unwrap();
        tables.next_interest_id += 1;
        let interest = Interest {
            id: tables.next_interest_id,
            project_id: project.id,
            user_id: user.id,
            message: String::new(),
            created_at: Utc::now(),
        };
        tables.interests.push(interest);
    }

    pub fn interests(&self) -> Vec<Interest> {
        self.tables.lock().unwrap().interests.clone()
    }

    pub fn projects(&self) -> Vec<Project> {
        self.tables.lock().unwrap().projects.clone()
    }

    pub fn sessions(&self) -> Vec<Session> {
        self.tables
            .lock()
            .unwrap()
            .sessions
            .iter()
            .map(|(s, _)| s.clone())
            .collect()
    }

    fn sorted_newest_first(mut projects: Vec<Project>) -> Vec<Project> {
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        projects
    }
}

#[async_trait]
impl ProfileRepository for MemoryStore {
    async fn find_by_id(&self, id: ProfileId) -> Result<Option<Profile>, AppError> {
        self.enter("find_profile").await?;
        let tables = self.tables.lock().unwrap();
        Ok(tables.profiles.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, new_profile: NewProfile) -> Result<Profile, AppError> {
        self.enter("create_profile").await?;
        let profile = Profile {
            id: Uuid::new_v4(),
            role: new_profile.role,
            full_name: new_profile.full_name,
            organization: new_profile.organization,
            subject: new_profile.subject,
            created_at: Utc::now(),
        };
        self.tables.lock().unwrap().profiles.push(profile.clone());
        Ok(profile)
    }

    async fn list(&self) -> Result<Vec<Profile>, AppError> {
        self.enter("list_profiles").await?;
        Ok(self.tables.lock().unwrap().profiles.clone())
    }
}

#[async_trait]
impl ProjectRepository for MemoryStore {
    async fn list_open(&self, subject_filter: Option<String>) -> Result<Vec<Project>, AppError> {
        self.enter("list_open").await?;
        let needle = subject_filter.map(|s| s.to_lowercase());
        let tables = self.tables.lock().unwrap();
        let projects = tables
            .projects
            .iter()
            .filter(|p| p.status.is_open())
            .filter(|p| {
                needle
                    .as_deref()
                    .is_none_or(|n| p.subject.to_lowercase().contains(n))
            })
            .cloned()
            .collect();
        Ok(Self::sorted_newest_first(projects))
    }

    async fn list_by_charity(&self, charity_id: ProfileId) -> Result<Vec<Project>, AppError> {
        self.enter("list_by_charity").await?;
        let tables = self.tables.lock().unwrap();
        let projects = tables
            .projects
            .iter()
            .filter(|p| p.charity_id == charity_id)
            .cloned()
            .collect();
        Ok(Self::sorted_newest_first(projects))
    }

    async fn create(&self, new_project: NewProject) -> Result<Project, AppError> {
        self.enter("create_project").await?;
        let mut tables = self.tables.lock().unwrap();
        let charity_organization = tables
            .profiles
            .iter()
            .find(|p| p.id == new_project.charity_id)
            .and_then(|p| p.organization.clone());
        let project = Project {
            id: Uuid::new_v4(),
            charity_id: new_project.charity_id,
            title: new_project.title,
            description: new_project.description,
            requirements: new_project.requirements,
            subject: new_project.subject,
            status: ProjectStatus::Open,
            charity_organization,
            created_at: Utc::now() + ChronoDuration::seconds(tables.projects.len() as i64),
        };
        tables.projects.push(project.clone());
        Ok(project)
    }

    async fn count_open(&self) -> Result<i64, AppError> {
        self.enter("count_open").await?;
        let tables = self.tables.lock().unwrap();
        Ok(tables.projects.iter().filter(|p| p.status.is_open()).count() as i64)
    }
}

#[async_trait]
impl InterestRepository for MemoryStore {
    async fn list_for_project(
        &self,
        project_id: ProjectId,
    ) -> Result<Vec<InterestWithProfile>, AppError> {
        self.enter("list_for_project").await?;
        if self.failing_lookups.lock().unwrap().contains(&project_id) {
            return Err(AppError::retrieval("lookup failed", json!({})));
        }
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .interests
            .iter()
            .filter(|i| i.project_id == project_id)
            .map(|i| InterestWithProfile {
                user_id: i.user_id,
                message: i.message.clone(),
                profile: tables
                    .profiles
                    .iter()
                    .find(|p| p.id == i.user_id)
                    .map(|p| InterestedUser {
                        role: p.role,
                        organization: p.organization.clone(),
                    }),
            })
            .collect())
    }

    async fn sponsored_project_ids(
        &self,
        organization: &str,
        project_ids: &[ProjectId],
    ) -> Result<Vec<ProjectId>, AppError> {
        self.enter("sponsored_project_ids").await?;
        let tables = self.tables.lock().unwrap();
        let mut ids: Vec<ProjectId> = tables
            .interests
            .iter()
            .filter(|i| project_ids.contains(&i.project_id))
            .filter(|i| {
                tables.profiles.iter().any(|p| {
                    p.id == i.user_id
                        && p.role == Role::Professor
                        && p.organization.as_deref() == Some(organization)
                })
            })
            .map(|i| i.project_id)
            .collect();
        ids.dedup();
        Ok(ids)
    }

    async fn insert(&self, new_interest: NewInterest) -> InterestOutcome {
        if let Err(e) = self.enter("insert_interest").await {
            return InterestOutcome::Failed(e);
        }
        let mut tables = self.tables.lock().unwrap();
        if !tables.projects.iter().any(|p| p.id == new_interest.project_id) {
            return InterestOutcome::Failed(AppError::not_found(
                "Referenced record does not exist",
                json!({ "constraint": "interests_project_id_fkey" }),
            ));
        }
        if tables.interests.iter().any(|i| {
            i.project_id == new_interest.project_id && i.user_id == new_interest.user_id
        }) {
            return InterestOutcome::AlreadyExists;
        }
        tables.next_interest_id += 1;
        let interest = Interest {
            id: tables.next_interest_id,
            project_id: new_interest.project_id,
            user_id: new_interest.user_id,
            message: new_interest.message,
            created_at: Utc::now(),
        };
        tables.interests.push(interest.clone());
        InterestOutcome::Inserted(interest)
    }

    async fn list_for_user(
        &self,
        user_id: ProfileId,
    ) -> Result<Vec<InterestWithProject>, AppError> {
        self.enter("list_for_user").await?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .interests
            .iter()
            .filter(|i| i.user_id == user_id)
            .filter_map(|i| {
                tables
                    .projects
                    .iter()
                    .find(|p| p.id == i.project_id)
                    .map(|p| InterestWithProject {
                        interest: i.clone(),
                        project: p.clone(),
                    })
            })
            .collect())
    }
}

#[async_trait]
impl SessionRepository for MemoryStore {
    async fn find_identity(&self, token_hash: &str) -> Result<Option<Identity>, AppError> {
        self.enter("find_identity").await?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .sessions
            .iter()
            .find(|(s, hash)| hash == token_hash && s.revoked_at.is_none())
            .and_then(|(s, _)| tables.profiles.iter().find(|p| p.id == s.profile_id))
            .map(|p| Identity::new(p.id, p.role, p.organization.clone())))
    }

    async fn touch(&self, token_hash: &str) -> Result<(), AppError> {
        self.enter("touch").await?;
        let mut tables = self.tables.lock().unwrap();
        if let Some((session, _)) = tables.sessions.iter_mut().find(|(_, h)| h == token_hash) {
            session.last_used_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn create(
        &self,
        profile_id: ProfileId,
        token_hash: &str,
        label: &str,
    ) -> Result<Session, AppError> {
        self.enter("create_session").await?;
        let mut tables = self.tables.lock().unwrap();
        tables.next_session_id += 1;
        let session = Session {
            id: tables.next_session_id,
            profile_id,
            label: label.to_string(),
            created_at: Utc::now(),
            last_used_at: None,
            revoked_at: None,
        };
        tables
            .sessions
            .push((session.clone(), token_hash.to_string()));
        Ok(session)
    }

    async fn list_for_profile(&self, profile_id: ProfileId) -> Result<Vec<Session>, AppError> {
        self.enter("list_sessions").await?;
        Ok(self
            .sessions()
            .into_iter()
            .filter(|s| s.profile_id == profile_id)
            .collect())
    }

    async fn revoke(&self, id: i64) -> Result<bool, AppError> {
        self.enter("revoke").await?;
        let mut tables = self.tables.lock().unwrap();
        match tables
            .sessions
            .iter_mut()
            .find(|(s, _)| s.id == id && s.revoked_at.is_none())
        {
            Some((session, _)) => {
                session.revoked_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn revoke_by_hash(&self, token_hash: &str) -> Result<bool, AppError> {
        self.enter("revoke").await?;
        let mut tables = self.tables.lock().unwrap();
        match tables
            .sessions
            .iter_mut()
            .find(|(s, h)| h == token_hash && s.revoked_at.is_none())
        {
            Some((session, _)) => {
                session.revoked_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<MemoryStore>,
    pub state: AppState,
}

impl TestApp {
    /// Issues a session token for `profile`.
    pub async fn token_for(&self, profile: &Profile) -> String {
        let (token, _) = self
            .state
            .auth_service
            .issue_session(profile.id, "test")
            .await
            .unwrap();
        token
    }
}

pub fn create_test_state(store: Arc<MemoryStore>, strategy: SponsorshipStrategy) -> AppState {
    create_test_state_with_timeout(store, strategy, Duration::from_secs(5))
}

pub fn create_test_state_with_timeout(
    store: Arc<MemoryStore>,
    strategy: SponsorshipStrategy,
    store_timeout: Duration,
) -> AppState {
    let repositories = Repositories {
        profiles: store.clone(),
        projects: store.clone(),
        interests: store.clone(),
        sessions: store,
    };

    AppState::new(
        repositories,
        ServiceSettings {
            session_signing_secret: TEST_SECRET.to_string(),
            sponsorship_strategy: strategy,
            sponsorship_concurrency: 4,
            store_timeout,
            cookie_secure: false,
        },
    )
}

pub fn test_app(strategy: SponsorshipStrategy) -> TestApp {
    test_app_with_state(MemoryStore::new(), |store| {
        create_test_state(store, strategy)
    })
}

pub fn test_app_with_state(
    store: Arc<MemoryStore>,
    build: impl FnOnce(Arc<MemoryStore>) -> AppState,
) -> TestApp {
    let state = build(store.clone());
    let server = TestServer::new(routes(state.clone())).unwrap();

    TestApp {
        server,
        store,
        state,
    }
}

pub fn cookie(token: &str) -> String {
    format!("session_token={token}")
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
