//! Sponsorship filtering over candidate projects.

use futures::stream::{self, StreamExt};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{Project, ProjectId};
use crate::domain::repositories::InterestRepository;
use crate::domain::sponsorship::SponsorshipMatcher;
use crate::error::AppError;
use crate::utils::deadline::within;

/// How interest records are fetched for the candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SponsorshipStrategy {
    /// One join query computes the sponsored ids for all candidates.
    #[default]
    Batched,
    /// One interest lookup per candidate, run with bounded concurrency.
    PerProject,
}

impl SponsorshipStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SponsorshipStrategy::Batched => "batched",
            SponsorshipStrategy::PerProject => "per_project",
        }
    }
}

impl fmt::Display for SponsorshipStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown sponsorship strategy '{0}', expected 'batched' or 'per_project'")]
pub struct UnknownStrategy(String);

impl FromStr for SponsorshipStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "batched" => Ok(SponsorshipStrategy::Batched),
            "per_project" => Ok(SponsorshipStrategy::PerProject),
            other => Err(UnknownStrategy(other.to_string())),
        }
    }
}

/// Projects that passed the filter.
///
/// `unchecked` counts candidates whose interests could not be read; they are
/// excluded from `projects`.
#[derive(Debug, Clone, Default)]
pub struct SponsorshipResult {
    pub projects: Vec<Project>,
    pub unchecked: usize,
}

/// Keeps only projects sponsored by the requester's organization.
pub struct SponsorshipService<R: InterestRepository + ?Sized> {
    repository: Arc<R>,
    strategy: SponsorshipStrategy,
    concurrency: usize,
    store_timeout: Duration,
}

impl<R: InterestRepository + ?Sized> SponsorshipService<R> {
    pub fn new(
        repository: Arc<R>,
        strategy: SponsorshipStrategy,
        concurrency: usize,
        store_timeout: Duration,
    ) -> Self {
        Self {
            repository,
            strategy,
            concurrency: concurrency.max(1),
            store_timeout,
        }
    }

    pub fn strategy(&self) -> SponsorshipStrategy {
        self.strategy
    }

    /// Filters `candidates` down to those sponsored by `organization`,
    /// preserving candidate order.
    ///
    /// An unset or empty organization yields no projects without touching the
    /// store.
    ///
    /// # Errors
    ///
    /// With the batched strategy, returns [`AppError::Retrieval`] if the join
    /// query fails. The per-project strategy never fails as a whole: a failed
    /// lookup only excludes its project and is counted in
    /// [`SponsorshipResult::unchecked`].
    pub async fn filter(
        &self,
        candidates: &[Project],
        organization: Option<&str>,
    ) -> Result<SponsorshipResult, AppError> {
        let matcher = SponsorshipMatcher::new(organization);
        let Some(org) = matcher.organization() else {
            return Ok(SponsorshipResult::default());
        };

        if candidates.is_empty() {
            return Ok(SponsorshipResult::default());
        }

        match self.strategy {
            SponsorshipStrategy::Batched => self.filter_batched(&matcher, org, candidates).await,
            SponsorshipStrategy::PerProject => {
                Ok(self.filter_per_project(&matcher, candidates).await)
            }
        }
    }

    async fn filter_batched(
        &self,
        matcher: &SponsorshipMatcher<'_>,
        organization: &str,
        candidates: &[Project],
    ) -> Result<SponsorshipResult, AppError> {
        let ids: Vec<ProjectId> = candidates.iter().map(|p| p.id).collect();

        let sponsored: HashSet<ProjectId> = within(
            self.store_timeout,
            "sponsored_project_ids",
            self.repository.sponsored_project_ids(organization, &ids),
        )
        .await?
        .into_iter()
        .collect();

        Ok(SponsorshipResult {
            projects: matcher.retain(candidates, &sponsored),
            unchecked: 0,
        })
    }

    async fn filter_per_project(
        &self,
        matcher: &SponsorshipMatcher<'_>,
        candidates: &[Project],
    ) -> SponsorshipResult {
        let store_timeout = self.store_timeout;
        let ids: Vec<ProjectId> = candidates.iter().map(|p| p.id).collect();

        let lookups: Vec<_> = stream::iter(ids)
            .map(|project_id| {
                let repository = Arc::clone(&self.repository);
                async move {
                    let result = within(
                        store_timeout,
                        "list_interests_for_project",
                        repository.list_for_project(project_id),
                    )
                    .await;
                    (project_id, result)
                }
            })
            .boxed()
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut interests = HashMap::with_capacity(lookups.len());
        let mut unchecked = 0;

        for (project_id, result) in lookups {
            match result {
                Ok(records) => {
                    interests.insert(project_id, records);
                }
                Err(e) => {
                    tracing::warn!(%project_id, error = %e, "Interest lookup failed, treating project as unsponsored");
                    unchecked += 1;
                }
            }
        }

        SponsorshipResult {
            projects: matcher.filter(candidates, &interests),
            unchecked,
        }
    }
}
